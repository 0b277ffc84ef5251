//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

use crate::field_config::DEFAULT_CONFIG_DIR;
use crate::pipeline::ExportOptions;

/// JQLで検索したIssueをCSVに書き出す
#[derive(Debug, Parser)]
#[command(name = "jira-extract", version, about = "Export Jira issues matching a JQL query to CSV")]
pub struct Cli {
    /// JQL query
    pub query: String,

    /// CSV output filename (without extension)
    #[arg(long = "csv", default_value = "results")]
    pub csv: String,

    /// Field config filename under the config directory (without extension)
    #[arg(long = "config", default_value = "fields")]
    pub config: String,

    /// Directory holding field config files
    #[arg(long = "config-dir", default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    /// S3 bucket to upload the CSV file and its manifest into
    #[arg(long = "s3", visible_alias = "s")]
    pub bucket: Option<String>,

    /// Include cycle time ("In Progress" to "Resolved", in minutes)
    #[arg(short = 'c')]
    pub cycle: bool,

    /// Include lead time (creation to "Resolved", in minutes)
    #[arg(short = 'l')]
    pub lead: bool,
}

impl Cli {
    pub fn into_options(self) -> ExportOptions {
        ExportOptions {
            query: self.query,
            output_base: self.csv,
            field_config: self.config,
            config_dir: self.config_dir,
            output_dir: PathBuf::from("."),
            bucket: self.bucket,
            include_cycle: self.cycle,
            include_lead: self.lead,
        }
    }
}
