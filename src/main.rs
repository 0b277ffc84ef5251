//! Binary entrypoint for `jira-extract`.

use clap::Parser;
use dotenv::dotenv;
use jira_extract::cli::Cli;
use jira_extract::{Error, JiraClient, JiraConfig, S3Uploader, Uploader, run_export};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .try_init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    info!("looking for credentials in the environment");
    let config = JiraConfig::from_env()?;
    let client = JiraClient::new(config)?;

    let options = cli.into_options();
    let uploader = match options.bucket {
        Some(_) => Some(S3Uploader::from_env().await),
        None => None,
    };

    run_export(&client, &options, uploader.as_ref().map(|u| u as &dyn Uploader)).await?;
    Ok(())
}

fn report(err: &Error) {
    match err {
        Error::QueryRejected {
            status,
            errors,
            warnings,
        } => {
            error!("request returned with error code: {}", status);
            for message in errors {
                error!("Error: {}", message);
            }
            for message in warnings {
                warn!("Warning: {}", message);
            }
        }
        other => error!("{}", other),
    }
}
