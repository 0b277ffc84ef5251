use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

use crate::client::JiraClient;
use crate::error::{Error, Result};
use crate::extract::extract_row;
use crate::fetcher::{PAGE_SIZE, PaginatedFetcher};
use crate::field_config::{DEFAULT_CONFIG_DIR, FieldConfigStore, FieldSpec};
use crate::manifest::UploadLayout;
use crate::metrics::{CYCLE_COLUMNS, LEAD_COLUMNS, cycle_time, lead_time};
use crate::models::{Issue, SearchQuery};
use crate::output::{Table, write_csv};
use crate::upload::{Uploader, upload_dataset};

/// 1回のエクスポートの設定
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// JQLクエリ
    pub query: String,
    /// 出力ファイルのベース名（拡張子なし）
    pub output_base: String,
    /// 列定義ファイルのベース名（拡張子なし）
    pub field_config: String,
    /// 列定義ファイルのディレクトリ
    pub config_dir: PathBuf,
    /// CSVとマニフェストを書き出すディレクトリ
    pub output_dir: PathBuf,
    /// アップロード先のバケット
    pub bucket: Option<String>,
    /// サイクルタイム列を出力する
    pub include_cycle: bool,
    /// リードタイム列を出力する
    pub include_lead: bool,
}

impl ExportOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            output_base: "results".to_string(),
            field_config: "fields".to_string(),
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            output_dir: PathBuf::from("."),
            bucket: None,
            include_cycle: false,
            include_lead: false,
        }
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.output_base))
    }

    /// 変更履歴はサイクルタイム・リードタイムのどちらでも必要
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::new(self.query.clone()).expand_changelog(self.include_cycle || self.include_lead)
    }
}

/// 出力するメトリクス列
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricColumns {
    pub cycle: bool,
    pub lead: bool,
}

/// 各フェーズの所要時間
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseTimings {
    pub query: Duration,
    pub csv: Duration,
    pub upload: Option<Duration>,
}

impl PhaseTimings {
    pub fn log(&self) {
        info!("*************TIMES TAKEN*************");
        info!("Query took {}", describe(self.query));
        info!("Writing CSV results took {}", describe(self.csv));
        if let Some(upload) = self.upload {
            info!("Uploading to s3 bucket took {}", describe(upload));
        }
    }
}

fn describe(duration: Duration) -> String {
    let seconds = duration.as_secs_f64();
    format!(
        "{} seconds or {:.1} minutes to execute",
        seconds.round(),
        seconds / 60.0
    )
}

/// エクスポートの結果
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub total: u32,
    pub retrieved: usize,
    pub csv_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
    pub timings: PhaseTimings,
}

/// ヘッダー行: 列定義の名前、サイクルタイム列、リードタイム列の順
pub fn header_row(specs: &[FieldSpec], columns: MetricColumns) -> Vec<String> {
    let mut header: Vec<String> = specs.iter().map(|spec| spec.name.clone()).collect();
    if columns.cycle {
        header.extend(CYCLE_COLUMNS.iter().map(|c| c.to_string()));
    }
    if columns.lead {
        header.extend(LEAD_COLUMNS.iter().map(|c| c.to_string()));
    }
    header
}

/// Issue一覧からCSVの表を組み立てる（Issueの並び順を保つ）
pub fn build_table(
    issues: &[Issue],
    specs: &[FieldSpec],
    host: &str,
    columns: MetricColumns,
) -> Table {
    let mut table = Table::new(header_row(specs, columns));

    for issue in issues {
        let mut row = extract_row(issue, specs, host);
        if columns.cycle {
            row.extend(cycle_time(issue).cells());
        }
        if columns.lead {
            row.extend(lead_time(issue).cells());
        }
        table.push_row(row);
    }

    table
}

/// 検索からCSV出力・アップロードまでを順に実行
pub async fn run_export(
    client: &JiraClient,
    options: &ExportOptions,
    uploader: Option<&dyn Uploader>,
) -> Result<ExportSummary> {
    if options.bucket.is_some() && uploader.is_none() {
        return Err(Error::InvalidConfiguration(
            "a bucket was given but no uploader is configured".to_string(),
        ));
    }

    let query = options.search_query();
    info!(query = %options.query, "querying");

    let probe = client.search(&query).await?;

    let query_started = Instant::now();
    info!("Found {} total results.", probe.total);

    let issues = if probe.total > PAGE_SIZE {
        PaginatedFetcher::new(client)
            .fetch_all(&query, probe.total)
            .await
    } else {
        probe.issues
    };

    info!("Found {} issues. Retrieved {}", probe.total, issues.len());
    let query_elapsed = query_started.elapsed();

    let specs = FieldConfigStore::new(&options.config_dir)
        .load(&options.field_config)
        .await?;

    let csv_path = options.csv_path();
    info!("Writing results to {}", csv_path.display());
    let csv_started = Instant::now();

    let columns = MetricColumns {
        cycle: options.include_cycle,
        lead: options.include_lead,
    };
    let table = build_table(&issues, &specs, client.config().host(), columns);
    write_csv(&csv_path, &table)?;
    let csv_elapsed = csv_started.elapsed();

    let mut manifest_path = None;
    let mut upload_elapsed = None;
    if let (Some(bucket), Some(uploader)) = (&options.bucket, uploader) {
        let upload_started = Instant::now();
        let layout = UploadLayout::new(bucket.clone(), options.output_base.clone());
        manifest_path = Some(upload_dataset(uploader, &layout, &csv_path, &options.output_dir).await?);
        upload_elapsed = Some(upload_started.elapsed());
    }

    let timings = PhaseTimings {
        query: query_elapsed,
        csv: csv_elapsed,
        upload: upload_elapsed,
    };
    timings.log();

    Ok(ExportSummary {
        total: probe.total,
        retrieved: issues.len(),
        csv_path,
        manifest_path,
        timings,
    })
}
