pub mod cli;
pub mod client;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod field_config;
pub mod field_path;
pub mod manifest;
pub mod metrics;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod timestamp;
pub mod upload;
pub mod value_format;

pub use client::{Credentials, JiraClient, JiraConfig};
pub use error::Error;
pub use models::*;

pub use extract::{extract_cell, extract_row};
pub use fetcher::{PAGE_SIZE, PaginatedFetcher, page_offsets};
pub use field_config::{FieldConfigStore, FieldSpec, parse_field_specs};
pub use field_path::FieldPath;
pub use manifest::{Manifest, UploadLayout};
pub use metrics::{MetricSpan, MetricTuple, cycle_time, lead_time};
pub use output::{Table, write_csv};
pub use pipeline::{ExportOptions, ExportSummary, MetricColumns, build_table, run_export};
pub use upload::{S3Uploader, Uploader, upload_dataset};
pub use value_format::ValueFormat;
