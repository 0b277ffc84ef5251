use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::error::{Error, Result};
use crate::manifest::UploadLayout;

/// オブジェクトストレージへのアップロードの抽象化トレイト
#[async_trait]
pub trait Uploader: Send + Sync {
    /// ローカルファイルを `bucket` の `key` にアップロード
    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()>;
}

/// S3へのアップロード
pub struct S3Uploader {
    client: aws_sdk_s3::Client,
}

impl S3Uploader {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// 環境変数・共有設定ファイルからAWSの設定を読み込む
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_s3::Client::new(&config))
    }
}

#[async_trait]
impl Uploader for S3Uploader {
    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| Error::UploadFailed(format!("cannot read {}: {}", path.display(), e)))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| Error::UploadFailed(format!("s3://{}/{}: {}", bucket, key, DisplayErrorContext(&e))))?;

        Ok(())
    }
}

/// CSVとマニフェストをアップロード
///
/// マニフェストは `manifest_dir` に書き出してからアップロードする。
/// 戻り値はローカルのマニフェストファイルのパス。
pub async fn upload_dataset(
    uploader: &dyn Uploader,
    layout: &UploadLayout,
    csv_path: &Path,
    manifest_dir: &Path,
) -> Result<PathBuf> {
    info!(
        "Uploading {} to s3://{}/{}",
        csv_path.display(),
        layout.bucket,
        layout.csv_key()
    );
    uploader
        .upload_file(&layout.bucket, &layout.csv_key(), csv_path)
        .await?;

    let manifest_path = manifest_dir.join(layout.manifest_file_name());
    let manifest_json = serde_json::to_string(&layout.manifest())?;
    fs::write(&manifest_path, manifest_json).await?;

    info!(
        "Uploading {} to s3://{}/{}",
        manifest_path.display(),
        layout.bucket,
        layout.manifest_key()
    );
    uploader
        .upload_file(&layout.bucket, &layout.manifest_key(), &manifest_path)
        .await?;

    Ok(manifest_path)
}
