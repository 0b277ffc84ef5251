use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{Error, Result};
use crate::field_path::FieldPath;
use crate::value_format::ValueFormat;

/// 既定の設定ディレクトリ
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// 出力CSVの1列の定義
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// ヘッダーに出力する列名
    pub name: String,
    /// Issue内の値の位置
    pub path: FieldPath,
    /// 値の出力テンプレート（任意）
    pub format: Option<ValueFormat>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, path: &str, format: Option<&str>) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            path: FieldPath::parse(path)?,
            format: format.map(ValueFormat::parse).transpose()?,
        })
    }
}

/// 設定ファイル上の表現: `{"name": "...", "value": [path, format?]}`
#[derive(Debug, Deserialize)]
struct RawFieldSpec {
    name: String,
    value: Vec<String>,
}

impl TryFrom<RawFieldSpec> for FieldSpec {
    type Error = Error;

    fn try_from(raw: RawFieldSpec) -> Result<Self> {
        match raw.value.as_slice() {
            [path] => FieldSpec::new(raw.name, path, None),
            [path, format] => FieldSpec::new(raw.name, path, Some(format.as_str())),
            other => Err(Error::InvalidConfiguration(format!(
                "field '{}' must have 1 or 2 values, got {}",
                raw.name,
                other.len()
            ))),
        }
    }
}

/// JSON文字列から列定義を読み込み、宣言順を保ったまま検証する
pub fn parse_field_specs(json: &str) -> Result<Vec<FieldSpec>> {
    let raw: Vec<RawFieldSpec> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    let mut specs = Vec::with_capacity(raw.len());
    for entry in raw {
        if !seen.insert(entry.name.clone()) {
            return Err(Error::InvalidConfiguration(format!(
                "duplicate field name '{}'",
                entry.name
            )));
        }
        specs.push(FieldSpec::try_from(entry)?);
    }

    Ok(specs)
}

/// `{config_dir}/{name}.json` から列定義を読み込むストア
pub struct FieldConfigStore {
    config_dir: PathBuf,
}

impl FieldConfigStore {
    pub fn new<P: AsRef<Path>>(config_dir: P) -> Self {
        Self {
            config_dir: config_dir.as_ref().to_path_buf(),
        }
    }

    pub fn config_path(&self, name: &str) -> PathBuf {
        self.config_dir.join(format!("{}.json", name))
    }

    pub async fn load(&self, name: &str) -> Result<Vec<FieldSpec>> {
        let path = self.config_path(name);
        let contents = fs::read_to_string(&path).await.map_err(|e| {
            Error::ConfigurationMissing(format!("cannot read {}: {}", path.display(), e))
        })?;

        let specs = parse_field_specs(&contents)?;
        debug!(path = %path.display(), fields = specs.len(), "loaded field config");
        Ok(specs)
    }
}

impl Default for FieldConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_DIR)
    }
}
