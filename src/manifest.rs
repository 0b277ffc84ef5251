use serde::{Deserialize, Serialize};

/// バルクロード用のマニフェスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "fileLocations")]
    pub file_locations: Vec<FileLocation>,

    #[serde(rename = "globalUploadSettings")]
    pub global_upload_settings: GlobalUploadSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLocation {
    #[serde(rename = "URIs")]
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalUploadSettings {
    pub format: String,
    pub delimiter: String,
    /// 真偽値ではなく文字列の "true"
    #[serde(rename = "containsHeader")]
    pub contains_header: String,
}

impl Default for GlobalUploadSettings {
    fn default() -> Self {
        Self {
            format: "CSV".to_string(),
            delimiter: ",".to_string(),
            contains_header: "true".to_string(),
        }
    }
}

/// バケット内のキー配置
#[derive(Debug, Clone, PartialEq)]
pub struct UploadLayout {
    pub bucket: String,
    pub output_base: String,
}

impl UploadLayout {
    pub fn new(bucket: impl Into<String>, output_base: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            output_base: output_base.into(),
        }
    }

    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.output_base)
    }

    pub fn manifest_file_name(&self) -> String {
        format!("{}_manifest.json", self.output_base)
    }

    /// `{output_base}/{output_base}.csv`
    pub fn csv_key(&self) -> String {
        format!("{}/{}", self.output_base, self.csv_file_name())
    }

    /// `{output_base}/{output_base}_manifest.json`
    pub fn manifest_key(&self) -> String {
        format!("{}/{}", self.output_base, self.manifest_file_name())
    }

    pub fn csv_uri(&self) -> String {
        format!("https://s3.amazonaws.com/{}/{}", self.bucket, self.csv_key())
    }

    pub fn manifest(&self) -> Manifest {
        Manifest {
            file_locations: vec![FileLocation {
                uris: vec![self.csv_uri()],
            }],
            global_upload_settings: GlobalUploadSettings::default(),
        }
    }
}
