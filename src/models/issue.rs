use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 検索APIが返すIssueドキュメント
///
/// フィールド構成はJIRAインスタンスごとに異なるため、JSONのまま保持し、
/// 集計に必要な項目だけを型付きで参照する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Issue(Value);

impl Issue {
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    pub fn document(&self) -> &Value {
        &self.0
    }

    pub fn key(&self) -> Option<&str> {
        self.0.get("key").and_then(Value::as_str)
    }

    /// 現在のステータス名（`fields.status.name`）
    pub fn status_name(&self) -> Option<&str> {
        self.0.pointer("/fields/status/name").and_then(Value::as_str)
    }

    /// 作成日時の文字列（`fields.created`）
    pub fn created(&self) -> Option<&str> {
        self.0.pointer("/fields/created").and_then(Value::as_str)
    }

    /// 変更履歴（`expand=changelog` で取得した場合のみ存在）
    pub fn changelog(&self) -> Option<Changelog> {
        let changelog = self.0.get("changelog")?;
        Changelog::deserialize(changelog).ok()
    }
}

impl From<Value> for Issue {
    fn from(document: Value) -> Self {
        Self::new(document)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Changelog {
    #[serde(default)]
    pub histories: Vec<History>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub items: Vec<HistoryItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(rename = "fromString")]
    #[serde(default)]
    pub from_string: Option<String>,
    #[serde(rename = "toString")]
    #[serde(default)]
    pub to_string: Option<String>,
}

impl HistoryItem {
    /// 指定したフィールドが指定した値に変更されたかどうか
    pub fn changed_to(&self, field: &str, value: &str) -> bool {
        self.field.as_deref() == Some(field) && self.to_string.as_deref() == Some(value)
    }
}
