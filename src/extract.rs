use serde_json::Value;

use crate::field_config::FieldSpec;
use crate::models::Issue;
use crate::timestamp::{format_timestamp, parse_tracker_timestamp};

/// 1つのIssueと列定義から1セル分の文字列を生成
///
/// パスが解決できない場合は空文字列。日時文字列は `YYYY/MM/DD HH:MM:SS` に
/// 変換してからテンプレートに埋め込む。
pub fn extract_cell(issue: &Issue, spec: &FieldSpec, host: &str) -> String {
    let value = spec
        .path
        .resolve(issue.document())
        .map(|value| render_value(&value))
        .unwrap_or_default();

    match &spec.format {
        Some(format) => format.render(&value, host),
        None => value,
    }
}

/// 全列分のセルを宣言順に生成
pub fn extract_row(issue: &Issue, specs: &[FieldSpec], host: &str) -> Vec<String> {
    specs
        .iter()
        .map(|spec| extract_cell(issue, spec, host))
        .collect()
}

/// JSON値をセル用の文字列に変換
///
/// 配列・オブジェクトはコンパクトなJSON（`["api","ui"]`）、真偽値は `true` / `false`
/// で出力する。`fields.components[*].name` のような射影列もこの形式になる。
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => match parse_tracker_timestamp(s) {
            Some(dt) => format_timestamp(&dt),
            None => s.clone(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
