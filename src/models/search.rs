use super::Issue;
use serde::{Deserialize, Serialize};

/// 検索APIのパス
pub const SEARCH_ENDPOINT: &str = "/rest/api/latest/search";

/// JQL検索の条件
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchQuery {
    pub jql: String,
    pub expand_changelog: bool,
}

impl SearchQuery {
    pub fn new(jql: impl Into<String>) -> Self {
        Self {
            jql: jql.into(),
            expand_changelog: false,
        }
    }

    pub fn expand_changelog(mut self, expand: bool) -> Self {
        self.expand_changelog = expand;
        self
    }

    /// ベースURLからの相対パスを生成
    ///
    /// `/rest/api/latest/search?{expand=changelog&}jql={query}[&startAt={n}]`
    pub fn endpoint(&self, start_at: Option<u32>) -> String {
        let expand = if self.expand_changelog {
            "expand=changelog&"
        } else {
            ""
        };
        let mut endpoint = format!(
            "{}?{}jql={}",
            SEARCH_ENDPOINT,
            expand,
            urlencoding::encode(&self.jql)
        );
        if let Some(start_at) = start_at {
            endpoint.push_str(&format!("&startAt={}", start_at));
        }
        endpoint
    }
}

/// 検索APIのレスポンス
///
/// エラー時も同じ形のJSONで `errorMessages` / `warningMessages` が返る。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "startAt")]
    #[serde(default)]
    pub start_at: u32,

    #[serde(rename = "maxResults")]
    #[serde(default)]
    pub max_results: u32,

    #[serde(default)]
    pub total: u32,

    #[serde(default)]
    pub issues: Vec<Issue>,

    #[serde(rename = "errorMessages")]
    #[serde(default)]
    pub error_messages: Vec<String>,

    #[serde(rename = "warningMessages")]
    #[serde(default)]
    pub warning_messages: Vec<String>,
}

/// ページ取得時のレスポンス（`issues` は必須）
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    pub issues: Vec<Issue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_without_expand() {
        let query = SearchQuery::new("project = ABC");

        assert_eq!(
            query.endpoint(None),
            "/rest/api/latest/search?jql=project%20%3D%20ABC"
        );
    }

    #[test]
    fn test_endpoint_with_expand_and_offset() {
        let query = SearchQuery::new("project=ABC").expand_changelog(true);

        assert_eq!(
            query.endpoint(Some(100)),
            "/rest/api/latest/search?expand=changelog&jql=project%3DABC&startAt=100"
        );
    }

    #[test]
    fn test_search_response_deserialization() {
        let json_data = json!({
            "startAt": 0,
            "maxResults": 50,
            "total": 123,
            "issues": [
                { "id": "10000", "key": "TEST-1", "fields": { "summary": "Test Issue" } }
            ]
        });

        let result: SearchResponse = serde_json::from_value(json_data).unwrap();

        assert_eq!(result.total, 123);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].key(), Some("TEST-1"));
        assert!(result.error_messages.is_empty());
    }

    #[test]
    fn test_error_response_deserialization() {
        let json_data = json!({
            "errorMessages": ["Error in the JQL Query: Expecting ')' before the end of the query."],
            "warningMessages": ["The value 'X' does not exist."]
        });

        let result: SearchResponse = serde_json::from_value(json_data).unwrap();

        assert_eq!(result.total, 0);
        assert_eq!(result.error_messages.len(), 1);
        assert_eq!(result.warning_messages, vec!["The value 'X' does not exist."]);
    }

    #[test]
    fn test_search_page_requires_issues() {
        assert!(serde_json::from_str::<SearchPage>(r#"{"errorMessages": []}"#).is_err());
        assert!(serde_json::from_str::<SearchPage>(r#"{"issues": []}"#).is_ok());
    }
}
