use chrono::Local;
use futures::future::join_all;
use reqwest::StatusCode;
use tracing::{error, info, warn};

use crate::client::JiraClient;
use crate::models::{Issue, SearchPage, SearchQuery};

/// 検索APIの1ページあたりの件数（JIRAの既定値）
pub const PAGE_SIZE: u32 = 50;

/// 追加で取得すべきページのオフセット一覧
///
/// `total <= page_size` の場合は最初の検索結果で足りるため空になる。
pub fn page_offsets(total: u32, page_size: u32) -> Vec<u32> {
    if page_size == 0 || total <= page_size {
        return Vec::new();
    }
    (0..total.div_ceil(page_size))
        .map(|page| page * page_size)
        .collect()
}

/// 検索結果の全ページを並行に取得する
///
/// 各ページの結果はページ番号順に連結される。失敗したページがあっても
/// 処理は中断せず、そのページは0件として扱う。
pub struct PaginatedFetcher<'a> {
    client: &'a JiraClient,
    page_size: u32,
}

impl<'a> PaginatedFetcher<'a> {
    pub fn new(client: &'a JiraClient) -> Self {
        Self {
            client,
            page_size: PAGE_SIZE,
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub async fn fetch_all(&self, query: &SearchQuery, total: u32) -> Vec<Issue> {
        let offsets = page_offsets(total, self.page_size);
        info!(pages = offsets.len(), "retrieving {} pages of data", offsets.len());

        // すべてのリクエストを発行してから1か所で待ち合わせる
        let pages = join_all(offsets.iter().map(|&offset| self.fetch_page(query, offset))).await;

        pages.into_iter().flatten().collect()
    }

    async fn fetch_page(&self, query: &SearchQuery, offset: u32) -> Vec<Issue> {
        let endpoint = query.endpoint(Some(offset));
        let response = match self.client.get_raw(&endpoint).await {
            Ok(response) => response,
            Err(e) => {
                error!(url = %self.client.url_for(&endpoint), error = %e, "page request failed");
                return Vec::new();
            }
        };

        let at = Local::now().format("%H:%M:%S");
        let status = response.status.as_u16();
        if response.status == StatusCode::OK {
            info!(%at, url = %response.url, status, "Done");
        } else {
            warn!(%at, url = %response.url, status, "Done with non-200 status");
        }

        match serde_json::from_str::<SearchPage>(&response.body) {
            Ok(page) => page.issues,
            Err(e) => {
                error!(url = %response.url, status, error = %e, "page body has no issues");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offsets_for_multiple_pages() {
        assert_eq!(page_offsets(120, 50), vec![0, 50, 100]);
        assert_eq!(page_offsets(100, 50), vec![0, 50]);
        assert_eq!(page_offsets(51, 50), vec![0, 50]);
    }

    #[test]
    fn test_page_offsets_single_page_needs_no_requests() {
        assert!(page_offsets(30, 50).is_empty());
        assert!(page_offsets(50, 50).is_empty());
        assert!(page_offsets(0, 50).is_empty());
    }

    #[test]
    fn test_page_offsets_zero_page_size() {
        assert!(page_offsets(10, 0).is_empty());
    }
}
