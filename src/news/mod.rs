//! Latest trade news board
//!
//! A single schema-constrained request asks the model to extract the most
//! recent items from a listing page. The flow never fails: any request or
//! parse error is replaced by one sentinel item pointing at the listing.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::NewsConfig;
use crate::error::{CairuilinError, Result};
use crate::providers::{GenerateRequest, Provider};

/// One news entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub date: String,
    pub url: String,
}

/// Response schema: an array of `{title, date, url}` objects, all required
pub fn news_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "date": { "type": "STRING" },
                "url": { "type": "STRING" }
            },
            "required": ["title", "date", "url"]
        }
    })
}

/// Extraction prompt for the configured listing page and item count
pub fn news_prompt(config: &NewsConfig) -> String {
    format!(
        "{} 페이지에서 현재 가장 최신 뉴스 {}개의 제목과 날짜를 정확히 추출해줘. \
         각 뉴스의 상세 페이지로 이동할 수 있는 URL을 포함해서 JSON 배열로 응답해줘.",
        config.source_url, config.count
    )
}

/// Parse response text as a JSON array of news items
///
/// # Errors
///
/// Returns `CairuilinError::Serialization` if the text is not an array of
/// complete records
pub fn parse_news(text: &str) -> Result<Vec<NewsItem>> {
    let items: Vec<NewsItem> =
        serde_json::from_str(text.trim()).map_err(CairuilinError::Serialization)?;
    Ok(items)
}

/// The single item shown when the fetch fails
pub fn sentinel_item(config: &NewsConfig) -> NewsItem {
    NewsItem {
        title: config.error_title.clone(),
        date: config.placeholder_date.clone(),
        url: config.source_url.clone(),
    }
}

async fn request_news(provider: &dyn Provider, config: &NewsConfig) -> Result<Vec<NewsItem>> {
    let request = GenerateRequest::prompt(news_prompt(config))
        .with_search(config.search_enabled)
        .with_response_schema(news_schema());

    let response = provider.generate(&request).await?;
    tracing::debug!("News response: {} bytes", response.text.len());
    parse_news(&response.text)
}

/// Fetch the latest news items
///
/// Returns the sentinel item in place of any error.
pub async fn fetch_latest_news(provider: &dyn Provider, config: &NewsConfig) -> Vec<NewsItem> {
    match request_news(provider, config).await {
        Ok(items) => {
            tracing::info!("Fetched {} news items", items.len());
            items
        }
        Err(e) => {
            tracing::error!("Failed to fetch latest news: {:#}", e);
            vec![sentinel_item(config)]
        }
    }
}

/// Fetched news ready for display
#[derive(Debug, Clone)]
pub struct NewsBoard {
    items: Vec<NewsItem>,
    config: NewsConfig,
}

impl NewsBoard {
    /// Fetch once and build the board
    pub async fn load(provider: &dyn Provider, config: &NewsConfig) -> Self {
        let items = fetch_latest_news(provider, config).await;
        Self::from_items(items, config.clone())
    }

    pub fn from_items(items: Vec<NewsItem>, config: NewsConfig) -> Self {
        Self { items, config }
    }

    /// All fetched items
    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    /// Items to display, capped at the configured count
    pub fn display_items(&self) -> &[NewsItem] {
        &self.items[..self.items.len().min(self.config.count)]
    }

    /// Link for an item
    ///
    /// The item's own url is used only when it contains the trusted domain;
    /// anything else links to the listing page.
    ///
    /// # Examples
    ///
    /// ```
    /// use cairuilin::config::NewsConfig;
    /// use cairuilin::news::{NewsBoard, NewsItem};
    ///
    /// let board = NewsBoard::from_items(Vec::new(), NewsConfig::default());
    /// let item = NewsItem {
    ///     title: "t".to_string(),
    ///     date: "2026-01-01".to_string(),
    ///     url: "https://elsewhere.example/a".to_string(),
    /// };
    /// assert_eq!(board.link_for(&item), board.listing_url());
    /// ```
    pub fn link_for<'a>(&'a self, item: &'a NewsItem) -> &'a str {
        if item.url.contains(&self.config.trusted_domain) {
            &item.url
        } else {
            &self.config.source_url
        }
    }

    /// True when the board holds only the failure sentinel
    pub fn is_fallback(&self) -> bool {
        self.items.len() == 1 && self.items[0] == sentinel_item(&self.config)
    }

    pub fn listing_url(&self) -> &str {
        &self.config.source_url
    }
}
