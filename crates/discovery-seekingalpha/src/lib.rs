#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/discovery/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Seeking Alpha data provider.
//!
//! This crate implements the discovery-core provider traits for
//! [Seeking Alpha](https://seekingalpha.com/).
//!
//! # Usage
//!
//! ```rust,ignore
//! use discovery_seekingalpha::SeekingAlphaProvider;
//! use discovery_core::{EarningsCalendarProvider, NewsProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = SeekingAlphaProvider::new();
//!
//!     // Two days of earnings releases starting today
//!     let earnings = provider.fetch_upcoming_earnings(2, None).await?;
//!
//!     // Latest market-pulse headlines
//!     let news = provider.fetch_category_news("market-pulse", 5).await?;
//!
//!     Ok(())
//! }
//! ```

mod html;

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use discovery_core::{
    ArticleDetail, ArticleSummary, CategoryNewsRecord, DataProvider, DiscoveryError,
    EarningsCalendarProvider, NewsProvider, Result,
};
use polars::prelude::*;
use reqwest::{Client, Response, StatusCode, header};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Base URL for Seeking Alpha requests.
pub const SEEKING_ALPHA_BASE_URL: &str = "https://seekingalpha.com";

/// Prefix for article links; relative links from the API are joined onto it.
const SITE_URL: &str = "https://seekingalpha.com";

/// Seeking Alpha rejects requests without a browser-like user agent.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Seeking Alpha data provider.
///
/// Provides access to:
/// - Upcoming earnings release dates (one page per calendar day)
/// - The trending news list
/// - Single articles with their body text
/// - Category-filtered market news
#[derive(Debug, Clone)]
pub struct SeekingAlphaProvider {
    client: Client,
    base_url: String,
}

impl Default for SeekingAlphaProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SeekingAlphaProvider {
    /// Create a new provider talking to seekingalpha.com.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create a new provider with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: SEEKING_ALPHA_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different host, e.g. a proxy or a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build a URL from a path relative to the base URL.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a GET request, turning rate limiting into an error.
    async fn send(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        debug!("Seeking Alpha request: {}", path);

        let response = self
            .client
            .get(self.url(path))
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .query(query)
            .send()
            .await
            .map_err(|e| DiscoveryError::Network(e.to_string()))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(DiscoveryError::RateLimited {
                provider: "Seeking Alpha".to_string(),
                retry_after,
            });
        }

        Ok(response)
    }

    /// Check the status of a response and parse its JSON body.
    async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DiscoveryError::Network(format!("HTTP {status}: {text}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DiscoveryError::Network(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| DiscoveryError::Parse(format!("{e}: {text}")))
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.send(path, query).await?;
        Self::parse(response).await
    }

    /// Fetch the earnings calendar for a single day.
    async fn fetch_earnings_day(&self, date: NaiveDate) -> Result<Option<Vec<EarningsTicker>>> {
        let query = [
            ("filter[selected_date]", date.format("%Y-%m-%d").to_string()),
            ("filter[with_rating]", "false".to_string()),
            ("filter[currency]", "USD".to_string()),
        ];
        let response: EarningsCalendarResponse = self
            .get("api/v3/earnings_calendar/tickers", &query)
            .await?;
        Ok(response.data)
    }
}

impl DataProvider for SeekingAlphaProvider {
    fn name(&self) -> &str {
        "Seeking Alpha"
    }

    fn description(&self) -> &str {
        "Seeking Alpha - Earnings calendar and market news"
    }
}

#[async_trait]
impl EarningsCalendarProvider for SeekingAlphaProvider {
    async fn fetch_upcoming_earnings(
        &self,
        pages: u32,
        start: Option<NaiveDate>,
    ) -> Result<DataFrame> {
        let start = start.unwrap_or_else(|| Utc::now().date_naive());

        let mut tickers: Vec<String> = Vec::new();
        let mut names: Vec<String> = Vec::new();
        let mut dates: Vec<String> = Vec::new();

        for page in 0..pages {
            let date = start
                .checked_add_days(Days::new(u64::from(page)))
                .ok_or_else(|| {
                    DiscoveryError::InvalidParameter(format!(
                        "{pages} pages from {start} runs past the last representable date"
                    ))
                })?;

            let Some(day) = self.fetch_earnings_day(date).await? else {
                warn!(%date, "Earnings calendar page has no data, skipping");
                continue;
            };

            debug!(%date, count = day.len(), "Fetched earnings calendar page");
            let date_str = date.format("%Y-%m-%d").to_string();
            for entry in day {
                tickers.push(entry.attributes.slug.to_uppercase());
                names.push(entry.attributes.name);
                dates.push(date_str.clone());
            }
        }

        let df = DataFrame::new(vec![
            Column::new("Ticker".into(), tickers),
            Column::new("Name".into(), names),
            Column::new("Date".into(), dates),
        ])
        .map_err(|e| DiscoveryError::Parse(e.to_string()))?;

        Ok(df)
    }
}

#[async_trait]
impl NewsProvider for SeekingAlphaProvider {
    async fn fetch_trending(&self, limit: usize) -> Result<Vec<ArticleSummary>> {
        let items: Vec<TrendingItem> = self.get("news/trending_news", &[]).await?;

        let articles = items
            .into_iter()
            .filter_map(|item| {
                let Some(id) = article_id_from_uri(&item.uri) else {
                    debug!(uri = %item.uri, "Skipping trending item outside /news/");
                    return None;
                };
                Some(ArticleSummary::new(
                    strip_fraction(&item.publish_on),
                    id,
                    item.title,
                    absolute_url(&item.uri),
                ))
            })
            .take(limit)
            .collect();

        Ok(articles)
    }

    async fn fetch_article(&self, id: u64) -> Result<ArticleDetail> {
        let response = self.send(&format!("api/v3/news/{id}"), &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DiscoveryError::ArticleNotFound(id));
        }

        let article: ArticleResponse = Self::parse(response).await?;
        let data = article.data;

        Ok(ArticleDetail::new(
            data.attributes.last_modified,
            data.attributes.title,
            absolute_url(&data.links.self_link),
            html::to_text(&data.attributes.content),
        ))
    }

    async fn fetch_category_news(
        &self,
        category: &str,
        limit: usize,
    ) -> Result<Vec<CategoryNewsRecord>> {
        let query = [
            ("filter[category]", format!("market-news::{category}")),
            ("filter[since]", "0".to_string()),
            ("filter[until]", "0".to_string()),
            ("isMounting", "true".to_string()),
            ("page[size]", limit.to_string()),
            ("page[number]", "1".to_string()),
        ];
        let response: NewsResponse = self.get("api/v3/news", &query).await?;

        let records = response
            .data
            .into_iter()
            .filter_map(|item| match item.id.parse::<u64>() {
                Ok(id) => Some(CategoryNewsRecord::new(
                    strip_offset(&item.attributes.publish_on.replace('T', " ")),
                    id,
                    item.attributes.title,
                    absolute_url(&item.links.self_link),
                )),
                Err(_) => {
                    warn!(id = %item.id, "Skipping news item with non-numeric id");
                    None
                }
            })
            .collect();

        Ok(records)
    }
}

/// Extract the numeric article id from a `/news/<id>-<slug>` path.
fn article_id_from_uri(uri: &str) -> Option<u64> {
    let rest = uri.strip_prefix("/news/")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Join a site-relative link onto the site URL; absolute links pass through.
fn absolute_url(link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("{SITE_URL}/{}", link.trim_start_matches('/'))
    }
}

/// Drop fractional seconds and anything after them: `...:00.000-04:00` -> `...:00`.
fn strip_fraction(timestamp: &str) -> String {
    match timestamp.rfind('.') {
        Some(idx) => timestamp[..idx].to_string(),
        None => timestamp.to_string(),
    }
}

/// Drop a trailing `Z` or `±HH:MM` offset.
fn strip_offset(timestamp: &str) -> String {
    if let Some(stripped) = timestamp.strip_suffix('Z') {
        return stripped.to_string();
    }
    let bytes = timestamp.as_bytes();
    let len = bytes.len();
    if len > 6 && matches!(bytes[len - 6], b'+' | b'-') && bytes[len - 3] == b':' {
        return timestamp[..len - 6].to_string();
    }
    timestamp.to_string()
}

// ============================================================================
// Seeking Alpha API Response Types
// ============================================================================

/// Earnings calendar response; `data` is absent on days the API has no page for.
#[derive(Debug, Clone, Deserialize)]
struct EarningsCalendarResponse {
    #[serde(default)]
    data: Option<Vec<EarningsTicker>>,
}

#[derive(Debug, Clone, Deserialize)]
struct EarningsTicker {
    attributes: EarningsTickerAttributes,
}

#[derive(Debug, Clone, Deserialize)]
struct EarningsTickerAttributes {
    slug: String,
    #[serde(default)]
    name: String,
}

/// Trending news list entry.
#[derive(Debug, Clone, Deserialize)]
struct TrendingItem {
    uri: String,
    title: String,
    publish_on: String,
}

/// Single article response.
#[derive(Debug, Clone, Deserialize)]
struct ArticleResponse {
    data: ArticleData,
}

#[derive(Debug, Clone, Deserialize)]
struct ArticleData {
    attributes: ArticleAttributes,
    links: Links,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticleAttributes {
    title: String,
    last_modified: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct Links {
    #[serde(rename = "self")]
    self_link: String,
}

/// Category news response.
#[derive(Debug, Clone, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    data: Vec<NewsItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct NewsItem {
    id: String,
    attributes: NewsAttributes,
    links: Links,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsAttributes {
    title: String,
    publish_on: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> SeekingAlphaProvider {
        SeekingAlphaProvider::new().with_base_url(server.uri())
    }

    fn column_strings(df: &DataFrame, name: &str) -> Vec<String> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_url_building() {
        let provider = SeekingAlphaProvider::new().with_base_url("http://localhost:9000/");
        assert_eq!(
            provider.url("/api/v3/news/1"),
            "http://localhost:9000/api/v3/news/1"
        );
        assert_eq!(
            SeekingAlphaProvider::new().url("news/trending_news"),
            "https://seekingalpha.com/news/trending_news"
        );
    }

    #[test]
    fn test_provider_metadata() {
        let provider = SeekingAlphaProvider::default();
        assert_eq!(provider.name(), "Seeking Alpha");
        assert!(!provider.description().is_empty());
    }

    #[test]
    fn test_article_id_from_uri() {
        assert_eq!(
            article_id_from_uri("/news/3901234-fed-holds-rates"),
            Some(3_901_234)
        );
        assert_eq!(article_id_from_uri("/article/4551-deep-dive"), None);
        assert_eq!(article_id_from_uri("/news/not-a-number"), None);
    }

    #[test]
    fn test_timestamp_trimming() {
        assert_eq!(
            strip_fraction("2024-03-01T13:45:30.000-05:00"),
            "2024-03-01T13:45:30"
        );
        assert_eq!(strip_fraction("2024-03-01T13:45:30"), "2024-03-01T13:45:30");
        assert_eq!(strip_offset("2024-03-01 13:45:30-05:00"), "2024-03-01 13:45:30");
        assert_eq!(strip_offset("2024-03-01 13:45:30Z"), "2024-03-01 13:45:30");
        assert_eq!(strip_offset("2024-03-01 13:45:30"), "2024-03-01 13:45:30");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("/news/1-a"),
            "https://seekingalpha.com/news/1-a"
        );
        assert_eq!(absolute_url("https://x.test/a"), "https://x.test/a");
    }

    #[tokio::test]
    async fn test_fetch_upcoming_earnings_walks_days() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/earnings_calendar/tickers"))
            .and(query_param("filter[selected_date]", "2024-03-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": "146", "attributes": {"slug": "aapl", "name": "Apple Inc."}},
                    {"id": "575", "attributes": {"slug": "msft", "name": "Microsoft"}}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v3/earnings_calendar/tickers"))
            .and(query_param("filter[selected_date]", "2024-03-02"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"meta": {}})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v3/earnings_calendar/tickers"))
            .and(query_param("filter[selected_date]", "2024-03-03"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "9", "attributes": {"slug": "nvda", "name": "NVIDIA"}}]
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let df = provider.fetch_upcoming_earnings(3, Some(start)).await.unwrap();

        assert_eq!(column_strings(&df, "Ticker"), ["AAPL", "MSFT", "NVDA"]);
        assert_eq!(
            column_strings(&df, "Date"),
            ["2024-03-01", "2024-03-01", "2024-03-03"]
        );
    }

    #[tokio::test]
    async fn test_fetch_upcoming_earnings_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/earnings_calendar/tickers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let df = provider.fetch_upcoming_earnings(1, None).await.unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 3);
    }

    #[tokio::test]
    async fn test_fetch_trending_filters_and_limits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news/trending_news"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"uri": "/news/300-fed-holds", "title": "Fed holds", "publish_on": "2024-03-01T13:45:30.000-05:00"},
                {"uri": "/article/299-long-read", "title": "Long read", "publish_on": "2024-03-01T13:00:00.000-05:00"},
                {"uri": "/news/298-oil-dips", "title": "Oil dips", "publish_on": "2024-03-01T12:00:00.000-05:00"},
                {"uri": "/news/297-chips", "title": "Chips rally", "publish_on": "2024-03-01T11:00:00.000-05:00"}
            ])))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let articles = provider.fetch_trending(2).await.unwrap();

        assert_eq!(
            articles,
            vec![
                ArticleSummary::new(
                    "2024-03-01T13:45:30",
                    300,
                    "Fed holds",
                    "https://seekingalpha.com/news/300-fed-holds"
                ),
                ArticleSummary::new(
                    "2024-03-01T12:00:00",
                    298,
                    "Oil dips",
                    "https://seekingalpha.com/news/298-oil-dips"
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_article() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/news/300"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "id": "300",
                    "attributes": {
                        "title": "Fed holds",
                        "lastModified": "2024-03-01T13:45:30-05:00",
                        "content": "<ul><li>Rates unchanged</li><li>Two cuts signalled</li></ul>"
                    },
                    "links": {"self": "/news/300-fed-holds"}
                }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let article = provider.fetch_article(300).await.unwrap();

        assert_eq!(
            article,
            ArticleDetail::new(
                "2024-03-01T13:45:30-05:00",
                "Fed holds",
                "https://seekingalpha.com/news/300-fed-holds",
                "Rates unchanged\nTwo cuts signalled"
            )
        );
    }

    #[tokio::test]
    async fn test_fetch_article_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/news/42"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.fetch_article(42).await.unwrap_err();
        assert!(matches!(err, DiscoveryError::ArticleNotFound(42)));
    }

    #[tokio::test]
    async fn test_fetch_category_news() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/news"))
            .and(query_param("filter[category]", "market-news::market-pulse"))
            .and(query_param("page[size]", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": "401",
                        "attributes": {"title": "Stocks open higher", "publishOn": "2024-03-01T09:31:00-05:00"},
                        "links": {"self": "/news/401-stocks-open-higher"}
                    },
                    {
                        "id": "n/a",
                        "attributes": {"title": "Broken", "publishOn": "2024-03-01T09:00:00-05:00"},
                        "links": {"self": "/news/broken"}
                    }
                ]
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let news = provider.fetch_category_news("market-pulse", 5).await.unwrap();

        assert_eq!(
            news,
            vec![CategoryNewsRecord::new(
                "2024-03-01 09:31:00",
                401,
                "Stocks open higher",
                "https://seekingalpha.com/news/401-stocks-open-higher"
            )]
        );
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.fetch_trending(5).await.unwrap_err();
        match err {
            DiscoveryError::RateLimited { retry_after, .. } => {
                assert_eq!(retry_after, Some(Duration::from_secs(30)));
            }
            other => panic!("expected RateLimited, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.fetch_category_news("top-news", 5).await.unwrap_err();
        assert!(matches!(err, DiscoveryError::Network(ref msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.fetch_trending(5).await.unwrap_err();
        assert!(matches!(err, DiscoveryError::Parse(_)));
    }
}
