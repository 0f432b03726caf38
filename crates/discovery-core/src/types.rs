//! Core record types for discovery data.
//!
//! This module defines the records returned by news providers:
//!
//! - [`ArticleSummary`] - One entry of the trending news list
//! - [`ArticleDetail`] - A single article with its body
//! - [`CategoryNewsRecord`] - One entry of a category-filtered news list
//! - [`NewsSelection`] - Feed or single-article choice derived from an article id
//!
//! Earnings calendars have provider-defined columns and are returned as
//! `DataFrame`s directly; see [`EarningsCalendarProvider`](crate::provider::EarningsCalendarProvider).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DiscoveryError, Result};

/// Article id meaning "no article selected, show the feed instead".
pub const FEED_SENTINEL_ID: i64 = -1;

/// News category tags understood by Seeking Alpha's market-news feed.
///
/// Informational only: categories are passed to providers verbatim.
pub const NEWS_CATEGORIES: &[&str] = &[
    "top-news",
    "on-the-move",
    "market-pulse",
    "notable-calls",
    "buybacks",
    "commodities",
    "crypto",
    "issuance",
    "global",
    "guidance",
    "ipos",
    "spacs",
    "politics",
    "m-a",
    "consumer",
    "energy",
    "financials",
    "healthcare",
    "mlps",
    "reits",
    "technology",
];

/// One entry of the trending news list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    /// Publication time as an ISO-8601 string.
    pub published_at: String,
    /// Provider-assigned id, unique within one retrieval.
    pub id: u64,
    /// Headline.
    pub title: String,
    /// Absolute link to the article.
    pub url: String,
}

impl ArticleSummary {
    /// Creates a new article summary.
    #[must_use]
    pub fn new(
        published_at: impl Into<String>,
        id: u64,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            published_at: published_at.into(),
            id,
            title: title.into(),
            url: url.into(),
        }
    }
}

/// A single article, including its plain-text body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDetail {
    /// Publication time as an ISO-8601 string.
    pub published_at: String,
    /// Headline.
    pub title: String,
    /// Absolute link to the article.
    pub url: String,
    /// Article body as plain text.
    pub content: String,
}

impl ArticleDetail {
    /// Creates a new article detail.
    #[must_use]
    pub fn new(
        published_at: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            published_at: published_at.into(),
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }
}

/// One entry of a category-filtered news list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNewsRecord {
    /// Publication time as reported by the provider.
    pub publish_on: String,
    /// Provider-assigned id.
    pub id: u64,
    /// Headline.
    pub title: String,
    /// Absolute link to the article.
    pub url: String,
}

impl CategoryNewsRecord {
    /// Creates a new category news record.
    #[must_use]
    pub fn new(
        publish_on: impl Into<String>,
        id: u64,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            publish_on: publish_on.into(),
            id,
            title: title.into(),
            url: url.into(),
        }
    }
}

/// What the news view should show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NewsSelection {
    /// The trending news list.
    #[default]
    Feed,
    /// A single article by id.
    Article(u64),
}

impl NewsSelection {
    /// Interprets a caller-supplied article id.
    ///
    /// `-1` selects the feed, any non-negative id selects that article.
    ///
    /// # Errors
    /// Returns [`DiscoveryError::InvalidParameter`] for ids below `-1`.
    pub fn from_article_id(article_id: i64) -> Result<Self> {
        match article_id {
            FEED_SENTINEL_ID => Ok(Self::Feed),
            id if id >= 0 => Ok(Self::Article(id.unsigned_abs())),
            id => Err(DiscoveryError::InvalidParameter(format!(
                "article id must be {FEED_SENTINEL_ID} or non-negative, got {id}"
            ))),
        }
    }
}

impl fmt::Display for NewsSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feed => write!(f, "feed"),
            Self::Article(id) => write!(f, "article {id}"),
        }
    }
}
