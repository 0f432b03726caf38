//! Provider traits for fetching discovery data.
//!
//! This module defines the retrieval contract the views are written against:
//!
//! - [`DataProvider`] - Base trait for all data providers
//! - [`EarningsCalendarProvider`] - Upcoming earnings release dates
//! - [`NewsProvider`] - Trending news, single articles, and category feeds

use async_trait::async_trait;
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{ArticleDetail, ArticleSummary, CategoryNewsRecord},
};

/// Base trait for all data providers.
pub trait DataProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "Seeking Alpha").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;
}

/// Provider for upcoming earnings release dates.
#[async_trait]
pub trait EarningsCalendarProvider: DataProvider {
    /// Fetches earnings releases for `pages` consecutive days starting at `start`.
    ///
    /// Each page covers one calendar day. When `start` is `None` the provider
    /// picks its own default, normally today. Columns are provider-defined;
    /// an empty frame means no releases were found.
    async fn fetch_upcoming_earnings(
        &self,
        pages: u32,
        start: Option<NaiveDate>,
    ) -> Result<DataFrame>;
}

/// Provider for market news.
#[async_trait]
pub trait NewsProvider: DataProvider {
    /// Fetches the trending news list, most recent first, capped at `limit` entries.
    async fn fetch_trending(&self, limit: usize) -> Result<Vec<ArticleSummary>>;

    /// Fetches a single article by id.
    async fn fetch_article(&self, id: u64) -> Result<ArticleDetail>;

    /// Fetches up to `limit` entries of the news feed for `category`.
    ///
    /// The category tag is passed through verbatim.
    async fn fetch_category_news(
        &self,
        category: &str,
        limit: usize,
    ) -> Result<Vec<CategoryNewsRecord>>;
}
