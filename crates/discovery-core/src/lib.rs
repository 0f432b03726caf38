#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/discovery/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for financial discovery views.
//!
//! This crate provides the foundational abstractions shared by providers, output
//! backends, and views:
//!
//! - [`EarningsCalendarProvider`](provider::EarningsCalendarProvider) - Upcoming earnings releases
//! - [`NewsProvider`](provider::NewsProvider) - Trending, single-article, and category news
//! - [`Renderer`](output::Renderer) - Console output capability
//! - [`Exporter`](output::Exporter) - File export capability
//! - [`ToDataFrame`](frame::ToDataFrame) - Record-to-table conversions

/// Error types for discovery operations.
pub mod error;
/// Record-to-DataFrame conversions.
pub mod frame;
/// Rendering and export capabilities.
pub mod output;
/// Provider traits for fetching discovery data.
pub mod provider;
/// Provider timestamp parsing.
pub mod timestamp;
/// Core record types.
pub mod types;

// Re-export commonly used items at crate root
pub use error::{DiscoveryError, Result};
pub use frame::ToDataFrame;
pub use output::{
    ExportFormat, ExportRequest, ExportSpec, Exporter, FALLBACK_FILE_STEM, RenderOptions, Renderer,
};
pub use provider::{DataProvider, EarningsCalendarProvider, NewsProvider};
pub use types::{
    ArticleDetail, ArticleSummary, CategoryNewsRecord, FEED_SENTINEL_ID, NEWS_CATEGORIES,
    NewsSelection,
};
