#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/discovery/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Financial discovery views.
//!
//! This crate turns provider records into user-facing output. It re-exports
//! the core types, the output backends and the provider implementations, and
//! provides [`DiscoveryViews`], which holds the injected collaborators and
//! exposes the three views.
//!
//! # Features
//!
//! - `seekingalpha` - Seeking Alpha provider and the `sa-discovery` binary
//! - `xlsx` - Excel export
//!
//! # Example
//!
//! ```rust,ignore
//! use discovery::{DiscoveryViews, ExportSpec};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> discovery::Result<()> {
//!     let views = DiscoveryViews::seeking_alpha().with_export_dir("exports");
//!
//!     views
//!         .render_upcoming_earnings(1, 10, None, &ExportSpec::parse("csv", None)?)
//!         .await?;
//!     views.render_news(-1, 5, &ExportSpec::none()).await?;
//!     views
//!         .render_category_news("market-pulse", 5, &ExportSpec::none())
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use discovery_core::*;

// Output backends
pub use discovery_output::{
    ConsoleRenderer, FileExporter, RecordedExport, RecordingExporter, RecordingRenderer,
    RenderEvent,
};

// Providers
#[cfg(feature = "seekingalpha")]
pub use discovery_seekingalpha::SeekingAlphaProvider;

mod views;
pub use views::{
    DEFAULT_CATEGORY, DEFAULT_EARNINGS_LIMIT, DEFAULT_EARNINGS_PAGES, DEFAULT_EXPORT_DIR,
    DEFAULT_NEWS_LIMIT, DiscoveryViews, NewsView, article_digest, feed_table,
};
