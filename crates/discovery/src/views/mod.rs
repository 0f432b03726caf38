//! Discovery views over injected providers and output backends.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use polars::prelude::DataFrame;
use tracing::debug;

use discovery_core::{
    DiscoveryError, EarningsCalendarProvider, ExportSpec, Exporter, NewsProvider, Renderer,
    Result,
};

mod category;
mod earnings;
mod news;

pub use news::{NewsView, article_digest, feed_table};

/// Number of earnings calendar pages (days) fetched by default.
pub const DEFAULT_EARNINGS_PAGES: u32 = 1;
/// Earnings rows displayed by default.
pub const DEFAULT_EARNINGS_LIMIT: usize = 10;
/// News rows displayed by default.
pub const DEFAULT_NEWS_LIMIT: usize = 5;
/// Category shown when none is given.
pub const DEFAULT_CATEGORY: &str = "top-news";
/// Directory exports are written to unless configured otherwise.
pub const DEFAULT_EXPORT_DIR: &str = "exports";

/// The earnings calendar, news feed, and category news views.
///
/// Holds the retrieval providers and the output capabilities the views write
/// through. Every view call is independent: it fetches once, builds its own
/// tables, renders, and exports when asked to.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use discovery::{DiscoveryViews, FileExporter, RecordingRenderer, SeekingAlphaProvider};
///
/// let provider = Arc::new(SeekingAlphaProvider::new());
/// let views = DiscoveryViews::new(
///     provider.clone(),
///     provider,
///     Arc::new(RecordingRenderer::new()),
///     Arc::new(FileExporter::new()),
/// )
/// .with_export_dir("/tmp/discovery");
/// ```
#[derive(Clone)]
pub struct DiscoveryViews {
    earnings: Arc<dyn EarningsCalendarProvider>,
    news: Arc<dyn NewsProvider>,
    renderer: Arc<dyn Renderer>,
    exporter: Arc<dyn Exporter>,
    export_dir: PathBuf,
}

impl std::fmt::Debug for DiscoveryViews {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryViews")
            .field("earnings", &self.earnings.name())
            .field("news", &self.news.name())
            .field("renderer", &self.renderer)
            .field("exporter", &self.exporter)
            .field("export_dir", &self.export_dir)
            .finish()
    }
}

impl DiscoveryViews {
    /// Create views over the given providers and output backends.
    #[must_use]
    pub fn new(
        earnings: Arc<dyn EarningsCalendarProvider>,
        news: Arc<dyn NewsProvider>,
        renderer: Arc<dyn Renderer>,
        exporter: Arc<dyn Exporter>,
    ) -> Self {
        Self {
            earnings,
            news,
            renderer,
            exporter,
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }

    /// Views backed by Seeking Alpha, printing to stdout and exporting to files.
    #[cfg(feature = "seekingalpha")]
    #[must_use]
    pub fn seeking_alpha() -> Self {
        Self::with_seeking_alpha(discovery_seekingalpha::SeekingAlphaProvider::new())
    }

    /// Views backed by a configured Seeking Alpha provider, printing to stdout
    /// and exporting to files.
    #[cfg(feature = "seekingalpha")]
    #[must_use]
    pub fn with_seeking_alpha(provider: discovery_seekingalpha::SeekingAlphaProvider) -> Self {
        let provider = Arc::new(provider);
        Self::new(
            provider.clone(),
            provider,
            Arc::new(discovery_output::ConsoleRenderer::stdout()),
            Arc::new(discovery_output::FileExporter::new()),
        )
    }

    /// Set the directory exports are written to.
    #[must_use]
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// Directory exports are written to.
    #[must_use]
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Write `table` once per requested format, tagged with `tag`.
    fn export(&self, spec: &ExportSpec, tag: &str, table: &DataFrame) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(spec.formats().len());
        for request in spec.requests(&self.export_dir, tag, table) {
            let path = self.exporter.export(&request)?;
            debug!(tag, path = %path.display(), rows = table.height(), "Exported table");
            written.push(path);
        }
        Ok(written)
    }
}

/// Reject zero for parameters that must be positive.
fn ensure_positive(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(DiscoveryError::InvalidParameter(format!(
            "{name} must be positive"
        )));
    }
    Ok(())
}
