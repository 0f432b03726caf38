//! Trending news list and single-article digest.

use polars::prelude::*;
use tracing::{debug, instrument};

use discovery_core::{
    ArticleDetail, ArticleSummary, ExportSpec, NewsSelection, RenderOptions, Result,
    ToDataFrame, timestamp,
};

use super::{DiscoveryViews, ensure_positive};

const EXPORT_TAG: &str = "trending";
const EMPTY_NOTICE: &str = "No trending news found.";

/// What one news view call produced.
///
/// Rendering and export both read from this value, so an export always
/// refers to the data of the branch that actually ran.
#[derive(Debug, Clone)]
pub enum NewsView {
    /// The trending list as a display table: `publishedAtDate`, `title`, `url`.
    Feed(DataFrame),
    /// A single article.
    Article(ArticleDetail),
}

impl NewsView {
    /// The table handed to the exporter: the feed table itself, or a
    /// single-row frame built from the article.
    ///
    /// # Errors
    /// Returns an error if the article frame cannot be built.
    pub fn export_table(&self) -> Result<DataFrame> {
        match self {
            Self::Feed(table) => Ok(table.clone()),
            Self::Article(detail) => Ok(detail.to_dataframe()?),
        }
    }
}

/// Reshapes trending articles into the feed display table.
///
/// `publishedAt` is parsed into a datetime column and renamed
/// `publishedAtDate`; `id` is dropped. Row order is preserved.
///
/// # Errors
/// Returns [`DiscoveryError::MalformedTimestamp`](discovery_core::DiscoveryError::MalformedTimestamp)
/// if any publication time cannot be parsed.
pub fn feed_table(articles: &[ArticleSummary]) -> Result<DataFrame> {
    let published = articles
        .iter()
        .map(|a| timestamp::parse(&a.published_at))
        .collect::<Result<Vec<_>>>()?;

    let mut raw = articles.to_dataframe()?;
    raw.with_column(Column::new("publishedAt".into(), published))?;

    let table = raw
        .lazy()
        .select([
            col("publishedAt").alias("publishedAtDate"),
            col("title"),
            col("url"),
        ])
        .collect()?;
    Ok(table)
}

/// Lines printed for a single article: timestamp and title, URL, a blank
/// line, then the body.
///
/// # Errors
/// Returns [`DiscoveryError::MalformedTimestamp`](discovery_core::DiscoveryError::MalformedTimestamp)
/// if the publication time cannot be parsed.
pub fn article_digest(article: &ArticleDetail) -> Result<Vec<String>> {
    let published = timestamp::to_minute(&article.published_at)?;
    Ok(vec![
        format!("{published}   {}", article.title),
        article.url.clone(),
        String::new(),
        article.content.clone(),
    ])
}

impl DiscoveryViews {
    /// Prints the trending news list, or a single article.
    ///
    /// With `article_id == -1` the trending list is fetched (capped at
    /// `display_limit`) and rendered as a table. With a non-negative id that
    /// article is fetched and printed as a digest; `display_limit` is unused.
    /// An export, when requested, is tagged `trending` and receives the table
    /// of whichever branch ran.
    ///
    /// # Errors
    /// Returns an error for ids below `-1`, a zero limit, unparseable
    /// timestamps, or retrieval, rendering, or export failures.
    #[instrument(skip(self, export), fields(export = ?export.formats()))]
    pub async fn render_news(
        &self,
        article_id: i64,
        display_limit: usize,
        export: &ExportSpec,
    ) -> Result<NewsView> {
        let selection = NewsSelection::from_article_id(article_id)?;
        debug!(%selection, "Rendering news");

        let view = match selection {
            NewsSelection::Feed => {
                ensure_positive("display limit", display_limit)?;
                let articles = self.news.fetch_trending(display_limit).await?;
                debug!(count = articles.len(), "Fetched trending news");

                let table = feed_table(&articles)?;
                if table.height() == 0 {
                    self.renderer.print_line(EMPTY_NOTICE)?;
                } else {
                    self.renderer
                        .render_table(&table, &RenderOptions::new().with_limit(display_limit))?;
                }
                NewsView::Feed(table)
            }
            NewsSelection::Article(id) => {
                let article = self.news.fetch_article(id).await?;
                for line in article_digest(&article)? {
                    self.renderer.print_line(&line)?;
                }
                NewsView::Article(article)
            }
        };

        if export.is_requested() {
            self.export(export, EXPORT_TAG, &view.export_table()?)?;
        }
        Ok(view)
    }
}
