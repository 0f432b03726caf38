//! Latest news for a Seeking Alpha market-news category.

use tracing::{debug, instrument};

use discovery_core::{ExportSpec, RenderOptions, Result, ToDataFrame};

use super::{DiscoveryViews, ensure_positive};

const EMPTY_NOTICE: &str = "No news found.";

impl DiscoveryViews {
    /// Displays the latest news for `category`.
    ///
    /// The category is passed to the provider verbatim. Up to `display_limit`
    /// records are shown under a title equal to the category, without the
    /// `id` column. An export, when requested, is tagged `cnews : <category>`
    /// and receives the full records including `id`; it is written even when
    /// no news was found.
    ///
    /// # Errors
    /// Returns an error for a zero limit, or if retrieval, rendering, or
    /// export fails.
    #[instrument(skip(self, export), fields(export = ?export.formats()))]
    pub async fn render_category_news(
        &self,
        category: &str,
        display_limit: usize,
        export: &ExportSpec,
    ) -> Result<()> {
        ensure_positive("display limit", display_limit)?;

        let records = self
            .news
            .fetch_category_news(category, display_limit)
            .await?;
        debug!(count = records.len(), "Fetched category news");

        let table = records.to_dataframe()?;
        if records.is_empty() {
            self.renderer.print_line(EMPTY_NOTICE)?;
        } else {
            self.renderer.render_table(
                &table.drop("id")?,
                &RenderOptions::new()
                    .with_title(category)
                    .with_limit(display_limit),
            )?;
        }

        if export.is_requested() {
            self.export(export, &format!("cnews : {category}"), &table)?;
        }
        Ok(())
    }
}
