//! Upcoming earnings release dates.

use chrono::NaiveDate;
use tracing::{debug, instrument};

use discovery_core::{ExportSpec, RenderOptions, Result};

use super::{DiscoveryViews, ensure_positive};

const TITLE: &str = "Upcoming Earnings Releases";
const EXPORT_TAG: &str = "upcoming";
const EMPTY_NOTICE: &str = "No upcoming earnings release dates found";

impl DiscoveryViews {
    /// Displays upcoming earnings release dates.
    ///
    /// Fetches `page_count` days of releases starting at `start_date` (the
    /// provider's default, normally today, when `None`) and renders at most
    /// `display_limit` rows. An export, when requested, receives every fetched
    /// row. An empty calendar prints a notice and neither renders nor exports.
    ///
    /// # Errors
    /// Returns an error if either count is zero, or if retrieval, rendering,
    /// or export fails.
    #[instrument(skip(self, export), fields(export = ?export.formats()))]
    pub async fn render_upcoming_earnings(
        &self,
        page_count: u32,
        display_limit: usize,
        start_date: Option<NaiveDate>,
        export: &ExportSpec,
    ) -> Result<()> {
        ensure_positive("page count", page_count as usize)?;
        ensure_positive("display limit", display_limit)?;

        let earnings = self
            .earnings
            .fetch_upcoming_earnings(page_count, start_date)
            .await?;

        if earnings.height() == 0 {
            self.renderer.print_line(EMPTY_NOTICE)?;
            return Ok(());
        }
        debug!(rows = earnings.height(), "Fetched upcoming earnings");

        self.renderer.render_table(
            &earnings,
            &RenderOptions::new()
                .with_title(TITLE)
                .with_limit(display_limit),
        )?;

        if export.is_requested() {
            self.export(export, EXPORT_TAG, &earnings)?;
        }
        Ok(())
    }
}
