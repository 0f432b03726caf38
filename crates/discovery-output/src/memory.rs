//! In-memory output backends.

use discovery_core::{
    DiscoveryError, ExportFormat, ExportRequest, Exporter, RenderOptions, Renderer, Result,
};
use polars::prelude::DataFrame;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tracing::trace;

/// One call received by a [`RecordingRenderer`].
#[derive(Debug, Clone)]
pub enum RenderEvent {
    /// A table, already cut down to the rows that would be displayed.
    Table {
        /// Displayed rows.
        table: DataFrame,
        /// Options the table was rendered with.
        options: RenderOptions,
    },
    /// A line of plain text.
    Line(String),
}

/// Renderer that records what it was asked to show.
///
/// Useful for testing views without touching stdout.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<RenderEvent>>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in call order.
    #[must_use]
    pub fn events(&self) -> Vec<RenderEvent> {
        lock(&self.events).clone()
    }

    /// Recorded tables, in call order.
    #[must_use]
    pub fn tables(&self) -> Vec<DataFrame> {
        lock(&self.events)
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Table { table, .. } => Some(table.clone()),
                RenderEvent::Line(_) => None,
            })
            .collect()
    }

    /// Recorded text lines, in call order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        lock(&self.events)
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Line(line) => Some(line.clone()),
                RenderEvent::Table { .. } => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render_table(&self, table: &DataFrame, options: &RenderOptions) -> Result<()> {
        trace!(rows = table.height(), "RecordingRenderer: table");
        self.events
            .lock()
            .map_err(|e| DiscoveryError::Render(e.to_string()))?
            .push(RenderEvent::Table {
                table: options.bounded(table),
                options: options.clone(),
            });
        Ok(())
    }

    fn print_line(&self, line: &str) -> Result<()> {
        self.events
            .lock()
            .map_err(|e| DiscoveryError::Render(e.to_string()))?
            .push(RenderEvent::Line(line.to_string()));
        Ok(())
    }
}

/// An export received by a [`RecordingExporter`].
#[derive(Debug, Clone)]
pub struct RecordedExport {
    /// Requested format.
    pub format: ExportFormat,
    /// Path the file would have been written to.
    pub path: PathBuf,
    /// Tag the view supplied.
    pub tag: String,
    /// Requested sheet name.
    pub sheet_name: Option<String>,
    /// The full table handed to the exporter.
    pub table: DataFrame,
}

/// Exporter that records requests instead of writing files.
#[derive(Debug, Default)]
pub struct RecordingExporter {
    exports: Mutex<Vec<RecordedExport>>,
}

impl RecordingExporter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded exports, in call order.
    #[must_use]
    pub fn exports(&self) -> Vec<RecordedExport> {
        lock(&self.exports).clone()
    }
}

impl Exporter for RecordingExporter {
    fn export(&self, request: &ExportRequest<'_>) -> Result<PathBuf> {
        let path = request.path();
        trace!(tag = request.tag, rows = request.table.height(), "RecordingExporter: export");
        self.exports
            .lock()
            .map_err(|e| DiscoveryError::Export(e.to_string()))?
            .push(RecordedExport {
                format: request.format,
                path: path.clone(),
                tag: request.tag.to_string(),
                sheet_name: request.sheet_name.map(str::to_string),
                table: request.table.clone(),
            });
        Ok(path)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
