//! Output capabilities: console rendering and file export.
//!
//! Views never print or write files themselves. They hand tables and text to a
//! [`Renderer`] and tables to an [`Exporter`], both injected by the caller.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{DiscoveryError, Result};

/// Options for rendering a table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Optional caption printed above the table.
    pub title: Option<String>,
    /// Maximum number of rows to display. `None` shows every row.
    pub limit: Option<usize>,
}

impl RenderOptions {
    /// Creates options with no title and no row limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            limit: None,
        }
    }

    /// Sets the table title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the rows of `table` that should be displayed under these options.
    #[must_use]
    pub fn bounded(&self, table: &DataFrame) -> DataFrame {
        match self.limit {
            Some(limit) => table.head(Some(limit)),
            None => table.clone(),
        }
    }
}

/// Capability for writing user-facing output.
pub trait Renderer: Send + Sync + Debug {
    /// Renders a table. Implementations must honour [`RenderOptions::limit`]
    /// and never show a row index.
    fn render_table(&self, table: &DataFrame, options: &RenderOptions) -> Result<()>;

    /// Prints one line of plain text (notices, article digests).
    fn print_line(&self, line: &str) -> Result<()>;
}

/// Serialized file formats supported by exporters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array of records.
    Json,
    /// Apache Parquet.
    Parquet,
    /// Excel workbook.
    Xlsx,
}

impl ExportFormat {
    /// File extension for this format, without the dot.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Parquet => "parquet",
            Self::Xlsx => "xlsx",
        }
    }

    /// Returns true if the format can carry a named sheet.
    #[must_use]
    pub const fn supports_sheets(&self) -> bool {
        matches!(self, Self::Xlsx)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "parquet" => Ok(Self::Parquet),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(DiscoveryError::InvalidParameter(format!(
                "unknown export format {other:?}; expected csv, json, parquet or xlsx"
            ))),
        }
    }
}

/// The caller's export choice for one view call.
///
/// Built from a comma-separated format string; the empty string means no export.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportSpec {
    formats: Vec<ExportFormat>,
    sheet_name: Option<String>,
}

impl ExportSpec {
    /// No export.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            formats: Vec::new(),
            sheet_name: None,
        }
    }

    /// Parses a format string such as `"csv"` or `"csv,xlsx"`.
    ///
    /// # Errors
    /// Returns [`DiscoveryError::InvalidParameter`] if any entry is not a known format.
    pub fn parse(formats: &str, sheet_name: Option<String>) -> Result<Self> {
        let mut parsed = Vec::new();
        for entry in formats.split(',').filter(|e| !e.trim().is_empty()) {
            let format = entry.parse::<ExportFormat>()?;
            if !parsed.contains(&format) {
                parsed.push(format);
            }
        }
        Ok(Self {
            formats: parsed,
            sheet_name: sheet_name.filter(|s| !s.trim().is_empty()),
        })
    }

    /// Returns true if at least one format was requested.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        !self.formats.is_empty()
    }

    /// The requested formats, in the order given.
    #[must_use]
    pub fn formats(&self) -> &[ExportFormat] {
        &self.formats
    }

    /// The requested sheet name, if any.
    #[must_use]
    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }

    /// Builds one [`ExportRequest`] per requested format.
    pub fn requests<'a>(
        &'a self,
        directory: &'a Path,
        tag: &'a str,
        table: &'a DataFrame,
    ) -> impl Iterator<Item = ExportRequest<'a>> + 'a {
        self.formats.iter().map(move |&format| ExportRequest {
            format,
            directory,
            tag,
            table,
            sheet_name: self.sheet_name(),
        })
    }
}

/// File stem used when a tag has no characters usable in a file name.
pub const FALLBACK_FILE_STEM: &str = "export";

/// A single table-to-file write, constructed and consumed within one view call.
#[derive(Clone, Copy, Debug)]
pub struct ExportRequest<'a> {
    /// Target format.
    pub format: ExportFormat,
    /// Destination directory.
    pub directory: &'a Path,
    /// Base name tag, e.g. `"upcoming"`.
    pub tag: &'a str,
    /// The table to write.
    pub table: &'a DataFrame,
    /// Sheet name for formats that support sheets.
    pub sheet_name: Option<&'a str>,
}

impl ExportRequest<'_> {
    /// File stem derived from the tag: runs of characters outside
    /// `[A-Za-z0-9_-]` collapse to a single `_`. A tag with no usable
    /// characters falls back to [`FALLBACK_FILE_STEM`].
    #[must_use]
    pub fn file_stem(&self) -> String {
        let stem = self
            .tag
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        if stem.is_empty() {
            FALLBACK_FILE_STEM.to_string()
        } else {
            stem
        }
    }

    /// Full destination path: `<directory>/<stem>.<extension>`.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory
            .join(format!("{}.{}", self.file_stem(), self.format.extension()))
    }
}

/// Capability for writing tables to files.
pub trait Exporter: Send + Sync + Debug {
    /// Writes the request's table and returns the path written.
    fn export(&self, request: &ExportRequest<'_>) -> Result<PathBuf>;
}
