//! File exporter.

use discovery_core::{DiscoveryError, ExportFormat, ExportRequest, Exporter, Result};
use polars::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::cell::{cell_number, cell_text};

/// Sheet name used for spreadsheets when the caller gives none.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Writes tables to `<directory>/<stem>.<extension>`.
///
/// The destination directory is created when missing and an existing file at
/// the same path is replaced. Each file handle is dropped before `export`
/// returns, on success and on failure alike.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExporter;

impl FileExporter {
    /// Create a new file exporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Exporter for FileExporter {
    #[instrument(skip(self, request), fields(tag = request.tag, format = %request.format))]
    fn export(&self, request: &ExportRequest<'_>) -> Result<PathBuf> {
        fs::create_dir_all(request.directory)?;
        let path = request.path();
        let mut table = request.table.clone();
        let sheet_name = if request.format.supports_sheets() {
            request.sheet_name
        } else {
            if let Some(name) = request.sheet_name {
                debug!(sheet = name, "Sheet name does not apply to {}", request.format);
            }
            None
        };

        match request.format {
            ExportFormat::Csv => write_with(&path, |out| {
                CsvWriter::new(out)
                    .include_header(true)
                    .finish(&mut table)
                    .map(|_| ())
            })?,
            ExportFormat::Json => write_with(&path, |out| {
                JsonWriter::new(out)
                    .with_json_format(JsonFormat::Json)
                    .finish(&mut table)
                    .map(|_| ())
            })?,
            ExportFormat::Parquet => write_with(&path, |out| {
                ParquetWriter::new(out).finish(&mut table).map(|_| ())
            })?,
            ExportFormat::Xlsx => write_xlsx(&table, &path, sheet_name)?,
        }

        debug!("Exported {} rows to {}", table.height(), path.display());
        Ok(path)
    }
}

/// Opens `path`, hands a buffered writer to `write`, and flushes it.
fn write_with<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> PolarsResult<()>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write(&mut out).map_err(|e| DiscoveryError::Export(format!("{}: {e}", path.display())))?;
    out.flush()?;
    Ok(())
}

/// One worksheet cell.
#[cfg_attr(not(feature = "xlsx"), allow(dead_code))]
#[derive(Debug, Clone, PartialEq)]
enum SheetCell {
    Number(f64),
    Text(String),
    Blank,
}

/// Lays `table` out as worksheet rows: the header row, then one row per record.
#[cfg_attr(not(feature = "xlsx"), allow(dead_code))]
fn sheet_rows(table: &DataFrame) -> Result<Vec<Vec<SheetCell>>> {
    let mut rows = Vec::with_capacity(table.height() + 1);
    rows.push(
        table
            .get_column_names()
            .iter()
            .map(|name| SheetCell::Text(name.to_string()))
            .collect(),
    );
    for idx in 0..table.height() {
        let row = table
            .get_columns()
            .iter()
            .map(|column| -> Result<SheetCell> {
                let value = column.get(idx)?;
                Ok(match cell_number(&value) {
                    Some(number) => SheetCell::Number(number),
                    None => {
                        let text = cell_text(&value);
                        if text.is_empty() {
                            SheetCell::Blank
                        } else {
                            SheetCell::Text(text)
                        }
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(feature = "xlsx")]
fn write_xlsx(table: &DataFrame, path: &Path, sheet_name: Option<&str>) -> Result<()> {
    use rust_xlsxwriter::{Workbook, XlsxError};

    let xlsx_err = |e: XlsxError| DiscoveryError::Export(format!("{}: {e}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name.unwrap_or(DEFAULT_SHEET_NAME))
        .map_err(xlsx_err)?;

    for (row_idx, cells) in sheet_rows(table)?.into_iter().enumerate() {
        let row = u32::try_from(row_idx)
            .map_err(|_| DiscoveryError::Export("too many rows for a worksheet".into()))?;
        for (col_idx, cell) in cells.into_iter().enumerate() {
            let col = u16::try_from(col_idx)
                .map_err(|_| DiscoveryError::Export("too many columns for a worksheet".into()))?;
            match cell {
                SheetCell::Number(number) => {
                    worksheet.write_number(row, col, number).map_err(xlsx_err)?;
                }
                SheetCell::Text(text) => {
                    worksheet.write_string(row, col, text).map_err(xlsx_err)?;
                }
                SheetCell::Blank => {}
            }
        }
    }

    workbook.save(path).map_err(xlsx_err)
}

#[cfg(not(feature = "xlsx"))]
fn write_xlsx(_table: &DataFrame, _path: &Path, _sheet_name: Option<&str>) -> Result<()> {
    Err(DiscoveryError::NotSupported(
        "xlsx export requires the `xlsx` feature".to_string(),
    ))
}
