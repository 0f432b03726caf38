//! Console renderer.

use discovery_core::{DiscoveryError, RenderOptions, Renderer, Result};
use polars::prelude::DataFrame;
use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;
use tracing::trace;
use unicode_width::UnicodeWidthStr;

use crate::cell::cell_text;
use crate::text::strip_control_chars;

/// Renders tables as box-drawn grids and text as plain lines.
///
/// Column headers are the DataFrame's column names; no row index is ever
/// printed. Terminal control sequences in provider text are removed before
/// writing. Output goes to stdout unless another writer is supplied.
pub struct ConsoleRenderer {
    out: Mutex<Box<dyn Write + Send>>,
}

impl fmt::Debug for ConsoleRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleRenderer").finish_non_exhaustive()
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::stdout()
    }
}

impl ConsoleRenderer {
    /// Create a renderer writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Create a renderer writing to an arbitrary writer.
    #[must_use]
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|e| DiscoveryError::Render(e.to_string()))?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

impl Renderer for ConsoleRenderer {
    fn render_table(&self, table: &DataFrame, options: &RenderOptions) -> Result<()> {
        let shown = options.bounded(table);
        trace!(
            rows = shown.height(),
            total = table.height(),
            "ConsoleRenderer: rendering table"
        );
        self.write(&format_table(&shown, options.title.as_deref())?)
    }

    fn print_line(&self, line: &str) -> Result<()> {
        self.write(&format!("{}\n", strip_control_chars(line)))
    }
}

/// Formats a table as a box-drawn grid with an optional title line.
///
/// # Errors
/// Returns an error if a cell cannot be read from the DataFrame.
pub fn format_table(table: &DataFrame, title: Option<&str>) -> Result<String> {
    let headers: Vec<String> = table
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(table.height());
    for idx in 0..table.height() {
        let row = table
            .get_columns()
            .iter()
            .map(|column| column.get(idx).map(|value| cell_text(&value)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    if let Some(title) = title {
        out.push_str(title);
        out.push('\n');
    }
    out.push_str(&rule(&widths, '┌', '┬', '┐'));
    out.push_str(&line(&headers, &widths));
    out.push_str(&rule(&widths, '├', '┼', '┤'));
    for row in &rows {
        out.push_str(&line(row, &widths));
    }
    out.push_str(&rule(&widths, '└', '┴', '┘'));
    Ok(out)
}

fn rule(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}\n", segments.join(&middle.to_string()))
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| {
            let fill = width.saturating_sub(cell.width());
            format!(" {cell}{} ", " ".repeat(fill))
        })
        .collect();
    format!("│{}│\n", padded.join("│"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn earnings() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Ticker".into(), vec!["AAPL", "MSFT", "NVDA"]),
            Column::new("Name".into(), vec!["Apple Inc.", "Microsoft", "NVIDIA"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_format_table_layout() {
        let df = DataFrame::new(vec![
            Column::new("Ticker".into(), vec!["AAPL"]),
            Column::new("Name".into(), vec!["Apple Inc."]),
        ])
        .unwrap();
        let expected = "\
Upcoming
┌────────┬────────────┐
│ Ticker │ Name       │
├────────┼────────────┤
│ AAPL   │ Apple Inc. │
└────────┴────────────┘
";
        assert_eq!(format_table(&df, Some("Upcoming")).unwrap(), expected);
    }

    #[test]
    fn test_render_table_applies_limit() {
        let buf = SharedBuf::default();
        let renderer = ConsoleRenderer::new(buf.clone());
        renderer
            .render_table(&earnings(), &RenderOptions::new().with_limit(2))
            .unwrap();

        let printed = buf.contents();
        assert!(printed.contains("AAPL"));
        assert!(printed.contains("MSFT"));
        assert!(!printed.contains("NVDA"));
    }

    #[test]
    fn test_print_line_appends_newline() {
        let buf = SharedBuf::default();
        let renderer = ConsoleRenderer::new(buf.clone());
        renderer.print_line("No news found.").unwrap();
        renderer.print_line("").unwrap();
        assert_eq!(buf.contents(), "No news found.\n\n");
    }

    #[test]
    fn test_print_line_strips_terminal_escapes() {
        let buf = SharedBuf::default();
        let renderer = ConsoleRenderer::new(buf.clone());
        renderer
            .print_line("\x1b]0;owned\x07Rates \x1b[1munchanged\x1b[0m.\n\tTwo cuts.")
            .unwrap();
        assert_eq!(buf.contents(), "Rates unchanged.\n\tTwo cuts.\n");
    }

    #[test]
    fn test_empty_table_still_shows_headers() {
        let df = DataFrame::new(vec![Column::new("title".into(), Vec::<&str>::new())]).unwrap();
        let out = format_table(&df, None).unwrap();
        assert!(out.contains("│ title │"));
        assert_eq!(out.lines().count(), 4);
    }
}
