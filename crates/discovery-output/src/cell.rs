//! Cell formatting shared by the console renderer and the spreadsheet writer.

use polars::prelude::AnyValue;

use crate::text::strip_control_chars;

/// Plain-text form of a single table cell.
///
/// Strings are shown without quotes, nulls as empty cells, and line breaks are
/// folded into spaces so a cell always occupies one line. Terminal control
/// sequences are removed.
pub(crate) fn cell_text(value: &AnyValue<'_>) -> String {
    let text = match value {
        AnyValue::Null => return String::new(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    };
    let text = strip_control_chars(&text).into_owned();
    if text.contains(['\n', '\r', '\t']) {
        text.split(['\n', '\r', '\t'])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        text
    }
}

/// Numeric value of a cell, if it holds a number.
#[cfg_attr(not(feature = "xlsx"), allow(dead_code))]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn cell_number(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt32(v) => Some(f64::from(*v)),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Float64(v) => Some(*v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_strips_quotes_and_nulls() {
        assert_eq!(cell_text(&AnyValue::String("AAPL")), "AAPL");
        assert_eq!(cell_text(&AnyValue::Null), "");
        assert_eq!(cell_text(&AnyValue::Int64(42)), "42");
    }

    #[test]
    fn test_cell_text_folds_line_breaks() {
        assert_eq!(cell_text(&AnyValue::String("a\nb\r\nc")), "a b c");
    }

    #[test]
    fn test_cell_text_drops_escape_sequences() {
        assert_eq!(cell_text(&AnyValue::String("\x1b[2JFed\tholds")), "Fed holds");
    }

    #[test]
    fn test_cell_number() {
        assert_eq!(cell_number(&AnyValue::UInt64(7)), Some(7.0));
        assert_eq!(cell_number(&AnyValue::String("7")), None);
    }
}
