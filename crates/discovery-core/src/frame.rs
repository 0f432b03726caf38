//! Conversions from discovery records into polars DataFrames.
//!
//! Column names follow the provider's field names so that exported files keep
//! the same headers the provider uses.

use polars::prelude::*;

use crate::types::{ArticleDetail, ArticleSummary, CategoryNewsRecord};

/// Trait for converting discovery records into DataFrames.
pub trait ToDataFrame {
    /// Converts the records into a DataFrame with a fixed column order.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}

impl ToDataFrame for [ArticleSummary] {
    /// Columns: `publishedAt`, `id`, `title`, `url`.
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new(
                "publishedAt".into(),
                self.iter()
                    .map(|a| a.published_at.as_str())
                    .collect::<Vec<_>>(),
            ),
            Column::new("id".into(), self.iter().map(|a| a.id).collect::<Vec<_>>()),
            Column::new(
                "title".into(),
                self.iter().map(|a| a.title.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                "url".into(),
                self.iter().map(|a| a.url.as_str()).collect::<Vec<_>>(),
            ),
        ])
    }
}

impl ToDataFrame for [CategoryNewsRecord] {
    /// Columns: `publishOn`, `id`, `title`, `url`.
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new(
                "publishOn".into(),
                self.iter().map(|r| r.publish_on.as_str()).collect::<Vec<_>>(),
            ),
            Column::new("id".into(), self.iter().map(|r| r.id).collect::<Vec<_>>()),
            Column::new(
                "title".into(),
                self.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                "url".into(),
                self.iter().map(|r| r.url.as_str()).collect::<Vec<_>>(),
            ),
        ])
    }
}

impl ToDataFrame for ArticleDetail {
    /// Single row with columns: `publishedAt`, `title`, `url`, `content`.
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new("publishedAt".into(), [self.published_at.as_str()]),
            Column::new("title".into(), [self.title.as_str()]),
            Column::new("url".into(), [self.url.as_str()]),
            Column::new("content".into(), [self.content.as_str()]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_article_summaries_frame() {
        let articles = vec![
            ArticleSummary::new("2024-03-01T13:45:30Z", 7, "Fed holds", "https://x/7"),
            ArticleSummary::new("2024-03-01T12:00:00Z", 6, "Oil dips", "https://x/6"),
        ];
        let df = articles.to_dataframe().unwrap();
        assert_eq!(names(&df), ["publishedAt", "id", "title", "url"]);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_empty_category_frame_keeps_schema() {
        let records: Vec<CategoryNewsRecord> = Vec::new();
        let df = records.to_dataframe().unwrap();
        assert_eq!(names(&df), ["publishOn", "id", "title", "url"]);
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_article_detail_single_row() {
        let detail = ArticleDetail::new("2024-03-01T13:45:30Z", "T", "https://x/1", "Body");
        let df = detail.to_dataframe().unwrap();
        assert_eq!(names(&df), ["publishedAt", "title", "url", "content"]);
        assert_eq!(df.height(), 1);
    }
}
