//! sa-discovery - earnings calendar and market news from the terminal

use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use discovery::{
    DEFAULT_CATEGORY, DEFAULT_EARNINGS_LIMIT, DEFAULT_EARNINGS_PAGES, DEFAULT_EXPORT_DIR,
    DEFAULT_NEWS_LIMIT, DiscoveryViews, ExportSpec, FEED_SENTINEL_ID, NEWS_CATEGORIES,
    SeekingAlphaProvider,
};

#[derive(Parser, Debug)]
#[command(name = "sa-discovery")]
#[command(about = "Upcoming earnings and market news from Seeking Alpha")]
struct Cli {
    /// Directory export files are written to
    #[arg(long, global = true, env = "DISCOVERY_EXPORT_DIR", default_value = DEFAULT_EXPORT_DIR)]
    export_dir: PathBuf,

    /// Override the Seeking Alpha base URL
    #[arg(long, global = true, env = "SEEKING_ALPHA_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upcoming earnings release dates
    Upcoming {
        /// Number of calendar days to fetch
        #[arg(short, long, default_value_t = DEFAULT_EARNINGS_PAGES, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,

        /// Rows to display
        #[arg(short, long, default_value_t = DEFAULT_EARNINGS_LIMIT)]
        limit: usize,

        /// First day to fetch (YYYY-MM-DD), today when omitted
        #[arg(long, value_name = "DATE")]
        start_date: Option<NaiveDate>,

        #[command(flatten)]
        export: ExportArgs,
    },
    /// Trending news, or a single article by id
    Trending {
        /// Article id, -1 for the trending list
        #[arg(short, long, default_value_t = FEED_SENTINEL_ID, allow_negative_numbers = true)]
        id: i64,

        /// Rows to display
        #[arg(short, long, default_value_t = DEFAULT_NEWS_LIMIT)]
        limit: usize,

        #[command(flatten)]
        export: ExportArgs,
    },
    /// Latest news for a market-news category
    Cnews {
        /// Category tag, e.g. top-news or market-pulse
        #[arg(short, long, default_value = DEFAULT_CATEGORY, long_help = category_help())]
        category: String,

        /// Rows to display
        #[arg(short, long, default_value_t = DEFAULT_NEWS_LIMIT)]
        limit: usize,

        #[command(flatten)]
        export: ExportArgs,
    },
}

/// Long help for `--category`, listing the known tags.
fn category_help() -> String {
    format!(
        "Category tag, passed to Seeking Alpha as given.\n\nKnown categories: {}",
        NEWS_CATEGORIES.join(", ")
    )
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Comma-separated export formats: csv, json, parquet, xlsx
    #[arg(long, default_value = "")]
    export: String,

    /// Sheet name for spreadsheet exports
    #[arg(long)]
    sheet_name: Option<String>,
}

impl ExportArgs {
    fn spec(&self) -> discovery::Result<ExportSpec> {
        ExportSpec::parse(&self.export, self.sheet_name.clone())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut provider = SeekingAlphaProvider::new();
    if let Some(base_url) = cli.base_url {
        provider = provider.with_base_url(base_url);
    }
    let views = DiscoveryViews::with_seeking_alpha(provider).with_export_dir(cli.export_dir);

    match cli.command {
        Command::Upcoming {
            pages,
            limit,
            start_date,
            export,
        } => {
            views
                .render_upcoming_earnings(pages, limit, start_date, &export.spec()?)
                .await?;
        }
        Command::Trending { id, limit, export } => {
            views.render_news(id, limit, &export.spec()?).await?;
        }
        Command::Cnews {
            category,
            limit,
            export,
        } => {
            views
                .render_category_news(&category, limit, &export.spec()?)
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use discovery::ExportFormat;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sa-discovery").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_upcoming_defaults() {
        let cli = parse(&["upcoming"]);
        assert_eq!(cli.export_dir, PathBuf::from("exports"));
        match cli.command {
            Command::Upcoming {
                pages,
                limit,
                start_date,
                export,
            } => {
                assert_eq!(pages, 1);
                assert_eq!(limit, 10);
                assert_eq!(start_date, None);
                assert!(!export.spec().unwrap().is_requested());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_upcoming_with_export() {
        let cli = parse(&[
            "upcoming",
            "--pages",
            "3",
            "--start-date",
            "2024-03-01",
            "--export",
            "csv,xlsx",
            "--sheet-name",
            "Earnings",
        ]);
        match cli.command {
            Command::Upcoming {
                pages,
                start_date,
                export,
                ..
            } => {
                assert_eq!(pages, 3);
                assert_eq!(start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
                let spec = export.spec().unwrap();
                assert_eq!(spec.formats(), [ExportFormat::Csv, ExportFormat::Xlsx]);
                assert_eq!(spec.sheet_name(), Some("Earnings"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_zero_pages_rejected() {
        let result = Cli::try_parse_from(["sa-discovery", "upcoming", "--pages", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_trending_defaults_to_feed() {
        match parse(&["trending"]).command {
            Command::Trending { id, limit, .. } => {
                assert_eq!(id, -1);
                assert_eq!(limit, 5);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_trending_accepts_negative_id() {
        match parse(&["trending", "--id", "-1"]).command {
            Command::Trending { id, .. } => assert_eq!(id, -1),
            other => panic!("unexpected command {other:?}"),
        }
        match parse(&["trending", "--id", "4123456"]).command {
            Command::Trending { id, .. } => assert_eq!(id, 4_123_456),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cnews_category() {
        match parse(&["--export-dir", "/tmp/x", "cnews", "-c", "market-pulse"]).command {
            Command::Cnews {
                category, limit, ..
            } => {
                assert_eq!(category, "market-pulse");
                assert_eq!(limit, 5);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cnews_help_lists_categories() {
        let mut cli = Cli::command();
        let cnews = cli.find_subcommand_mut("cnews").unwrap();
        let help = cnews.render_long_help().to_string();
        for category in NEWS_CATEGORIES {
            assert!(help.contains(category), "{category} missing from help");
        }
    }

    #[test]
    fn test_unlisted_category_still_accepted() {
        match parse(&["cnews", "--category", "not-a-real-tag"]).command {
            Command::Cnews { category, .. } => assert_eq!(category, "not-a-real-tag"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_export_dir_after_subcommand() {
        let cli = parse(&["cnews", "--export-dir", "reports"]);
        assert_eq!(cli.export_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_unknown_export_format() {
        match parse(&["trending", "--export", "pdf"]).command {
            Command::Trending { export, .. } => assert!(export.spec().is_err()),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
