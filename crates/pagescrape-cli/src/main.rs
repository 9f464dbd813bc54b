mod display;
mod run;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use pagescrape_model::{ExtractionRequest, OutputFormat, Selector, Upload};

use crate::run::RunOutcome;

#[derive(Parser)]
#[command(name = "pagescrape")]
#[command(about = "Scrape text from a web page by tag, class, or id and export it as CSV or Excel")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    /// Page to scrape
    #[arg(short, long)]
    url: String,

    /// What the selector value names
    #[arg(short, long, value_enum, default_value = "tag")]
    by: SelectorKind,

    /// Tag name, class name, or id (e.g. "h2", "post-title", "main-header").
    /// Defaults to "h2" when selecting by tag.
    #[arg(short, long)]
    selector: Option<String>,

    /// Existing .csv or .xlsx file to merge the scraped values into
    #[arg(short, long)]
    existing: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: Format,

    /// Directory the output file is written to
    #[arg(short = 'O', long, default_value = ".")]
    output_dir: PathBuf,

    /// Rows of each table to print
    #[arg(long, default_value_t = 20)]
    preview: usize,

    /// Also save the fetched page as raw.html in the output directory
    #[arg(long)]
    cache_html: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SelectorKind {
    /// HTML tag name
    Tag,
    /// Class name (one token of the class attribute)
    Class,
    /// Element id (first match only)
    Id,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Csv,
    Excel,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Excel => OutputFormat::Excel,
        }
    }
}

impl LogLevel {
    /// Filter directive for this level. Below info, the HTML parser and the
    /// HTTP stack are held at warn so the pipeline's own events stay readable.
    fn directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug,selectors=warn,html5ever=warn,hyper_util=warn,rustls=warn",
            LogLevel::Trace => "trace,selectors=warn,html5ever=warn,hyper_util=warn,rustls=warn",
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `--log-level`.
fn init_logging(level: &LogLevel, utc: bool) {
    use tracing_subscriber::fmt::time::{ChronoLocal, ChronoUtc};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.directive()));

    // e.g. 2026-10-19 09:12:44.031 +02:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z".to_string();
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if utc {
        builder.with_timer(ChronoUtc::new(time_format)).init();
    } else {
        builder.with_timer(ChronoLocal::new(time_format)).init();
    }
}

fn build_selector(kind: SelectorKind, value: Option<String>) -> Selector {
    match kind {
        SelectorKind::Tag => Selector::Tag(value.unwrap_or_else(|| "h2".to_string())),
        SelectorKind::Class => Selector::Class(value.unwrap_or_default()),
        SelectorKind::Id => Selector::Id(value.unwrap_or_default()),
    }
}

fn read_upload(path: &Path) -> Result<Upload> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Upload { name, bytes })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.utc);

    let request = ExtractionRequest {
        url: cli.url,
        selector: build_selector(cli.by, cli.selector),
    };
    let upload = cli.existing.as_deref().map(read_upload).transpose()?;
    let format = OutputFormat::from(cli.format);
    let cache_dir = cli.cache_html.then_some(cli.output_dir.as_path());

    let outcome = match run::run(&request, upload.as_ref(), format, cache_dir).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("An error occurred: {e}");
            return Err(e.into());
        }
    };

    let report = match outcome {
        RunOutcome::NoData => return Ok(()),
        RunOutcome::Ready(report) => report,
    };

    println!("{}", display::render_preview(&report.extracted, cli.preview));
    if let Some(merged) = &report.merged {
        println!("{}", display::render_preview(&merged.table, cli.preview));
    }

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("Failed to create {}", cli.output_dir.display()))?;
    let path = cli.output_dir.join(&report.artifact.file_name);
    std::fs::write(&path, &report.artifact.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        mime = report.artifact.mime,
        bytes = report.artifact.bytes.len(),
        "Wrote output file"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_directives_parse() {
        for level in [LogLevel::Error, LogLevel::Warn, LogLevel::Info, LogLevel::Debug, LogLevel::Trace] {
            assert!(tracing_subscriber::EnvFilter::try_new(level.directive()).is_ok());
        }
        assert!(LogLevel::Debug.directive().contains("html5ever=warn"));
        assert_eq!(LogLevel::Info.directive(), "info");
    }

    #[test]
    fn test_default_selector_per_kind() {
        assert_eq!(build_selector(SelectorKind::Tag, None), Selector::Tag("h2".into()));
        assert_eq!(build_selector(SelectorKind::Class, None), Selector::Class(String::new()));
        assert_eq!(
            build_selector(SelectorKind::Id, Some("main-header".into())),
            Selector::Id("main-header".into())
        );
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "pagescrape",
            "--url",
            "https://example.com",
            "--by",
            "class",
            "--selector",
            "post-title",
            "--format",
            "excel",
            "--existing",
            "data.xlsx",
        ])
        .unwrap();

        assert!(matches!(cli.by, SelectorKind::Class));
        assert!(matches!(cli.format, Format::Excel));
        assert_eq!(cli.existing, Some(PathBuf::from("data.xlsx")));
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_read_upload_keeps_file_name() {
        let dir = std::env::temp_dir().join("pagescrape_read_upload");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("existing.csv");
        std::fs::write(&path, "Name\nx\n").unwrap();

        let upload = read_upload(&path).unwrap();
        assert_eq!(upload.name, "existing.csv");
        assert_eq!(upload.bytes, b"Name\nx\n");
    }
}
