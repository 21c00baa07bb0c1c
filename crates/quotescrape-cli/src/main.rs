use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use quotescrape::utils::QuoteStats;
use quotescrape::writer::write_quotes;
use quotescrape::{OutputFormat, WebScraper};

#[derive(Parser)]
#[command(name = "quotescrape")]
#[command(about = "Crawls every quotes.toscrape.com page into a CSV or JSON file", long_about = None)]
struct Cli {
    #[arg(help = "Path of the file to write [default: quotes.csv, or quotes.json with --format json]")]
    output: Option<PathBuf>,

    #[arg(
        long,
        default_value = quotescrape::BASE_URL,
        help = "Site to crawl; pages are fetched from <BASE_URL>/page/<n>/"
    )]
    base_url: String,

    #[arg(
        long,
        help = "Stop after this many pages even if more are advertised",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_pages: Option<u32>,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "csv",
        help = "Output file format"
    )]
    format: Format,

    #[arg(long, help = "Print summary statistics after writing")]
    stats: bool,

    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn output_path(output: Option<PathBuf>, format: OutputFormat) -> PathBuf {
    output.unwrap_or_else(|| PathBuf::from(format!("quotes.{}", format.extension())))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let scraper = WebScraper::new()
        .unwrap_or_else(|e| {
            log::error!("Error creating scraper: {}", e);
            process::exit(1);
        })
        .with_base_url(cli.base_url)
        .with_max_pages(cli.max_pages);

    log::info!("Crawling quotes from {}...", scraper.base_url());

    let quotes = scraper.fetch_all_quotes().await.unwrap_or_else(|e| {
        log::error!("Error fetching quotes: {}", e);
        process::exit(1);
    });

    let format = OutputFormat::from(cli.format);
    let output = output_path(cli.output, format);

    write_quotes(&output, &quotes, format).unwrap_or_else(|e| {
        log::error!("Error writing {}: {}", output.display(), e);
        process::exit(1);
    });

    log::info!("Wrote {} quote(s) to {}", quotes.len(), output.display());

    if cli.stats {
        print!("{}", QuoteStats::from_quotes(&quotes));
    }
}
