mod parser;
pub mod scraper;
pub mod types;
pub mod utils;
pub mod writer;

pub use parser::{ParseError, Selectors, parse_page, parse_quote};
pub use scraper::{HttpSource, PageSource, ScraperError, WebScraper};
pub use writer::{OutputFormat, WriteError};

pub const BASE_URL: &str = "https://quotes.toscrape.com";
