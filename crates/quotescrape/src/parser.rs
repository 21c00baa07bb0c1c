use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::types::{Page, Quote};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("Missing required field: {0}")]
    MissingField(String),
}

static DEFAULT_SELECTORS: LazyLock<Selectors> = LazyLock::new(|| {
    Selectors::new(".quote", ".text", ".author", ".tags > .tag", ".pager > .next")
        .expect("invalid default selectors")
});

/// CSS selectors describing where quotes live in a listing page.
///
/// `text`, `author` and `tag` are matched inside each `item`; `next` is
/// matched against the whole document.
#[derive(Debug, Clone)]
pub struct Selectors {
    item: Selector,
    text: Selector,
    author: Selector,
    tag: Selector,
    next: Selector,
}

impl Selectors {
    pub fn new(
        item: &str,
        text: &str,
        author: &str,
        tag: &str,
        next: &str,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            item: compile(item)?,
            text: compile(text)?,
            author: compile(author)?,
            tag: compile(tag)?,
            next: compile(next)?,
        })
    }
}

impl Default for Selectors {
    fn default() -> Self {
        DEFAULT_SELECTORS.clone()
    }
}

fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn required_text(
    item: ElementRef,
    selector: &Selector,
    field: &str,
) -> Result<String, ParseError> {
    item.select(selector)
        .next()
        .map(elem_text)
        .ok_or_else(|| ParseError::MissingField(field.to_string()))
}

pub fn parse_quote(item: ElementRef, selectors: &Selectors) -> Result<Quote, ParseError> {
    let text = required_text(item, &selectors.text, "text")?;
    let author = required_text(item, &selectors.author, "author")?;
    let tags = item.select(&selectors.tag).map(elem_text).collect();

    Ok(Quote { text, author, tags })
}

pub fn parse_page(html: &str, selectors: &Selectors) -> Result<Page, ParseError> {
    let document = Html::parse_document(html);

    let quotes = document
        .select(&selectors.item)
        .enumerate()
        .map(|(i, item)| {
            parse_quote(item, selectors).map_err(|e| match e {
                ParseError::MissingField(field) => {
                    ParseError::MissingField(format!("{} (quote #{})", field, i + 1))
                }
                other => other,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let has_next = document.select(&selectors.next).next().is_some();

    Ok(Page { quotes, has_next })
}
