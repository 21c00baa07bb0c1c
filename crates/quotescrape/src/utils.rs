use std::collections::HashSet;

use crate::types::Quote;

#[derive(Debug, PartialEq, Eq)]
pub struct QuoteStats {
    pub quotes: usize,
    pub authors: usize,
    pub tags: usize,
    pub untagged: usize,
}

impl QuoteStats {
    pub fn from_quotes(quotes: &[Quote]) -> QuoteStats {
        let authors: HashSet<&str> = quotes.iter().map(|q| q.author.trim()).collect();
        let tags: HashSet<&str> = quotes
            .iter()
            .flat_map(|q| &q.tags)
            .map(String::as_str)
            .collect();

        QuoteStats {
            quotes: quotes.len(),
            authors: authors.len(),
            tags: tags.len(),
            untagged: quotes.iter().filter(|q| q.tags.is_empty()).count(),
        }
    }
}

impl std::fmt::Display for QuoteStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Quotes:           {}", self.quotes)?;
        writeln!(f, "  Distinct authors: {}", self.authors)?;
        writeln!(f, "  Distinct tags:    {}", self.tags)?;
        writeln!(f, "  Untagged quotes:  {}", self.untagged)
    }
}
