use std::fmt::{Display, Write};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
    pub tags: Vec<String>,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            tags,
        }
    }

    /// Renders the tags as a bracketed list literal, e.g. `['love', 'life']`.
    ///
    /// Each tag is single-quoted unless it contains a `'` and no `"`, in which
    /// case it is double-quoted. Backslashes and the chosen quote character
    /// are escaped, as are newlines, tabs and other control characters, so
    /// the rendering can always be read back unambiguously.
    pub fn tags_repr(&self) -> String {
        let mut out = String::from("[");
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            push_quoted(&mut out, tag);
        }
        out.push(']');
        out
    }
}

fn push_quoted(out: &mut String, s: &str) {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    out.push(quote);
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == '\\' || c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

impl Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.text.trim(), self.author.trim())?;
        if !self.tags.is_empty() {
            f.write_str(" (")?;
            for (i, tag) in self.tags.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(tag)?;
            }
            f.write_char(')')?;
        }
        Ok(())
    }
}

/// One listing page reduced to its quotes and whether another page follows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub quotes: Vec<Quote>,
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tags_repr_empty() {
        let quote = Quote::new("B", "Bob", Vec::new());
        assert_eq!(quote.tags_repr(), "[]");
    }

    #[test]
    fn test_tags_repr_multiple() {
        let quote = Quote::new("A", "Alice", tags(&["x", "y"]));
        assert_eq!(quote.tags_repr(), "['x', 'y']");
    }

    #[test]
    fn test_tags_repr_apostrophe_uses_double_quotes() {
        let quote = Quote::new("A", "Alice", tags(&["don't"]));
        assert_eq!(quote.tags_repr(), r#"["don't"]"#);
    }

    #[test]
    fn test_tags_repr_escapes_when_both_quotes_present() {
        let quote = Quote::new("A", "Alice", tags(&[r#"it's "fine""#, r"back\slash"]));
        assert_eq!(quote.tags_repr(), r#"['it\'s "fine"', 'back\\slash']"#);
    }

    #[test]
    fn test_tags_repr_escapes_control_characters() {
        let quote = Quote::new(
            "A",
            "Alice",
            tags(&["two\nlines", "a\tb\r", "bell\u{7}", "nel\u{85}"]),
        );
        assert_eq!(
            quote.tags_repr(),
            r"['two\nlines', 'a\tb\r', 'bell\x07', 'nel\x85']"
        );
    }

    #[test]
    fn test_display() {
        let quote = Quote::new(" “Hi” ", "Alice", tags(&["x", "y"]));
        assert_eq!(quote.to_string(), "“Hi” - Alice (x, y)");

        let untagged = Quote::new("B", "Bob", Vec::new());
        assert_eq!(untagged.to_string(), "B - Bob");
    }
}
