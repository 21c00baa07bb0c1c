use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::types::Quote;

pub const CSV_HEADER: [&str; 3] = ["text", "author", "tags"];

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

pub fn write_quotes(
    path: impl AsRef<Path>,
    quotes: &[Quote],
    format: OutputFormat,
) -> Result<(), WriteError> {
    match format {
        OutputFormat::Csv => write_csv(path, quotes),
        OutputFormat::Json => write_json(path, quotes),
    }
}

/// Writes a header row followed by one row per quote. Tags are rendered
/// with [`Quote::tags_repr`] into a single field.
pub fn write_csv(path: impl AsRef<Path>, quotes: &[Quote]) -> Result<(), WriteError> {
    let path = path.as_ref();
    log::info!("Writing {} quote(s) to {}", quotes.len(), path.display());

    write_or_discard(path, |file| {
        let mut wtr = csv::Writer::from_writer(file);
        wtr.write_record(CSV_HEADER)?;
        for quote in quotes {
            wtr.write_record([
                quote.text.as_str(),
                quote.author.as_str(),
                quote.tags_repr().as_str(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    })
}

pub fn write_json(path: impl AsRef<Path>, quotes: &[Quote]) -> Result<(), WriteError> {
    let path = path.as_ref();
    log::info!("Writing {} quote(s) to {}", quotes.len(), path.display());

    write_or_discard(path, |file| {
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, quotes)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    })
}

/// Creates `path` and hands it to `write`. A file that fails partway is
/// removed so no truncated output is left behind.
fn write_or_discard<F>(path: &Path, write: F) -> Result<(), WriteError>
where
    F: FnOnce(File) -> Result<(), WriteError>,
{
    let file = File::create(path)?;
    write(file).inspect_err(|e| {
        log::error!("Discarding partial output {}: {}", path.display(), e);
        if let Err(rm) = fs::remove_file(path) {
            log::warn!("Failed to remove {}: {}", path.display(), rm);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> Vec<Quote> {
        vec![
            Quote::new("A", "Alice", vec!["x".into(), "y".into()]),
            Quote::new("B", "Bob", Vec::new()),
            Quote::new("C", "Carol", vec!["z".into()]),
        ]
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .expect("Failed to open CSV");
        rdr.records()
            .map(|r| {
                r.expect("Invalid CSV record")
                    .iter()
                    .map(str::to_string)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_write_csv_rows_in_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quotes.csv");

        write_csv(&path, &sample()).unwrap();

        assert_eq!(
            read_rows(&path),
            vec![
                vec!["text", "author", "tags"],
                vec!["A", "Alice", "['x', 'y']"],
                vec!["B", "Bob", "[]"],
                vec!["C", "Carol", "['z']"],
            ]
        );
    }

    #[test]
    fn test_write_csv_header_only_when_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quotes.csv");

        write_csv(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "text,author,tags\n");
    }

    #[test]
    fn test_write_csv_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quotes.csv");
        let quotes = vec![
            Quote::new(
                "“A day without sunshine is like, you know, night.”",
                "Steve Martin",
                vec!["humor".into(), "obvious".into(), "simile".into()],
            ),
            Quote::new("line one\nline \"two\"", "Zoë Ünlü", vec!["naïve".into()]),
            Quote::new("", "", Vec::new()),
        ];

        write_csv(&path, &quotes).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        assert_eq!(rdr.headers().unwrap().iter().collect::<Vec<_>>(), CSV_HEADER);
        let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();

        assert_eq!(rows.len(), quotes.len());
        for (row, quote) in rows.iter().zip(&quotes) {
            assert_eq!(&row[0], quote.text);
            assert_eq!(&row[1], quote.author);
            assert_eq!(&row[2], quote.tags_repr());
        }
    }

    #[test]
    fn test_write_csv_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quotes.csv");
        fs::write(&path, "stale contents that are much longer than the new file\n").unwrap();

        write_csv(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "text,author,tags\n");
    }

    #[test]
    fn test_write_csv_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("quotes.csv");

        let err = write_csv(&path, &sample()).unwrap_err();

        assert!(matches!(err, WriteError::Io(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quotes.csv");

        let err = write_or_discard(&path, |mut file| {
            file.write_all(b"text,author,tags\nA,Alice,")?;
            Err(std::io::Error::other("disk full").into())
        })
        .unwrap_err();

        assert!(matches!(err, WriteError::Io(_)));
        assert!(!path.exists(), "Partial output should be removed");
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::default().extension(), "csv");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }

    #[test]
    fn test_write_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quotes.json");

        write_quotes(&path, &sample(), OutputFormat::Json).unwrap();

        let parsed: Vec<Quote> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_write_quotes_dispatches_csv() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quotes.csv");

        write_quotes(&path, &sample(), OutputFormat::default()).unwrap();

        assert_eq!(read_rows(&path).len(), 4);
    }
}
