//! JSON result file for the sentiment tally.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::SentimentError;
use crate::types::SentimentTally;

/// Write `tally` to `path` as a flat JSON object, replacing any prior content.
///
/// The write is not atomic: a failure part-way leaves a truncated file.
///
/// # Errors
///
/// Returns [`SentimentError::Output`] if the file cannot be created or
/// flushed, or [`SentimentError::Encode`] if serialization fails.
pub fn write_tally(path: &Path, tally: &SentimentTally) -> Result<(), SentimentError> {
    let output_err = |source| SentimentError::Output {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(output_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, tally)?;
    writer.flush().map_err(output_err)?;

    tracing::debug!(path = %path.display(), labels = tally.len(), "wrote sentiment tally");
    Ok(())
}

/// Read a tally previously written by [`write_tally`].
///
/// # Errors
///
/// Returns [`SentimentError::Output`] if the file cannot be opened, or
/// [`SentimentError::Deserialize`] if it is not a flat object of integers.
pub fn read_tally(path: &Path) -> Result<SentimentTally, SentimentError> {
    let file = File::open(path).map_err(|source| SentimentError::Output {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| SentimentError::Deserialize {
        context: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tally() -> SentimentTally {
        let mut tally = SentimentTally::new();
        tally.insert("positive".to_string(), 66);
        tally.insert("negative".to_string(), 33);
        tally.insert(String::new(), 0);
        tally
    }

    #[test]
    fn written_file_parses_back_to_same_tally() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentimentvalue.json");
        let tally = sample_tally();

        write_tally(&path, &tally).unwrap();
        assert_eq!(read_tally(&path).unwrap(), tally);
    }

    #[test]
    fn output_is_a_flat_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_tally(&path, &sample_tally()).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().expect("top-level object");
        assert_eq!(object.len(), 3);
        assert_eq!(object[""], serde_json::json!(0));
        assert_eq!(object["positive"], serde_json::json!(66));
    }

    #[test]
    fn overwrites_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "x".repeat(4096)).unwrap();

        let mut tally = SentimentTally::new();
        tally.insert("negative".to_string(), 100);
        write_tally(&path, &tally).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"negative":100}"#);
    }

    #[test]
    fn missing_directory_is_an_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.json");
        let err = write_tally(&path, &sample_tally()).unwrap_err();
        assert!(matches!(err, SentimentError::Output { .. }), "got {err:?}");
    }
}
