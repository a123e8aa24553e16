//! CSV ingestion for question/answer datasets.
//!
//! The source dataset is a two-column CSV (question, answer). Rows with
//! missing values are kept with the missing half as an empty string, never
//! skipped, so row numbers in metadata stay aligned with the source file.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::{RagError, Result};
use crate::normalize::normalize;

/// One dataset row, normalized and ready for indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct QaEntry {
    /// Normalized combined question/answer text.
    pub text: String,
    /// Source file and row number.
    pub metadata: HashMap<String, String>,
}

/// Load a (question, answer) CSV into normalized entries.
///
/// The first row is treated as a header. `sample` keeps only the first N
/// data rows, handy for prototyping against a large dataset.
///
/// # Errors
///
/// Returns [`RagError::Ingest`] if the file cannot be opened or a row fails
/// to parse as CSV. Missing cells are not errors.
pub fn load_csv(path: &Path, sample: Option<usize>) -> Result<Vec<QaEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| RagError::Ingest(format!("failed to open '{}': {e}", path.display())))?;

    let source = path.display().to_string();
    let mut entries = Vec::new();
    for (index, row) in reader.records().enumerate() {
        if let Some(limit) = sample {
            if entries.len() >= limit {
                break;
            }
        }
        let row = row.map_err(|e| RagError::Ingest(format!("row {}: {e}", index + 1)))?;
        let text = normalize(row.get(0), row.get(1));
        let metadata = HashMap::from([
            ("source".to_string(), source.clone()),
            ("row".to_string(), (index + 1).to_string()),
        ]);
        entries.push(QaEntry { text, metadata });
    }

    info!(path = %path.display(), rows = entries.len(), "loaded dataset");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_and_normalizes_rows() {
        let file = write_csv("question,answer\n What is flu? ,\"Viral\ninfection.\"\n");
        let entries = load_csv(file.path(), None).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "What is flu? [SEP] Viral infection.");
        assert_eq!(entries[0].metadata.get("row").unwrap(), "1");
    }

    #[test]
    fn missing_cells_become_empty_not_skipped() {
        let file = write_csv("question,answer\nonly a question\n,only an answer\n");
        let entries = load_csv(file.path(), None).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "only a question [SEP] ");
        assert_eq!(entries[1].text, " [SEP] only an answer");
    }

    #[test]
    fn sample_limits_rows() {
        let file = write_csv("question,answer\nq1,a1\nq2,a2\nq3,a3\n");
        let entries = load_csv(file.path(), Some(2)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].text, "q2 [SEP] a2");
    }

    #[test]
    fn missing_file_is_an_ingest_error() {
        let err = load_csv(Path::new("/nonexistent/medqa.csv"), None).unwrap_err();
        assert!(matches!(err, RagError::Ingest(_)));
    }
}
