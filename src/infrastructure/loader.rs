use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{DocMetadata, DomainError, FaqDocument, Result};

/// Reads the two-column FAQ source (`question`,`answer`) into documents.
///
/// Every row becomes one document; the content keeps the row's structured
/// rendering so both the question and the answer are embedded together.
/// Re-loading the same file yields an equivalent sequence with equal ids.
pub struct CsvFaqLoader {
    path: PathBuf,
}

impl CsvFaqLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Vec<FaqDocument>> {
        // Only absence maps to NotFound; a present-but-unreadable source
        // (permissions, encoding) is a different failure.
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            let detail = format!("FAQ source {}: {e}", self.path.display());
            if e.kind() == std::io::ErrorKind::NotFound {
                DomainError::not_found(detail)
            } else {
                DomainError::internal(detail)
            }
        })?;

        // Sources exported from spreadsheets often start with a UTF-8 BOM.
        let body = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let source = self.path.display().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(body.as_bytes());

        let mut documents = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                DomainError::validation(format!("FAQ source {source} row {row}: {e}"))
            })?;

            let question = record.get(0).unwrap_or_default().trim();
            let answer = record.get(1).unwrap_or_default().trim();
            let content = format!("question: {question}\nanswer: {answer}");

            documents.push(FaqDocument::new(content, DocMetadata::new(&source, row)));
        }

        info!(count = documents.len(), source = %source, "loaded FAQ documents");
        Ok(documents)
    }
}
