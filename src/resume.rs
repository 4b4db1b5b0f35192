//! Resume text from uploaded files.

use std::path::Path;

use crate::error::MatchError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Extract text from resume bytes. PDFs go through `pdf-extract`; anything
/// else must be UTF-8 text.
pub fn text_from_bytes(data: &[u8]) -> Result<String, MatchError> {
    if data.starts_with(PDF_MAGIC) {
        return pdf_extract::extract_text_from_mem(data)
            .map_err(|e| MatchError::Resume(format!("PDF extraction failed: {e}")));
    }
    String::from_utf8(data.to_vec())
        .map_err(|_| MatchError::Resume("file is neither a PDF nor UTF-8 text".to_string()))
}

pub fn text_from_path(path: &Path) -> Result<String, MatchError> {
    let data = std::fs::read(path)
        .map_err(|e| MatchError::Resume(format!("{}: {e}", path.display())))?;
    text_from_bytes(&data)
}
