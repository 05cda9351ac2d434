use std::path::Path;

use crate::errors::AppError;

/// Extracts the plain text of a PDF file. Layout and structure are not
/// preserved; the downstream prompts only need the raw text.
pub fn read_pdf_text(path: &Path) -> Result<String, AppError> {
    if !path.exists() {
        return Err(AppError::Pdf(format!(
            "file not found: {}",
            path.display()
        )));
    }

    pdf_extract::extract_text(path)
        .map_err(|e| AppError::Pdf(format!("failed to extract text from {}: {e}", path.display())))
}
