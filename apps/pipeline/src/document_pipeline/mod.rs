//! Document Pipeline — classify an unstructured document, then extract the
//! structured fields for its type.
//!
//! Flow per document: extract PDF text → one classification call → on RESUME,
//! one extraction call → report the field mapping. Any other classification
//! terminates the pipeline for that document with an explicit
//! unsupported-document error; the extraction stage is never reached.
//!
//! Each stage is an independent request/response cycle on its own
//! conversation. A failure at either stage aborts that document without
//! retry; other documents in the batch are unaffected.

pub mod prompts;

use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::conversation::Conversation;
use crate::llm_client::schema::ResponseSchema;
use crate::llm_client::ChatBackend;
use crate::models::document::{DocClassification, DocType, DocumentFeatures, ResumeFeatures};
use crate::pdf;
use self::prompts::{CLASSIFY_SYSTEM, EXTRACT_SYSTEM};

static DOC_CLASSIFICATION_SCHEMA: Lazy<ResponseSchema> = Lazy::new(|| {
    ResponseSchema::of::<DocClassification>(
        "doc_classification",
        "Classify the document into one of the following categories: Resume, Cover Letter, or Unknown.",
    )
});

static RESUME_FEATURES_SCHEMA: Lazy<ResponseSchema> = Lazy::new(|| {
    ResponseSchema::of::<ResumeFeatures>(
        "resume_features",
        "Extract structured features from the resume.",
    )
});

/// Classifies the document text into one of the supported categories.
pub async fn classify(backend: &dyn ChatBackend, text: &str) -> Result<DocType, AppError> {
    let mut conv = Conversation::new(0);
    conv.push_system(CLASSIFY_SYSTEM);
    conv.push_user(text);

    let raw = conv.generate(backend, &DOC_CLASSIFICATION_SCHEMA).await?;
    let classification: DocClassification = serde_json::from_str(&raw)?;
    Ok(classification.doc_type)
}

/// Extracts the fixed resume field set from the document text.
pub async fn extract_resume(
    backend: &dyn ChatBackend,
    text: &str,
) -> Result<ResumeFeatures, AppError> {
    let mut conv = Conversation::new(1);
    conv.push_system(EXTRACT_SYSTEM);
    conv.push_user(text);

    let raw = conv.generate(backend, &RESUME_FEATURES_SCHEMA).await?;
    let features: ResumeFeatures = serde_json::from_str(&raw)?;
    Ok(features)
}

/// Runs the classify→extract state machine over already-extracted text.
///
/// Only RESUME documents have an extraction stage; every other
/// classification is an unsupported-document error, not a silent no-op.
pub async fn process_text(
    backend: &dyn ChatBackend,
    text: &str,
) -> Result<DocumentFeatures, AppError> {
    let doc_type = classify(backend, text).await?;
    info!("document classified as {doc_type}");

    match doc_type {
        DocType::Resume => {
            let features = extract_resume(backend, text).await?;
            Ok(DocumentFeatures::Resume(features))
        }
        other => Err(AppError::UnsupportedDocument(other)),
    }
}

/// One document end-to-end, from PDF path to feature mapping.
pub async fn process_document(
    backend: &dyn ChatBackend,
    pdf_path: &Path,
) -> Result<DocumentFeatures, AppError> {
    let text = pdf::read_pdf_text(pdf_path)?;
    process_text(backend, &text).await
}

/// Processes each document in turn, printing the extracted fields and a
/// summary. Per-document failures never abort the batch.
pub async fn run_batch(backend: &dyn ChatBackend, pdfs: &[PathBuf]) {
    let mut failures = 0;

    for path in pdfs {
        println!("Document: {}", path.display());
        match process_document(backend, path).await {
            Ok(features) => {
                println!("Type: {}", features.doc_type());
                for (name, value) in features.fields() {
                    println!("  {name}: {value}");
                }
            }
            Err(e) => {
                warn!("{} failed: {e}", path.display());
                println!("Error: {e}");
                failures += 1;
            }
        }
        println!("{:-<50}", "");
    }

    println!("Processed {} document(s), {} failed", pdfs.len(), failures);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedBackend;

    const RESUME_CLASSIFICATION: &str = r#"{"docType": "RESUME"}"#;
    const COVER_LETTER_CLASSIFICATION: &str = r#"{"docType": "COVER_LETTER"}"#;
    const EXTRACTION_REPLY: &str = r#"{
        "firstName": "Ada",
        "lastName": "Lovelace",
        "contact": {"email": "ada@example.com", "phone": "+441234567890"},
        "education": [{"degree": "BSc Mathematics"}],
        "yearsOfExperience": 6.5,
        "skills": ["Rust", "SQL"],
        "workExperience": [{"companyName": "Analytical Engines Ltd", "position": "Engineer"}],
        "location": "London"
    }"#;

    #[tokio::test]
    async fn test_cover_letter_is_unsupported_and_skips_extraction() {
        let backend = ScriptedBackend::replying(&[COVER_LETTER_CLASSIFICATION]);

        let result = process_text(&backend, "To whom it may concern...").await;

        match result {
            Err(AppError::UnsupportedDocument(DocType::CoverLetter)) => {}
            other => panic!("expected unsupported-document error, got {other:?}"),
        }
        assert_eq!(backend.calls(), 1, "extraction must never be called");
    }

    #[tokio::test]
    async fn test_unknown_document_is_unsupported() {
        let backend = ScriptedBackend::replying(&[r#"{"docType": "UNKNOWN"}"#]);

        let result = process_text(&backend, "lorem ipsum").await;

        assert!(matches!(
            result,
            Err(AppError::UnsupportedDocument(DocType::Unknown))
        ));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_resume_flows_through_extraction() {
        let backend = ScriptedBackend::replying(&[RESUME_CLASSIFICATION, EXTRACTION_REPLY]);

        let features = process_text(&backend, "Ada Lovelace — Engineer")
            .await
            .unwrap();

        assert_eq!(backend.calls(), 2);
        let resume = match features {
            DocumentFeatures::Resume(resume) => resume,
            other => panic!("expected resume features, got {other:?}"),
        };
        assert_eq!(resume.first_name, "Ada");
        assert_eq!(resume.last_name, "Lovelace");
        assert_eq!(resume.contact.email, "ada@example.com");
        assert_eq!(resume.education[0].degree, "BSc Mathematics");
        assert!((resume.years_of_experience - 6.5).abs() < f32::EPSILON);
        assert_eq!(resume.skills, vec!["Rust", "SQL"]);
        assert_eq!(resume.work_experience[0].position, "Engineer");
        assert_eq!(resume.location, "London");

        // Fields the reply omitted stay at their empty values.
        assert_eq!(resume.salary_expectation, 0.0);
        assert!(resume.open_source_projects.is_empty());
    }

    #[tokio::test]
    async fn test_classification_failure_aborts_without_extraction() {
        let backend = ScriptedBackend::failing();

        let result = process_text(&backend, "anything").await;

        assert!(matches!(result, Err(AppError::Llm(_))));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_extraction_parse_failure_is_reported() {
        let backend = ScriptedBackend::replying(&[RESUME_CLASSIFICATION, "not json"]);

        let result = process_text(&backend, "Ada Lovelace — Engineer").await;

        assert!(matches!(result, Err(AppError::Parse(_))));
        assert_eq!(backend.calls(), 2);
    }
}
