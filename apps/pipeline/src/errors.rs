#![allow(dead_code)]

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::document::DocType;

/// Pipeline-level error type.
///
/// Every variant is recoverable at the granularity of one input unit (one
/// question, one document): the batch drivers log the error, count the unit
/// as failed, and move on. Only configuration failure at startup is fatal.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Unsupported document type: {0}")]
    UnsupportedDocument(DocType),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
