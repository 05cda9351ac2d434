//! SQL Pipeline — natural-language questions in, validated SQL out.
//!
//! Flow per question: build a fresh conversation (schema system prompt +
//! few-shot turns + the question) → generate under the `SqlAnswer` schema →
//! parse → execute the statement against the local SQLite file → print rows.
//!
//! Every failure (backend, parse, execution) is contained to its question:
//! it is logged, counted as one failed generation, and the batch moves on.
//! The summary is always printed, even when the backend was unreachable for
//! the whole batch.

pub mod prompts;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

use crate::db;
use crate::errors::AppError;
use crate::llm_client::conversation::Conversation;
use crate::llm_client::schema::ResponseSchema;
use crate::llm_client::ChatBackend;
use crate::models::sql::SqlAnswer;
use self::prompts::{FEW_SHOT_EXAMPLES, SQL_SYSTEM_PROMPT};

/// Derived once per process; the shape never changes at runtime.
static SQL_ANSWER_SCHEMA: Lazy<ResponseSchema> = Lazy::new(|| {
    ResponseSchema::of::<SqlAnswer>(
        "sql_answer",
        "A step-explained SQL query answering the user's question.",
    )
});

// ────────────────────────────────────────────────────────────────────────────
// Batch report
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub failures: usize,
}

impl BatchReport {
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (1.0 - self.failures as f64 / self.total as f64) * 100.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Batch driver
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full question batch sequentially and prints the summary.
pub async fn run_batch(
    backend: &dyn ChatBackend,
    db_path: &Path,
    questions: &[String],
) -> BatchReport {
    let mut failures = 0;

    for (case_id, question) in questions.iter().enumerate() {
        match run_case(backend, db_path, case_id as u32, question).await {
            Ok(rows) => {
                if rows.is_empty() {
                    println!("(no rows)");
                }
                for row in &rows {
                    println!("  {}", Value::Object(row.clone()));
                }
            }
            Err(e) => {
                warn!("case {case_id} failed: {e}");
                failures += 1;
            }
        }
        println!("{:-<50}", "");
    }

    let report = BatchReport {
        total: questions.len(),
        failures,
    };
    println!("Failed generations: {}", report.failures);
    println!("Total questions: {}", report.total);
    println!("Success rate: {:.2}%", report.success_rate());
    report
}

/// One question end-to-end: generate, parse, print the explanation, execute.
async fn run_case(
    backend: &dyn ChatBackend,
    db_path: &Path,
    case_id: u32,
    question: &str,
) -> Result<Vec<Map<String, Value>>, AppError> {
    let mut conv = build_conversation(case_id, question);
    debug!(
        "case {} prompt ({} messages):\n{}",
        conv.id(),
        conv.len(),
        conv.transcript()
    );

    let raw = conv.generate(backend, &SQL_ANSWER_SCHEMA).await?;
    let answer: SqlAnswer = serde_json::from_str(&raw)?;

    println!("Question: {question}");
    for (i, step) in answer.steps.iter().enumerate() {
        println!("Step {}: {}", i + 1, step.explanation);
    }
    println!("SQL: {}", answer.final_output);

    let rows = db::execute_query(db_path, &answer.final_output).await?;
    Ok(rows)
}

/// Seeds a fresh conversation: system prompt with the database schema, the
/// few-shot pairs as alternating user/assistant turns, then the question.
fn build_conversation(case_id: u32, question: &str) -> Conversation {
    let mut conv = Conversation::new(case_id);
    conv.push_system(SQL_SYSTEM_PROMPT);
    for (example_question, example_sql) in FEW_SHOT_EXAMPLES {
        conv.push_user(*example_question);
        conv.push_assistant(*example_sql);
    }
    conv.push_user(question);
    conv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::conversation::Role;
    use crate::llm_client::testing::ScriptedBackend;
    use tempfile::NamedTempFile;

    const TRIVIAL_ANSWER: &str =
        r#"{"steps": [{"explanation": "constant projection"}], "finalOutput": "SELECT 1;"}"#;
    const MALFORMED_SQL_ANSWER: &str =
        r#"{"steps": [{"explanation": "typo in keyword"}], "finalOutput": "SELEC 1"}"#;

    fn questions(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|q| q.to_string()).collect()
    }

    #[test]
    fn test_conversation_seeding_order() {
        let conv = build_conversation(3, "How many orders were delivered?");
        let messages = conv.messages();

        // system + 2 few-shot pairs + question
        assert_eq!(messages.len(), 6);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[3].role, Role::User);
        assert_eq!(messages[4].role, Role::Assistant);
        assert_eq!(messages[5].role, Role::User);
        assert_eq!(messages[5].content, "How many orders were delivered?");
    }

    #[tokio::test]
    async fn test_valid_statement_executes_with_zero_failures() {
        let db = NamedTempFile::new().unwrap();
        let backend = ScriptedBackend::replying(&[TRIVIAL_ANSWER]);
        let qs = questions(&[
            "Which seller has delivered the most orders to customers in Rio de Janeiro?",
        ]);

        let report = run_batch(&backend, db.path(), &qs).await;

        assert_eq!(report, BatchReport { total: 1, failures: 0 });
        assert!((report.success_rate() - 100.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_trivial_case_yields_single_literal_row() {
        let db = NamedTempFile::new().unwrap();
        let backend = ScriptedBackend::replying(&[TRIVIAL_ANSWER]);

        let rows = run_case(&backend, db.path(), 0, "any question").await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["1"], Value::from(1));
    }

    #[tokio::test]
    async fn test_malformed_sql_counts_one_failure_and_continues() {
        let db = NamedTempFile::new().unwrap();
        let backend = ScriptedBackend::replying(&[MALFORMED_SQL_ANSWER, TRIVIAL_ANSWER]);
        let qs = questions(&["first question", "second question"]);

        let report = run_batch(&backend, db.path(), &qs).await;

        assert_eq!(report, BatchReport { total: 2, failures: 1 });
        assert_eq!(backend.calls(), 2, "the batch must proceed to the next question");
        assert!((report.success_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_unparseable_reply_counts_as_failed_generation() {
        let db = NamedTempFile::new().unwrap();
        let backend = ScriptedBackend::replying(&[r#"{"unexpected": "shape"}"#, TRIVIAL_ANSWER]);
        let qs = questions(&["first question", "second question"]);

        let report = run_batch(&backend, db.path(), &qs).await;

        assert_eq!(report, BatchReport { total: 2, failures: 1 });
    }

    #[tokio::test]
    async fn test_unreachable_backend_still_completes_the_batch() {
        let db = NamedTempFile::new().unwrap();
        let backend = ScriptedBackend::failing();
        let qs = questions(&["first question", "second question"]);

        let report = run_batch(&backend, db.path(), &qs).await;

        assert_eq!(report, BatchReport { total: 2, failures: 2 });
        assert!(report.success_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_batch_reports_full_success() {
        let report = BatchReport { total: 0, failures: 0 };
        assert!((report.success_rate() - 100.0).abs() < f64::EPSILON);
    }
}
