mod cli;
mod config;
mod db;
mod document_pipeline;
mod errors;
mod llm_client;
mod models;
mod pdf;
mod sql_pipeline;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::llm_client::OpenAiClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Cli::parse();

    // One backend client for the whole process, passed by reference into
    // each pipeline.
    let backend = OpenAiClient::new(&config);
    info!("LLM client initialized (model: {})", config.openai_model);

    match args.command {
        Command::Sql { db, questions } => {
            let questions: Vec<String> = if questions.is_empty() {
                sql_pipeline::prompts::DEFAULT_QUESTIONS
                    .iter()
                    .map(|q| q.to_string())
                    .collect()
            } else {
                questions
            };
            sql_pipeline::run_batch(&backend, &db, &questions).await;
        }
        Command::Docs { pdfs } => {
            document_pipeline::run_batch(&backend, &pdfs).await;
        }
    }

    Ok(())
}
