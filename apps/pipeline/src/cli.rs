use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Structured-output pipelines over an OpenAI-compatible model backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate SQL for natural-language questions and validate each
    /// statement against a local SQLite database
    Sql {
        /// Path to the SQLite database file the generated SQL runs against
        #[arg(long, env = "SQLITE_DB_PATH")]
        db: PathBuf,

        /// Question to run instead of the built-in batch (repeatable)
        #[arg(long = "question", value_name = "TEXT")]
        questions: Vec<String>,
    },

    /// Classify PDF documents and extract type-specific structured features
    Docs {
        /// PDF file(s) to process
        #[arg(required = true, value_name = "PDF")]
        pdfs: Vec<PathBuf>,
    },
}
