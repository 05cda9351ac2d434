//! Result shape for the NL→SQL pipeline.
//!
//! Field names are wire names: the backend is constrained to return exactly
//! this shape, and a reply missing a required field is a parse error, never
//! a silent zero-valued success.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One step of the model's reasoning towards the final statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Step {
    /// Explanation of this reasoning step.
    pub explanation: String,
}

/// A step-explained SQL answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SqlAnswer {
    /// The reasoning steps taken to arrive at the final statement.
    pub steps: Vec<Step>,
    /// The final SQL statement, as a single line without newlines.
    pub final_output: String,
}
