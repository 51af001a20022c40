use serde::{Deserialize, Serialize};

/// Response for a created or updated career
///
/// `career` is the public view: evaluator prompts are never included.
#[derive(Debug, Serialize, Deserialize)]
pub struct CareerResponse {
    pub message: String,
    pub career: serde_json::Value,
}
