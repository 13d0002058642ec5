use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the planner hands to a provider for one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    pub temperature: f32,
}

/// The most recent text returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn new(text: String) -> Self {
        Self { text, generated_at: Utc::now() }
    }
}
