use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("configuration error: {0}")] Configuration(String),
    #[error("{0}")] Validation(String),
    #[error("generation failed: {0}")] Generation(String),
    #[error("attachment rejected: {0}")] Attachment(String),
    #[error("{0}")] Usage(String),
}

impl PlannerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, PlannerError::Validation(_))
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PlannerError::Generation(format!("request timed out: {e}"))
        } else {
            PlannerError::Generation(e.to_string())
        }
    }
}
