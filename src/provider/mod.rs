use async_trait::async_trait;

use crate::config::Config;
use crate::errors::PlannerError;
use crate::wire::GenerationRequest;

pub mod gemini;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Returns the generated text for one request.
    async fn generate(&self, req: &GenerationRequest) -> Result<String, PlannerError>;
}

pub type DynProvider = Box<dyn Provider>;

/// Build the Gemini provider. A missing credential is returned as a
/// `Configuration` error so the caller can keep the UI running without it.
pub fn make_provider(cfg: &Config) -> Result<DynProvider, PlannerError> {
    let api_key = cfg.resolve_api_key()?;
    let provider = gemini::GeminiProvider::new(api_key, cfg.api_base.clone(), cfg.timeout_secs)?;
    Ok(Box::new(provider))
}
