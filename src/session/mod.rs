use std::path::Path;

use crate::config::Config;
use crate::context::{self, ReferenceFile};
use crate::errors::PlannerError;
use crate::form::FormState;
use crate::prompt;
use crate::provider::Provider;
use crate::view::{Screen, ViewState};
use crate::wire::{GenerationRequest, GenerationResult};

/// All state for one planner session. Owned by the top-level loop and
/// handed to the screen renderers by reference.
#[derive(Debug, Clone)]
pub struct Session {
    pub form: FormState,
    pub view: ViewState,
    pub result: Option<GenerationResult>,
    /// Message from the last failed generation, shown until the next success.
    pub last_error: Option<PlannerError>,
    /// Set at startup when no provider could be built; shown as a banner.
    pub config_error: Option<PlannerError>,
    model: String,
    temperature: f32,
}

impl Session {
    pub fn new(cfg: &Config, config_error: Option<PlannerError>) -> Self {
        Self {
            form: cfg.form.to_form(),
            view: ViewState::default(),
            result: None,
            last_error: None,
            config_error,
            model: cfg.model.clone(),
            temperature: cfg.temperature,
        }
    }

    pub fn screen(&self) -> Screen {
        self.view.screen()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn enter(&mut self) -> bool {
        self.view.enter()
    }

    /// Leaves the workspace. Form contents and the last result are kept.
    pub fn exit(&mut self) -> bool {
        self.view.exit()
    }

    /// Clears topics, the last result and any error; metadata stays.
    pub fn reset(&mut self) {
        self.form.reset_topics();
        self.result = None;
        self.last_error = None;
    }

    pub fn attach(&mut self, path: &Path) -> Result<&ReferenceFile, PlannerError> {
        let file = context::load_reference(path)?;
        self.form.references.push(file);
        Ok(&self.form.references[self.form.references.len() - 1])
    }

    /// Remove attachment `index` (1-based, as listed on screen).
    pub fn detach(&mut self, index: usize) -> Result<ReferenceFile, PlannerError> {
        if index == 0 || index > self.form.references.len() {
            return Err(PlannerError::Usage(format!(
                "no attachment {index}; {} attached",
                self.form.references.len()
            )));
        }
        Ok(self.form.references.remove(index - 1))
    }

    /// Validate the form and build the request without touching the network.
    pub fn prepare(&self) -> Result<GenerationRequest, PlannerError> {
        prompt::validate(&self.form)?;
        Ok(GenerationRequest {
            model: self.model.clone(),
            prompt: prompt::build_prompt(&self.form),
            system_instruction: Some(prompt::system_instruction().to_string()),
            temperature: self.temperature,
        })
    }

    /// Run one generation. On success the result is replaced; on failure the
    /// error is recorded and any earlier result is left as it was.
    pub async fn generate(
        &mut self,
        provider: Option<&dyn Provider>,
    ) -> Result<GenerationRequest, PlannerError> {
        let outcome = self.try_generate(provider).await;
        match outcome {
            Ok((req, text)) => {
                tracing::info!(chars = text.len(), "plan generated");
                self.result = Some(GenerationResult::new(text));
                self.last_error = None;
                Ok(req)
            }
            Err(e) => {
                if e.is_validation() {
                    tracing::debug!(error = %e, "generation rejected");
                } else {
                    tracing::warn!(error = %e, "generation not completed");
                }
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    async fn try_generate(
        &self,
        provider: Option<&dyn Provider>,
    ) -> Result<(GenerationRequest, String), PlannerError> {
        let req = self.prepare()?;
        let provider = provider.ok_or_else(|| {
            self.config_error
                .clone()
                .unwrap_or_else(|| PlannerError::Configuration("no provider configured".into()))
        })?;
        let text = provider.generate(&req).await?;
        Ok((req, text))
    }
}
