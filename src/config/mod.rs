use anyhow::Context;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::PlannerError;
use crate::form::{FormState, Framework, GradeLevel};

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_CONFIG_PATH: &str = "ACE_PLANNER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "ace-planner.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub api_base: String,
    /// Used only when `GEMINI_API_KEY` is unset.
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub out_dir: String,
    pub save_artifacts: bool,
    pub form: FormDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".into(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".into(),
            api_key: None,
            temperature: 0.6,
            timeout_secs: 300,
            out_dir: ".ace".into(),
            save_artifacts: false,
            form: FormDefaults::default(),
        }
    }
}

/// Initial values for the workspace form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormDefaults {
    pub school: String,
    pub instructor: String,
    pub grade: GradeLevel,
    pub area: String,
    pub framework: Framework,
}

impl Default for FormDefaults {
    fn default() -> Self {
        let f = FormState::default();
        Self {
            school: f.school,
            instructor: f.instructor,
            grade: f.grade,
            area: f.area,
            framework: f.framework,
        }
    }
}

impl FormDefaults {
    pub fn to_form(&self) -> FormState {
        FormState {
            school: self.school.clone(),
            instructor: self.instructor.clone(),
            grade: self.grade,
            area: self.area.clone(),
            framework: self.framework,
            ..FormState::default()
        }
    }
}

impl Config {
    /// Load from an explicit path, else `$ACE_PLANNER_CONFIG`, else
    /// `./ace-planner.toml` when present, else built-in defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match Self::locate(explicit, std::env::var(ENV_CONFIG_PATH).ok()) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    fn locate(explicit: Option<&Path>, env_path: Option<String>) -> Option<PathBuf> {
        if let Some(p) = explicit {
            return Some(p.to_path_buf());
        }
        if let Some(p) = env_path.filter(|p| !p.trim().is_empty()) {
            return Some(PathBuf::from(p));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.is_file().then_some(local)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(path = %path.display(), model = %cfg.model, "loaded config");
        Ok(cfg)
    }

    pub fn resolve_api_key(&self) -> Result<String, PlannerError> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// The environment wins over the config file; blank values count as missing.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Result<String, PlannerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |k: String| {
            let k = k.trim().to_string();
            (!k.is_empty()).then_some(k)
        };
        lookup(ENV_API_KEY)
            .and_then(non_blank)
            .or_else(|| self.api_key.clone().and_then(non_blank))
            .ok_or_else(|| {
                PlannerError::Configuration(format!(
                    "{ENV_API_KEY} is not set; generation is disabled"
                ))
            })
    }
}
