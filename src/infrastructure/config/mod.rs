use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::error::{AppError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "card_grader.toml";
pub const ENV_PREFIX: &str = "CARD_GRADER_";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GraderConfig {
    /// Origin of the scoring service; requests go to `{backend_url}/grade`.
    #[validate(url)]
    pub backend_url: String,
    /// The overlay only activates on pages served from exactly this host.
    #[validate(length(min = 1))]
    pub trusted_host: String,
    /// CSS selector marking the currently active tab control.
    #[validate(custom(function = "validate_selector"))]
    pub active_tab_selector: String,
    /// Case-insensitive text the active tab must contain.
    #[validate(length(min = 1))]
    pub tab_label: String,
    pub dev_backend_port: u16,
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            trusted_host: "huggingface.co".to_string(),
            active_tab_selector: ".tab-alternate.active".to_string(),
            tab_label: "model card".to_string(),
            dev_backend_port: 8000,
        }
    }
}

fn validate_selector(selector: &str) -> std::result::Result<(), ValidationError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_css_selector"))
}

impl GraderConfig {
    /// Defaults, then the TOML file (if it exists), then `CARD_GRADER_*`
    /// environment variables. A `.env` file is honoured when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Self::from_figment(
            Figment::from(Serialized::defaults(GraderConfig::default()))
                .merge(Toml::file(path))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: GraderConfig = figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load config: {}", e)))?;
        config
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid config: {}", e)))?;
        Ok(config)
    }

    pub fn grade_endpoint(&self) -> String {
        if self.backend_url.ends_with('/') {
            format!("{}grade", self.backend_url)
        } else {
            format!("{}/grade", self.backend_url)
        }
    }
}
