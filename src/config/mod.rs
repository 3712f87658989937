//! Configuration for the guardrail engine.
//!
//! Values are layered: built-in defaults, then an optional config file
//! (TOML, YAML or JSON), then `GUARDRAIL__*` environment variables such as
//! `GUARDRAIL__ENGINE__DEFAULT_ACTION=escalate`.

use crate::policy::Action;
use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "GUARDRAIL";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Decision pipeline settings
    pub engine: EngineConfig,
    /// Replacement texts for withheld outputs
    pub output: OutputConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from defaults and the environment.
    pub fn from_env() -> Result<Self> {
        Self::load(None::<&Path>)
    }

    /// Load configuration from a file, then apply environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(Some(path))
    }

    fn load(path: Option<impl AsRef<Path>>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path.as_ref()));
        }

        let config: Config = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.output.validate()?;
        self.logging.validate()
    }
}

/// Decision pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Action applied when no policy matches or none meets its threshold
    pub default_action: Action,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_action: Action::Block,
        }
    }
}

/// Replacement texts used when the original output is not shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Shown for `sanitize` decisions
    pub sanitize_message: String,
    /// Shown for `escalate` decisions
    pub escalate_message: String,
    /// Shown for `block` decisions
    pub block_message: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sanitize_message:
                "This response cannot be shown. Please consult a qualified professional."
                    .to_string(),
            escalate_message: "[Output withheld pending human review.]".to_string(),
            block_message: "[Output suppressed by guardrail policy.]".to_string(),
        }
    }
}

impl OutputConfig {
    /// Validate the output messages.
    pub fn validate(&self) -> Result<()> {
        let messages = [
            ("output.sanitize_message", &self.sanitize_message),
            ("output.escalate_message", &self.escalate_message),
            ("output.block_message", &self.block_message),
        ];
        for (key, message) in messages {
            if message.trim().is_empty() {
                return Err(Error::config_key("message cannot be empty", key));
            }
        }
        Ok(())
    }

    /// Text shown in place of an output for the given decision, or `None`
    /// when the original output is shown.
    pub fn replacement_for(&self, action: Action) -> Option<&str> {
        match action {
            Action::Allow => None,
            Action::Sanitize => Some(&self.sanitize_message),
            Action::Escalate => Some(&self.escalate_message),
            Action::Block => Some(&self.block_message),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (`trace`, `debug`, `info`, `warn` or `error`)
    pub level: String,
    /// Emit JSON log lines
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Validate the logging settings.
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(Error::config_key(
                format!("unknown log level '{}'", self.level),
                "logging.level",
            ));
        }
        Ok(())
    }
}
