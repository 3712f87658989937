//! Logging setup and decision tallies.
//!
//! The decision pipeline only emits `tracing` events; installing a
//! subscriber is left to the binary through [`init_logging`].

use crate::api::DecisionRecord;
use crate::config::LoggingConfig;
use crate::policy::Action;
use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so stdout stays free for reports.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.to_lowercase()))
        .map_err(|e| Error::config_key(format!("Invalid log filter: {}", e), "logging.level"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| Error::internal(format!("Failed to set logging subscriber: {}", e)))
}

/// Per-action tally of decision records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionMetrics {
    /// Number of allow decisions
    pub allow: u64,
    /// Number of sanitize decisions
    pub sanitize: u64,
    /// Number of escalate decisions
    pub escalate: u64,
    /// Number of block decisions
    pub block: u64,
    /// Records where no policy applied and the default action was used
    pub defaulted: u64,
}

impl DecisionMetrics {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a batch of records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DecisionRecord>) -> Self {
        let mut metrics = Self::new();
        for record in records {
            metrics.record(record);
        }
        metrics
    }

    /// Record one decision.
    pub fn record(&mut self, record: &DecisionRecord) {
        match record.decision {
            Action::Allow => self.allow += 1,
            Action::Sanitize => self.sanitize += 1,
            Action::Escalate => self.escalate += 1,
            Action::Block => self.block += 1,
        }
        if record.is_default() {
            self.defaulted += 1;
        }
    }

    /// Number of decisions for one action.
    pub fn count(&self, action: Action) -> u64 {
        match action {
            Action::Allow => self.allow,
            Action::Sanitize => self.sanitize,
            Action::Escalate => self.escalate,
            Action::Block => self.block,
        }
    }

    /// Total number of decisions.
    pub fn total(&self) -> u64 {
        self.allow + self.sanitize + self.escalate + self.block
    }

    /// Records awaiting human review.
    pub fn pending_review(&self) -> u64 {
        self.escalate
    }

    /// Number of decisions that fell back to the default action.
    pub fn defaulted(&self) -> u64 {
        self.defaulted
    }
}
