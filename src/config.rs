//! Harness configuration
//!
//! The harness is configured from a YAML file, optionally seeded from a
//! second "source" template file the first time it runs. Fields left out of
//! the file fall back to the defaults below, which describe the canonical
//! check: 1,000 ticks of a 1 ms single-shot timer, expected to complete
//! within 1 second.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// On-disk configuration of the harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Name used to identify this run in reports.
    #[serde(default = "default_label")]
    pub label: String,
    /// Interval of the single-shot timer, in microseconds. Zero re-arms
    /// immediately.
    #[serde(default = "default_interval_us")]
    pub interval_us: u64,
    /// Number of fire-and-rearm cycles to run.
    #[serde(default = "default_ticks")]
    pub ticks: u32,
    /// Wall-clock budget for the whole chain, in milliseconds.
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,
    /// Number of non-blocking event pumps performed before measuring, to let
    /// the loop settle.
    #[serde(default = "default_warmup_pumps")]
    pub warmup_pumps: u32,
}

fn default_label() -> String {
    "tickbench".to_string()
}

fn default_interval_us() -> u64 {
    1_000
}

fn default_ticks() -> u32 {
    1_000
}

fn default_deadline_ms() -> u64 {
    1_000
}

fn default_warmup_pumps() -> u32 {
    10_000
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            label: default_label(),
            interval_us: default_interval_us(),
            ticks: default_ticks(),
            deadline_ms: default_deadline_ms(),
            warmup_pumps: default_warmup_pumps(),
        }
    }
}

impl HarnessConfig {
    /// Load the configuration from `path`.
    ///
    /// A missing file is created with default values, per `confy` semantics.
    pub fn load(path: impl AsRef<Path>) -> crate::Result<HarnessConfig> {
        let config: HarnessConfig = confy::load_path(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from `config_path`, seeding it from the
    /// template at `source_path` if it does not exist yet.
    ///
    /// An existing file at `config_path` is never overwritten.
    pub fn load_or_seed(
        config_path: impl AsRef<Path>,
        source_path: impl AsRef<Path>,
    ) -> crate::Result<HarnessConfig> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            let template: HarnessConfig = confy::load_path(source_path.as_ref())?;
            log::info!(
                "[tickbench] seeding {} from template {}",
                config_path.display(),
                source_path.as_ref().display()
            );
            confy::store_path(config_path, &template)?;
        }
        Self::load(config_path)
    }

    /// Check the configuration describes a runnable probe.
    pub fn validate(&self) -> crate::Result<()> {
        if self.ticks == 0 {
            return Err(crate::Error::InvalidConfig("ticks must be nonzero"));
        }
        if self.deadline_ms == 0 {
            return Err(crate::Error::InvalidConfig("deadline_ms must be nonzero"));
        }
        Ok(())
    }

    /// The duration-typed probe parameters described by this configuration.
    pub fn probe_spec(&self) -> ProbeSpec {
        ProbeSpec {
            label: self.label.clone(),
            interval: Duration::from_micros(self.interval_us),
            ticks: self.ticks,
            deadline: Duration::from_millis(self.deadline_ms),
        }
    }
}

/// Validated parameters of a single probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSpec {
    /// Name used to identify this run in reports.
    pub label: String,
    /// Interval of the single-shot timer.
    pub interval: Duration,
    /// Number of fire-and-rearm cycles to run.
    pub ticks: u32,
    /// Wall-clock budget for the whole chain.
    pub deadline: Duration,
}
