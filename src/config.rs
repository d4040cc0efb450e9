//! Instrumentation configuration.
//!
//! Loaded from TOML, typically a `[metrics]` table lifted out of the host
//! application's config file:
//!
//! ```toml
//! enabled = true
//!
//! [autotime]
//! enabled = true
//! percentiles_histogram = true
//! percentiles = [0.5, 0.95, 0.99]
//! slo_ms = [50, 100, 500]
//!
//! [tags]
//! service = "catalog"
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::instrumentation::MetricsInstrumentation;
use crate::tags::{DefaultTagsProvider, TagsProvider};
use crate::telemetry;
use crate::{GqlMetricsError, Result};

/// Histogram buckets, in seconds, for timers published with a percentile
/// histogram but no SLO boundaries.
pub const DEFAULT_TIMER_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Top-level instrumentation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Install the instrumentation at all (default: true).
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub autotime: AutoTimeConfig,
    /// Static environment tags attached to every emission.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            autotime: AutoTimeConfig::default(),
            tags: BTreeMap::new(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// Settings for the request timer (`gql.query`).
#[derive(Debug, Clone, Deserialize)]
pub struct AutoTimeConfig {
    /// Record the request timer (default: true).
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Publish histogram buckets suitable for percentile aggregation.
    #[serde(default)]
    pub percentiles_histogram: bool,
    /// Percentiles, each in `[0, 1]`, the exporter should compute for the
    /// request timer. See [`MetricsConfig::percentiles`].
    #[serde(default)]
    pub percentiles: Vec<f64>,
    /// Service-level objective boundaries in milliseconds.
    #[serde(default)]
    pub slo_ms: Vec<u64>,
}

impl Default for AutoTimeConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            percentiles_histogram: false,
            percentiles: Vec::new(),
            slo_ms: Vec::new(),
        }
    }
}

impl AutoTimeConfig {
    /// Request timer turned off entirely.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn slo(&self) -> Vec<Duration> {
        self.slo_ms.iter().copied().map(Duration::from_millis).collect()
    }

    /// Buckets for the request timer: SLO boundaries when configured,
    /// [`DEFAULT_TIMER_BUCKETS`] when only the percentile histogram is on.
    pub fn histogram_buckets(&self) -> Option<Vec<f64>> {
        if !self.slo_ms.is_empty() {
            let mut slo_ms = self.slo_ms.clone();
            slo_ms.sort_unstable();
            slo_ms.dedup();
            return Some(
                slo_ms
                    .into_iter()
                    .map(|ms| Duration::from_millis(ms).as_secs_f64())
                    .collect(),
            );
        }
        self.percentiles_histogram
            .then(|| DEFAULT_TIMER_BUCKETS.to_vec())
    }

    fn validate(&self) -> Result<()> {
        if let Some(p) = self
            .percentiles
            .iter()
            .find(|p| !(0.0..=1.0).contains(*p))
        {
            return Err(GqlMetricsError::Configuration(format!(
                "percentile {p} out of range [0, 1]"
            )));
        }
        Ok(())
    }
}

impl MetricsConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GqlMetricsError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            GqlMetricsError::Configuration(msg) => {
                GqlMetricsError::Configuration(format!("{path:?}: {msg}"))
            }
            other => other,
        })
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            GqlMetricsError::Configuration(format!("Failed to parse config: {e}"))
        })?;
        config.autotime.validate()?;
        Ok(config)
    }

    /// Histogram buckets for one of the timers in [`telemetry`].
    ///
    /// The resolver timer always publishes a percentile histogram; the
    /// request timer follows [`AutoTimeConfig::histogram_buckets`].
    pub fn histogram_buckets(&self, metric: &str) -> Option<Vec<f64>> {
        match metric {
            telemetry::RESOLVER_TIME => Some(DEFAULT_TIMER_BUCKETS.to_vec()),
            telemetry::QUERY_TIME => self.autotime.histogram_buckets(),
            _ => None,
        }
    }

    /// Percentiles to compute for one of the timers in [`telemetry`].
    ///
    /// The `metrics` facade carries no per-metric summary settings, so these
    /// are handed to the exporter together with
    /// [`histogram_buckets`](Self::histogram_buckets). Only the request
    /// timer is configurable; everything else gets an empty list.
    pub fn percentiles(&self, metric: &str) -> &[f64] {
        match metric {
            telemetry::QUERY_TIME => &self.autotime.percentiles,
            _ => &[],
        }
    }

    /// Tags provider carrying the configured environment tags.
    pub fn tags_provider(&self) -> DefaultTagsProvider {
        DefaultTagsProvider::new().with_environment_tags(self.tags.clone())
    }

    /// Instrumentation with the default tags provider, or `None` when
    /// disabled.
    pub fn instrumentation(&self) -> Option<MetricsInstrumentation<DefaultTagsProvider>> {
        self.instrumentation_with(self.tags_provider())
    }

    /// Instrumentation with a custom tags provider, or `None` when disabled.
    pub fn instrumentation_with<P: TagsProvider>(
        &self,
        tags_provider: P,
    ) -> Option<MetricsInstrumentation<P>> {
        self.enabled
            .then(|| MetricsInstrumentation::new(tags_provider).with_autotime(self.autotime.clone()))
    }
}
