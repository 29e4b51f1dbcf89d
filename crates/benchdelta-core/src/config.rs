use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compare::DuplicateKeyPolicy;
use crate::errors::ConfigError;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "benchdelta.yaml";

pub const DEFAULT_THRESHOLD_PCT: f64 = 5.0;

/// Directory holding benchmark runs; `latest/raw.json` is the newest report.
pub const DEFAULT_BENCH_ROOT: &str = "reports/benchmarks";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CompareConfig {
    /// Minimum percentage change before a metric counts as improved or regressed.
    pub neutral_threshold_pct: f64,

    /// Handling of repeated `(endpointName, path, tier)` keys within one report.
    pub duplicate_keys: DuplicateKeyPolicy,

    pub bench_root: PathBuf,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            neutral_threshold_pct: DEFAULT_THRESHOLD_PCT,
            duplicate_keys: DuplicateKeyPolicy::default(),
            bench_root: PathBuf::from(DEFAULT_BENCH_ROOT),
        }
    }
}

impl CompareConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // An empty file is a valid, all-default config.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let cfg = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Load `explicit` if given, else `benchdelta.yaml` in `dir` if it
    /// exists, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.neutral_threshold_pct.is_finite() {
            return Err(ConfigError::InvalidThreshold(self.neutral_threshold_pct));
        }
        Ok(())
    }

    pub fn with_threshold(mut self, threshold: Option<f64>) -> Self {
        if let Some(t) = threshold {
            self.neutral_threshold_pct = t;
        }
        self
    }

    pub fn with_bench_root(mut self, root: Option<PathBuf>) -> Self {
        if let Some(root) = root {
            self.bench_root = root;
        }
        self
    }

    /// Force the strict duplicate key policy when `strict` is set.
    pub fn with_strict_keys(mut self, strict: bool) -> Self {
        if strict {
            self.duplicate_keys = DuplicateKeyPolicy::Reject;
        }
        self
    }
}
