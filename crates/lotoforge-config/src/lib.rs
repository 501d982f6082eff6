//! Configuration system for LotoForge.
//!
//! [`GenerationConfig`] holds the validated run parameters of one generation
//! request. [`GenerationProfile`] loads those parameters, together with a
//! list of filters, from TOML or YAML files so presets can be changed
//! without code changes.
//!
//! # Examples
//!
//! Load a profile from a TOML string:
//!
//! ```
//! use lotoforge_config::GenerationProfile;
//! use std::time::Duration;
//!
//! let profile = GenerationProfile::from_toml_str(r#"
//!     [generation]
//!     max_random_attempts = 2000
//!     timeout_ms = 5000
//!     diversity_threshold = 12
//!
//!     [[filters]]
//!     constraint = "sum"
//!     min = 180
//!     max = 220
//!
//!     [[filters]]
//!     constraint = "evens"
//!     enabled = false
//!     min = 7
//!     max = 8
//! "#).unwrap();
//!
//! let config = profile.generation_config().unwrap();
//! assert_eq!(config.timeout(), Duration::from_millis(5000));
//! assert_eq!(profile.filter_states().unwrap().len(), 2);
//! ```
//!
//! Use the default profile when the file is missing:
//!
//! ```
//! use lotoforge_config::GenerationProfile;
//!
//! let profile = GenerationProfile::load("lotoforge.toml").unwrap_or_default();
//! assert!(profile.generation_config().is_ok());
//! ```

use std::path::Path;
use std::time::Duration;

use lotoforge_core::{ConstraintType, FilterState, NumberRange, TICKET_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Immutable, validated parameters of one generation run.
///
/// Every field is checked at construction, so an invalid configuration
/// never reaches the generator.
///
/// # Example
///
/// ```
/// use lotoforge_config::GenerationConfig;
/// use std::time::Duration;
///
/// let config = GenerationConfig::new(1000, Duration::from_secs(2), 11, true).unwrap();
/// assert_eq!(config.diversity_threshold(), 11);
///
/// assert!(GenerationConfig::new(0, Duration::from_secs(2), 11, true).is_err());
/// assert!(GenerationConfig::new(1000, Duration::ZERO, 11, true).is_err());
/// assert!(GenerationConfig::new(1000, Duration::from_secs(2), 16, true).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    max_random_attempts: u32,
    timeout: Duration,
    diversity_threshold: u32,
    solver_enabled: bool,
    solver_node_limit: Option<u64>,
}

impl GenerationConfig {
    pub const DEFAULT_MAX_RANDOM_ATTEMPTS: u32 = 5_000;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_DIVERSITY_THRESHOLD: u32 = 11;
    pub const DEFAULT_SOLVER_NODE_LIMIT: u64 = 2_000_000;

    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `max_random_attempts` is zero,
    /// `timeout` is zero, or `diversity_threshold` is outside `1..=15`.
    pub fn new(
        max_random_attempts: u32,
        timeout: Duration,
        diversity_threshold: u32,
        solver_enabled: bool,
    ) -> Result<Self, ConfigError> {
        if max_random_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_random_attempts must be positive".to_string(),
            ));
        }
        if timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be positive".to_string()));
        }
        if diversity_threshold == 0 || diversity_threshold as usize > TICKET_SIZE {
            return Err(ConfigError::Invalid(format!(
                "diversity_threshold must be in 1..={TICKET_SIZE}, got {diversity_threshold}"
            )));
        }
        Ok(Self {
            max_random_attempts,
            timeout,
            diversity_threshold,
            solver_enabled,
            solver_node_limit: Some(Self::DEFAULT_SOLVER_NODE_LIMIT),
        })
    }

    /// Bounds the number of nodes one backtracking call may expand.
    ///
    /// `None` removes the bound; `Some(0)` is rejected.
    pub fn with_solver_node_limit(mut self, limit: Option<u64>) -> Result<Self, ConfigError> {
        if limit == Some(0) {
            return Err(ConfigError::Invalid(
                "solver_node_limit must be positive".to_string(),
            ));
        }
        self.solver_node_limit = limit;
        Ok(self)
    }

    /// Random tickets tried per iteration before escalating to the solver.
    pub fn max_random_attempts(&self) -> u32 {
        self.max_random_attempts
    }

    /// Time allowed since the last accepted ticket.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Shared-number count at which two tickets count as too similar.
    pub fn diversity_threshold(&self) -> u32 {
        self.diversity_threshold
    }

    pub fn solver_enabled(&self) -> bool {
        self.solver_enabled
    }

    pub fn solver_node_limit(&self) -> Option<u64> {
        self.solver_node_limit
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_random_attempts: Self::DEFAULT_MAX_RANDOM_ATTEMPTS,
            timeout: Self::DEFAULT_TIMEOUT,
            diversity_threshold: Self::DEFAULT_DIVERSITY_THRESHOLD,
            solver_enabled: true,
            solver_node_limit: Some(Self::DEFAULT_SOLVER_NODE_LIMIT),
        }
    }
}

/// Generation settings as written in a profile file.
///
/// Missing fields fall back to the [`GenerationConfig`] defaults.
/// Nothing is validated until [`to_config`](Self::to_config).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerationSettings {
    pub max_random_attempts: Option<u32>,

    /// Timeout since the last accepted ticket, in milliseconds.
    pub timeout_ms: Option<u64>,

    pub diversity_threshold: Option<u32>,

    pub solver_enabled: Option<bool>,

    /// Node limit per backtracking call; `0` disables the limit.
    pub solver_node_limit: Option<u64>,

    /// Random seed for reproducible runs.
    pub random_seed: Option<u64>,

    /// Number of tickets to generate.
    pub quantity: Option<u32>,
}

impl GenerationSettings {
    /// Validates the settings into a [`GenerationConfig`].
    pub fn to_config(&self) -> Result<GenerationConfig, ConfigError> {
        let timeout = self
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(GenerationConfig::DEFAULT_TIMEOUT);
        let config = GenerationConfig::new(
            self.max_random_attempts
                .unwrap_or(GenerationConfig::DEFAULT_MAX_RANDOM_ATTEMPTS),
            timeout,
            self.diversity_threshold
                .unwrap_or(GenerationConfig::DEFAULT_DIVERSITY_THRESHOLD),
            self.solver_enabled.unwrap_or(true),
        )?;
        match self.solver_node_limit {
            None => Ok(config),
            Some(0) => config.with_solver_node_limit(None),
            Some(limit) => config.with_solver_node_limit(Some(limit)),
        }
    }
}

/// One filter entry in a profile file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FilterConfig {
    pub constraint: ConstraintType,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    pub min: u32,

    pub max: u32,
}

fn default_enabled() -> bool {
    true
}

impl FilterConfig {
    /// Validates the bounds into a [`FilterState`].
    pub fn to_filter_state(&self) -> Result<FilterState, ConfigError> {
        let range = NumberRange::new(self.min, self.max)
            .map_err(|e| ConfigError::Invalid(format!("filter {}: {e}", self.constraint)))?;
        Ok(FilterState {
            constraint: self.constraint,
            enabled: self.enabled,
            range,
        })
    }
}

/// A saved generation preset: run settings plus filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerationProfile {
    #[serde(default)]
    pub generation: GenerationSettings,

    #[serde(default)]
    pub filters: Vec<FilterConfig>,
}

impl GenerationProfile {
    /// Creates an empty profile with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a profile from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads a profile from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a profile from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a profile from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses a profile from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.generation.random_seed = Some(seed);
        self
    }

    /// Adds a filter entry.
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filters.push(filter);
        self
    }

    /// Returns the validated run configuration.
    pub fn generation_config(&self) -> Result<GenerationConfig, ConfigError> {
        self.generation.to_config()
    }

    /// Returns every filter entry as a validated [`FilterState`].
    pub fn filter_states(&self) -> Result<Vec<FilterState>, ConfigError> {
        self.filters.iter().map(FilterConfig::to_filter_state).collect()
    }

    pub fn random_seed(&self) -> Option<u64> {
        self.generation.random_seed
    }

    pub fn quantity(&self) -> Option<u32> {
        self.generation.quantity
    }
}
