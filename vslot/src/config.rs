//! Configuration schema and loading.
//!
//! Batch runs can be parameterized through an optional YAML file
//! (`vslot.yaml` in the working directory, or an explicit path) plus
//! `VSLOT_*` environment variables. Precedence, lowest to highest:
//! built-in defaults, configuration file, environment, then whatever the
//! caller (the CLI) sets explicitly.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "vslot.yaml";

/// What to do when a request finds its pool kind exhausted.
///
/// # Examples
///
/// ```
/// use vslot::config::ExhaustionPolicy;
///
/// assert_eq!(ExhaustionPolicy::default(), ExhaustionPolicy::Abort);
/// assert_eq!(ExhaustionPolicy::parse("continue").unwrap(), ExhaustionPolicy::Continue);
/// assert!(ExhaustionPolicy::parse("retry").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustionPolicy {
    /// Abort the batch on the first request that cannot be satisfied.
    #[default]
    Abort,
    /// Record the failure, emit nothing for that request, keep going.
    Continue,
}

impl ExhaustionPolicy {
    /// Parses a policy from a string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is neither `abort` nor `continue`.
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "continue" => Ok(Self::Continue),
            _ => Err(format!("invalid exhaustion policy: {s}")),
        }
    }
}

/// Complete configuration for a batch run.
///
/// All fields are optional; the CLI errors out only when a run actually
/// needs a value that nothing provided (e.g. no assignments path
/// anywhere).
///
/// # Examples
///
/// ```
/// use vslot::config::Config;
///
/// let config: Config = serde_yaml::from_str("assignments: vlans.csv\n").unwrap();
/// assert_eq!(config.assignments.unwrap().to_str(), Some("vlans.csv"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the assignment records file.
    pub assignments: Option<PathBuf>,

    /// Path to the request records file.
    pub requests: Option<PathBuf>,

    /// Path to write reservations to (stdout when absent).
    pub output: Option<PathBuf>,

    /// Policy for requests that find their pool exhausted.
    pub on_exhausted: Option<ExhaustionPolicy>,
}

impl Config {
    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or contains
    /// unknown fields.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Merge another configuration over this one; `other`'s set fields win.
    fn merge(self, other: Self) -> Self {
        Self {
            assignments: other.assignments.or(self.assignments),
            requests: other.requests.or(self.requests),
            output: other.output.or(self.output),
            on_exhausted: other.on_exhausted.or(self.on_exhausted),
        }
    }
}

/// Builder merging configuration sources in precedence order.
///
/// # Examples
///
/// ```no_run
/// use vslot::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new().build().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    file: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Creates a builder using the default file lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration file instead of the default lookup.
    ///
    /// Unlike the default `vslot.yaml` lookup, an explicit file must
    /// exist.
    #[must_use]
    pub fn with_file(mut self, path: PathBuf) -> Self {
        self.file = Some(path);
        self
    }

    /// Builds the configuration: defaults, then file, then environment.
    ///
    /// Recognized environment variables: `VSLOT_ASSIGNMENTS`,
    /// `VSLOT_REQUESTS`, `VSLOT_OUTPUT`, `VSLOT_ON_EXHAUSTED`.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or unparseable, if
    /// the default file exists but is unparseable, or if
    /// `VSLOT_ON_EXHAUSTED` holds an unrecognized policy.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(path) = self.file {
            config = config.merge(Config::load(&path)?);
        } else {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                config = config.merge(Config::load(default)?);
            }
        }

        config = config.merge(Self::from_env()?);
        Ok(config)
    }

    fn from_env() -> Result<Config> {
        let path_var = |name: &str| env::var(name).ok().map(PathBuf::from);

        let on_exhausted = match env::var("VSLOT_ON_EXHAUSTED") {
            Ok(value) => Some(ExhaustionPolicy::parse(&value).map_err(|message| {
                Error::Validation {
                    field: "VSLOT_ON_EXHAUSTED".to_string(),
                    message,
                }
            })?),
            Err(_) => None,
        };

        Ok(Config {
            assignments: path_var("VSLOT_ASSIGNMENTS"),
            requests: path_var("VSLOT_REQUESTS"),
            output: path_var("VSLOT_OUTPUT"),
            on_exhausted,
        })
    }
}
