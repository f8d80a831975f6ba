use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const ENV_CAPACITY: &str = "CIRCULAR_BUFFER_CAPACITY";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Capacity(NonZeroUsize);

impl Capacity {
    pub fn new(value: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(ConfigError::ZeroCapacity)
    }

    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let v = value.trim();
        let n = v
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidCapacity {
                value: v.to_owned(),
            })?;
        Self::new(n)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShellConfig {
    /// `None` means the shell asks for a capacity interactively.
    pub capacity: Option<Capacity>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("capacity must be > 0")]
    ZeroCapacity,
    #[error("capacity must be a positive integer, got {value:?}")]
    InvalidCapacity { value: String },
}

/// Source of configuration values keyed by environment variable name.
pub trait Env {
    fn var(&self, key: &str) -> Option<String>;

    /// Like [`Env::var`], but a blank value counts as unset.
    fn non_blank(&self, key: &str) -> Option<String> {
        self.var(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }
}

/// Reads the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed set of variables, for tests.
#[derive(Clone, Debug, Default)]
pub struct MapEnv(BTreeMap<String, String>);

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Flag value first, then `env_key`; `None` when neither is set.
pub fn resolve_capacity(
    cli_value: Option<usize>,
    env_key: &str,
    env: &impl Env,
) -> Result<Option<Capacity>, ConfigError> {
    if let Some(v) = cli_value {
        return Capacity::new(v).map(Some);
    }
    env.non_blank(env_key)
        .map(|v| Capacity::parse(&v))
        .transpose()
}
