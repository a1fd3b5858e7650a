//! Unified error types for the ETERNA workspace
//!
//! The estimator itself is total and never returns an error. Everything that
//! surrounds it (profile files, coefficient tables, strict validation, exports)
//! reports failures through [`EternaError`].
//!
//! # Example
//!
//! ```ignore
//! use eterna_core::{EternaError, EternaResult};
//!
//! fn load_and_check(path: &Path) -> EternaResult<UserProfile> {
//!     let profile = load_profile(path)?;
//!     profile.validate()?;
//!     Ok(profile)
//! }
//! ```

use thiserror::Error;

/// Unified error type for all ETERNA operations.
#[derive(Error, Debug)]
pub enum EternaError {
    /// I/O errors (file access, directories, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Profile validation errors (strict mode only)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using EternaError.
pub type EternaResult<T> = Result<T, EternaError>;

impl From<anyhow::Error> for EternaError {
    fn from(err: anyhow::Error) -> Self {
        EternaError::Other(format!("{err:#}"))
    }
}

impl From<String> for EternaError {
    fn from(s: String) -> Self {
        EternaError::Other(s)
    }
}

impl From<&str> for EternaError {
    fn from(s: &str) -> Self {
        EternaError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for EternaError {
    fn from(err: serde_json::Error) -> Self {
        EternaError::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for EternaError {
    fn from(err: serde_yaml::Error) -> Self {
        EternaError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for EternaError {
    fn from(err: toml::de::Error) -> Self {
        EternaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for EternaError {
    fn from(err: toml::ser::Error) -> Self {
        EternaError::Config(err.to_string())
    }
}
