//! Error types for docshape
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Only source failures and merge conflicts abort an inference run.
//! Ambiguous field types are never errors: the resolver falls back to an
//! opaque type and records a diagnostic instead.

use thiserror::Error;

/// The main error type for docshape
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid URI: {0}")]
    InvalidUri(#[from] url::ParseError),

    // ============================================================================
    // Source Errors
    // ============================================================================
    #[error("Failed to read document {ordinal}: {message}")]
    SourceRead { ordinal: usize, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid extended JSON at '{path}': {message}")]
    ExtendedJson { path: String, message: String },

    #[error("JSONPath error: {message}")]
    JsonPath { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    // ============================================================================
    // Accumulation Errors
    // ============================================================================
    #[error("Cannot merge accumulators at '{path}': {left} conflicts with {right}")]
    MergeConflict {
        path: String,
        left: String,
        right: String,
    },

    #[error("Shard task failed: {message}")]
    Shard { message: String },

    // ============================================================================
    // Emit Errors
    // ============================================================================
    #[error("Template error: {message}")]
    Template { message: String },

    #[error("Undefined variable in template: {variable}")]
    UndefinedVariable { variable: String },

    #[error("Emit error: {message}")]
    Emit { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a source read error for the given document ordinal (1-based)
    pub fn source_read(ordinal: usize, message: impl Into<String>) -> Self {
        Self::SourceRead {
            ordinal,
            message: message.into(),
        }
    }

    /// Create an extended JSON error
    pub fn extended_json(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExtendedJson {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a JSONPath error
    pub fn json_path(message: impl Into<String>) -> Self {
        Self::JsonPath {
            message: message.into(),
        }
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Create a merge conflict error
    pub fn merge_conflict(
        path: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self::MergeConflict {
            path: path.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Create an emit error
    pub fn emit(message: impl Into<String>) -> Self {
        Self::Emit {
            message: message.into(),
        }
    }

    /// Check if this error came from acquiring documents
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            Error::SourceRead { .. }
                | Error::JsonParse(_)
                | Error::ExtendedJson { .. }
                | Error::JsonPath { .. }
                | Error::Database { .. }
                | Error::Io(_)
                | Error::FileNotFound { .. }
        )
    }

    /// Check if this error is an accumulator invariant violation
    pub fn is_merge_conflict(&self) -> bool {
        matches!(self, Error::MergeConflict { .. })
    }
}

/// Result type alias for docshape
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
