//! Custom error types for modelbench.
//!
//! This module defines explicit enum error types as per coding guidelines.
//! No `Box<dyn Error>`, no `anyhow::Result` - all errors are strongly typed.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for a benchmark run.
/// Every variant is fatal to the run in which it occurs.
#[derive(Debug, Error)]
pub enum BenchError {
    // =========================================================================
    // Configuration Errors - Fail-Fast Before Anything Runs
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    // =========================================================================
    // Strategy Errors
    // =========================================================================
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Container error: {0}")]
    Container(#[from] ContainerError),

    #[error("Strategies disagree in suite {suite}: {message}")]
    Verification { suite: &'static str, message: String },

    // =========================================================================
    // Size Probe Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    // =========================================================================
    // Runner Errors
    // =========================================================================
    #[error("Unknown benchmark suite: {name}")]
    UnknownSuite { name: String },

    #[error("Unknown benchmark {benchmark} in suite {suite}")]
    UnknownBenchmark { suite: String, benchmark: String },

    #[error("Forked benchmark {benchmark} failed: {reason}")]
    Fork { benchmark: String, reason: String },

    #[error("Report error: {message}")]
    Report { message: String },

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid benchmark parameters. Raised before any benchmark starts.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Option {field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: String },

    #[error(
        "{measurement_iterations} measurement iterations in each of {forks} forks exceed the score limit"
    )]
    TooManyScores { measurement_iterations: u32, forks: u32 },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },
}

/// A dynamic property expression failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Invalid property expression '{expression}': {reason}")]
    InvalidExpression { expression: String, reason: String },

    #[error("Type of object holding property '{property}' is not registered")]
    UnregisteredType { property: String },

    #[error("No property '{property}' on {type_name}")]
    NoSuchProperty {
        type_name: &'static str,
        property: String,
    },

    #[error("Cannot read property '{property}' of a text value")]
    NotTraversable { property: String },

    #[error("Expected a {expected} value, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// Container construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("A child with id '{id}' already exists in container '{container}'")]
    DuplicateChild { container: String, id: String },

    #[error("Invalid component id '{id}': {reason}")]
    InvalidComponentId { id: String, reason: &'static str },
}

/// The size probe could not encode or decode a value.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("Failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode value: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Result type alias using BenchError.
pub type BenchResult<T> = Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::NonPositive {
            field: "measurement_iterations",
            value: "0".to_string(),
        };
        assert!(err.to_string().contains("measurement_iterations"));
        assert!(err.to_string().contains('0'));
    }

    #[test]
    fn test_error_chain() {
        let lookup = LookupError::NoSuchProperty {
            type_name: "Person",
            property: "age".to_string(),
        };
        let err: BenchError = lookup.into();
        assert!(matches!(err, BenchError::Lookup(_)));
        assert!(err.to_string().contains("age"));
    }
}
