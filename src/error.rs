//! Rich diagnostic error types for kt-testgen.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text. [`TestgenError`] wraps them all for
//! callers that drive the whole pipeline.

use miette::Diagnostic;
use thiserror::Error;

use crate::signature::SignatureError;

/// Top-level error type.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain through to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum TestgenError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Metadata errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum MetadataError {
    #[error("invalid metadata JSON: {message}")]
    #[diagnostic(
        code(testgen::metadata::json),
        help(
            "The metadata document does not match the expected shape. \
             Classes need `package_name` and `class_name`; every parameter needs \
             `name` and `type`, where `type` is a signature string like \"List<Int>?\"."
        )
    )]
    Json { message: String },
}

pub type MetadataResult<T> = std::result::Result<T, MetadataError>;

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to parse generator config: {message}")]
    #[diagnostic(
        code(testgen::config::parse),
        help(
            "Check the TOML syntax. Recognised keys are class_under_test_variable_name, \
             actual_value_variable_name, default_assertion_statement, \
             mocker (\"mockito\" or \"mockk\") and is_parameterized."
        )
    )]
    Parse { message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Convenience alias for pipeline-level results.
pub type TestgenResult<T> = std::result::Result<T, TestgenError>;
