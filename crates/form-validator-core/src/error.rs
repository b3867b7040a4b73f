// File: form-validator-core/src/error.rs
// Purpose: Error types for configuration, registration and validation passes

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, FormValidatorError>;

/// Errors surfaced by the form validator
///
/// Construction and registration errors are fatal: the caller is expected to
/// fix the markup or the declarations, not to recover at runtime.
#[derive(Debug, Error)]
pub enum FormValidatorError {
    /// The element handed to the constructor is not a `<form>`
    #[error("form should be a form element, got <{0}>")]
    InvalidArgument(String),

    /// A validator declaration can never be referenced from markup
    #[error("Invalid validator declaration '{name}': {reason}")]
    InvalidDeclaration { name: String, reason: String },

    /// A validator's init refused the element it was attached to
    #[error("Unsupported element type for validator '{validator}': {element_type}")]
    UnsupportedElementType {
        validator: String,
        element_type: String,
    },

    /// A validator's init rejected its argument string
    #[error("Invalid validator arguments for '{validator}': {reason}")]
    InvalidValidatorArguments { validator: String, reason: String },

    /// An injected override payload is not a validation result
    #[error("Invalid validation result: {0}")]
    InvalidValidationResult(String),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Errors a validator plugin may raise from `init`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    #[error("Unsupported element type: {0}")]
    UnsupportedElementType(String),

    #[error("Invalid validator arguments: {0}")]
    InvalidArguments(String),
}

impl ValidatorError {
    /// Attach the validator name the error was raised for
    pub(crate) fn into_form_error(self, validator: &str) -> FormValidatorError {
        match self {
            ValidatorError::UnsupportedElementType(element_type) => {
                FormValidatorError::UnsupportedElementType {
                    validator: validator.to_string(),
                    element_type,
                }
            }
            ValidatorError::InvalidArguments(reason) => {
                FormValidatorError::InvalidValidatorArguments {
                    validator: validator.to_string(),
                    reason,
                }
            }
        }
    }
}
