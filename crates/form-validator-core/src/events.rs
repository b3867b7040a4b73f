// File: form-validator-core/src/events.rs
// Purpose: Events the validator reacts to and the validate request message

use crate::dom::NodeId;
use crate::error::{FormValidatorError, Result};
use crate::registry::ValidationResult;
use std::collections::HashMap;

/// Request to re-run the validators bound to `target`
///
/// An override replaces the named validator's own verdict for this request
/// only, e.g. a result computed by a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateRequest {
    pub target: NodeId,
    pub overrides: HashMap<String, ValidationResult>,
}

impl ValidateRequest {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, validator_name: impl Into<String>, result: ValidationResult) -> Self {
        self.overrides.insert(validator_name.into(), result);
        self
    }

    /// Build a request from a JSON object of validator name -> result
    ///
    /// ```
    /// use form_validator_core::{NodeId, ValidateRequest};
    ///
    /// let request = ValidateRequest::from_json(
    ///     NodeId(3),
    ///     r#"{"username": {"isValid": false, "subtypes": ["taken"]}}"#,
    /// )
    /// .unwrap();
    /// assert!(!request.overrides["username"].is_valid);
    /// ```
    pub fn from_json(target: NodeId, payload: &str) -> Result<Self> {
        let overrides: HashMap<String, ValidationResult> = serde_json::from_str(payload)
            .map_err(|e| FormValidatorError::InvalidValidationResult(e.to_string()))?;

        Ok(Self { target, overrides })
    }
}

/// Form events routed through [`FormValidator::dispatch`](crate::FormValidator::dispatch)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Input(NodeId),
    Change(NodeId),
    Validate(ValidateRequest),
    Reset,
    Submit,
}

/// What the host should do with the event after the validator ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Let the event continue
    Continue,
    /// Prevent the default action and stop propagation immediately
    Block,
}

impl EventOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Block)
    }
}
