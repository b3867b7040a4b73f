// File: form-validator-core/src/config.rs
// Purpose: Validator configuration (attribute names, initial flags)

use crate::error::Result;
use crate::{CONTEXT_ATTRIBUTE, VALIDATION_ATTRIBUTE};
use serde::Deserialize;

/// Form validator configuration
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormValidatorConfig {
    /// Attribute listing a control's validators
    #[serde(default = "default_validation_attribute")]
    pub validation_attribute: String,

    /// Attribute declaring a context scope
    #[serde(default = "default_context_attribute")]
    pub context_attribute: String,

    /// Start with validation results ignored (every verdict forced valid)
    #[serde(default = "default_false")]
    pub ignore_validation_result: bool,
}

fn default_validation_attribute() -> String {
    VALIDATION_ATTRIBUTE.to_string()
}

fn default_context_attribute() -> String {
    CONTEXT_ATTRIBUTE.to_string()
}

fn default_false() -> bool {
    false
}

impl Default for FormValidatorConfig {
    fn default() -> Self {
        Self {
            validation_attribute: default_validation_attribute(),
            context_attribute: default_context_attribute(),
            ignore_validation_result: default_false(),
        }
    }
}

impl FormValidatorConfig {
    /// Parse from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(content)?)
    }
}
