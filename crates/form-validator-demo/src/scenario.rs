// File: form-validator-demo/src/scenario.rs
// Purpose: Scenario file format (markup, messages, scripted events)

use anyhow::{Context, Result};
use form_validator_core::FormValidatorConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// A form plus the events to replay against it
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Validator settings; omitted keys keep their defaults
    #[serde(default)]
    pub validator: FormValidatorConfig,

    /// Id of the form to attach to; the first `<form>` when absent
    #[serde(default)]
    pub form: Option<String>,

    pub markup: String,

    /// Default message per standard validator name
    #[serde(default)]
    pub messages: BTreeMap<String, String>,

    /// Per-element message overrides
    #[serde(default)]
    pub overrides: Vec<MessageOverride>,

    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageOverride {
    pub element: String,
    pub validator: String,
    pub message: String,
}

/// One scripted step; `element` is always an element id
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScriptEvent {
    SetValue {
        element: String,
        value: String,
    },
    SetChecked {
        element: String,
        #[serde(default = "default_true")]
        checked: bool,
    },
    Input {
        element: String,
    },
    Change {
        element: String,
    },
    /// Validate with externally computed results, given as a JSON object
    Validate {
        element: String,
        #[serde(default)]
        results: Option<String>,
    },
    Reset,
    Submit,
}

fn default_true() -> bool {
    true
}

impl fmt::Display for ScriptEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetValue { element, value } => write!(f, "set #{} = {:?}", element, value),
            Self::SetChecked { element, checked } => write!(f, "set #{} checked = {}", element, checked),
            Self::Input { element } => write!(f, "input on #{}", element),
            Self::Change { element } => write!(f, "change on #{}", element),
            Self::Validate { element, results: Some(results) } => {
                write!(f, "validate #{} with {}", element, results)
            }
            Self::Validate { element, results: None } => write!(f, "validate #{}", element),
            Self::Reset => write!(f, "reset"),
            Self::Submit => write!(f, "submit"),
        }
    }
}

impl Scenario {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse scenario")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load scenario file: {:?}", path))
    }
}
