// File: form-validator-core/src/registry.rs
// Purpose: Validator plugin contract and the name -> definition registry

use crate::dom::{Dom, NodeId};
use crate::error::{FormValidatorError, Result, ValidatorError};
use serde::Deserialize;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A validator plugin
///
/// `init` runs once per bound target on every parameter refresh and returns
/// the elements whose changes must re-validate the target. `validate` runs on
/// every validate request; `None` means the validator has no opinion and the
/// error store is left untouched.
pub trait Validator {
    fn init(
        &self,
        _dom: &dyn Dom,
        target: NodeId,
        _data: &mut ParameterBag,
    ) -> std::result::Result<Vec<NodeId>, ValidatorError> {
        Ok(vec![target])
    }

    fn validate(
        &self,
        _dom: &dyn Dom,
        _target: NodeId,
        _data: &ParameterBag,
    ) -> Option<ValidationResult> {
        Some(ValidationResult::valid())
    }
}

/// Validator that observes its target and always passes
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl Validator for AlwaysValid {}

/// Per-target, per-validator state
///
/// Seeded with the raw argument string from the markup; `init` stores its
/// parsed form here for `validate` to read back.
#[derive(Default)]
pub struct ParameterBag {
    argument_string: String,
    extensions: HashMap<TypeId, Box<dyn Any>>,
}

impl ParameterBag {
    pub fn new(argument_string: impl Into<String>) -> Self {
        Self {
            argument_string: argument_string.into(),
            extensions: HashMap::new(),
        }
    }

    pub fn argument_string(&self) -> &str {
        &self.argument_string
    }

    /// Store a value, replacing any previous value of the same type
    pub fn insert<T: Any>(&mut self, value: T) {
        self.extensions.insert(TypeId::of::<T>(), Box::new(value));
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.extensions
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }
}

impl fmt::Debug for ParameterBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterBag")
            .field("argument_string", &self.argument_string)
            .field("extensions", &self.extensions.len())
            .finish()
    }
}

/// Verdict produced by a validator (or injected through a validate request)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationResult {
    /// Stamped by the orchestrator with the name the validator is bound under
    pub validator_name: String,
    /// Failure sub-reasons; empty means the default (`""`) subtype
    #[serde(alias = "validatorSubtypeList")]
    pub subtypes: Vec<String>,
    /// The error belongs to the owning context instead of the target
    pub is_context_error: bool,
    pub is_valid: bool,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            validator_name: String::new(),
            subtypes: Vec::new(),
            is_context_error: false,
            is_valid: true,
        }
    }

    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            ..Self::valid()
        }
    }

    pub fn from_bool(is_valid: bool) -> Self {
        if is_valid {
            Self::valid()
        } else {
            Self::invalid()
        }
    }

    /// Report against the owning context element
    pub fn in_context(mut self) -> Self {
        self.is_context_error = true;
        self
    }

    pub fn with_subtypes<I, S>(mut self, subtypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subtypes = subtypes.into_iter().map(Into::into).collect();
        self
    }
}

/// Error messages keyed by subtype, in declaration order
///
/// The empty subtype holds the default message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMessages(Vec<(String, String)>);

impl ErrorMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, subtype: impl Into<String>, message: impl Into<String>) -> Self {
        let subtype = subtype.into();
        let message = message.into();
        match self.0.iter_mut().find(|(key, _)| *key == subtype) {
            Some((_, existing)) => *existing = message,
            None => self.0.push((subtype, message)),
        }
        self
    }

    pub fn get(&self, subtype: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == subtype)
            .map(|(_, message)| message.as_str())
    }
}

impl From<&str> for ErrorMessages {
    fn from(message: &str) -> Self {
        Self::new().with("", message)
    }
}

impl From<String> for ErrorMessages {
    fn from(message: String) -> Self {
        Self::new().with("", message)
    }
}

impl<K, V> FromIterator<(K, V)> for ErrorMessages
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |messages, (k, v)| messages.with(k, v))
    }
}

/// A validator together with its error messages
#[derive(Clone)]
pub struct ValidatorDeclaration {
    validator: Rc<dyn Validator>,
    error_messages: ErrorMessages,
}

impl ValidatorDeclaration {
    pub fn new(validator: impl Validator + 'static) -> Self {
        Self {
            validator: Rc::new(validator),
            error_messages: ErrorMessages::new(),
        }
    }

    /// Accepts a plain message (default subtype) or a full [`ErrorMessages`] map
    pub fn with_error_message(mut self, messages: impl Into<ErrorMessages>) -> Self {
        self.error_messages = messages.into();
        self
    }

    pub fn validator(&self) -> &Rc<dyn Validator> {
        &self.validator
    }

    pub fn error_messages(&self) -> &ErrorMessages {
        &self.error_messages
    }
}

impl Default for ValidatorDeclaration {
    fn default() -> Self {
        Self::new(AlwaysValid)
    }
}

impl fmt::Debug for ValidatorDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorDeclaration")
            .field("error_messages", &self.error_messages)
            .finish_non_exhaustive()
    }
}

/// Registered validators by name
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    definitions: HashMap<String, ValidatorDeclaration>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) a validator
    ///
    /// Names must be referencable from the attribute grammar: non-empty and
    /// made of ASCII letters, digits, `-` and `_`.
    pub fn register(&mut self, name: &str, declaration: ValidatorDeclaration) -> Result<()> {
        if name.is_empty() {
            return Err(FormValidatorError::InvalidDeclaration {
                name: name.to_string(),
                reason: "validator name is empty".to_string(),
            });
        }

        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(FormValidatorError::InvalidDeclaration {
                name: name.to_string(),
                reason: format!("unexpected character '{}' in validator name", bad),
            });
        }

        self.definitions.insert(name.to_string(), declaration);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ValidatorDeclaration> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Message for a subtype, `None` if the validator declares none
    pub fn error_message(&self, name: &str, subtype: &str) -> Option<String> {
        self.get(name)
            .and_then(|declaration| declaration.error_messages.get(subtype))
            .map(str::to_string)
    }
}
