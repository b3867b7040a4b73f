// File: form-validator-core/src/parser.rs
// Purpose: Parse `data-validation` attribute values into validator parameters

use crate::registry::ValidatorRegistry;
use once_cell::sync::Lazy;
use regex::Regex;

// name, then optional `(args)`; args are captured lazily up to the first `)`
// that is followed by a separator, so parentheses need not balance
static PARAMETER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([a-z0-9_-]+)(?:\((.*?)\)[;,\s])?").unwrap());

/// Split an attribute value into `(validator name, argument string)` pairs
///
/// Only names present in `registry` are kept. Pairs are ordered by the first
/// appearance of each name; when a name repeats, its last argument string wins.
///
/// ```
/// use form_validator_core::{parse_validation_attribute, ValidatorDeclaration, ValidatorRegistry};
///
/// let mut registry = ValidatorRegistry::new();
/// registry.register("required", ValidatorDeclaration::default()).unwrap();
/// registry.register("pattern", ValidatorDeclaration::default()).unwrap();
///
/// let parsed = parse_validation_attribute("required;pattern(a{3});unknown", &registry);
/// assert_eq!(
///     parsed,
///     vec![
///         ("required".to_string(), String::new()),
///         ("pattern".to_string(), "a{3}".to_string()),
///     ]
/// );
/// ```
pub fn parse_validation_attribute(
    value: &str,
    registry: &ValidatorRegistry,
) -> Vec<(String, String)> {
    let mut normalized = value.to_string();
    if !normalized.is_empty() && !normalized.ends_with(';') {
        normalized.push(';');
    }

    let mut parameters: Vec<(String, String)> = Vec::new();

    for captures in PARAMETER_REGEX.captures_iter(&normalized) {
        let name = &captures[1];
        let argument_string = captures.get(2).map(|m| m.as_str()).unwrap_or("");

        match parameters.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing_argument)) => *existing_argument = argument_string.to_string(),
            None => parameters.push((name.to_string(), argument_string.to_string())),
        }
    }

    parameters.retain(|(name, _)| registry.contains(name));
    parameters
}
