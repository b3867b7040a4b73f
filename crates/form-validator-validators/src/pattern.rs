//! `pattern(regex)`: non-empty values must match

use form_validator_core::{
    describe_element, Dom, ElementType, NodeId, ParameterBag, ValidationResult, Validator,
    ValidatorError,
};
use regex::Regex;

/// The argument is a regular expression searched anywhere in the value.
/// Empty values pass; pair with `required` to forbid them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pattern;

impl Validator for Pattern {
    fn init(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        data: &mut ParameterBag,
    ) -> Result<Vec<NodeId>, ValidatorError> {
        let regex = Regex::new(data.argument_string())
            .map_err(|e| ValidatorError::InvalidArguments(e.to_string()))?;

        match ElementType::of(dom, target) {
            Some(element_type) if element_type.is_text_like() => {
                data.insert(regex);
                Ok(vec![target])
            }
            _ => Err(ValidatorError::UnsupportedElementType(describe_element(dom, target))),
        }
    }

    fn validate(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        data: &ParameterBag,
    ) -> Option<ValidationResult> {
        let regex = data.get::<Regex>()?;
        let value = dom.value(target);

        Some(ValidationResult::from_bool(value.is_empty() || regex.is_match(&value)))
    }
}
