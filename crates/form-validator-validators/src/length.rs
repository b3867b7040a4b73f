//! `min-length(n)` and `max-length(n)` for text-like controls

use form_validator_core::{
    describe_element, Dom, ElementType, NodeId, ParameterBag, ValidationResult, Validator,
    ValidatorError,
};

/// Parsed limit, compared against the value's character count
#[derive(Debug, Clone, Copy, PartialEq)]
struct LengthLimit(f64);

/// Numeric argument; blank means 0
fn parse_limit(argument: &str) -> Result<f64, ValidatorError> {
    let argument = argument.trim();
    if argument.is_empty() {
        return Ok(0.0);
    }

    match argument.parse::<f64>() {
        Ok(limit) if !limit.is_nan() => Ok(limit),
        _ => Err(ValidatorError::InvalidArguments(format!(
            "'{}' is not a number",
            argument
        ))),
    }
}

fn init_limit(
    dom: &dyn Dom,
    target: NodeId,
    data: &mut ParameterBag,
) -> Result<Vec<NodeId>, ValidatorError> {
    let limit = parse_limit(data.argument_string())?;

    match ElementType::of(dom, target) {
        Some(element_type) if element_type.is_text_like() => {
            data.insert(LengthLimit(limit));
            Ok(vec![target])
        }
        _ => Err(ValidatorError::UnsupportedElementType(describe_element(dom, target))),
    }
}

fn char_count(dom: &dyn Dom, target: NodeId) -> f64 {
    dom.value(target).chars().count() as f64
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MinLength;

impl Validator for MinLength {
    fn init(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        data: &mut ParameterBag,
    ) -> Result<Vec<NodeId>, ValidatorError> {
        init_limit(dom, target, data)
    }

    fn validate(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        data: &ParameterBag,
    ) -> Option<ValidationResult> {
        let LengthLimit(min) = *data.get::<LengthLimit>()?;
        Some(ValidationResult::from_bool(char_count(dom, target) >= min))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaxLength;

impl Validator for MaxLength {
    fn init(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        data: &mut ParameterBag,
    ) -> Result<Vec<NodeId>, ValidatorError> {
        init_limit(dom, target, data)
    }

    fn validate(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        data: &ParameterBag,
    ) -> Option<ValidationResult> {
        let LengthLimit(max) = *data.get::<LengthLimit>()?;
        Some(ValidationResult::from_bool(char_count(dom, target) <= max))
    }
}
