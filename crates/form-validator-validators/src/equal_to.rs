//! `equal-to(id)`: value must equal another element's value

use form_validator_core::{Dom, NodeId, ParameterBag, ValidationResult, Validator, ValidatorError};

/// Observes both the target and the referenced element, so editing either
/// one re-validates the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualTo;

struct OtherElement(NodeId);

impl Validator for EqualTo {
    fn init(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        data: &mut ParameterBag,
    ) -> Result<Vec<NodeId>, ValidatorError> {
        let id = data.argument_string().trim().to_string();
        let other = dom.element_by_id(&id).ok_or_else(|| {
            ValidatorError::InvalidArguments(format!("There is no #'{}' element", id))
        })?;

        data.insert(OtherElement(other));
        Ok(vec![target, other])
    }

    fn validate(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        data: &ParameterBag,
    ) -> Option<ValidationResult> {
        let OtherElement(other) = data.get::<OtherElement>()?;
        Some(ValidationResult::from_bool(dom.value(target) == dom.value(*other)))
    }
}
