//! `required`: a value must be present

use crate::named_group;
use form_validator_core::{
    describe_element, Dom, ElementType, NodeId, ParameterBag, ValidationResult, Validator,
    ValidatorError,
};

/// Text-like controls and selects need a non-empty value (direct error);
/// checkbox and radio groups need one checked member (context error).
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

struct RequiredData {
    element_type: ElementType,
    elements: Vec<NodeId>,
}

impl Validator for Required {
    fn init(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        data: &mut ParameterBag,
    ) -> Result<Vec<NodeId>, ValidatorError> {
        let element_type = ElementType::of(dom, target)
            .ok_or_else(|| ValidatorError::UnsupportedElementType(describe_element(dom, target)))?;

        let elements = if element_type.is_checkable() {
            named_group(dom, target, None)
        } else {
            vec![target]
        };

        data.insert(RequiredData {
            element_type,
            elements: elements.clone(),
        });

        Ok(elements)
    }

    fn validate(
        &self,
        dom: &dyn Dom,
        _target: NodeId,
        data: &ParameterBag,
    ) -> Option<ValidationResult> {
        let data = data.get::<RequiredData>()?;

        if data.element_type.is_checkable() {
            let any_checked = data.elements.iter().any(|&element| dom.checked(element));
            Some(ValidationResult::from_bool(any_checked).in_context())
        } else {
            let element = *data.elements.first()?;
            Some(ValidationResult::from_bool(!dom.value(element).is_empty()))
        }
    }
}
