//! `checked-count(min,max)`: how many members of a checkbox/radio group are checked

use crate::named_group;
use form_validator_core::{
    describe_element, Dom, ElementType, NodeId, ParameterBag, ValidationResult, Validator,
    ValidatorError,
};
use tracing::trace;

/// Inclusive bounds on the number of checked elements; `max: None` is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountBounds {
    pub min: i64,
    pub max: Option<i64>,
}

impl CountBounds {
    pub fn contains(&self, count: i64) -> bool {
        self.min <= count && self.max.map_or(true, |max| count <= max)
    }
}

/// Leading integer of `s` (after whitespace), `None` for no digits or zero
fn parse_bound(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(0) | Err(_) => None,
        Ok(value) => Some(sign * value),
    }
}

/// Parse `"n"` (exactly n) or `"min,max"` (either side may be left out)
///
/// Only the first two comma-separated items are read.
pub fn parse_bounds(argument: &str) -> Result<CountBounds, ValidatorError> {
    let items: Vec<Option<i64>> = argument
        .trim()
        .split(',')
        .take(2)
        .map(parse_bound)
        .collect();

    let invalid = || ValidatorError::InvalidArguments(format!("'{}' is not a count range", argument));

    match items.as_slice() {
        [Some(exact)] => Ok(CountBounds {
            min: *exact,
            max: Some(*exact),
        }),
        [None, None] | [None] => Err(invalid()),
        [min, max] => Ok(CountBounds {
            min: min.unwrap_or(0),
            max: *max,
        }),
        _ => Err(invalid()),
    }
}

/// Reports a context error so the message lands on the group's scope,
/// not on the single annotated box.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckedCount;

struct CheckedCountData {
    elements: Vec<NodeId>,
    bounds: CountBounds,
}

impl Validator for CheckedCount {
    fn init(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        data: &mut ParameterBag,
    ) -> Result<Vec<NodeId>, ValidatorError> {
        let element_type = match ElementType::of(dom, target) {
            Some(element_type) if element_type.is_checkable() => element_type,
            _ => {
                return Err(ValidatorError::UnsupportedElementType(describe_element(
                    dom, target,
                )))
            }
        };

        let elements = named_group(dom, target, Some(element_type));
        let bounds = parse_bounds(data.argument_string())?;
        trace!("checked-count on {} over {} elements: {:?}", target, elements.len(), bounds);

        data.insert(CheckedCountData {
            elements: elements.clone(),
            bounds,
        });

        Ok(elements)
    }

    fn validate(
        &self,
        dom: &dyn Dom,
        _target: NodeId,
        data: &ParameterBag,
    ) -> Option<ValidationResult> {
        let data = data.get::<CheckedCountData>()?;
        let checked = data
            .elements
            .iter()
            .filter(|&&element| dom.checked(element))
            .count() as i64;

        Some(ValidationResult::from_bool(data.bounds.contains(checked)).in_context())
    }
}
