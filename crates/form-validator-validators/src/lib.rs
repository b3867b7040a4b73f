//! Form-Validator Standard Validators
//!
//! The stock plugins for `form-validator-core`: `required`, `pattern`,
//! `min-length`, `max-length`, `equal-to` and `checked-count`.

use form_validator_core::{Dom, ElementType, NodeId, ValidatorDeclaration};

pub mod checked_count;
pub mod equal_to;
pub mod length;
pub mod pattern;
pub mod required;

pub use checked_count::{parse_bounds, CheckedCount, CountBounds};
pub use equal_to::EqualTo;
pub use length::{MaxLength, MinLength};
pub use pattern::Pattern;
pub use required::Required;

pub const REQUIRED: &str = "required";
pub const PATTERN: &str = "pattern";
pub const MIN_LENGTH: &str = "min-length";
pub const MAX_LENGTH: &str = "max-length";
pub const EQUAL_TO: &str = "equal-to";
pub const CHECKED_COUNT: &str = "checked-count";

/// Every standard validator under its markup name, without messages
pub fn standard_declarations() -> Vec<(String, ValidatorDeclaration)> {
    vec![
        (REQUIRED.to_string(), ValidatorDeclaration::new(Required)),
        (PATTERN.to_string(), ValidatorDeclaration::new(Pattern)),
        (MIN_LENGTH.to_string(), ValidatorDeclaration::new(MinLength)),
        (MAX_LENGTH.to_string(), ValidatorDeclaration::new(MaxLength)),
        (EQUAL_TO.to_string(), ValidatorDeclaration::new(EqualTo)),
        (CHECKED_COUNT.to_string(), ValidatorDeclaration::new(CheckedCount)),
    ]
}

/// Elements in the target's document sharing its `name`, optionally of one type
///
/// An unnamed target forms a group of its own.
pub(crate) fn named_group(
    dom: &dyn Dom,
    target: NodeId,
    element_type: Option<ElementType>,
) -> Vec<NodeId> {
    let Some(name) = dom.attribute(target, "name") else {
        return vec![target];
    };

    let root = dom.root_of(target);
    std::iter::once(root)
        .chain(dom.descendants(root))
        .filter(|&node| dom.attribute(node, "name").as_deref() == Some(name.as_str()))
        .filter(|&node| element_type.map_or(true, |t| ElementType::of(dom, node) == Some(t)))
        .collect()
}
