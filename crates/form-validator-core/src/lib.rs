//! # form-validator-core
//!
//! Declarative validation for forms: controls list their validators in a
//! `data-validation` attribute, ancestor scopes collect group errors through
//! `data-validation-context`, and a listener hears about every change of an
//! element's displayed error list.
//!
//! ## Quick Start
//!
//! ```rust
//! use form_validator_core::{
//!     Document, Dom, FormValidator, FormValidatorOptions, NodeId, ParameterBag,
//!     ValidationResult, Validator, ValidatorDeclaration,
//! };
//!
//! struct NotEmpty;
//!
//! impl Validator for NotEmpty {
//!     fn validate(&self, dom: &dyn Dom, target: NodeId, _: &ParameterBag) -> Option<ValidationResult> {
//!         Some(ValidationResult::from_bool(!dom.value(target).is_empty()))
//!     }
//! }
//!
//! let mut doc = Document::parse(
//!     r#"<form id="f"><input id="name" type="text" data-validation="not-empty"></form>"#,
//! );
//! let form = doc.element_by_id("f").unwrap();
//! let input = doc.element_by_id("name").unwrap();
//!
//! let mut validator = FormValidator::new(
//!     &mut doc,
//!     form,
//!     FormValidatorOptions::new().validator(
//!         "not-empty",
//!         ValidatorDeclaration::new(NotEmpty).with_error_message("Please fill in"),
//!     ),
//! )
//! .unwrap();
//!
//! validator.handle_input(&doc, input);
//! assert_eq!(validator.error_messages(input), vec!["Please fill in"]);
//!
//! doc.set_value(input, "Ada");
//! validator.handle_input(&doc, input);
//! assert!(validator.error_messages(input).is_empty());
//! ```

pub mod config;
pub mod context;
pub mod document;
pub mod dom;
pub mod error;
pub mod error_store;
pub mod events;
pub mod form_validator;
pub mod observable;
pub mod parser;
pub mod registry;

// Re-export main types
pub use config::FormValidatorConfig;
pub use context::{Context, ContextId, ContextTree, WILDCARD};
pub use document::Document;
pub use dom::{describe_element, Dom, ElementType, NodeId};
pub use error::{FormValidatorError, Result, ValidatorError};
pub use error_store::{ErrorEntry, ErrorStore, SpecificErrorMessages};
pub use events::{EventOutcome, FormEvent, ValidateRequest};
pub use form_validator::{ErrorListListener, FormValidator, FormValidatorOptions};
pub use observable::ObservableGraph;
pub use parser::parse_validation_attribute;
pub use registry::{
    AlwaysValid, ErrorMessages, ParameterBag, ValidationResult, Validator, ValidatorDeclaration,
    ValidatorRegistry,
};

/// Attribute listing a control's validators
pub const VALIDATION_ATTRIBUTE: &str = "data-validation";

/// Attribute declaring a context scope
pub const CONTEXT_ATTRIBUTE: &str = "data-validation-context";
