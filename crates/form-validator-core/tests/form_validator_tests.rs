//! Integration tests for the form validator orchestration
//!
//! Covers binding, observable propagation, context errors, diff-based
//! notification, overrides, reset and submit handling.

use form_validator_core::*;
use pretty_assertions::assert_eq;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Notifications = Rc<RefCell<Vec<(NodeId, Vec<String>)>>>;

struct NonEmpty {
    calls: Rc<Cell<usize>>,
}

impl Validator for NonEmpty {
    fn validate(&self, dom: &dyn Dom, target: NodeId, _: &ParameterBag) -> Option<ValidationResult> {
        self.calls.set(self.calls.get() + 1);
        Some(ValidationResult::from_bool(!dom.value(target).is_empty()))
    }
}

struct OtherElement(NodeId);

/// Valid when the target's value equals the element named by the argument
struct Mirror;

impl Validator for Mirror {
    fn init(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        data: &mut ParameterBag,
    ) -> std::result::Result<Vec<NodeId>, ValidatorError> {
        let other = dom
            .element_by_id(data.argument_string())
            .ok_or_else(|| ValidatorError::InvalidArguments(data.argument_string().to_string()))?;
        data.insert(OtherElement(other));
        Ok(vec![target, other])
    }

    fn validate(&self, dom: &dyn Dom, target: NodeId, data: &ParameterBag) -> Option<ValidationResult> {
        let OtherElement(other) = data.get::<OtherElement>()?;
        Some(ValidationResult::from_bool(dom.value(target) == dom.value(*other)))
    }
}

struct Peers(Vec<NodeId>);

/// Context error unless at least one same-named checkbox is checked
struct AnyChecked;

impl Validator for AnyChecked {
    fn init(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        data: &mut ParameterBag,
    ) -> std::result::Result<Vec<NodeId>, ValidatorError> {
        let name = dom.attribute(target, "name").unwrap_or_default();
        let root = dom.root_of(target);
        let peers: Vec<NodeId> = dom
            .descendants(root)
            .into_iter()
            .filter(|&n| dom.attribute(n, "name").as_deref() == Some(name.as_str()))
            .collect();
        data.insert(Peers(peers.clone()));
        Ok(peers)
    }

    fn validate(&self, dom: &dyn Dom, _: NodeId, data: &ParameterBag) -> Option<ValidationResult> {
        let Peers(peers) = data.get::<Peers>()?;
        let any = peers.iter().any(|&p| dom.checked(p));
        Some(ValidationResult::from_bool(any).in_context())
    }
}

struct NoOpinion;

impl Validator for NoOpinion {
    fn validate(&self, _: &dyn Dom, _: NodeId, _: &ParameterBag) -> Option<ValidationResult> {
        None
    }
}

struct TextOnly;

impl Validator for TextOnly {
    fn init(
        &self,
        dom: &dyn Dom,
        target: NodeId,
        _: &mut ParameterBag,
    ) -> std::result::Result<Vec<NodeId>, ValidatorError> {
        match ElementType::of(dom, target) {
            Some(ElementType::Text) => Ok(vec![target]),
            _ => Err(ValidatorError::UnsupportedElementType(describe_element(dom, target))),
        }
    }
}

/// Fails with the subtypes listed in the argument string
struct Subtypes;

impl Validator for Subtypes {
    fn validate(&self, dom: &dyn Dom, target: NodeId, _: &ParameterBag) -> Option<ValidationResult> {
        let value = dom.value(target);
        if value.is_empty() {
            return Some(ValidationResult::valid());
        }
        Some(ValidationResult::invalid().with_subtypes(value.split(',').map(str::to_string)))
    }
}

fn recorder() -> (Notifications, impl FnMut(NodeId, &[String]) + 'static) {
    let notifications: Notifications = Rc::new(RefCell::new(Vec::new()));
    let sink = notifications.clone();
    (notifications, move |element: NodeId, messages: &[String]| {
        sink.borrow_mut().push((element, messages.to_vec()))
    })
}

fn id(doc: &Document, id: &str) -> NodeId {
    doc.element_by_id(id).unwrap()
}

fn strings(messages: &[&str]) -> Vec<String> {
    messages.iter().map(|m| m.to_string()).collect()
}

#[test]
fn test_constructor_rejects_non_form() {
    let mut doc = Document::parse(r#"<div id="d"></div>"#);
    let div = id(&doc, "d");

    let err = FormValidator::new(&mut doc, div, FormValidatorOptions::new()).unwrap_err();
    assert!(matches!(err, FormValidatorError::InvalidArgument(tag) if tag == "div"));
}

#[test]
fn test_constructor_marks_form() {
    let mut doc = Document::parse(r#"<form id="f"></form><form id="g" data-validation-context="x"></form>"#);
    let f = id(&doc, "f");
    let g = id(&doc, "g");

    FormValidator::new(&mut doc, f, FormValidatorOptions::new()).unwrap();
    FormValidator::new(&mut doc, g, FormValidatorOptions::new()).unwrap();

    assert_eq!(doc.attribute(f, "novalidate").as_deref(), Some(""));
    assert_eq!(doc.attribute(f, "data-validation-context").as_deref(), Some("*"));
    assert_eq!(doc.attribute(g, "data-validation-context").as_deref(), Some("x"));
}

#[test]
fn test_required_like_sequence_notifies_on_change_only() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="t" type="text" data-validation="non-empty"></form>"#,
    );
    let form = id(&doc, "f");
    let input = id(&doc, "t");
    let calls = Rc::new(Cell::new(0));
    let (notifications, listener) = recorder();

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator(
                "non-empty",
                ValidatorDeclaration::new(NonEmpty { calls: calls.clone() })
                    .with_error_message("Value is required"),
            )
            .on_error_message_list_changed(listener),
    )
    .unwrap();

    let mut validity = Vec::new();

    validator.handle_input(&doc, input);
    validity.push(!validator.has_errors());

    doc.set_value(input, "some text");
    validator.handle_input(&doc, input);
    validity.push(!validator.has_errors());

    doc.set_value(input, "");
    validator.handle_input(&doc, input);
    validity.push(!validator.has_errors());

    assert_eq!(validity, vec![false, true, false]);
    assert_eq!(calls.get(), 3);
    assert_eq!(
        *notifications.borrow(),
        vec![
            (input, strings(&["Value is required"])),
            (input, vec![]),
            (input, strings(&["Value is required"])),
        ]
    );
}

#[test]
fn test_repeated_validation_without_change_is_silent() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="t" type="text" data-validation="non-empty"></form>"#,
    );
    let form = id(&doc, "f");
    let input = id(&doc, "t");
    let calls = Rc::new(Cell::new(0));
    let (notifications, listener) = recorder();

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator(
                "non-empty",
                ValidatorDeclaration::new(NonEmpty { calls: calls.clone() }).with_error_message("Required"),
            )
            .on_error_message_list_changed(listener),
    )
    .unwrap();

    validator.validate(&doc, ValidateRequest::new(input));
    validator.validate(&doc, ValidateRequest::new(input));
    validator.dispatch(&doc, FormEvent::Validate(ValidateRequest::new(input)));

    assert_eq!(calls.get(), 3);
    assert_eq!(notifications.borrow().len(), 1);
}

#[test]
fn test_valid_first_pass_does_not_notify() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="t" type="text" value="x" data-validation="non-empty"></form>"#,
    );
    let form = id(&doc, "f");
    let input = id(&doc, "t");
    let (notifications, listener) = recorder();

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator(
                "non-empty",
                ValidatorDeclaration::new(NonEmpty { calls: Rc::new(Cell::new(0)) }),
            )
            .on_error_message_list_changed(listener),
    )
    .unwrap();

    validator.handle_input(&doc, input);
    assert!(notifications.borrow().is_empty());
}

#[test]
fn test_observable_input_revalidates_target() {
    let mut doc = Document::parse(
        r#"<form id="f">
            <input id="password" type="password">
            <input id="confirm" type="password" data-validation="mirror(password)">
        </form>"#,
    );
    let form = id(&doc, "f");
    let password = id(&doc, "password");
    let confirm = id(&doc, "confirm");
    let (notifications, listener) = recorder();

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator("mirror", ValidatorDeclaration::new(Mirror).with_error_message("Does not match"))
            .on_error_message_list_changed(listener),
    )
    .unwrap();

    doc.set_value(password, "secret");
    validator.handle_input(&doc, password);
    assert_eq!(validator.error_messages(confirm), strings(&["Does not match"]));

    doc.set_value(confirm, "secret");
    validator.handle_input(&doc, confirm);
    assert!(validator.error_messages(confirm).is_empty());

    doc.set_value(password, "changed");
    validator.handle_change(&doc, password);
    assert_eq!(validator.error_messages(confirm), strings(&["Does not match"]));

    let seen: Vec<NodeId> = notifications.borrow().iter().map(|(el, _)| *el).collect();
    assert_eq!(seen, vec![confirm, confirm, confirm]);
}

#[test]
fn test_unrelated_input_does_nothing() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="a" type="text"><input id="t" type="text" data-validation="non-empty"></form>"#,
    );
    let form = id(&doc, "f");
    let calls = Rc::new(Cell::new(0));

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new().validator(
            "non-empty",
            ValidatorDeclaration::new(NonEmpty { calls: calls.clone() }),
        ),
    )
    .unwrap();

    validator.handle_input(&doc, id(&doc, "a"));
    validator.validate(&doc, ValidateRequest::new(id(&doc, "a")));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_context_errors_land_on_nearest_accepting_context() {
    let mut doc = Document::parse(
        r#"<form id="f">
            <fieldset id="group" data-validation-context="any-checked">
                <div data-validation-context="other">
                    <input id="c1" type="checkbox" name="pick" data-validation="any-checked">
                </div>
                <input id="c2" type="checkbox" name="pick">
            </fieldset>
        </form>"#,
    );
    let form = id(&doc, "f");
    let group = id(&doc, "group");
    let c1 = id(&doc, "c1");
    let c2 = id(&doc, "c2");
    let (notifications, listener) = recorder();

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator("any-checked", ValidatorDeclaration::new(AnyChecked).with_error_message("Pick one"))
            .on_error_message_list_changed(listener),
    )
    .unwrap();

    validator.handle_input(&doc, c1);
    assert_eq!(validator.error_messages(group), strings(&["Pick one"]));
    assert!(validator.error_messages(c1).is_empty());

    doc.set_checked(c2, true);
    validator.handle_input(&doc, c2);
    assert!(validator.error_messages(group).is_empty());

    assert_eq!(
        *notifications.borrow(),
        vec![(group, strings(&["Pick one"])), (group, vec![])]
    );
}

#[test]
fn test_no_opinion_leaves_store_untouched() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="t" type="text" data-validation="no-opinion"></form>"#,
    );
    let form = id(&doc, "f");
    let input = id(&doc, "t");
    let (notifications, listener) = recorder();

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator("no-opinion", ValidatorDeclaration::new(NoOpinion).with_error_message("never"))
            .on_error_message_list_changed(listener),
    )
    .unwrap();

    // an injected failure is kept until the validator itself has an opinion
    validator.validate(
        &doc,
        ValidateRequest::new(input).with_override("no-opinion", ValidationResult::invalid()),
    );
    validator.handle_input(&doc, input);

    assert_eq!(validator.error_messages(input), strings(&["never"]));
    assert_eq!(notifications.borrow().len(), 1);
}

#[test]
fn test_override_results_replace_validate_calls() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="t" type="text" value="taken" data-validation="non-empty;remote"></form>"#,
    );
    let form = id(&doc, "f");
    let input = id(&doc, "t");
    let calls = Rc::new(Cell::new(0));

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator(
                "non-empty",
                ValidatorDeclaration::new(NonEmpty { calls: calls.clone() }).with_error_message("Required"),
            )
            .validator(
                "remote",
                ValidatorDeclaration::default().with_error_message(
                    ErrorMessages::new().with("taken", "Name already taken"),
                ),
            ),
    )
    .unwrap();

    let request = ValidateRequest::from_json(
        input,
        r#"{"remote": {"isValid": false, "subtypes": ["taken"]}, "non-empty": {"isValid": false}}"#,
    )
    .unwrap();
    validator.validate(&doc, request);

    assert_eq!(calls.get(), 0);
    assert_eq!(
        validator.error_messages(input),
        strings(&["Required", "Name already taken"])
    );

    validator.handle_input(&doc, input);
    assert_eq!(calls.get(), 1);
    assert!(validator.error_messages(input).is_empty());
}

#[test]
fn test_ignore_validation_result_clears_errors() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="t" type="text" data-validation="non-empty"></form>"#,
    );
    let form = id(&doc, "f");
    let input = id(&doc, "t");
    let (notifications, listener) = recorder();

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator(
                "non-empty",
                ValidatorDeclaration::new(NonEmpty { calls: Rc::new(Cell::new(0)) }).with_error_message("Required"),
            )
            .on_error_message_list_changed(listener),
    )
    .unwrap();

    validator.handle_input(&doc, input);
    assert!(validator.has_errors());

    validator.set_ignore_validation_result(true);
    assert!(validator.ignore_validation_result());
    validator.handle_input(&doc, input);

    assert!(!validator.has_errors());
    assert_eq!(notifications.borrow().last().unwrap(), &(input, vec![]));
}

#[test]
fn test_subtype_changes_are_diffed() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="t" type="text" data-validation="subtypes"></form>"#,
    );
    let form = id(&doc, "f");
    let input = id(&doc, "t");
    let (notifications, listener) = recorder();

    let messages = ErrorMessages::new()
        .with("a", "A failed")
        .with("b", "B failed");
    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator("subtypes", ValidatorDeclaration::new(Subtypes).with_error_message(messages))
            .on_error_message_list_changed(listener),
    )
    .unwrap();

    doc.set_value(input, "a,b");
    validator.handle_input(&doc, input);
    doc.set_value(input, "b,a");
    validator.handle_input(&doc, input);
    doc.set_value(input, "b,unknown");
    validator.handle_input(&doc, input);

    assert_eq!(
        *notifications.borrow(),
        vec![
            (input, strings(&["A failed", "B failed"])),
            (input, strings(&["B failed", "A failed"])),
            (input, strings(&["B failed"])),
        ]
    );
}

#[test]
fn test_specific_error_messages_drive_display_and_diff() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="t" type="text" data-validation="non-empty"></form>"#,
    );
    let form = id(&doc, "f");
    let input = id(&doc, "t");
    let (notifications, listener) = recorder();

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator(
                "non-empty",
                ValidatorDeclaration::new(NonEmpty { calls: Rc::new(Cell::new(0)) }).with_error_message("Required"),
            )
            .on_error_message_list_changed(listener),
    )
    .unwrap();

    validator
        .specific_error_messages_mut()
        .set(input, "non-empty", "This text field must be filled");
    validator.handle_input(&doc, input);

    assert_eq!(validator.error_messages(input), strings(&["This text field must be filled"]));
    assert_eq!(
        validator.specific_error_messages().get(input, "non-empty"),
        Some("This text field must be filled")
    );

    // same displayed text, nothing to report
    validator.handle_input(&doc, input);
    assert_eq!(notifications.borrow().len(), 1);
}

#[test]
fn test_reset_notifies_every_tracked_element() {
    let mut doc = Document::parse(
        r#"<form id="f">
            <div id="ctx" data-validation-context="any-checked">
                <input id="c" type="checkbox" name="g" data-validation="any-checked">
            </div>
            <input id="t" type="text" data-validation="non-empty">
        </form>"#,
    );
    let form = id(&doc, "f");
    let ctx = id(&doc, "ctx");
    let c = id(&doc, "c");
    let t = id(&doc, "t");
    let (notifications, listener) = recorder();

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator("any-checked", ValidatorDeclaration::new(AnyChecked).with_error_message("Pick"))
            .validator(
                "non-empty",
                ValidatorDeclaration::new(NonEmpty { calls: Rc::new(Cell::new(0)) }).with_error_message("Required"),
            )
            .on_error_message_list_changed(listener),
    )
    .unwrap();

    validator.handle_input(&doc, t);
    assert!(validator.has_errors());
    notifications.borrow_mut().clear();

    assert_eq!(validator.dispatch(&doc, FormEvent::Reset), EventOutcome::Continue);

    assert!(!validator.has_errors());
    assert_eq!(validator.tracked_elements(), &[form, ctx, c, t]);
    assert_eq!(
        *notifications.borrow(),
        vec![(form, vec![]), (ctx, vec![]), (c, vec![]), (t, vec![])]
    );
}

#[test]
fn test_submit_blocks_only_when_errors_remain() {
    let mut doc = Document::parse(
        r#"<form id="f">
            <input id="a" type="text" data-validation="non-empty">
            <input id="b" type="text" data-validation="non-empty">
        </form>"#,
    );
    let form = id(&doc, "f");
    let a = id(&doc, "a");
    let b = id(&doc, "b");
    let calls = Rc::new(Cell::new(0));

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new().validator(
            "non-empty",
            ValidatorDeclaration::new(NonEmpty { calls: calls.clone() }),
        ),
    )
    .unwrap();

    doc.set_value(a, "filled");
    let outcome = validator.dispatch(&doc, FormEvent::Submit);
    assert!(outcome.is_blocked());
    assert_eq!(calls.get(), 2);

    doc.set_value(b, "filled");
    assert_eq!(validator.handle_submit(&doc), EventOutcome::Continue);
}

#[test]
fn test_init_errors_are_fatal_and_keep_previous_state() {
    let mut doc = Document::parse(
        r#"<form id="f">
            <input id="t" type="text" data-validation="text-only;non-empty">
            <input id="c" type="checkbox" data-validation="text-only-later">
        </form>"#,
    );
    let form = id(&doc, "f");
    let t = id(&doc, "t");

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator("text-only", ValidatorDeclaration::new(TextOnly))
            .validator(
                "non-empty",
                ValidatorDeclaration::new(NonEmpty { calls: Rc::new(Cell::new(0)) }).with_error_message("Required"),
            ),
    )
    .unwrap();

    validator.handle_input(&doc, t);
    assert_eq!(validator.error_messages(t), strings(&["Required"]));

    let err = validator
        .add_validators(&doc, [("text-only-later", ValidatorDeclaration::new(TextOnly))])
        .unwrap_err();
    assert!(matches!(
        err,
        FormValidatorError::UnsupportedElementType { ref validator, .. } if validator == "text-only-later"
    ));

    // registry and error store are untouched by the failed rebuild
    assert!(!validator.is_registered("text-only-later"));
    assert_eq!(validator.error_messages(t), strings(&["Required"]));
}

#[test]
fn test_invalid_arguments_surface_from_construction() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="t" type="text" data-validation="mirror(nowhere)"></form>"#,
    );
    let form = id(&doc, "f");

    let err = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new().validator("mirror", ValidatorDeclaration::new(Mirror)),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        FormValidatorError::InvalidValidatorArguments { ref validator, ref reason }
            if validator == "mirror" && reason == "nowhere"
    ));
}

#[test]
fn test_update_validation_parameters_picks_up_markup_changes() {
    let mut doc = Document::parse(r#"<form id="f"><input id="t" type="text"></form>"#);
    let form = id(&doc, "f");
    let input = id(&doc, "t");

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new().validator(
            "non-empty",
            ValidatorDeclaration::new(NonEmpty { calls: Rc::new(Cell::new(0)) }).with_error_message("Required"),
        ),
    )
    .unwrap();
    assert!(validator.targets().is_empty());

    doc.set_attribute(input, "data-validation", "non-empty");
    validator.update_validation_parameters(&doc).unwrap();
    validator.handle_input(&doc, input);

    assert_eq!(validator.targets(), &[input]);
    assert_eq!(validator.error_messages(input), strings(&["Required"]));
}

#[test]
fn test_add_validators_binds_late_registrations() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="t" type="text" data-validation="late"></form>"#,
    );
    let form = id(&doc, "f");
    let input = id(&doc, "t");

    let mut validator = FormValidator::new(&mut doc, form, FormValidatorOptions::new()).unwrap();
    validator.handle_input(&doc, input);
    assert!(!validator.has_errors());

    validator
        .add_validators(
            &doc,
            [(
                "late",
                ValidatorDeclaration::new(NonEmpty { calls: Rc::new(Cell::new(0)) }).with_error_message("Late"),
            )],
        )
        .unwrap();
    validator.handle_input(&doc, input);

    assert_eq!(validator.error_messages(input), strings(&["Late"]));
}

#[test]
fn test_invalid_declaration_name() {
    let mut doc = Document::parse(r#"<form id="f"></form>"#);
    let form = id(&doc, "f");

    let err = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new().validator("bad name", ValidatorDeclaration::default()),
    )
    .unwrap_err();

    assert!(matches!(err, FormValidatorError::InvalidDeclaration { .. }));
}

#[test]
fn test_config_renames_attributes() {
    let mut doc = Document::parse(
        r#"<form id="f"><div id="scope" data-scope="*"><input id="t" type="text" data-rules="non-empty"></div></form>"#,
    );
    let form = id(&doc, "f");
    let input = id(&doc, "t");

    let config = FormValidatorConfig::from_toml_str(
        r#"
        validation_attribute = "data-rules"
        context_attribute = "data-scope"
        "#,
    )
    .unwrap();

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new().config(config).validator(
            "non-empty",
            ValidatorDeclaration::new(NonEmpty { calls: Rc::new(Cell::new(0)) }).with_error_message("Required"),
        ),
    )
    .unwrap();

    validator.handle_input(&doc, input);

    assert_eq!(doc.attribute(form, "data-scope").as_deref(), Some("*"));
    assert_eq!(validator.tracked_elements(), &[form, id(&doc, "scope"), input]);
    assert_eq!(validator.error_messages(input), strings(&["Required"]));
}

#[test]
fn test_constructor_rejects_unknown_handle() {
    let mut doc = Document::parse(r#"<form id="f"></form>"#);

    let err = FormValidator::new(&mut doc, NodeId(99), FormValidatorOptions::new()).unwrap_err();
    assert!(matches!(err, FormValidatorError::InvalidArgument(_)));
}

#[test]
fn test_override_replaces_all_subtypes_once() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="t" type="text" data-validation="subtypes"></form>"#,
    );
    let form = id(&doc, "f");
    let input = id(&doc, "t");
    let (notifications, listener) = recorder();

    let messages = ErrorMessages::new()
        .with("a", "A failed")
        .with("b", "B failed");
    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator("subtypes", ValidatorDeclaration::new(Subtypes).with_error_message(messages))
            .on_error_message_list_changed(listener),
    )
    .unwrap();

    validator
        .specific_error_messages_mut()
        .set(input, "subtypes", "Fix this field");
    doc.set_value(input, "a,b");
    validator.handle_input(&doc, input);

    assert_eq!(validator.error_messages(input), strings(&["Fix this field"]));

    // a different subtype mix shows the same text, so nothing is reported
    doc.set_value(input, "b");
    validator.handle_input(&doc, input);
    assert_eq!(
        *notifications.borrow(),
        vec![(input, strings(&["Fix this field"]))]
    );
}

#[test]
fn test_removed_overrides_fall_back_to_declared_messages() {
    let mut doc = Document::parse(
        r#"<form id="f"><input id="t" type="text" data-validation="non-empty;subtypes"></form>"#,
    );
    let form = id(&doc, "f");
    let input = id(&doc, "t");
    let (notifications, listener) = recorder();

    let mut validator = FormValidator::new(
        &mut doc,
        form,
        FormValidatorOptions::new()
            .validator(
                "non-empty",
                ValidatorDeclaration::new(NonEmpty { calls: Rc::new(Cell::new(0)) }).with_error_message("Required"),
            )
            .validator(
                "subtypes",
                ValidatorDeclaration::new(Subtypes).with_error_message(ErrorMessages::new().with("a", "A failed")),
            )
            .on_error_message_list_changed(listener),
    )
    .unwrap();

    let overrides = validator.specific_error_messages_mut();
    overrides.set(input, "non-empty", "Please type something");
    overrides.set(input, "subtypes", "Not like that");

    validator.handle_input(&doc, input);
    assert_eq!(validator.error_messages(input), strings(&["Please type something"]));

    assert_eq!(
        validator.specific_error_messages_mut().remove(input, "non-empty").as_deref(),
        Some("Please type something")
    );
    validator.handle_input(&doc, input);
    assert_eq!(validator.error_messages(input), strings(&["Required"]));

    doc.set_value(input, "a");
    validator.specific_error_messages_mut().set(input, "non-empty", "unused");
    validator.specific_error_messages_mut().clear_element(input);
    validator.handle_input(&doc, input);
    assert_eq!(validator.error_messages(input), strings(&["A failed"]));
    assert_eq!(validator.specific_error_messages().get(input, "subtypes"), None);

    // snapshots are taken with the table as it is, so only entry changes notify
    assert_eq!(
        *notifications.borrow(),
        vec![
            (input, strings(&["Please type something"])),
            (input, strings(&["A failed"])),
        ]
    );
}
