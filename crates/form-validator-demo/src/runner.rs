// File: form-validator-demo/src/runner.rs
// Purpose: Replays a scenario and renders every error list change as text

use crate::scenario::{Scenario, ScriptEvent};
use anyhow::{anyhow, Context, Result};
use form_validator_core::{
    describe_element, Document, Dom, EventOutcome, FormEvent, FormValidator, FormValidatorOptions,
    NodeId, ValidateRequest, ValidatorDeclaration,
};
use form_validator_validators::standard_declarations;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

type Changes = Rc<RefCell<Vec<(NodeId, Vec<String>)>>>;

/// Run `scenario` and return the transcript, one line per entry
pub fn run(scenario: &Scenario) -> Result<Vec<String>> {
    let mut doc = Document::parse(&scenario.markup);
    let form = find_form(&doc, scenario.form.as_deref())?;

    let changes: Changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();

    let mut options = FormValidatorOptions::new()
        .config(scenario.validator.clone())
        .on_error_message_list_changed(move |element: NodeId, messages: &[String]| {
            sink.borrow_mut().push((element, messages.to_vec()))
        });
    options.validator_declarations = declarations(scenario);

    let mut validator =
        FormValidator::new(&mut doc, form, options).context("Failed to attach form validator")?;
    info!(
        "Attached to {} with {} targets",
        label(&doc, form),
        validator.targets().len()
    );

    for message_override in &scenario.overrides {
        let element = element(&doc, &message_override.element)?;
        validator.specific_error_messages_mut().set(
            element,
            message_override.validator.clone(),
            message_override.message.clone(),
        );
    }

    let mut transcript = Vec::new();
    for event in &scenario.events {
        transcript.push(format!("> {}", event));

        if let Some(outcome) = apply(&mut doc, &mut validator, event)? {
            debug!("Event outcome: {:?}", outcome);
            transcript.push(match outcome {
                EventOutcome::Block => "  submission blocked".to_string(),
                EventOutcome::Continue => "  submission continues".to_string(),
            });
        }

        for (element, messages) in changes.borrow_mut().drain(..) {
            render(&mut transcript, &label(&doc, element), &messages);
        }
    }

    Ok(transcript)
}

/// Apply one step; submissions report their outcome
fn apply(
    doc: &mut Document,
    validator: &mut FormValidator,
    event: &ScriptEvent,
) -> Result<Option<EventOutcome>> {
    match event {
        ScriptEvent::SetValue { element: id, value } => {
            let node = element(doc, id)?;
            doc.set_value(node, value.clone());
        }
        ScriptEvent::SetChecked { element: id, checked } => {
            let node = element(doc, id)?;
            doc.set_checked(node, *checked);
        }
        ScriptEvent::Input { element: id } => {
            let node = element(doc, id)?;
            validator.dispatch(doc, FormEvent::Input(node));
        }
        ScriptEvent::Change { element: id } => {
            let node = element(doc, id)?;
            validator.dispatch(doc, FormEvent::Change(node));
        }
        ScriptEvent::Validate { element: id, results } => {
            let node = element(doc, id)?;
            let request = match results {
                Some(json) => ValidateRequest::from_json(node, json)
                    .with_context(|| format!("Invalid results for #{}", id))?,
                None => ValidateRequest::new(node),
            };
            validator.dispatch(doc, FormEvent::Validate(request));
        }
        ScriptEvent::Reset => {
            validator.dispatch(doc, FormEvent::Reset);
        }
        ScriptEvent::Submit => return Ok(Some(validator.dispatch(doc, FormEvent::Submit))),
    }

    Ok(None)
}

/// Standard validators with the scenario's messages attached
fn declarations(scenario: &Scenario) -> Vec<(String, ValidatorDeclaration)> {
    let declarations: Vec<(String, ValidatorDeclaration)> = standard_declarations()
        .into_iter()
        .map(|(name, declaration)| match scenario.messages.get(&name) {
            Some(message) => {
                let declaration = declaration.with_error_message(message.as_str());
                (name, declaration)
            }
            None => (name, declaration),
        })
        .collect();

    for name in scenario.messages.keys() {
        if !declarations.iter().any(|(known, _)| known == name) {
            warn!("Message for unknown validator '{}' ignored", name);
        }
    }

    declarations
}

fn find_form(doc: &Document, id: Option<&str>) -> Result<NodeId> {
    match id {
        Some(id) => element(doc, id),
        None => doc
            .elements_by_tag("form")
            .first()
            .copied()
            .ok_or_else(|| anyhow!("Markup contains no <form> element")),
    }
}

fn element(doc: &Document, id: &str) -> Result<NodeId> {
    doc.element_by_id(id)
        .ok_or_else(|| anyhow!("No element with id '{}'", id))
}

fn label(doc: &Document, element: NodeId) -> String {
    match doc.attribute(element, "id") {
        Some(id) => format!("#{}", id),
        None => describe_element(doc, element),
    }
}

// Text rendition of the error list shown under an element
fn render(transcript: &mut Vec<String>, label: &str, messages: &[String]) {
    if messages.is_empty() {
        transcript.push(format!("  {} valid", label));
        return;
    }

    transcript.push(format!("  {} invalid", label));
    for message in messages {
        transcript.push(format!("    - {}", message));
    }
}
