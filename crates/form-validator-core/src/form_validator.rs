// File: form-validator-core/src/form_validator.rs
// Purpose: Binds annotated controls to validators, runs them on events and
// notifies when an element's displayed error list changes

use crate::config::FormValidatorConfig;
use crate::context::{ContextId, ContextTree, WILDCARD};
use crate::dom::{Dom, ElementType, NodeId};
use crate::error::{FormValidatorError, Result};
use crate::error_store::{ErrorStore, SpecificErrorMessages};
use crate::events::{EventOutcome, FormEvent, ValidateRequest};
use crate::observable::ObservableGraph;
use crate::parser::parse_validation_attribute;
use crate::registry::{ParameterBag, ValidatorDeclaration, ValidatorRegistry};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace, warn};

/// Called with an element and its new displayed messages, only on change
pub type ErrorListListener = Box<dyn FnMut(NodeId, &[String])>;

/// Construction options
#[derive(Default)]
pub struct FormValidatorOptions {
    pub config: FormValidatorConfig,
    pub validator_declarations: Vec<(String, ValidatorDeclaration)>,
    pub on_error_message_list_changed: Option<ErrorListListener>,
}

impl FormValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: FormValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn validator(mut self, name: impl Into<String>, declaration: ValidatorDeclaration) -> Self {
        self.validator_declarations.push((name.into(), declaration));
        self
    }

    pub fn on_error_message_list_changed(
        mut self,
        listener: impl FnMut(NodeId, &[String]) + 'static,
    ) -> Self {
        self.on_error_message_list_changed = Some(Box::new(listener));
        self
    }
}

struct BoundValidator {
    name: String,
    context: ContextId,
    data: ParameterBag,
}

struct TargetBinding {
    validators: Vec<BoundValidator>,
}

// Everything derived from the markup; rebuilt as a whole, never patched
struct State {
    contexts: ContextTree,
    targets: Vec<NodeId>,
    bindings: HashMap<NodeId, TargetBinding>,
    observables: ObservableGraph,
    errors: ErrorStore,
}

impl State {
    fn build(
        dom: &dyn Dom,
        form: NodeId,
        config: &FormValidatorConfig,
        registry: &ValidatorRegistry,
    ) -> Result<Self> {
        let contexts = ContextTree::build(dom, form, &config.context_attribute);

        let mut errors = ErrorStore::new();
        for element in contexts.elements() {
            errors.track(element);
        }

        let mut targets = Vec::new();
        let mut bindings = HashMap::new();
        let mut observables = ObservableGraph::new();

        for target in dom.query_attribute(form, &config.validation_attribute) {
            errors.track(target);

            let attribute = dom
                .attribute(target, &config.validation_attribute)
                .unwrap_or_default();
            let mut validators = Vec::new();

            for (name, argument_string) in parse_validation_attribute(&attribute, registry) {
                let Some(declaration) = registry.get(&name) else {
                    continue;
                };

                let context = contexts.resolve(dom, target, &name);
                let mut data = ParameterBag::new(argument_string);
                let observed = declaration
                    .validator()
                    .init(dom, target, &mut data)
                    .map_err(|e| e.into_form_error(&name))?;

                for observable in observed {
                    observables.add(target, observable);
                }

                validators.push(BoundValidator {
                    name,
                    context,
                    data,
                });
            }

            targets.push(target);
            bindings.insert(target, TargetBinding { validators });
        }

        debug!(
            "Bound {} targets, {} contexts, {} observable edges",
            targets.len(),
            contexts.len(),
            observables.edge_count()
        );

        Ok(Self {
            contexts,
            targets,
            bindings,
            observables,
            errors,
        })
    }
}

/// Declarative validation attached to one form
///
/// State is derived from the markup at construction and on every
/// [`add_validators`](Self::add_validators) /
/// [`update_validation_parameters`](Self::update_validation_parameters) call.
/// A failed rebuild leaves the previous state in place.
///
/// The listener cannot reach the validator while it runs; structural changes
/// happen through the refresh methods once the event handler returned.
pub struct FormValidator {
    form: NodeId,
    config: FormValidatorConfig,
    registry: ValidatorRegistry,
    state: State,
    ignore_validation_result: bool,
    specific_error_messages: SpecificErrorMessages,
    on_error_message_list_changed: Option<ErrorListListener>,
}

impl FormValidator {
    /// Attach to `form`
    ///
    /// Marks the form `novalidate` and declares it a `*` context unless it
    /// already declares one.
    pub fn new(dom: &mut dyn Dom, form: NodeId, options: FormValidatorOptions) -> Result<Self> {
        let tag = dom.tag_name(form);
        if tag != "form" {
            return Err(FormValidatorError::InvalidArgument(tag));
        }

        let FormValidatorOptions {
            config,
            validator_declarations,
            on_error_message_list_changed,
        } = options;

        dom.set_attribute(form, "novalidate", "");
        if !dom.has_attribute(form, &config.context_attribute) {
            dom.set_attribute(form, &config.context_attribute, WILDCARD);
        }

        let mut registry = ValidatorRegistry::new();
        for (name, declaration) in validator_declarations {
            registry.register(&name, declaration)?;
        }

        let state = State::build(&*dom, form, &config, &registry)?;

        Ok(Self {
            form,
            ignore_validation_result: config.ignore_validation_result,
            config,
            registry,
            state,
            specific_error_messages: SpecificErrorMessages::new(),
            on_error_message_list_changed,
        })
    }

    pub fn form(&self) -> NodeId {
        self.form
    }

    pub fn config(&self) -> &FormValidatorConfig {
        &self.config
    }

    /// Register (or overwrite) validators and rebuild all state
    pub fn add_validators<I, S>(&mut self, dom: &dyn Dom, declarations: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, ValidatorDeclaration)>,
        S: AsRef<str>,
    {
        let mut registry = self.registry.clone();
        for (name, declaration) in declarations {
            registry.register(name.as_ref(), declaration)?;
        }

        let state = State::build(dom, self.form, &self.config, &registry)?;
        self.registry = registry;
        self.state = state;

        Ok(())
    }

    /// Re-scan the markup with the current registry
    pub fn update_validation_parameters(&mut self, dom: &dyn Dom) -> Result<()> {
        self.state = State::build(dom, self.form, &self.config, &self.registry)?;
        Ok(())
    }

    pub fn is_registered(&self, validator_name: &str) -> bool {
        self.registry.contains(validator_name)
    }

    pub fn ignore_validation_result(&self) -> bool {
        self.ignore_validation_result
    }

    /// Force every subsequent verdict to valid, keeping its metadata
    pub fn set_ignore_validation_result(&mut self, ignore: bool) {
        self.ignore_validation_result = ignore;
    }

    pub fn specific_error_messages(&self) -> &SpecificErrorMessages {
        &self.specific_error_messages
    }

    /// Per-element message overrides, applied when lists are displayed
    pub fn specific_error_messages_mut(&mut self) -> &mut SpecificErrorMessages {
        &mut self.specific_error_messages
    }

    pub fn set_on_error_message_list_changed(
        &mut self,
        listener: impl FnMut(NodeId, &[String]) + 'static,
    ) {
        self.on_error_message_list_changed = Some(Box::new(listener));
    }

    /// Displayed messages currently held for `element`
    pub fn error_messages(&self, element: NodeId) -> Vec<String> {
        self.state
            .errors
            .displayed_messages(element, &self.specific_error_messages)
    }

    /// True if any target or context holds an error entry
    pub fn has_errors(&self) -> bool {
        self.state.errors.has_errors()
    }

    /// Context elements then targets, in the order they were discovered
    pub fn tracked_elements(&self) -> &[NodeId] {
        self.state.errors.tracked()
    }

    /// Elements carrying the validation attribute, in document order
    pub fn targets(&self) -> &[NodeId] {
        &self.state.targets
    }

    /// Route a form event; the outcome tells the host whether to block it
    pub fn dispatch(&mut self, dom: &dyn Dom, event: FormEvent) -> EventOutcome {
        match event {
            FormEvent::Input(element) => self.handle_input(dom, element),
            FormEvent::Change(element) => self.handle_change(dom, element),
            FormEvent::Validate(request) => self.validate(dom, request),
            FormEvent::Reset => self.handle_reset(),
            FormEvent::Submit => return self.handle_submit(dom),
        }

        EventOutcome::Continue
    }

    /// Re-validate `element` if bound, and every target observing it
    pub fn handle_input(&mut self, dom: &dyn Dom, element: NodeId) {
        if self.state.bindings.contains_key(&element) {
            self.validate(dom, ValidateRequest::new(element));
        }

        let dependents = self.state.observables.targets_of(element).to_vec();
        for target in dependents {
            self.validate(dom, ValidateRequest::new(target));
        }
    }

    pub fn handle_change(&mut self, dom: &dyn Dom, element: NodeId) {
        self.handle_input(dom, element);
    }

    /// Run the validators bound to the request's target
    ///
    /// Unbound or unsupported targets are ignored.
    pub fn validate(&mut self, dom: &dyn Dom, request: ValidateRequest) {
        let target = request.target;

        let Some(binding) = self.state.bindings.get(&target) else {
            trace!("Ignoring validate request for unbound element {}", target);
            return;
        };

        trace!(
            "Validating {} ({} validators, {} overrides)",
            target,
            binding.validators.len(),
            request.overrides.len()
        );

        if ElementType::of(dom, target).is_none() {
            trace!("Ignoring validate request for unsupported element {}", target);
            return;
        }

        for name in request.overrides.keys() {
            if !binding.validators.iter().any(|bound| &bound.name == name) {
                warn!("Override for '{}' ignored: not bound to element {}", name, target);
            }
        }

        let mut snapshots: Vec<(NodeId, Vec<String>)> = Vec::new();

        for bound in &binding.validators {
            let result = match request.overrides.get(&bound.name) {
                Some(result) => Some(result.clone()),
                None => self
                    .registry
                    .get(&bound.name)
                    .and_then(|declaration| declaration.validator().validate(dom, target, &bound.data)),
            };

            let Some(mut result) = result else {
                trace!("Validator '{}' has no opinion on {}", bound.name, target);
                continue;
            };

            result.validator_name = bound.name.clone();
            if self.ignore_validation_result {
                result.is_valid = true;
            }

            let owner = if result.is_context_error {
                self.state.contexts.element(bound.context)
            } else {
                target
            };

            if !snapshots.iter().any(|(element, _)| *element == owner) {
                let before = self
                    .state
                    .errors
                    .displayed_messages(owner, &self.specific_error_messages);
                snapshots.push((owner, before));
            }

            if result.is_valid {
                self.state.errors.remove(owner, &result.validator_name);
            } else {
                self.state.errors.add(
                    owner,
                    &result.validator_name,
                    &result.subtypes,
                    &self.registry,
                );
            }
        }

        for (owner, before) in snapshots {
            let after = self.error_messages(owner);
            if after != before {
                self.notify(owner, &after);
            }
        }
    }

    /// Clear every list and notify each tracked element with `[]`
    pub fn handle_reset(&mut self) {
        self.state.errors.clear_all();

        let tracked = self.state.errors.tracked().to_vec();
        for element in tracked {
            self.notify(element, &[]);
        }
    }

    /// Validate every target; block submission if any error remains
    pub fn handle_submit(&mut self, dom: &dyn Dom) -> EventOutcome {
        let targets = self.state.targets.clone();
        for target in targets {
            self.validate(dom, ValidateRequest::new(target));
        }

        if self.state.errors.has_errors() {
            debug!("Submission blocked: form {} has errors", self.form);
            EventOutcome::Block
        } else {
            EventOutcome::Continue
        }
    }

    fn notify(&mut self, element: NodeId, messages: &[String]) {
        trace!("Error list of {} changed: {:?}", element, messages);

        if let Some(listener) = self.on_error_message_list_changed.as_mut() {
            listener(element, messages);
        }
    }
}

impl fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidator")
            .field("form", &self.form)
            .field("config", &self.config)
            .field("validators", &self.registry.len())
            .field("targets", &self.state.targets.len())
            .field("contexts", &self.state.contexts.len())
            .field("ignore_validation_result", &self.ignore_validation_result)
            .finish()
    }
}
