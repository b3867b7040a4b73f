// File: form-validator-core/src/error_store.rs
// Purpose: Per-element error lists and the displayed-message override table

use crate::dom::NodeId;
use crate::registry::ValidatorRegistry;
use std::collections::HashMap;

/// One failing (validator, subtype) pair on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub validator_name: String,
    pub subtype: String,
    pub message: Option<String>,
}

/// Ordered error lists for every tracked target and context element
///
/// Holds at most one entry per (element, validator, subtype).
#[derive(Debug, Clone, Default)]
pub struct ErrorStore {
    order: Vec<NodeId>,
    lists: HashMap<NodeId, Vec<ErrorEntry>>,
}

impl ErrorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `element` with an empty list
    pub fn track(&mut self, element: NodeId) {
        if !self.lists.contains_key(&element) {
            self.order.push(element);
            self.lists.insert(element, Vec::new());
        }
    }

    /// Tracked elements in registration order
    pub fn tracked(&self) -> &[NodeId] {
        &self.order
    }

    pub fn entries(&self, element: NodeId) -> &[ErrorEntry] {
        self.lists
            .get(&element)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replace `validator_name`'s entries on `element` with one per subtype
    ///
    /// No subtypes means a single entry for the default (`""`) subtype.
    pub fn add(
        &mut self,
        element: NodeId,
        validator_name: &str,
        subtypes: &[String],
        registry: &ValidatorRegistry,
    ) {
        self.remove(element, validator_name);

        let default_subtype = [String::new()];
        let subtypes = if subtypes.is_empty() {
            &default_subtype[..]
        } else {
            subtypes
        };

        let list = self.list_mut(element);
        for subtype in subtypes {
            if list
                .iter()
                .any(|e| e.validator_name == validator_name && e.subtype == *subtype)
            {
                continue;
            }
            list.push(ErrorEntry {
                validator_name: validator_name.to_string(),
                subtype: subtype.clone(),
                message: registry.error_message(validator_name, subtype),
            });
        }
    }

    /// Drop every entry `validator_name` holds on `element`
    pub fn remove(&mut self, element: NodeId, validator_name: &str) {
        self.list_mut(element)
            .retain(|entry| entry.validator_name != validator_name);
    }

    /// Empty every list, keeping the elements tracked
    pub fn clear_all(&mut self) {
        for list in self.lists.values_mut() {
            list.clear();
        }
    }

    /// True if any tracked element has at least one entry
    pub fn has_errors(&self) -> bool {
        self.lists.values().any(|list| !list.is_empty())
    }

    /// Non-empty messages as displayed, after per-element overrides
    ///
    /// An override replaces the validator's messages as a whole, so it is
    /// shown once however many subtypes failed.
    pub fn displayed_messages(
        &self,
        element: NodeId,
        overrides: &SpecificErrorMessages,
    ) -> Vec<String> {
        let mut overridden: Vec<&str> = Vec::new();

        self.entries(element)
            .iter()
            .filter_map(|entry| match overrides.get(element, &entry.validator_name) {
                Some(_) if overridden.contains(&entry.validator_name.as_str()) => None,
                Some(message) => {
                    overridden.push(&entry.validator_name);
                    Some(message.to_string())
                }
                None => entry.message.clone(),
            })
            .filter(|message| !message.is_empty())
            .collect()
    }

    fn list_mut(&mut self, element: NodeId) -> &mut Vec<ErrorEntry> {
        self.track(element);
        self.lists.entry(element).or_default()
    }
}

/// Per-element replacement texts keyed by validator name
///
/// Only affects what is displayed and diffed; the stored entries and the
/// validity they represent are unchanged.
#[derive(Debug, Clone, Default)]
pub struct SpecificErrorMessages {
    by_element: HashMap<NodeId, HashMap<String, String>>,
}

impl SpecificErrorMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, element: NodeId, validator_name: impl Into<String>, message: impl Into<String>) {
        self.by_element
            .entry(element)
            .or_default()
            .insert(validator_name.into(), message.into());
    }

    pub fn get(&self, element: NodeId, validator_name: &str) -> Option<&str> {
        self.by_element
            .get(&element)
            .and_then(|messages| messages.get(validator_name))
            .map(String::as_str)
    }

    pub fn remove(&mut self, element: NodeId, validator_name: &str) -> Option<String> {
        self.by_element
            .get_mut(&element)
            .and_then(|messages| messages.remove(validator_name))
    }

    pub fn clear_element(&mut self, element: NodeId) {
        self.by_element.remove(&element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ErrorMessages, ValidatorDeclaration};
    use pretty_assertions::assert_eq;

    fn registry() -> ValidatorRegistry {
        let mut registry = ValidatorRegistry::new();
        registry
            .register(
                "len",
                ValidatorDeclaration::default().with_error_message(
                    ErrorMessages::new()
                        .with("short", "Too short")
                        .with("long", "Too long"),
                ),
            )
            .unwrap();
        registry
            .register("req", ValidatorDeclaration::default().with_error_message("Required"))
            .unwrap();
        registry
            .register("silent", ValidatorDeclaration::default())
            .unwrap();
        registry
    }

    #[test]
    fn test_add_replaces_same_validator_entries() {
        let registry = registry();
        let mut store = ErrorStore::new();
        let el = NodeId(0);

        store.add(el, "len", &["short".to_string()], &registry);
        store.add(el, "req", &[], &registry);
        store.add(el, "len", &["long".to_string()], &registry);
        store.add(el, "len", &["long".to_string()], &registry);

        let overrides = SpecificErrorMessages::new();
        assert_eq!(store.displayed_messages(el, &overrides), vec!["Required", "Too long"]);
        assert_eq!(store.entries(el).len(), 2);
    }

    #[test]
    fn test_subtypes_coexist_and_missing_messages_are_hidden() {
        let registry = registry();
        let mut store = ErrorStore::new();
        let el = NodeId(0);

        store.add(el, "len", &["short".to_string(), "long".to_string()], &registry);
        store.add(el, "silent", &[], &registry);

        let overrides = SpecificErrorMessages::new();
        assert_eq!(store.entries(el).len(), 3);
        assert_eq!(store.displayed_messages(el, &overrides), vec!["Too short", "Too long"]);
        assert!(store.has_errors());

        store.remove(el, "len");
        assert_eq!(store.entries(el)[0].validator_name, "silent");
        assert!(store.displayed_messages(el, &overrides).is_empty());
    }

    #[test]
    fn test_overrides_apply_at_display_time_only() {
        let registry = registry();
        let mut store = ErrorStore::new();
        let el = NodeId(4);
        store.add(el, "req", &[], &registry);

        let mut overrides = SpecificErrorMessages::new();
        overrides.set(el, "req", "Fill me in");

        assert_eq!(store.displayed_messages(el, &overrides), vec!["Fill me in"]);
        assert_eq!(store.entries(el)[0].message.as_deref(), Some("Required"));
        assert_eq!(store.displayed_messages(NodeId(5), &overrides), Vec::<String>::new());
    }

    #[test]
    fn test_override_shows_once_for_many_subtypes() {
        let registry = registry();
        let mut store = ErrorStore::new();
        let el = NodeId(0);
        store.add(el, "len", &["short".to_string(), "long".to_string()], &registry);
        store.add(el, "req", &[], &registry);

        let mut overrides = SpecificErrorMessages::new();
        overrides.set(el, "len", "Wrong length");

        assert_eq!(
            store.displayed_messages(el, &overrides),
            vec!["Wrong length", "Required"]
        );
    }

    #[test]
    fn test_clear_all_keeps_tracking() {
        let registry = registry();
        let mut store = ErrorStore::new();
        store.track(NodeId(2));
        store.add(NodeId(1), "req", &[], &registry);

        store.clear_all();

        assert_eq!(store.tracked(), &[NodeId(2), NodeId(1)]);
        assert!(!store.has_errors());
    }
}
