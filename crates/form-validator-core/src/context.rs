// File: form-validator-core/src/context.rs
// Purpose: Tree of validation contexts that own group-level errors

use crate::dom::{Dom, NodeId};
use std::collections::HashMap;

/// Accepts every validator name
pub const WILDCARD: &str = "*";

/// Index of a context inside its [`ContextTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(usize);

/// A scope element declaring which validators' context errors it collects
#[derive(Debug, Clone)]
pub struct Context {
    pub element: NodeId,
    pub parent: Option<ContextId>,
    pub accepted_validator_names: Vec<String>,
    pub children: Vec<ContextId>,
}

impl Context {
    pub fn accepts(&self, validator_name: &str) -> bool {
        self.accepted_validator_names
            .iter()
            .any(|name| name == validator_name || name == WILDCARD)
    }
}

/// Contexts discovered under a form, rooted at the form itself
#[derive(Debug, Clone)]
pub struct ContextTree {
    attribute: String,
    contexts: Vec<Context>,
    by_element: HashMap<NodeId, ContextId>,
}

impl ContextTree {
    /// Build the tree from every element under `root` carrying `attribute`
    ///
    /// `root` is always a context; a missing attribute on it counts as `*`.
    pub fn build(dom: &dyn Dom, root: NodeId, attribute: &str) -> Self {
        let mut tree = Self {
            attribute: attribute.to_string(),
            contexts: Vec::new(),
            by_element: HashMap::new(),
        };

        let declaration = dom
            .attribute(root, attribute)
            .unwrap_or_else(|| WILDCARD.to_string());
        let root_id = tree.push(root, None, &declaration);
        tree.collect_children(dom, root, root_id);

        tree
    }

    // Walk down from `element`, attaching the nearest context-declaring
    // descendants of each branch to `parent`
    fn collect_children(&mut self, dom: &dyn Dom, element: NodeId, parent: ContextId) {
        for child in dom.children(element) {
            match dom.attribute(child, &self.attribute) {
                Some(declaration) => {
                    let id = self.push(child, Some(parent), &declaration);
                    self.contexts[parent.0].children.push(id);
                    self.collect_children(dom, child, id);
                }
                None => self.collect_children(dom, child, parent),
            }
        }
    }

    fn push(&mut self, element: NodeId, parent: Option<ContextId>, declaration: &str) -> ContextId {
        let id = ContextId(self.contexts.len());
        self.contexts.push(Context {
            element,
            parent,
            accepted_validator_names: parse_context_declaration(declaration),
            children: Vec::new(),
        });
        self.by_element.insert(element, id);
        id
    }

    pub fn root(&self) -> ContextId {
        ContextId(0)
    }

    pub fn get(&self, id: ContextId) -> &Context {
        &self.contexts[id.0]
    }

    pub fn element(&self, id: ContextId) -> NodeId {
        self.contexts[id.0].element
    }

    pub fn context_of_element(&self, element: NodeId) -> Option<ContextId> {
        self.by_element.get(&element).copied()
    }

    /// Context elements in pre-order, root first
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.contexts.iter().map(|context| context.element)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Context owning `validator_name`'s context errors for `target`
    ///
    /// Starts at the nearest enclosing context and walks up to the first one
    /// accepting the name. Falls back to the root, which accepts everything.
    pub fn resolve(&self, dom: &dyn Dom, target: NodeId, validator_name: &str) -> ContextId {
        let mut current = self.nearest(dom, target);

        while let Some(id) = current {
            let context = &self.contexts[id.0];
            if context.accepts(validator_name) {
                return id;
            }
            current = context.parent;
        }

        self.root()
    }

    fn nearest(&self, dom: &dyn Dom, target: NodeId) -> Option<ContextId> {
        let mut element = Some(target);

        while let Some(candidate) = element {
            if let Some(id) = self.context_of_element(candidate) {
                return Some(id);
            }
            element = dom.parent(candidate);
        }

        None
    }
}

/// Comma-separated, trimmed, non-empty validator names
pub fn parse_context_declaration(declaration: &str) -> Vec<String> {
    declaration
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
