// File: form-validator-core/src/dom.rs
// Purpose: Element capability the validator runs against

use std::fmt;

/// Opaque handle to an element owned by a [`Dom`] implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Minimal element tree capability
///
/// The validator never holds references into the tree; every operation takes
/// the `Dom` as an argument, so a browser binding and the in-memory
/// [`Document`](crate::Document) are interchangeable.
pub trait Dom {
    /// Lowercase tag name of the element
    fn tag_name(&self, node: NodeId) -> String;

    /// Attribute value, `None` if the attribute is absent
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Parent element, `None` at the root
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Child elements in document order
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Current control value (empty for non-controls)
    fn value(&self, node: NodeId) -> String;

    /// Current checkedness (false for non-checkable elements)
    fn checked(&self, node: NodeId) -> bool;

    /// Element whose `id` attribute equals `id`
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Nearest inclusive ancestor carrying `attribute`
    fn closest(&self, node: NodeId, attribute: &str) -> Option<NodeId> {
        let mut current = Some(node);

        while let Some(candidate) = current {
            if self.has_attribute(candidate, attribute) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }

        None
    }

    /// Top-most ancestor of `node`
    fn root_of(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Strict descendants of `node` in document (pre-)order
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).into_iter().rev().collect();

        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).into_iter().rev());
        }

        result
    }

    /// Descendants of `root` carrying `attribute`, in document order
    fn query_attribute(&self, root: NodeId, attribute: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&node| self.has_attribute(node, attribute))
            .collect()
    }
}

/// Control kinds the validators know how to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Text,
    Password,
    Tel,
    Checkbox,
    Radio,
    Textarea,
    Select,
}

impl ElementType {
    /// Classify an element, `None` if it is not a supported control
    ///
    /// An `<input>` without a `type` attribute is a text input.
    pub fn of(dom: &dyn Dom, node: NodeId) -> Option<Self> {
        match dom.tag_name(node).as_str() {
            "input" => {
                let input_type = dom
                    .attribute(node, "type")
                    .map(|t| t.to_ascii_lowercase())
                    .unwrap_or_else(|| "text".to_string());

                match input_type.as_str() {
                    "text" => Some(Self::Text),
                    "password" => Some(Self::Password),
                    "tel" => Some(Self::Tel),
                    "checkbox" => Some(Self::Checkbox),
                    "radio" => Some(Self::Radio),
                    _ => None,
                }
            }
            "textarea" => Some(Self::Textarea),
            "select" => Some(Self::Select),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Tel => "tel",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Textarea => "textarea",
            Self::Select => "select",
        }
    }

    /// Free-text controls whose value is typed by the user
    pub fn is_text_like(&self) -> bool {
        matches!(self, Self::Text | Self::Password | Self::Tel | Self::Textarea)
    }

    pub fn is_checkable(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable description of an element for error messages
pub fn describe_element(dom: &dyn Dom, node: NodeId) -> String {
    match (dom.tag_name(node).as_str(), dom.attribute(node, "type")) {
        ("input", Some(input_type)) => format!("input[type={}]", input_type),
        (tag, _) => tag.to_string(),
    }
}
