// File: form-validator-core/src/document.rs
// Purpose: In-memory element tree implementing `Dom`, with a forgiving markup loader

use crate::dom::{Dom, NodeId};
use once_cell::sync::Lazy;
use regex::Regex;

// Opening or closing tag; quoted attribute values may contain `>`
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(/?)([A-Za-z][A-Za-z0-9-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#).unwrap()
});

static ATTRIBUTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s"'=<>/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    value: String,
    checked: bool,
}

/// Arena-backed element tree
///
/// Handles are indices into the arena and stay valid for the lifetime of the
/// document (elements are never removed).
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    roots: Vec<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from HTML-like markup
    ///
    /// Text content, comments and doctypes are ignored. Unclosed elements are
    /// closed at the end of input; stray closing tags are skipped. The `value`
    /// and `checked` attributes seed the initial control state.
    pub fn parse(markup: &str) -> Self {
        let mut document = Self::new();
        let mut open: Vec<NodeId> = Vec::new();

        for captures in TAG_REGEX.captures_iter(markup) {
            let is_closing = !captures[1].is_empty();
            let tag = captures[2].to_ascii_lowercase();

            if is_closing {
                if let Some(position) = open
                    .iter()
                    .rposition(|&node| document.elements[node.0].tag == tag)
                {
                    open.truncate(position);
                }
                continue;
            }

            let raw_attributes = captures[3].trim();
            let (raw_attributes, self_closing) = match raw_attributes.strip_suffix('/') {
                Some(rest) => (rest, true),
                None => (raw_attributes, false),
            };

            let node = document.create_element(&tag);
            for attribute in ATTRIBUTE_REGEX.captures_iter(raw_attributes) {
                let name = attribute[1].to_ascii_lowercase();
                let value = attribute
                    .get(2)
                    .or_else(|| attribute.get(3))
                    .or_else(|| attribute.get(4))
                    .map(|m| m.as_str())
                    .unwrap_or("");
                document.set_attribute(node, &name, value);
            }

            let element = &mut document.elements[node.0];
            if let Some((_, value)) = element.attributes.iter().find(|(k, _)| k == "value") {
                element.value = value.clone();
            }
            element.checked = element.attributes.iter().any(|(k, _)| k == "checked");

            if let Some(&parent) = open.last() {
                document.append_child(parent, node);
            }

            if !self_closing && !VOID_ELEMENTS.contains(&tag.as_str()) {
                open.push(node);
            }
        }

        document.settle_select_values();
        document
    }

    /// Create a detached element; it becomes a root until appended
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let node = NodeId(self.elements.len());
        self.elements.push(Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            parent: None,
            children: Vec::new(),
            value: String::new(),
            checked: false,
        });
        self.roots.push(node);
        node
    }

    /// Append `child` as the last child of `parent`
    ///
    /// Handles that do not belong to this document are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.element(parent).is_none() {
            return;
        }
        let Some(previous) = self.elements.get_mut(child.0).map(|e| e.parent.take()) else {
            return;
        };

        if let Some(previous) = previous {
            self.elements[previous.0].children.retain(|&c| c != child);
        }
        self.roots.retain(|&root| root != child);
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        if let Some(element) = self.elements.get_mut(node.0) {
            element.value = value.into();
        }
    }

    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(element) = self.elements.get_mut(node.0) {
            element.checked = checked;
        }
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0)
    }

    /// Top-level elements in document order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Every element with the given tag, in document order
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_ascii_lowercase();
        self.in_document_order()
            .into_iter()
            .filter(|&node| self.tag_name(node) == tag)
            .collect()
    }

    /// Every element whose `name` attribute equals `name`, in document order
    pub fn elements_by_name(&self, name: &str) -> Vec<NodeId> {
        self.in_document_order()
            .into_iter()
            .filter(|&node| self.attribute(node, "name").as_deref() == Some(name))
            .collect()
    }

    fn in_document_order(&self) -> Vec<NodeId> {
        let mut result = Vec::with_capacity(self.elements.len());
        for &root in &self.roots {
            result.push(root);
            result.extend(self.descendants(root));
        }
        result
    }

    // A select's value is its selected option's value, else the first option's
    fn settle_select_values(&mut self) {
        for select in self.elements_by_tag("select") {
            if self.has_attribute(select, "value") {
                continue;
            }

            let options: Vec<NodeId> = self
                .descendants(select)
                .into_iter()
                .filter(|&node| self.elements[node.0].tag == "option")
                .collect();

            let chosen = options
                .iter()
                .copied()
                .find(|&option| self.has_attribute(option, "selected"))
                .or_else(|| options.first().copied());

            if let Some(option) = chosen {
                let value = self.attribute(option, "value").unwrap_or_default();
                self.elements[select.0].value = value;
            }
        }
    }
}

// Unknown handles read as a bare element with no attributes, value or relatives
impl Dom for Document {
    fn tag_name(&self, node: NodeId) -> String {
        self.element(node).map(|e| e.tag.clone()).unwrap_or_default()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?
            .attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(element) = self.elements.get_mut(node.0) else {
            return;
        };
        match element
            .attributes
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => element.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.element(node).map(|e| e.children.clone()).unwrap_or_default()
    }

    fn value(&self, node: NodeId) -> String {
        self.element(node).map(|e| e.value.clone()).unwrap_or_default()
    }

    fn checked(&self, node: NodeId) -> bool {
        self.element(node).map_or(false, |e| e.checked)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.in_document_order()
            .into_iter()
            .find(|&node| self.attribute(node, "id").as_deref() == Some(id))
    }
}
