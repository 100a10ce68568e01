//! Host document model
//!
//! A minimal element tree that widgets render into. Every element carries
//! an ordered class list, ordered inline styles and its own scroll offset;
//! the viewport has a separate scroll offset for whole-page scrolling.
//!
//! Operations addressed at a node that does not exist are no-ops, reads
//! return empty values. Only structural changes (`append_child`) report
//! errors.

use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::{CoreError, Result};

new_key_type! {
    /// Unique identifier for an element in a [`Document`]
    pub struct NodeId;
}

/// Something that owns a scroll offset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollTarget {
    /// The window, scrolling the whole document
    Viewport,
    /// An element with its own scrollable overflow
    Element(NodeId),
}

/// A single element
#[derive(Clone, Debug)]
pub struct Node {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 6]>,
    style: IndexMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    scroll_top: f64,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: SmallVec::new(),
            style: IndexMap::new(),
            children: Vec::new(),
            parent: None,
            scroll_top: 0.0,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// The element tree plus viewport state
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    body: NodeId,
    viewport_scroll: f64,
}

impl Document {
    /// Create a document containing only an empty `<body>`
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(Node::new("body"));
        Self {
            nodes,
            body,
            viewport_scroll: 0.0,
        }
    }

    /// The root `<body>` element
    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Whether the node exists (attached or not)
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether the node is reachable from `<body>`
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == self.body {
                return true;
            }
            current = self.nodes.get(node_id).and_then(|n| n.parent);
        }
        false
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node::new(tag))
    }

    /// Set the element id attribute
    pub fn set_id(&mut self, node: NodeId, id: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.id = Some(id.into());
        }
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(CoreError::NodeNotFound(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(CoreError::NodeNotFound(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(CoreError::HierarchyRequest { parent, child });
        }

        self.detach(child);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Remove a node and its whole subtree. The body cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.body || !self.nodes.contains_key(node) {
            return false;
        }

        self.detach(node);
        for id in self.subtree(node) {
            self.nodes.remove(id);
        }
        true
    }

    /// Find an attached element by id attribute, in tree order
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.subtree(self.body)
            .into_iter()
            .find(|&node| self.nodes[node].id.as_deref() == Some(id))
    }

    /// All descendants of `node` in tree order (excluding `node`)
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut all = self.subtree(node);
        if !all.is_empty() {
            all.remove(0);
        }
        all
    }

    /// Children of a node (empty for unknown nodes)
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    // ========== Classes ==========

    /// Add one or more space-separated classes
    pub fn add_class(&mut self, node: NodeId, classes: &str) {
        let Some(n) = self.nodes.get_mut(node) else {
            return;
        };
        for class in classes.split_whitespace() {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    /// Remove one or more space-separated classes
    pub fn remove_class(&mut self, node: NodeId, classes: &str) {
        let Some(n) = self.nodes.get_mut(node) else {
            return;
        };
        for class in classes.split_whitespace() {
            n.classes.retain(|c| c != class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.nodes.get(node).map(|n| n.classes()).unwrap_or(&[])
    }

    /// The `class` attribute as a single string
    pub fn class_name(&self, node: NodeId) -> String {
        self.classes(node).join(" ")
    }

    /// All attached elements under `root` carrying `class`
    pub fn find_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&node| self.has_class(node, class))
            .collect()
    }

    // ========== Styles ==========

    pub fn set_style(&mut self, node: NodeId, property: &str, value: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.style.insert(property.to_string(), value.into());
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes.get(node).and_then(|n| n.style(property))
    }

    // ========== Scrolling ==========

    /// Current scroll offset (0 for unknown elements)
    pub fn scroll_top(&self, target: ScrollTarget) -> f64 {
        match target {
            ScrollTarget::Viewport => self.viewport_scroll,
            ScrollTarget::Element(node) => self.nodes.get(node).map_or(0.0, |n| n.scroll_top),
        }
    }

    /// Set the scroll offset, clamped at 0. Returns whether it changed.
    pub fn set_scroll_top(&mut self, target: ScrollTarget, offset: f64) -> bool {
        let offset = offset.max(0.0);
        let slot = match target {
            ScrollTarget::Viewport => &mut self.viewport_scroll,
            ScrollTarget::Element(node) => match self.nodes.get_mut(node) {
                Some(n) => &mut n.scroll_top,
                None => return false,
            },
        };

        if *slot == offset {
            return false;
        }
        *slot = offset;
        true
    }

    // ========== Internals ==========

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes.get_mut(node).and_then(|n| n.parent.take()) {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|&c| c != node);
            }
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// `node` followed by its descendants, pre-order
    fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.nodes.contains_key(node) {
            return out;
        }

        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(n) = self.nodes.get(id) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_panel() -> (Document, NodeId) {
        let mut doc = Document::new();
        let panel = doc.create_element("div");
        doc.set_id(panel, "panel");
        doc.append_child(doc.body(), panel).unwrap();
        (doc, panel)
    }

    #[test]
    fn test_append_child_is_last() {
        let (mut doc, panel) = doc_with_panel();
        let a = doc.create_element("p");
        let b = doc.create_element("p");
        doc.append_child(panel, a).unwrap();
        doc.append_child(panel, b).unwrap();

        assert_eq!(doc.children(panel), &[a, b]);
        assert_eq!(doc.parent(b), Some(panel));
    }

    #[test]
    fn test_append_moves_between_parents() {
        let (mut doc, panel) = doc_with_panel();
        let child = doc.create_element("span");
        doc.append_child(doc.body(), child).unwrap();
        doc.append_child(panel, child).unwrap();

        assert_eq!(doc.children(doc.body()), &[panel]);
        assert_eq!(doc.children(panel), &[child]);
    }

    #[test]
    fn test_append_into_own_subtree_fails() {
        let (mut doc, panel) = doc_with_panel();
        let inner = doc.create_element("div");
        doc.append_child(panel, inner).unwrap();

        assert_eq!(
            doc.append_child(inner, panel),
            Err(CoreError::HierarchyRequest {
                parent: inner,
                child: panel
            })
        );
    }

    #[test]
    fn test_get_element_by_id_ignores_detached() {
        let mut doc = Document::new();
        let loose = doc.create_element("div");
        doc.set_id(loose, "loose");

        assert_eq!(doc.get_element_by_id("loose"), None);
        doc.append_child(doc.body(), loose).unwrap();
        assert_eq!(doc.get_element_by_id("loose"), Some(loose));
    }

    #[test]
    fn test_class_list_space_separated() {
        let (mut doc, panel) = doc_with_panel();
        doc.add_class(panel, "a b  c");
        doc.add_class(panel, "b");
        assert_eq!(doc.class_name(panel), "a b c");

        doc.remove_class(panel, "a c missing");
        assert_eq!(doc.classes(panel), &["b".to_string()]);
        assert!(doc.has_class(panel, "b"));
        assert!(!doc.has_class(panel, "a"));
    }

    #[test]
    fn test_remove_drops_subtree() {
        let (mut doc, panel) = doc_with_panel();
        let child = doc.create_element("i");
        doc.append_child(panel, child).unwrap();

        assert!(doc.remove(panel));
        assert!(!doc.contains(panel));
        assert!(!doc.contains(child));
        assert!(doc.children(doc.body()).is_empty());
        assert!(!doc.remove(doc.body()));
    }

    #[test]
    fn test_scroll_offsets_clamped() {
        let (mut doc, panel) = doc_with_panel();
        assert!(doc.set_scroll_top(ScrollTarget::Element(panel), 250.0));
        assert!(!doc.set_scroll_top(ScrollTarget::Element(panel), 250.0));
        assert!(!doc.set_scroll_top(ScrollTarget::Viewport, -40.0));

        assert_eq!(doc.scroll_top(ScrollTarget::Element(panel)), 250.0);
        assert_eq!(doc.scroll_top(ScrollTarget::Viewport), 0.0);
    }

    #[test]
    fn test_unknown_nodes_are_noops() {
        let (mut doc, panel) = doc_with_panel();
        doc.remove(panel);

        doc.add_class(panel, "x");
        doc.set_style(panel, "width", "10px");
        assert!(doc.classes(panel).is_empty());
        assert_eq!(doc.style(panel, "width"), None);
        assert_eq!(doc.scroll_top(ScrollTarget::Element(panel)), 0.0);
        assert!(!doc.set_scroll_top(ScrollTarget::Element(panel), 5.0));
    }

    #[test]
    fn test_find_by_class() {
        let (mut doc, panel) = doc_with_panel();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        doc.add_class(a, "marker");
        doc.add_class(b, "marker");
        doc.append_child(panel, a).unwrap();
        doc.append_child(doc.body(), b).unwrap();

        assert_eq!(doc.find_by_class(panel, "marker"), vec![a]);
        assert_eq!(doc.find_by_class(doc.body(), "marker"), vec![a, b]);
    }
}
