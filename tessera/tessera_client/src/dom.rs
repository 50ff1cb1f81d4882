//! Document abstraction.
//!
//! The renderer only needs a handful of node operations, addressed by
//! instance id, plus access to the stylesheet links of the document head.

use parking_lot::Mutex;
use std::collections::HashMap;

use tessera_core::InstanceId;

/// The document the renderer inserts components into.
pub trait Dom: Send + Sync {
    /// Bind a node to an instance id, creating it if needed.
    fn ensure_node(&self, id: InstanceId);

    /// Hide a node.
    fn hide(&self, id: InstanceId);

    /// Show a node.
    fn show(&self, id: InstanceId);

    /// Replace the markup of a node.
    fn set_html(&self, id: InstanceId, html: &str);

    /// Replace the class attribute of a node.
    fn set_class(&self, id: InstanceId, class: &str);

    /// Whether the head links a stylesheet.
    fn has_stylesheet(&self, url: &str) -> bool;

    /// Link a stylesheet in the head.
    fn append_stylesheet(&self, url: &str);
}

/// The state of one node of a [`MemoryDom`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSnapshot {
    /// Markup of the node.
    pub html: String,

    /// Class attribute of the node.
    pub class: String,

    /// Whether the node is shown.
    pub visible: bool,
}

impl NodeSnapshot {
    /// Whether the class attribute carries a token.
    pub fn has_class(&self, token: &str) -> bool {
        self.class.split_whitespace().any(|c| c == token)
    }
}

#[derive(Debug, Default)]
struct DocumentState {
    nodes: HashMap<InstanceId, NodeSnapshot>,
    stylesheets: Vec<String>,
    reveals: Vec<InstanceId>,
}

/// An in-memory document for headless rendering and tests.
#[derive(Debug, Default)]
pub struct MemoryDom {
    state: Mutex<DocumentState>,
}

impl MemoryDom {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The state of a node.
    pub fn node(&self, id: InstanceId) -> Option<NodeSnapshot> {
        self.state.lock().nodes.get(&id).cloned()
    }

    /// The linked stylesheets, in insertion order.
    pub fn stylesheets(&self) -> Vec<String> {
        self.state.lock().stylesheets.clone()
    }

    /// How many times a node has been shown.
    pub fn reveal_count(&self, id: InstanceId) -> usize {
        self.state.lock().reveals.iter().filter(|r| **r == id).count()
    }

    fn with_node(&self, id: InstanceId, f: impl FnOnce(&mut NodeSnapshot)) {
        let mut state = self.state.lock();
        f(state.nodes.entry(id).or_default());
    }
}

impl Dom for MemoryDom {
    fn ensure_node(&self, id: InstanceId) {
        self.with_node(id, |_| {});
    }

    fn hide(&self, id: InstanceId) {
        self.with_node(id, |node| node.visible = false);
    }

    fn show(&self, id: InstanceId) {
        let mut state = self.state.lock();
        state.nodes.entry(id).or_default().visible = true;
        state.reveals.push(id);
    }

    fn set_html(&self, id: InstanceId, html: &str) {
        self.with_node(id, |node| node.html = html.to_string());
    }

    fn set_class(&self, id: InstanceId, class: &str) {
        self.with_node(id, |node| node.class = class.to_string());
    }

    fn has_stylesheet(&self, url: &str) -> bool {
        self.state.lock().stylesheets.iter().any(|s| s == url)
    }

    fn append_stylesheet(&self, url: &str) {
        self.state.lock().stylesheets.push(url.to_string());
    }
}
