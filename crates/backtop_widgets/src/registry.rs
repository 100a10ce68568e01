//! Container registry
//!
//! Records which container already hosts a widget, so a second
//! construction against the same container becomes a no-op without having
//! to search the document. One registry lives next to each document since
//! node ids only mean something inside the document that issued them.

use backtop_core::NodeId;
use rustc_hash::FxHashMap;

use crate::widget::WidgetId;

/// Mapping from container node to the widget attached inside it
#[derive(Debug, Default)]
pub struct Registry {
    slots: FxHashMap<NodeId, WidgetId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `container` for `widget`. Fails if it is already claimed.
    pub fn claim(&mut self, container: NodeId, widget: WidgetId) -> bool {
        if self.slots.contains_key(&container) {
            return false;
        }
        self.slots.insert(container, widget);
        true
    }

    /// Release `container`, only if `widget` is the one holding it
    pub fn release(&mut self, container: NodeId, widget: &WidgetId) -> bool {
        if self.slots.get(&container) != Some(widget) {
            return false;
        }
        self.slots.remove(&container);
        true
    }

    pub fn is_claimed(&self, container: NodeId) -> bool {
        self.slots.contains_key(&container)
    }

    pub fn widget_for(&self, container: NodeId) -> Option<&WidgetId> {
        self.slots.get(&container)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
