//! Event dispatch system
//!
//! Scroll and click notifications delivered by the host to namespaced
//! handlers. Handlers receive a caller-chosen context `C` (the host state
//! they may mutate) alongside the event.

use rustc_hash::FxHashMap;

use crate::dom::{NodeId, ScrollTarget};

/// Event type identifier
pub type EventType = u32;

/// Event types understood by the dispatcher
pub mod event_types {
    use super::EventType;

    /// Press and release on the same element
    pub const CLICK: EventType = 9;
    pub const SCROLL: EventType = 30;
    /// Scroll animation reached its destination
    pub const SCROLL_END: EventType = 31;
}

/// Whether events of this type travel from a node up through its ancestors
pub fn bubbles(event_type: EventType) -> bool {
    event_type == event_types::CLICK
}

/// Where an event is delivered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Node(NodeId),
}

impl From<ScrollTarget> for EventTarget {
    fn from(target: ScrollTarget) -> Self {
        match target {
            ScrollTarget::Viewport => EventTarget::Window,
            ScrollTarget::Element(node) => EventTarget::Node(node),
        }
    }
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: EventTarget,
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
    pub default_prevented: bool,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer { x: f32, y: f32, button: u8 },
    Scroll { offset: f64 },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: EventTarget, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp: 0,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// A scroll notification carrying the offset at the time of scrolling
    pub fn scroll(target: ScrollTarget, offset: f64) -> Self {
        Self::new(
            event_types::SCROLL,
            target.into(),
            EventData::Scroll { offset },
        )
    }

    /// A primary-button click on an element
    pub fn click(node: NodeId) -> Self {
        Self::new(
            event_types::CLICK,
            EventTarget::Node(node),
            EventData::Pointer {
                x: 0.0,
                y: 0.0,
                button: 0,
            },
        )
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Suppress the host's default action for this event
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Event handler function type
pub type EventHandler<C> = Box<dyn FnMut(&mut C, &mut Event)>;

struct Binding<C> {
    namespace: String,
    handler: EventHandler<C>,
}

/// Dispatches events to registered handlers
pub struct EventDispatcher<C> {
    handlers: FxHashMap<(EventTarget, EventType), Vec<Binding<C>>>,
}

impl<C> EventDispatcher<C> {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register a handler for a target and event type under a namespace
    pub fn register<F>(
        &mut self,
        target: EventTarget,
        event_type: EventType,
        namespace: impl Into<String>,
        handler: F,
    ) where
        F: FnMut(&mut C, &mut Event) + 'static,
    {
        self.handlers
            .entry((target, event_type))
            .or_default()
            .push(Binding {
                namespace: namespace.into(),
                handler: Box::new(handler),
            });
    }

    /// Remove every handler bound under `namespace`, returning how many
    pub fn unregister_namespace(&mut self, namespace: &str) -> usize {
        let mut removed = 0;
        self.handlers.retain(|_, bindings| {
            let before = bindings.len();
            bindings.retain(|b| b.namespace != namespace);
            removed += before - bindings.len();
            !bindings.is_empty()
        });
        removed
    }

    pub fn has_handlers(&self, target: EventTarget, event_type: EventType) -> bool {
        self.handlers.contains_key(&(target, event_type))
    }

    /// Total number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Dispatch an event to the handlers bound at its own target, in
    /// registration order. Returns whether any handler ran.
    pub fn dispatch(&mut self, ctx: &mut C, event: &mut Event) -> bool {
        let target = event.target;
        self.dispatch_at(ctx, event, target)
    }

    /// Run the handlers bound at `target`, one stop on the event's
    /// propagation path. Stops early once propagation is stopped.
    pub fn dispatch_at(&mut self, ctx: &mut C, event: &mut Event, target: EventTarget) -> bool {
        let Some(bindings) = self.handlers.get_mut(&(target, event.event_type)) else {
            return false;
        };

        let mut ran = false;
        for binding in bindings.iter_mut() {
            if event.propagation_stopped {
                break;
            }
            (binding.handler)(ctx, event);
            ran = true;
        }
        ran
    }
}

impl<C> Default for EventDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}
