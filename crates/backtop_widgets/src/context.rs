//! Widget context
//!
//! Everything a widget needs from its host: the document it renders into,
//! the scroll animations in flight, the event handlers bound to scroll and
//! click notifications, and the container registry.
//!
//! Scroll changes made by handlers are not delivered re-entrantly. The
//! [`Host`] queues a `SCROLL` notification whenever an offset actually
//! changes, and the context delivers queued notifications after the current
//! dispatch returns, the way a browser fires scroll events after the
//! scroll position moved.

use std::collections::VecDeque;

use backtop_animation::AnimationScheduler;
use backtop_core::events::{self, event_types, Event, EventData, EventDispatcher, EventTarget};
use backtop_core::{Document, NodeId, ScrollTarget};

use crate::registry::Registry;

/// Upper bound on notifications delivered by one flush, so handlers that
/// keep scrolling each other cannot spin forever
const MAX_CASCADE: usize = 256;

/// Host state that event handlers may mutate
pub struct Host {
    pub document: Document,
    pub animations: AnimationScheduler<ScrollTarget>,
    pending: VecDeque<Event>,
}

impl Host {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            animations: AnimationScheduler::new(),
            pending: VecDeque::new(),
        }
    }

    /// Move a scroll offset and queue the matching `SCROLL` notification
    pub fn scroll_to(&mut self, target: ScrollTarget, offset: f64) {
        if self.document.set_scroll_top(target, offset) {
            let offset = self.document.scroll_top(target);
            self.pending.push_back(Event::scroll(target, offset));
        }
    }

    /// Queue an arbitrary notification for delivery after the current dispatch
    pub fn queue(&mut self, event: Event) {
        self.pending.push_back(event);
    }
}

/// The host context widgets are constructed in and driven by
pub struct WidgetContext {
    host: Host,
    events: EventDispatcher<Host>,
    registry: Registry,
    clock_ms: u64,
}

impl WidgetContext {
    /// Context over an empty document
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            host: Host::new(document),
            events: EventDispatcher::new(),
            registry: Registry::new(),
            clock_ms: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.host.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.host.document
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    pub fn events(&self) -> &EventDispatcher<Host> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventDispatcher<Host> {
        &mut self.events
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Milliseconds of frame time advanced so far
    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Whether any scroll animation is still running
    pub fn is_animating(&self) -> bool {
        self.host.animations.has_active_animations()
    }

    /// Scroll a target as the user would, delivering the `SCROLL` event
    pub fn scroll_to(&mut self, target: ScrollTarget, offset: f64) {
        self.host.scroll_to(target, offset);
        self.flush();
    }

    /// Click an element, returning the event after all handlers ran
    pub fn click(&mut self, node: NodeId) -> Event {
        self.dispatch(Event::click(node))
    }

    /// Deliver an event, then any notifications its handlers queued.
    /// Clicks bubble from the target node through its ancestors.
    pub fn dispatch(&mut self, mut event: Event) -> Event {
        event.timestamp = self.clock_ms;
        for target in self.propagation_path(&event) {
            if event.propagation_stopped {
                break;
            }
            self.events.dispatch_at(&mut self.host, &mut event, target);
        }
        self.flush();
        event
    }

    /// The target, then its ancestors for bubbling events. Collected before
    /// any handler runs, so handlers moving nodes do not change the path.
    fn propagation_path(&self, event: &Event) -> Vec<EventTarget> {
        let mut path = vec![event.target];
        let EventTarget::Node(node) = event.target else {
            return path;
        };
        if !events::bubbles(event.event_type) {
            return path;
        }

        let doc = &self.host.document;
        let mut current = doc.parent(node);
        while let Some(parent) = current {
            path.push(EventTarget::Node(parent));
            current = doc.parent(parent);
        }
        path
    }

    /// Advance the frame clock, stepping every scroll animation
    pub fn advance(&mut self, dt_ms: u32) {
        self.clock_ms += u64::from(dt_ms);

        for frame in self.host.animations.tick(dt_ms as f32) {
            self.host.scroll_to(frame.key, frame.value);
            if frame.finished {
                self.host.queue(Event::new(
                    event_types::SCROLL_END,
                    frame.key.into(),
                    EventData::Scroll { offset: frame.value },
                ));
            }
        }
        self.flush();
    }

    /// Deliver queued notifications in arrival order
    pub fn flush(&mut self) {
        let mut delivered = 0;
        while let Some(mut event) = self.host.pending.pop_front() {
            if delivered == MAX_CASCADE {
                tracing::warn!(
                    dropped = self.host.pending.len() + 1,
                    "scroll notification cascade limit reached"
                );
                self.host.pending.clear();
                break;
            }
            event.timestamp = self.clock_ms;
            self.events.dispatch(&mut self.host, &mut event);
            delivered += 1;
        }
    }
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self::new()
    }
}
