//! backtop Core Runtime
//!
//! This crate provides the foundational primitives the backtop widgets run on:
//!
//! - **Document**: A host element tree with class lists, inline styles, and scroll offsets
//! - **Event Dispatch**: Namespaced scroll/click handlers per target
//! - **State Machines**: Flat FSMs for widget visibility states
//!
//! # Example
//!
//! ```rust
//! use backtop_core::dom::{Document, ScrollTarget};
//!
//! let mut doc = Document::new();
//! let panel = doc.create_element("div");
//! doc.set_id(panel, "panel");
//! doc.append_child(doc.body(), panel).unwrap();
//!
//! doc.add_class(panel, "scrollable dark");
//! doc.set_scroll_top(ScrollTarget::Element(panel), 120.0);
//!
//! assert_eq!(doc.get_element_by_id("panel"), Some(panel));
//! assert!(doc.has_class(panel, "dark"));
//! assert_eq!(doc.scroll_top(ScrollTarget::Element(panel)), 120.0);
//! ```

pub mod dom;
pub mod error;
pub mod events;
pub mod fsm;

pub use dom::{Document, Node, NodeId, ScrollTarget};
pub use error::{CoreError, Result};
pub use events::{Event, EventDispatcher, EventTarget, EventType};
pub use fsm::{StateId, StateMachine, Transition};
