//! backtop Widget Library
//!
//! The back-to-top button and the host context it runs in.
//!
//! ```rust
//! use backtop_widgets::{BackToTop, BackToTopConfig, WidgetContext};
//!
//! let mut ctx = WidgetContext::new();
//! let widget = BackToTop::new(&mut ctx, BackToTopConfig::default().effect("fade")).unwrap();
//!
//! ctx.scroll_to(widget.scroll_target(), 900.0);
//! assert!(widget.is_opened());
//!
//! ctx.click(widget.element().unwrap());
//! assert_eq!(ctx.document().scroll_top(widget.scroll_target()), 0.0);
//! assert!(!widget.is_opened());
//! ```

pub mod back_to_top;
pub mod classes;
pub mod config;
pub mod context;
pub mod error;
pub mod registry;
pub mod widget;

pub use back_to_top::{BackToTop, Positioning};
pub use config::{BackToTopConfig, ClickAction, Container, Float};
pub use context::{Host, WidgetContext};
pub use error::{Result, WidgetError};
pub use registry::Registry;
pub use widget::WidgetId;
