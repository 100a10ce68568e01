//! Back-to-top configuration
//!
//! Every field has a default; supplied values (builder calls or keys of a
//! TOML table) are merged over them once, at construction. The widget never
//! writes back into its config, runtime changes live in widget state.
//!
//! ```toml
//! px_to_trigger = 400
//! theme = "rounded"
//! effect = "fade"
//! scroll_animation = 250
//! container = { element = "panel" }
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use backtop_animation::Easing;
use backtop_core::{NodeId, ScrollTarget};
use serde::{Deserialize, Serialize};

use crate::context::Host;
use crate::error::{Result, WidgetError};

/// Where the widget is attached and which region it scrolls
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    /// The whole page; the viewport is observed and scrolled
    #[default]
    Body,
    /// An attached element, by id attribute
    Element(String),
    /// An element handle from the same document
    #[serde(skip)]
    Node(NodeId),
}

/// Horizontal edge the button is anchored to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Float {
    Left,
    #[default]
    Right,
}

impl Float {
    pub fn as_css(&self) -> &'static str {
        match self {
            Float::Left => "left",
            Float::Right => "right",
        }
    }
}

/// Custom press action, replacing the default scroll to top
#[derive(Clone)]
pub struct ClickAction(Rc<dyn Fn(&mut Host, ScrollTarget)>);

impl ClickAction {
    pub fn new<F: Fn(&mut Host, ScrollTarget) + 'static>(action: F) -> Self {
        Self(Rc::new(action))
    }

    pub fn call(&self, host: &mut Host, target: ScrollTarget) {
        (self.0)(host, target)
    }
}

impl fmt::Debug for ClickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickAction(..)")
    }
}

/// Back-to-top configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackToTopConfig {
    /// Scroll offset (px) above which the button is shown
    pub px_to_trigger: f64,
    /// Master on/off switch
    pub enabled: bool,
    /// Show the button right after construction
    pub auto_open: bool,
    /// Theme identifier, see [`crate::classes::theme_class`]
    pub theme: String,
    /// Show/hide effect identifier
    pub effect: String,
    /// Button width (px)
    pub width: f32,
    /// Button height (px)
    pub height: f32,
    /// Distance from the bottom edge (px)
    pub bottom: f32,
    /// Distance from the anchored horizontal edge (px)
    pub right: f32,
    /// Anchored horizontal edge
    pub float: Float,
    pub z_index: i32,
    /// Icon color
    pub color: String,
    pub background_color: String,
    /// Classes of the inner glyph element
    pub icon: String,
    /// Scroll-to-top duration (ms); 0 jumps immediately
    pub scroll_animation: u32,
    /// Curve of the animated scroll
    pub easing: Easing,
    pub container: Container,
    #[serde(skip)]
    pub on_click: Option<ClickAction>,
}

impl Default for BackToTopConfig {
    fn default() -> Self {
        Self {
            px_to_trigger: 600.0,
            enabled: true,
            auto_open: false,
            theme: "default".to_string(),
            effect: "none".to_string(),
            width: 35.0,
            height: 35.0,
            bottom: 20.0,
            right: 20.0,
            float: Float::Right,
            z_index: 999,
            color: "#000".to_string(),
            background_color: "#ddd".to_string(),
            icon: "fas fa-chevron-up".to_string(),
            scroll_animation: 0,
            easing: Easing::Swing,
            container: Container::Body,
            on_click: None,
        }
    }
}

impl BackToTopConfig {
    /// Parse a TOML table; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| WidgetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Set the container
    pub fn container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    /// Attach inside the element with this id
    pub fn in_element(self, id: impl Into<String>) -> Self {
        self.container(Container::Element(id.into()))
    }

    /// Set the trigger offset
    pub fn px_to_trigger(mut self, px: f64) -> Self {
        self.px_to_trigger = px;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn auto_open(mut self, auto_open: bool) -> Self {
        self.auto_open = auto_open;
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = effect.into();
        self
    }

    /// Set width and height
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the bottom and horizontal offsets
    pub fn offset(mut self, bottom: f32, right: f32) -> Self {
        self.bottom = bottom;
        self.right = right;
        self
    }

    pub fn float(mut self, float: Float) -> Self {
        self.float = float;
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Animate the scroll to top over `ms` milliseconds (0 = instant)
    pub fn scroll_animation(mut self, ms: u32) -> Self {
        self.scroll_animation = ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Replace the default scroll-to-top press action
    pub fn on_click<F: Fn(&mut Host, ScrollTarget) + 'static>(mut self, action: F) -> Self {
        self.on_click = Some(ClickAction::new(action));
        self
    }
}
