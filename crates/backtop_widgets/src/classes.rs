//! CSS class contract
//!
//! The class names the widget puts on its element. They are the binding
//! contract with the companion stylesheet and must match it exactly:
//!
//! - marker: `jquery-back-to-top`
//! - theme: `jquery-back-to-top-theme-<theme>`
//! - effect: `jquery-back-to-top-status-{on|off} jquery-back-to-top-effect-<effect>-{on|off}`

/// Prefix shared by every class the widget emits
pub const CLASS_PREFIX: &str = "jquery-back-to-top";

/// Neutral "shown" marker, used alone when showing without an effect
pub const STATUS_ON: &str = "jquery-back-to-top-status-on";

/// Neutral "hidden" marker, used alone when hiding without an effect
pub const STATUS_OFF: &str = "jquery-back-to-top-status-off";

/// Theme class for a theme identifier. Any identifier is accepted; ones
/// the stylesheet does not know simply stay unstyled.
pub fn theme_class(theme: &str) -> String {
    format!("{CLASS_PREFIX}-theme-{}", class_token(theme))
}

/// The "on"/"off" class bundles of an effect
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectClasses {
    pub on: String,
    pub off: String,
}

impl EffectClasses {
    pub fn for_effect(effect: &str) -> Self {
        let effect = class_token(effect);
        Self {
            on: format!("{STATUS_ON} {CLASS_PREFIX}-effect-{effect}-on"),
            off: format!("{STATUS_OFF} {CLASS_PREFIX}-effect-{effect}-off"),
        }
    }

    /// Both bundles, for removal
    pub fn all(&self) -> String {
        format!("{} {}", self.on, self.off)
    }

    pub fn is_empty(&self) -> bool {
        self.on.is_empty() && self.off.is_empty()
    }
}

/// Collapse an identifier into a single class-name token
fn class_token(identifier: &str) -> String {
    identifier.split_whitespace().collect::<Vec<_>>().join("-")
}
