//! Widget identity

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the random suffix in generated ids
const SUFFIX_LEN: usize = 8;

/// Unique identifier of a widget instance
///
/// Used both as the element id in the document and as the namespace its
/// event handlers are bound under.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WidgetId(String);

impl WidgetId {
    /// Generate `<prefix>-<8 random alphanumerics>` from the given source
    pub fn generate<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> Self {
        let suffix: String = rng
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LEN)
            .map(char::from)
            .collect();
        Self(format!("{prefix}-{suffix}"))
    }

    /// Generate an id from the thread-local generator
    pub fn random(prefix: &str) -> Self {
        Self::generate(prefix, &mut rand::thread_rng())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Event namespace for handlers owned by this widget
    pub fn namespace(&self) -> String {
        format!("backtop.{}", self.0)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
