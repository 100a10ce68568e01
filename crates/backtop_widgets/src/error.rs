//! Widget error types

use std::path::PathBuf;

use backtop_core::{CoreError, NodeId};
use thiserror::Error;

/// Errors raised while configuring or attaching a widget
#[derive(Error, Debug)]
pub enum WidgetError {
    /// No attached element carries the configured container id
    #[error("Container element not found: #{0}")]
    ContainerNotFound(String),

    /// The container node was removed or never attached
    #[error("Container node is not attached to the document: {0:?}")]
    ContainerDetached(NodeId),

    /// Failed to read a config file
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for a widget
    #[error("Invalid widget config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("Failed to serialize widget config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Document operation failed
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;
