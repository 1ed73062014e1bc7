//! Error types for the widget resizer.
//!
//! - `ResizeError`: drag lifecycle failures (caller misuse and degenerate geometry)
//! - `DocumentError`: attribute store failures
//! - `ConfigError`: resizer option loading/validation
//!
//! A resize host that cannot be mapped back to a document node at commit
//! time is *not* an error; see `CommitOutcome` in `wr-editor`.

use crate::id::NodeId;
use crate::surface::ElementId;
use thiserror::Error;

/// Errors raised by the resize state, contexts, and the session manager.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResizeError {
    /// A handle label outside the four corner positions.
    #[error("unknown resize handle position `{0}`")]
    InvalidHandle(String),

    /// `begin`/`update_size` called on a context whose overlay was never built.
    #[error("resizer is not attached to a widget")]
    NotAttached,

    /// `attach` called twice without `destroy` in between.
    #[error("resizer is already attached to a widget")]
    AlreadyAttached,

    /// A drag-only operation called while idle.
    #[error("no resize drag in progress")]
    NotDragging,

    /// `begin` called while the context is already dragging.
    #[error("a resize drag is already in progress")]
    AlreadyDragging,

    /// The element passed to `begin` carries no handle marker.
    #[error("element {0:?} is not a resize handle")]
    NotAHandle(ElementId),

    /// Degenerate host geometry at drag start. The drag must not proceed.
    #[error("invalid resize geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// The attribute store rejected the committed width.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl ResizeError {
    /// Caller contract violations, as opposed to runtime conditions.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidHandle(_)
                | Self::NotAttached
                | Self::AlreadyAttached
                | Self::NotDragging
                | Self::AlreadyDragging
                | Self::NotAHandle(_)
        )
    }

    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

/// Errors raised by the document attribute store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("document node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("attribute name must not be empty")]
    EmptyAttributeName,
}

/// Errors raised while loading `ResizerOptions`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid resizer options JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid resizer option: {0}")]
    Invalid(String),
}
