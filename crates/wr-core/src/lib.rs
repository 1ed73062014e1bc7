pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod geometry;
pub mod id;
pub mod length;
pub mod surface;
pub mod tree;

pub use config::ResizerOptions;
pub use document::{AttributeStore, Document, DocumentStore, WidgetMapping};
pub use error::{ConfigError, DocumentError, ResizeError};
pub use events::{
    ListenerGuard, ListenerId, ListenerKind, ListenerRegistry, MemoryListeners, SharedListeners,
};
pub use geometry::{HandlePosition, absolute_corner, invert_position};
pub use id::{ClassName, NodeId};
pub use length::{Length, LengthUnit};
pub use surface::{ElementId, StyleProp, Surface};
pub use tree::MemorySurface;

// Re-export kurbo geometry so downstream crates share one set of primitives
pub use kurbo::{Point, Rect, Size, Vec2};
