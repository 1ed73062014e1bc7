//! Input abstraction layer.
//!
//! Normalizes the document-level events the resize session listens to into
//! a single `SurfaceEvent` enum. Coordinates are absolute surface pixels.

use wr_core::events::ListenerKind;
use wr_core::surface::ElementId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// Pointer pressed on `target`.
    PointerDown { target: ElementId, x: f64, y: f64 },

    PointerMove { x: f64, y: f64 },

    PointerUp { x: f64, y: f64 },

    /// The surface reflowed (window resize, content change).
    LayoutChanged,
}

impl SurfaceEvent {
    pub fn pointer_down(target: ElementId, x: f64, y: f64) -> Self {
        Self::PointerDown { target, x, y }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    /// The listener that must be installed for this event to be delivered.
    pub fn listener_kind(&self) -> ListenerKind {
        match self {
            Self::PointerDown { .. } => ListenerKind::PointerDown,
            Self::PointerMove { .. } => ListenerKind::PointerMove,
            Self::PointerUp { .. } => ListenerKind::PointerUp,
            Self::LayoutChanged => ListenerKind::LayoutChange,
        }
    }
}
