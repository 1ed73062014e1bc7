//! Hit testing: pointer-down target → resize handle → owning overlay.
//!
//! Walks ancestors nearest-first. Handles may contain decorative children,
//! so the pointer target itself is not required to be the handle.

use crate::overlay::class;
use wr_core::geometry::HandlePosition;
use wr_core::surface::{ElementId, Surface, ancestors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleHit {
    pub element: ElementId,
    pub position: HandlePosition,
}

/// Find the handle at or above `target`, looking at most `max_depth`
/// elements up (the target itself counts as the first).
pub fn find_handle(
    surface: &dyn Surface,
    target: ElementId,
    max_depth: usize,
) -> Option<HandleHit> {
    ancestors(surface, target)
        .take(max_depth)
        .find(|el| surface.has_class(*el, class::HANDLE))
        .and_then(|element| {
            handle_position(surface, element).map(|position| HandleHit { element, position })
        })
}

/// Corner label of a handle element, read from its position marker.
pub fn handle_position(surface: &dyn Surface, handle: ElementId) -> Option<HandlePosition> {
    HandlePosition::ALL
        .into_iter()
        .find(|position| surface.has_class(handle, class::handle(*position)))
}

/// Nearest overlay wrapper containing `element`.
pub fn find_overlay_root(surface: &dyn Surface, element: ElementId) -> Option<ElementId> {
    ancestors(surface, element).find(|el| surface.has_class(*el, class::RESIZER))
}
