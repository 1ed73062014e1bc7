//! Overlay rendering surface seam.
//!
//! The resizer never renders on its own: it creates and styles elements
//! through a `Surface` and reads back their rendered boxes. All calls are
//! synchronous. `MemorySurface` (see `tree`) is the in-process implementation.

use kurbo::Rect;
use std::fmt;

/// Handle to a rendered element, unique for the lifetime of its surface.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

/// Inline style properties the resizer writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProp {
    Width,
    Height,
    Left,
    Top,
    Display,
}

impl StyleProp {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Left => "left",
            Self::Top => "top",
            Self::Display => "display",
        }
    }
}

pub trait Surface {
    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Insert `child` as the last child of `parent`, moving it if already placed.
    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Remove `element` and its whole subtree. Unknown ids are ignored.
    fn remove_element(&mut self, element: ElementId);

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    /// Set (`Some`) or clear (`None`) an inline style property.
    fn set_style(&mut self, element: ElementId, prop: StyleProp, value: Option<&str>);

    fn style(&self, element: ElementId, prop: StyleProp) -> Option<String>;

    fn set_text(&mut self, element: ElementId, text: &str);

    /// The element's rendered box in absolute surface coordinates.
    /// `None` when the element is not rendered (detached or hidden).
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    /// Whether the element is part of the live tree.
    fn is_connected(&self, element: ElementId) -> bool;
}

/// Iterator over `element` and its ancestors, nearest first.
pub struct Ancestors<'a> {
    surface: &'a dyn Surface,
    next: Option<ElementId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let current = self.next?;
        self.next = self.surface.parent(current);
        Some(current)
    }
}

/// Walk from `element` (inclusive) up to the surface root.
pub fn ancestors(surface: &dyn Surface, element: ElementId) -> Ancestors<'_> {
    Ancestors {
        surface,
        next: Some(element),
    }
}
