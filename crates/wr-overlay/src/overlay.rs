//! Resizer overlay markup.
//!
//! Structure, inserted as the last child of the widget wrapper:
//!
//! ```text
//! div.widget-resizer                      (positioned over the resize host)
//! ├── div.widget-resizer__shadow          (live outline while dragging)
//! ├── div.widget-resizer__handle.widget-resizer__handle-top-left
//! ├── div.widget-resizer__handle.widget-resizer__handle-top-right
//! ├── div.widget-resizer__handle.widget-resizer__handle-bottom-right
//! ├── div.widget-resizer__handle.widget-resizer__handle-bottom-left
//! └── div.widget-resizer__size            (live size label)
//! ```

use kurbo::{Size, Vec2};
use wr_core::geometry::HandlePosition;
use wr_core::length::Length;
use wr_core::surface::{ElementId, StyleProp, Surface};

/// Class markers written into the surface.
pub mod class {
    use wr_core::geometry::HandlePosition;

    pub const RESIZER: &str = "widget-resizer";
    pub const SHADOW: &str = "widget-resizer__shadow";
    pub const SHADOW_ACTIVE: &str = "widget-resizer__shadow--active";
    pub const HANDLE: &str = "widget-resizer__handle";
    pub const SIZE_LABEL: &str = "widget-resizer__size";
    pub const SIZE_ABOVE_CENTER: &str = "widget-resizer__size--above-center";
    pub const CENTERED: &str = "widget-resizer--centered";
    /// On the widget wrapper while an overlay is attached.
    pub const HAS_RESIZER: &str = "widget--has-resizer";
    /// On the widget wrapper while a drag is in progress.
    pub const RESIZING: &str = "widget--resizing";

    pub fn handle(position: HandlePosition) -> &'static str {
        match position {
            HandlePosition::TopLeft => "widget-resizer__handle-top-left",
            HandlePosition::TopRight => "widget-resizer__handle-top-right",
            HandlePosition::BottomRight => "widget-resizer__handle-bottom-right",
            HandlePosition::BottomLeft => "widget-resizer__handle-bottom-left",
        }
    }

    /// Shadow marker naming the dragged corner (drives the cursor style).
    pub fn shadow_handle(position: HandlePosition) -> &'static str {
        match position {
            HandlePosition::TopLeft => "widget-resizer__shadow--top-left",
            HandlePosition::TopRight => "widget-resizer__shadow--top-right",
            HandlePosition::BottomRight => "widget-resizer__shadow--bottom-right",
            HandlePosition::BottomLeft => "widget-resizer__shadow--bottom-left",
        }
    }

    pub fn size_at(position: HandlePosition) -> &'static str {
        match position {
            HandlePosition::TopLeft => "widget-resizer__size--top-left",
            HandlePosition::TopRight => "widget-resizer__size--top-right",
            HandlePosition::BottomRight => "widget-resizer__size--bottom-right",
            HandlePosition::BottomLeft => "widget-resizer__size--bottom-left",
        }
    }
}

/// Where the size label is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    /// Next to the dragged handle.
    Handle(HandlePosition),
    /// Above the host's horizontal center (centered widgets).
    AboveCenter,
}

/// Element handles of one resizer overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub root: ElementId,
    pub shadow: ElementId,
    /// Indexed by `HandlePosition::index()`.
    pub handles: [ElementId; 4],
    pub label: ElementId,
}

impl Overlay {
    /// Create the overlay subtree, detached.
    pub fn build(surface: &mut dyn Surface) -> Self {
        let root = surface.create_element("div");
        surface.add_class(root, class::RESIZER);

        let shadow = surface.create_element("div");
        surface.add_class(shadow, class::SHADOW);
        surface.append_child(root, shadow);

        let handles = HandlePosition::ALL.map(|position| {
            let handle = surface.create_element("div");
            surface.add_class(handle, class::HANDLE);
            surface.add_class(handle, class::handle(position));
            surface.append_child(root, handle);
            handle
        });

        let label = surface.create_element("div");
        surface.add_class(label, class::SIZE_LABEL);
        surface.set_style(label, StyleProp::Display, Some("none"));
        surface.append_child(root, label);

        Self {
            root,
            shadow,
            handles,
            label,
        }
    }

    /// Insert as the last child of `wrapper`.
    pub fn mount(&self, surface: &mut dyn Surface, wrapper: ElementId) {
        surface.append_child(wrapper, self.root);
    }

    /// Remove the whole subtree from the surface.
    pub fn remove(&self, surface: &mut dyn Surface) {
        surface.remove_element(self.root);
    }

    pub fn is_mounted(&self, surface: &dyn Surface) -> bool {
        surface.is_connected(self.root)
    }

    pub fn handle(&self, position: HandlePosition) -> ElementId {
        self.handles[position.index()]
    }

    /// Cover a box of `size` placed `offset` from the wrapper's origin.
    pub fn place(&self, surface: &mut dyn Surface, offset: Vec2, size: Size) {
        for (prop, value) in [
            (StyleProp::Left, offset.x),
            (StyleProp::Top, offset.y),
            (StyleProp::Width, size.width),
            (StyleProp::Height, size.height),
        ] {
            let value = Length::px(value).to_string();
            surface.set_style(self.root, prop, Some(&value));
        }
        log::trace!("overlay {:?} placed at {offset:?} size {size:?}", self.root);
    }

    pub fn set_visible(&self, surface: &mut dyn Surface, visible: bool) {
        let display = if visible { None } else { Some("none") };
        surface.set_style(self.root, StyleProp::Display, display);
    }

    pub fn set_centered(&self, surface: &mut dyn Surface, centered: bool) {
        if centered {
            surface.add_class(self.root, class::CENTERED);
        } else {
            surface.remove_class(self.root, class::CENTERED);
        }
    }

    /// Mark the shadow as dragging from `handle`, or clear it with `None`.
    pub fn set_active(&self, surface: &mut dyn Surface, handle: Option<HandlePosition>) {
        for position in HandlePosition::ALL {
            surface.remove_class(self.shadow, class::shadow_handle(position));
        }
        match handle {
            Some(position) => {
                surface.add_class(self.shadow, class::SHADOW_ACTIVE);
                surface.add_class(self.shadow, class::shadow_handle(position));
            }
            None => surface.remove_class(self.shadow, class::SHADOW_ACTIVE),
        }
    }

    pub fn show_label(&self, surface: &mut dyn Surface, text: &str, position: LabelPosition) {
        self.clear_label_position(surface);
        match position {
            LabelPosition::Handle(handle) => surface.add_class(self.label, class::size_at(handle)),
            LabelPosition::AboveCenter => surface.add_class(self.label, class::SIZE_ABOVE_CENTER),
        }
        surface.set_text(self.label, text);
        surface.set_style(self.label, StyleProp::Display, None);
    }

    /// Hide the label and drop its stale text.
    pub fn hide_label(&self, surface: &mut dyn Surface) {
        self.clear_label_position(surface);
        surface.set_text(self.label, "");
        surface.set_style(self.label, StyleProp::Display, Some("none"));
    }

    fn clear_label_position(&self, surface: &mut dyn Surface) {
        surface.remove_class(self.label, class::SIZE_ABOVE_CENTER);
        for handle in HandlePosition::ALL {
            surface.remove_class(self.label, class::size_at(handle));
        }
    }
}
