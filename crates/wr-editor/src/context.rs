//! Resize context: one per resizable widget.
//!
//! Owns the widget's overlay and drives a `ResizeStrategy` through the drag
//! life cycle:
//!
//! ```text
//! Detached ──attach──▶ Idle ──begin──▶ Dragging ──commit/cancel──▶ Idle
//!     ▲                  │                 │
//!     └─────destroy──────┴─────────────────┘
//! ```
//!
//! Which context may drag is decided by the session manager; a context only
//! guards its own transitions.

use crate::state::{ResizeState, ResizeStrategy};
use kurbo::{Point, Vec2};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use wr_core::config::ResizerOptions;
use wr_core::document::DocumentStore;
use wr_core::error::ResizeError;
use wr_core::geometry::HandlePosition;
use wr_core::id::NodeId;
use wr_core::length::{Length, LengthUnit, round2};
use wr_core::surface::{ElementId, StyleProp, Surface};
use wr_overlay::hit::handle_position;
use wr_overlay::overlay::{LabelPosition, Overlay, class};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u32);

impl ContextId {
    fn next() -> Self {
        static COUNTER: AtomicU32 = AtomicU32::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

pub type ResizeHostFn = Box<dyn Fn(&dyn Surface, ElementId) -> ElementId>;
pub type AspectRatioFn = Box<dyn Fn(&dyn Surface, ElementId) -> Option<f64>>;
pub type CenteredFn = Box<dyn Fn(&ResizeContext) -> bool>;

/// Widget-specific hooks supplied at attach time.
#[derive(Default)]
pub struct HostConfig {
    /// Element actually resized, given the wrapper. Default: the wrapper.
    resize_host: Option<ResizeHostFn>,
    /// Aspect ratio override, given the resize host. Default: its width/height.
    aspect_ratio: Option<AspectRatioFn>,
    /// Presentation hint only; never changes the size math.
    is_centered: Option<CenteredFn>,
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resize_host(
        mut self,
        f: impl Fn(&dyn Surface, ElementId) -> ElementId + 'static,
    ) -> Self {
        self.resize_host = Some(Box::new(f));
        self
    }

    pub fn with_aspect_ratio(
        mut self,
        f: impl Fn(&dyn Surface, ElementId) -> Option<f64> + 'static,
    ) -> Self {
        self.aspect_ratio = Some(Box::new(f));
        self
    }

    pub fn with_centered(mut self, f: impl Fn(&ResizeContext) -> bool + 'static) -> Self {
        self.is_centered = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConfig")
            .field("resize_host", &self.resize_host.is_some())
            .field("aspect_ratio", &self.aspect_ratio.is_some())
            .field("is_centered", &self.is_centered.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// No overlay (never attached, or destroyed).
    Detached,
    Idle,
    Dragging,
}

/// Host size as actually rendered after the last `update_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveSize {
    pub width: f64,
    pub height: f64,
    /// Width relative to the host's parent, when the parent has a width.
    pub width_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The wrapper no longer maps to a document node.
    MissingMapping,
    /// Nothing to commit: the context was idle or already destroyed.
    NotDragging,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Written { node: NodeId, value: Length },
    Skipped(SkipReason),
}

#[derive(Debug)]
struct Drag {
    handle: HandlePosition,
    host: ElementId,
    /// Inline styles of the host before the drag, restored on cancel.
    width_style: Option<String>,
    height_style: Option<String>,
    parent_width: Option<f64>,
    live: Option<LiveSize>,
}

pub struct ResizeContext {
    id: ContextId,
    wrapper: ElementId,
    options: ResizerOptions,
    host: HostConfig,
    strategy: Box<dyn ResizeStrategy>,
    overlay: Option<Overlay>,
    drag: Option<Drag>,
    enabled: bool,
}

impl fmt::Debug for ResizeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeContext")
            .field("id", &self.id)
            .field("wrapper", &self.wrapper)
            .field("state", &self.state())
            .field("enabled", &self.enabled)
            .field("host", &self.host)
            .finish()
    }
}

fn percent_of(width: f64, parent_width: f64) -> f64 {
    round2(width / parent_width * 100.0).min(100.0)
}

impl ResizeContext {
    pub fn new(wrapper: ElementId, options: ResizerOptions, host: HostConfig) -> Self {
        let strategy = Box::new(ResizeState::from_options(&options));
        Self::with_strategy(wrapper, options, host, strategy)
    }

    pub fn with_strategy(
        wrapper: ElementId,
        options: ResizerOptions,
        host: HostConfig,
        strategy: Box<dyn ResizeStrategy>,
    ) -> Self {
        Self {
            id: ContextId::next(),
            wrapper,
            options,
            host,
            strategy,
            overlay: None,
            drag: None,
            enabled: true,
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn wrapper(&self) -> ElementId {
        self.wrapper
    }

    pub fn options(&self) -> &ResizerOptions {
        &self.options
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn strategy(&self) -> &dyn ResizeStrategy {
        self.strategy.as_ref()
    }

    pub fn state(&self) -> ContextState {
        match (&self.overlay, &self.drag) {
            (_, Some(_)) => ContextState::Dragging,
            (Some(_), None) => ContextState::Idle,
            (None, None) => ContextState::Detached,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Handle being dragged, if any.
    pub fn active_handle(&self) -> Option<HandlePosition> {
        self.drag.as_ref().map(|d| d.handle)
    }

    pub fn live_size(&self) -> Option<LiveSize> {
        self.drag.as_ref().and_then(|d| d.live)
    }

    pub fn is_centered(&self) -> bool {
        self.host.is_centered.as_ref().is_some_and(|f| f(self))
    }

    pub fn resize_host(&self, surface: &dyn Surface) -> ElementId {
        match &self.host.resize_host {
            Some(f) => f(surface, self.wrapper),
            None => self.wrapper,
        }
    }

    /// Build the overlay and insert it as the wrapper's last child.
    pub fn attach(&mut self, surface: &mut dyn Surface) -> Result<(), ResizeError> {
        if self.overlay.is_some() {
            return Err(ResizeError::AlreadyAttached);
        }
        let overlay = Overlay::build(surface);
        overlay.mount(surface, self.wrapper);
        overlay.set_centered(surface, self.is_centered());
        overlay.set_visible(surface, self.enabled);
        surface.add_class(self.wrapper, class::HAS_RESIZER);
        self.overlay = Some(overlay);
        log::debug!("resizer {:?} attached to {:?}", self.id, self.wrapper);
        self.redraw(surface);
        Ok(())
    }

    /// Start dragging from the handle element `handle`.
    pub fn begin(
        &mut self,
        surface: &mut dyn Surface,
        handle: ElementId,
    ) -> Result<(), ResizeError> {
        let overlay = self.overlay.ok_or(ResizeError::NotAttached)?;
        if self.drag.is_some() {
            return Err(ResizeError::AlreadyDragging);
        }
        let position = handle_position(surface, handle).ok_or(ResizeError::NotAHandle(handle))?;

        let host = self.resize_host(surface);
        let host_rect = surface
            .bounding_rect(host)
            .ok_or_else(|| ResizeError::invalid_geometry("resize host is not rendered"))?;
        let ratio = self
            .host
            .aspect_ratio
            .as_ref()
            .and_then(|f| f(&*surface, host));
        let geometry = self.strategy.begin_drag(position, host_rect, ratio)?;

        let parent_width = surface
            .parent(host)
            .and_then(|parent| surface.bounding_rect(parent))
            .map(|rect| rect.width())
            .filter(|width| *width > 0.0);

        self.drag = Some(Drag {
            handle: position,
            host,
            width_style: surface.style(host, StyleProp::Width),
            height_style: surface.style(host, StyleProp::Height),
            parent_width,
            live: None,
        });
        overlay.set_active(surface, Some(position));
        overlay.hide_label(surface);
        surface.add_class(self.wrapper, class::RESIZING);

        log::debug!(
            "resizer {:?} begin {position} from {:?} ratio {:.3}",
            self.id,
            geometry.original_size,
            geometry.aspect_ratio
        );
        Ok(())
    }

    /// Apply the size proposed for `pointer` to the host and sync the overlay.
    ///
    /// The host is re-measured after the write: an external rule such as
    /// `max-width` may clamp the request, and the rendered size is what the
    /// overlay and label show.
    pub fn update_size(
        &mut self,
        surface: &mut dyn Surface,
        pointer: Point,
    ) -> Result<LiveSize, ResizeError> {
        let overlay = self.overlay.ok_or(ResizeError::NotAttached)?;
        let (handle, host, parent_width) = match &self.drag {
            Some(drag) => (drag.handle, drag.host, drag.parent_width),
            None => return Err(ResizeError::NotDragging),
        };

        let proposed = self.strategy.propose_size(pointer)?;
        let width = Length::px(proposed.width).to_string();
        let height = Length::px(proposed.height).to_string();
        surface.set_style(host, StyleProp::Width, Some(&width));
        surface.set_style(host, StyleProp::Height, Some(&height));

        let actual = surface
            .bounding_rect(host)
            .map(|rect| rect.size())
            .unwrap_or(proposed);
        let live = LiveSize {
            width: actual.width,
            height: actual.height,
            width_percent: parent_width.map(|pw| percent_of(actual.width, pw)),
        };
        if let Some(drag) = self.drag.as_mut() {
            drag.live = Some(live);
        }

        self.redraw(surface);
        let position = if self.is_centered() {
            LabelPosition::AboveCenter
        } else {
            LabelPosition::Handle(handle)
        };
        overlay.show_label(surface, &self.label_text(live), position);
        Ok(live)
    }

    /// Finish the drag and write the final width to the document.
    ///
    /// The visual state is cleaned up before the write. A wrapper that no
    /// longer maps to a node skips the write; so does an idle context.
    pub fn commit(
        &mut self,
        surface: &mut dyn Surface,
        document: &mut dyn DocumentStore,
    ) -> Result<CommitOutcome, ResizeError> {
        let Some(drag) = self.drag.take() else {
            log::debug!("resizer {:?} commit while idle, nothing to write", self.id);
            return Ok(CommitOutcome::Skipped(SkipReason::NotDragging));
        };

        let final_width = self
            .overlay
            .and_then(|overlay| surface.bounding_rect(overlay.root))
            .map(|rect| rect.width())
            .or(drag.live.map(|live| live.width))
            .or_else(|| self.strategy.geometry().map(|g| g.original_size.width))
            .unwrap_or_default();
        let value = self.committed_length(final_width, drag.parent_width);

        self.finish(surface, &drag, Some(value));

        let Some(node) = document.node_for_wrapper(self.wrapper) else {
            log::debug!(
                "resizer {:?} commit skipped: {:?} maps to no node",
                self.id,
                self.wrapper
            );
            return Ok(CommitOutcome::Skipped(SkipReason::MissingMapping));
        };
        document.set_attribute(node, &self.options.attribute, &value.to_string())?;
        log::debug!(
            "resizer {:?} commit {node} {}={value}",
            self.id,
            self.options.attribute
        );
        Ok(CommitOutcome::Written { node, value })
    }

    /// Abandon the drag, restoring the host's inline size. Never writes.
    pub fn cancel(&mut self, surface: &mut dyn Surface) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.finish(surface, &drag, None);
        log::debug!("resizer {:?} cancel", self.id);
    }

    /// Fit the overlay to the resize host's current box.
    ///
    /// Returns `false` (and does nothing) when there is no mounted overlay or
    /// either box is unavailable.
    pub fn redraw(&self, surface: &mut dyn Surface) -> bool {
        let Some(overlay) = self.overlay else {
            return false;
        };
        if !overlay.is_mounted(surface) {
            return false;
        }
        let host = self.resize_host(surface);
        let (Some(host_rect), Some(wrapper_rect)) =
            (surface.bounding_rect(host), surface.bounding_rect(self.wrapper))
        else {
            return false;
        };
        // An inner host (image inside a captioned figure) is outlined alone.
        let offset = if host == self.wrapper {
            Vec2::ZERO
        } else {
            host_rect.origin() - wrapper_rect.origin()
        };
        overlay.place(surface, offset, host_rect.size());
        true
    }

    /// Cancel any drag and remove the overlay. Safe on a widget that is
    /// already gone from the surface.
    pub fn destroy(&mut self, surface: &mut dyn Surface) {
        self.cancel(surface);
        if let Some(overlay) = self.overlay.take() {
            overlay.remove(surface);
            surface.remove_class(self.wrapper, class::HAS_RESIZER);
            log::debug!("resizer {:?} destroyed", self.id);
        }
    }

    /// Disabling hides the overlay and cancels a running drag.
    pub fn set_enabled(&mut self, surface: &mut dyn Surface, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.cancel(surface);
        }
        if let Some(overlay) = self.overlay {
            overlay.set_visible(surface, enabled);
        }
        if enabled {
            self.redraw(surface);
        }
    }

    fn committed_length(&self, width: f64, parent_width: Option<f64>) -> Length {
        match (self.options.unit, parent_width) {
            (LengthUnit::Percent, Some(parent_width)) => {
                Length::percent(percent_of(width, parent_width))
            }
            _ => Length::px(width.round()),
        }
    }

    fn label_text(&self, live: LiveSize) -> String {
        match (self.options.unit, live.width_percent) {
            (LengthUnit::Percent, Some(percent)) => Length::percent(percent).to_string(),
            _ => format!("{}×{}", live.width.round(), live.height.round()),
        }
    }

    /// Shared exit path of commit and cancel.
    fn finish(&mut self, surface: &mut dyn Surface, drag: &Drag, committed: Option<Length>) {
        if let Some(overlay) = self.overlay {
            overlay.set_active(surface, None);
            overlay.hide_label(surface);
        }
        surface.remove_class(self.wrapper, class::RESIZING);
        match committed {
            // Only the width is persisted; height follows the content.
            Some(value) => {
                surface.set_style(drag.host, StyleProp::Width, Some(&value.to_string()));
                surface.set_style(drag.host, StyleProp::Height, None);
            }
            None => {
                surface.set_style(drag.host, StyleProp::Width, drag.width_style.as_deref());
                surface.set_style(drag.host, StyleProp::Height, drag.height_style.as_deref());
            }
        }
        self.strategy.reset();
        self.redraw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size};
    use pretty_assertions::assert_eq;
    use wr_core::document::Document;
    use wr_core::tree::MemorySurface;

    struct Fixture {
        surface: MemorySurface,
        doc: Document,
        wrapper: ElementId,
        node: NodeId,
    }

    /// A 100×50 widget at the origin of an 800×600 surface, mapped to `name`.
    fn fixture(name: &str) -> Fixture {
        let mut surface = MemorySurface::new(Size::new(800.0, 600.0));
        let root = surface.root();
        let wrapper = surface.create_element("figure");
        surface.append_child(root, wrapper);
        surface.set_natural_rect(wrapper, Rect::new(0.0, 0.0, 100.0, 50.0));
        let node = NodeId::intern(name);
        let mut doc = Document::default();
        doc.insert_node(node);
        doc.bind_wrapper(wrapper, node);
        Fixture {
            surface,
            doc,
            wrapper,
            node,
        }
    }

    fn attached(f: &mut Fixture, options: ResizerOptions) -> ResizeContext {
        let mut ctx = ResizeContext::new(f.wrapper, options, HostConfig::new());
        ctx.attach(&mut f.surface).unwrap();
        ctx
    }

    fn handle(ctx: &ResizeContext, position: HandlePosition) -> ElementId {
        ctx.overlay().unwrap().handle(position)
    }

    #[test]
    fn attach_mounts_overlay_and_marks_wrapper() {
        let mut f = fixture("ctx_attach");
        let ctx = attached(&mut f, ResizerOptions::default());
        let overlay = *ctx.overlay().unwrap();
        assert_eq!(ctx.state(), ContextState::Idle);
        assert_eq!(f.surface.children(f.wrapper).last(), Some(&overlay.root));
        assert!(f.surface.has_class(f.wrapper, class::HAS_RESIZER));
        assert_eq!(
            f.surface.bounding_rect(overlay.root),
            Some(Rect::new(0.0, 0.0, 100.0, 50.0))
        );
    }

    #[test]
    fn attach_twice_is_a_usage_error() {
        let mut f = fixture("ctx_attach_twice");
        let mut ctx = attached(&mut f, ResizerOptions::default());
        assert_eq!(
            ctx.attach(&mut f.surface),
            Err(ResizeError::AlreadyAttached)
        );
        ctx.destroy(&mut f.surface);
        assert_eq!(ctx.attach(&mut f.surface), Ok(()));
    }

    #[test]
    fn begin_before_attach_is_a_usage_error() {
        let mut f = fixture("ctx_begin_early");
        let mut ctx = ResizeContext::new(f.wrapper, ResizerOptions::default(), HostConfig::new());
        let err = ctx.begin(&mut f.surface, f.wrapper).unwrap_err();
        assert_eq!(err, ResizeError::NotAttached);
        assert!(err.is_usage_error());
    }

    #[test]
    fn begin_requires_a_handle() {
        let mut f = fixture("ctx_not_handle");
        let mut ctx = attached(&mut f, ResizerOptions::default());
        let shadow = ctx.overlay().unwrap().shadow;
        assert_eq!(
            ctx.begin(&mut f.surface, shadow),
            Err(ResizeError::NotAHandle(shadow))
        );
        assert_eq!(ctx.state(), ContextState::Idle);
    }

    #[test]
    fn drag_and_commit_writes_width_once() {
        let mut f = fixture("ctx_commit");
        let mut ctx = attached(&mut f, ResizerOptions::default());
        let overlay = *ctx.overlay().unwrap();

        ctx.begin(&mut f.surface, handle(&ctx, HandlePosition::BottomRight))
            .unwrap();
        assert_eq!(ctx.state(), ContextState::Dragging);
        assert!(f.surface.has_class(overlay.shadow, class::SHADOW_ACTIVE));
        assert!(f.surface.has_class(f.wrapper, class::RESIZING));

        let live = ctx
            .update_size(&mut f.surface, Point::new(150.0, 75.0))
            .unwrap();
        assert_eq!((live.width, live.height), (150.0, 75.0));
        assert_eq!(f.surface.text(overlay.label), Some("150×75"));
        assert_eq!(
            f.surface.bounding_rect(overlay.root).map(|r| r.size()),
            Some(Size::new(150.0, 75.0))
        );
        assert_eq!(f.doc.revision(), 0, "no writes while dragging");

        let outcome = ctx.commit(&mut f.surface, &mut f.doc).unwrap();
        assert_eq!(
            outcome,
            CommitOutcome::Written {
                node: f.node,
                value: Length::px(150.0),
            }
        );
        assert_eq!(f.doc.attribute(f.node, "resizedWidth"), Some("150px"));
        assert_eq!(f.doc.revision(), 1);
        assert_eq!(ctx.state(), ContextState::Idle);
        assert!(!f.surface.has_class(overlay.shadow, class::SHADOW_ACTIVE));
        assert!(!f.surface.has_class(f.wrapper, class::RESIZING));
        assert_eq!(
            f.surface.style(overlay.label, StyleProp::Display).as_deref(),
            Some("none")
        );
        assert_eq!(
            f.surface.style(f.wrapper, StyleProp::Width).as_deref(),
            Some("150px")
        );
    }

    #[test]
    fn commit_without_mapping_cleans_up_without_writing() {
        let mut f = fixture("ctx_unmapped");
        let mut ctx = attached(&mut f, ResizerOptions::default());
        let overlay = *ctx.overlay().unwrap();
        ctx.begin(&mut f.surface, handle(&ctx, HandlePosition::BottomRight))
            .unwrap();
        ctx.update_size(&mut f.surface, Point::new(120.0, 60.0))
            .unwrap();

        // node deleted mid-drag
        f.doc.remove_node(f.node);
        let outcome = ctx.commit(&mut f.surface, &mut f.doc).unwrap();
        assert_eq!(outcome, CommitOutcome::Skipped(SkipReason::MissingMapping));
        assert_eq!(f.doc.revision(), 0);
        assert_eq!(ctx.state(), ContextState::Idle);
        assert!(!f.surface.has_class(overlay.shadow, class::SHADOW_ACTIVE));
    }

    #[test]
    fn cancel_restores_host_and_never_writes() {
        let mut f = fixture("ctx_cancel");
        f.surface
            .set_style(f.wrapper, StyleProp::Width, Some("100px"));
        let mut ctx = attached(&mut f, ResizerOptions::default());
        ctx.begin(&mut f.surface, handle(&ctx, HandlePosition::TopRight))
            .unwrap();
        ctx.update_size(&mut f.surface, Point::new(300.0, 0.0))
            .unwrap();
        assert_eq!(
            f.surface.style(f.wrapper, StyleProp::Width).as_deref(),
            Some("300px")
        );

        ctx.cancel(&mut f.surface);
        assert_eq!(ctx.state(), ContextState::Idle);
        assert_eq!(
            f.surface.style(f.wrapper, StyleProp::Width).as_deref(),
            Some("100px")
        );
        assert_eq!(f.surface.style(f.wrapper, StyleProp::Height), None);
        assert_eq!(f.doc.revision(), 0);
        assert!(ctx.strategy().geometry().is_none());
    }

    #[test]
    fn constrained_host_drives_overlay_and_label() {
        let mut f = fixture("ctx_max_width");
        f.surface.set_max_width(f.wrapper, Some(120.0));
        let mut ctx = attached(&mut f, ResizerOptions::default());
        let overlay = *ctx.overlay().unwrap();
        ctx.begin(&mut f.surface, handle(&ctx, HandlePosition::BottomRight))
            .unwrap();

        let live = ctx
            .update_size(&mut f.surface, Point::new(150.0, 75.0))
            .unwrap();
        assert_eq!((live.width, live.height), (120.0, 60.0));
        assert_eq!(f.surface.text(overlay.label), Some("120×60"));
        assert_eq!(
            f.surface.bounding_rect(overlay.root).map(|r| r.size()),
            Some(Size::new(120.0, 60.0))
        );

        let outcome = ctx.commit(&mut f.surface, &mut f.doc).unwrap();
        assert!(matches!(
            outcome,
            CommitOutcome::Written { value, .. } if value == Length::px(120.0)
        ));
    }

    #[test]
    fn percent_unit_commits_relative_width() {
        let mut f = fixture("ctx_percent");
        let options = ResizerOptions {
            unit: LengthUnit::Percent,
            ..ResizerOptions::default()
        };
        let mut ctx = attached(&mut f, options);
        let overlay = *ctx.overlay().unwrap();
        ctx.begin(&mut f.surface, handle(&ctx, HandlePosition::BottomRight))
            .unwrap();
        let live = ctx
            .update_size(&mut f.surface, Point::new(200.0, 100.0))
            .unwrap();
        assert_eq!(live.width_percent, Some(25.0));
        assert_eq!(f.surface.text(overlay.label), Some("25%"));

        ctx.commit(&mut f.surface, &mut f.doc).unwrap();
        assert_eq!(f.doc.attribute(f.node, "resizedWidth"), Some("25%"));
        // the committed percentage still renders at 200px
        assert_eq!(
            f.surface.bounding_rect(f.wrapper).map(|r| r.width()),
            Some(200.0)
        );
    }

    #[test]
    fn inner_host_overlay_is_offset() {
        let mut f = fixture("ctx_inner_host");
        f.surface
            .set_natural_rect(f.wrapper, Rect::new(0.0, 0.0, 300.0, 200.0));
        let img = f.surface.create_element("img");
        f.surface.append_child(f.wrapper, img);
        f.surface
            .set_natural_rect(img, Rect::new(50.0, 20.0, 150.0, 70.0));

        let host = HostConfig::new().with_resize_host(move |_, _| img);
        let mut ctx = ResizeContext::new(f.wrapper, ResizerOptions::default(), host);
        ctx.attach(&mut f.surface).unwrap();
        let overlay = *ctx.overlay().unwrap();

        assert_eq!(ctx.resize_host(&f.surface), img);
        assert_eq!(
            f.surface.bounding_rect(overlay.root),
            Some(Rect::new(50.0, 20.0, 150.0, 70.0))
        );
        assert_eq!(
            f.surface.style(overlay.root, StyleProp::Left).as_deref(),
            Some("50px")
        );
    }

    #[test]
    fn redraw_is_idempotent() {
        let mut f = fixture("ctx_redraw");
        let ctx = attached(&mut f, ResizerOptions::default());
        let overlay = *ctx.overlay().unwrap();
        assert!(ctx.redraw(&mut f.surface));
        let first = f.surface.bounding_rect(overlay.root);
        assert!(ctx.redraw(&mut f.surface));
        assert_eq!(f.surface.bounding_rect(overlay.root), first);
    }

    #[test]
    fn redraw_skips_unmounted_overlay() {
        let mut f = fixture("ctx_unmounted");
        f.surface.detach(f.wrapper);
        let ctx = attached(&mut f, ResizerOptions::default());
        assert!(!ctx.redraw(&mut f.surface));
        let never = ResizeContext::new(f.wrapper, ResizerOptions::default(), HostConfig::new());
        assert!(!never.redraw(&mut f.surface));
    }

    #[test]
    fn zero_height_host_refuses_drag() {
        let mut f = fixture("ctx_zero_height");
        f.surface
            .set_natural_rect(f.wrapper, Rect::new(0.0, 0.0, 100.0, 0.0));
        let mut ctx = attached(&mut f, ResizerOptions::default());
        let err = ctx
            .begin(&mut f.surface, handle(&ctx, HandlePosition::BottomRight))
            .unwrap_err();
        assert!(matches!(err, ResizeError::InvalidGeometry { .. }));
        assert_eq!(ctx.state(), ContextState::Idle);
        assert!(!f.surface.has_class(f.wrapper, class::RESIZING));
    }

    #[test]
    fn aspect_ratio_override_is_used() {
        let mut f = fixture("ctx_ratio");
        let host = HostConfig::new().with_aspect_ratio(|_, _| Some(4.0));
        let mut ctx = ResizeContext::new(f.wrapper, ResizerOptions::default(), host);
        ctx.attach(&mut f.surface).unwrap();
        ctx.begin(&mut f.surface, handle(&ctx, HandlePosition::BottomRight))
            .unwrap();
        let live = ctx
            .update_size(&mut f.surface, Point::new(200.0, 0.0))
            .unwrap();
        assert_eq!((live.width, live.height), (200.0, 50.0));
    }

    #[test]
    fn centered_widgets_label_above_center() {
        let mut f = fixture("ctx_centered");
        let host = HostConfig::new().with_centered(|_| true);
        let mut ctx = ResizeContext::new(f.wrapper, ResizerOptions::default(), host);
        ctx.attach(&mut f.surface).unwrap();
        let overlay = *ctx.overlay().unwrap();
        assert!(ctx.is_centered());
        assert!(f.surface.has_class(overlay.root, class::CENTERED));

        ctx.begin(&mut f.surface, handle(&ctx, HandlePosition::BottomRight))
            .unwrap();
        let live = ctx
            .update_size(&mut f.surface, Point::new(150.0, 75.0))
            .unwrap();
        // presentation only: geometry is the same as uncentered
        assert_eq!((live.width, live.height), (150.0, 75.0));
        assert!(f.surface.has_class(overlay.label, class::SIZE_ABOVE_CENTER));
    }

    #[test]
    fn destroy_mid_drag_is_safe() {
        let mut f = fixture("ctx_destroy");
        let mut ctx = attached(&mut f, ResizerOptions::default());
        let overlay = *ctx.overlay().unwrap();
        ctx.begin(&mut f.surface, handle(&ctx, HandlePosition::BottomLeft))
            .unwrap();
        ctx.update_size(&mut f.surface, Point::new(-50.0, 0.0))
            .unwrap();

        ctx.destroy(&mut f.surface);
        assert_eq!(ctx.state(), ContextState::Detached);
        assert!(!f.surface.contains(overlay.root));
        assert!(!f.surface.has_class(f.wrapper, class::HAS_RESIZER));
        assert_eq!(f.surface.style(f.wrapper, StyleProp::Width), None);

        assert_eq!(
            ctx.commit(&mut f.surface, &mut f.doc),
            Ok(CommitOutcome::Skipped(SkipReason::NotDragging))
        );
        ctx.cancel(&mut f.surface);
        assert_eq!(f.doc.revision(), 0);
    }

    #[test]
    fn destroy_after_widget_removed() {
        let mut f = fixture("ctx_widget_gone");
        let mut ctx = attached(&mut f, ResizerOptions::default());
        ctx.begin(&mut f.surface, handle(&ctx, HandlePosition::BottomRight))
            .unwrap();
        f.surface.remove_element(f.wrapper);
        f.doc.remove_node(f.node);

        assert_eq!(
            ctx.commit(&mut f.surface, &mut f.doc),
            Ok(CommitOutcome::Skipped(SkipReason::MissingMapping))
        );
        ctx.destroy(&mut f.surface);
        assert_eq!(ctx.state(), ContextState::Detached);
    }

    #[test]
    fn disabling_cancels_and_hides() {
        let mut f = fixture("ctx_disable");
        let mut ctx = attached(&mut f, ResizerOptions::default());
        let overlay = *ctx.overlay().unwrap();
        ctx.begin(&mut f.surface, handle(&ctx, HandlePosition::BottomRight))
            .unwrap();

        ctx.set_enabled(&mut f.surface, false);
        assert_eq!(ctx.state(), ContextState::Idle);
        assert_eq!(f.surface.bounding_rect(overlay.root), None);

        ctx.set_enabled(&mut f.surface, true);
        assert_eq!(
            f.surface.bounding_rect(overlay.root),
            Some(Rect::new(0.0, 0.0, 100.0, 50.0))
        );
    }
}
