//! Resize session: routes surface-wide pointer events to resize contexts.
//!
//! At most one context drags at a time. The pointer-move listener exists
//! only while a drag is active; pointer-down, pointer-up and layout-change
//! listeners live as long as the session.

use crate::context::{CommitOutcome, ContextId, ContextState, HostConfig, ResizeContext, SkipReason};
use crate::input::SurfaceEvent;
use kurbo::Point;
use wr_core::config::ResizerOptions;
use wr_core::document::DocumentStore;
use wr_core::error::ResizeError;
use wr_core::events::{ListenerGuard, ListenerKind, SharedListeners};
use wr_core::surface::{ElementId, Surface};
use wr_overlay::hit::{find_handle, find_overlay_root};

pub struct ResizeSession {
    /// Attach order.
    contexts: Vec<ResizeContext>,
    active: Option<ContextId>,
    listeners: SharedListeners,
    global: Vec<ListenerGuard>,
    drag_listener: Option<ListenerGuard>,
    handle_search_depth: usize,
}

impl ResizeSession {
    pub fn new(listeners: SharedListeners) -> Self {
        Self::with_options(listeners, &ResizerOptions::default())
    }

    /// `options.handle_search_depth` bounds the hit-test walk.
    pub fn with_options(listeners: SharedListeners, options: &ResizerOptions) -> Self {
        let global = [
            ListenerKind::PointerDown,
            ListenerKind::PointerUp,
            ListenerKind::LayoutChange,
        ]
        .into_iter()
        .map(|kind| ListenerGuard::install(&listeners, kind))
        .collect();
        log::debug!("resize session listening");
        Self {
            contexts: Vec::new(),
            active: None,
            listeners,
            global,
            drag_listener: None,
            handle_search_depth: options.handle_search_depth,
        }
    }

    /// False once torn down.
    pub fn is_listening(&self) -> bool {
        !self.global.is_empty()
    }

    pub fn register(&mut self, context: ResizeContext) -> ContextId {
        let id = context.id();
        self.contexts.push(context);
        id
    }

    /// Create, attach and register a context for `wrapper`.
    pub fn attach_widget(
        &mut self,
        surface: &mut dyn Surface,
        wrapper: ElementId,
        options: ResizerOptions,
        host: HostConfig,
    ) -> Result<ContextId, ResizeError> {
        let mut context = ResizeContext::new(wrapper, options, host);
        context.attach(surface)?;
        Ok(self.register(context))
    }

    /// Destroy and forget a context. Unregistering the dragging context
    /// ends the drag without a commit.
    pub fn unregister(&mut self, surface: &mut dyn Surface, id: ContextId) -> bool {
        let Some(index) = self.contexts.iter().position(|c| c.id() == id) else {
            return false;
        };
        if self.active == Some(id) {
            self.end_drag();
        }
        let mut context = self.contexts.remove(index);
        context.destroy(surface);
        true
    }

    pub fn context(&self, id: ContextId) -> Option<&ResizeContext> {
        self.contexts.iter().find(|c| c.id() == id)
    }

    pub fn context_mut(&mut self, id: ContextId) -> Option<&mut ResizeContext> {
        self.contexts.iter_mut().find(|c| c.id() == id)
    }

    pub fn contexts(&self) -> impl Iterator<Item = &ResizeContext> {
        self.contexts.iter()
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn active_context(&self) -> Option<ContextId> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_listener.is_some()
    }

    /// Enable or disable one context. Disabling the dragging context ends
    /// the session's drag.
    pub fn set_enabled(&mut self, surface: &mut dyn Surface, id: ContextId, enabled: bool) -> bool {
        if !enabled && self.active == Some(id) {
            self.end_drag();
        }
        match self.context_mut(id) {
            Some(context) => {
                context.set_enabled(surface, enabled);
                true
            }
            None => false,
        }
    }

    /// Whether a guard for `kind` is currently installed.
    pub fn is_listening_for(&self, kind: ListenerKind) -> bool {
        self.global
            .iter()
            .chain(self.drag_listener.iter())
            .any(|guard| guard.kind() == kind)
    }

    /// Dispatch one event. Events without an installed listener are dropped.
    pub fn handle_event(
        &mut self,
        surface: &mut dyn Surface,
        document: &mut dyn DocumentStore,
        event: &SurfaceEvent,
    ) -> Result<(), ResizeError> {
        let kind = event.listener_kind();
        if !self.is_listening_for(kind) {
            log::trace!("dropped {kind:?} event, no listener installed");
            return Ok(());
        }
        match *event {
            SurfaceEvent::PointerDown { target, .. } => {
                self.pointer_down(surface, target)?;
            }
            SurfaceEvent::PointerMove { x, y } => self.pointer_move(surface, Point::new(x, y))?,
            SurfaceEvent::PointerUp { .. } => {
                self.pointer_up(surface, document)?;
            }
            SurfaceEvent::LayoutChanged => {
                self.layout_changed(surface);
            }
        }
        Ok(())
    }

    /// Start a drag when `target` is (inside) a handle of an enabled context.
    ///
    /// Returns whether a drag started. Ignored while another drag is active.
    pub fn pointer_down(
        &mut self,
        surface: &mut dyn Surface,
        target: ElementId,
    ) -> Result<bool, ResizeError> {
        if !self.is_listening() {
            return Ok(false);
        }
        if let Some(active) = self.active {
            log::debug!("pointer-down on {target:?} ignored, {active:?} is dragging");
            return Ok(false);
        }
        let Some(hit) = find_handle(surface, target, self.handle_search_depth) else {
            return Ok(false);
        };
        let Some(root) = find_overlay_root(surface, hit.element) else {
            return Ok(false);
        };
        let Some(context) = self
            .contexts
            .iter_mut()
            .find(|c| c.is_enabled() && c.overlay().is_some_and(|o| o.root == root))
        else {
            log::trace!("handle {:?} belongs to no enabled resizer", hit.element);
            return Ok(false);
        };

        match context.begin(surface, hit.element) {
            Ok(()) => {}
            Err(err @ ResizeError::InvalidGeometry { .. }) => {
                log::warn!("resize refused for {:?}: {err}", context.id());
                return Ok(false);
            }
            Err(err) => return Err(err),
        }
        let id = context.id();
        self.active = Some(id);
        let guard = ListenerGuard::install(&self.listeners, ListenerKind::PointerMove);
        self.drag_listener = Some(guard);
        log::debug!("drag started on {id:?} from {}", hit.position);
        Ok(true)
    }

    pub fn pointer_move(
        &mut self,
        surface: &mut dyn Surface,
        pointer: Point,
    ) -> Result<(), ResizeError> {
        if self.drag_listener.is_none() {
            return Ok(());
        }
        let Some(id) = self.active else {
            return Ok(());
        };
        match self.contexts.iter_mut().find(|c| c.id() == id) {
            Some(context) if context.state() == ContextState::Dragging => {
                context.update_size(surface, pointer)?;
            }
            _ => log::trace!("pointer-move for {id:?} which is no longer dragging"),
        }
        Ok(())
    }

    /// Commit the active drag. `None` when nothing was dragging.
    pub fn pointer_up(
        &mut self,
        surface: &mut dyn Surface,
        document: &mut dyn DocumentStore,
    ) -> Result<Option<CommitOutcome>, ResizeError> {
        let Some(id) = self.active else {
            return Ok(None);
        };
        self.drag_listener = None;
        let outcome = match self.contexts.iter_mut().find(|c| c.id() == id) {
            Some(context) => context.commit(surface, document),
            None => Ok(CommitOutcome::Skipped(SkipReason::NotDragging)),
        };
        self.active = None;
        log::debug!("drag on {id:?} ended: {outcome:?}");
        outcome.map(Some)
    }

    /// Redraw every context with a mounted overlay; returns how many redrew.
    pub fn layout_changed(&mut self, surface: &mut dyn Surface) -> usize {
        if !self.is_listening() {
            return 0;
        }
        let mut redrawn = 0;
        for context in &self.contexts {
            if context.redraw(surface) {
                redrawn += 1;
            }
        }
        log::trace!("layout change redrew {redrawn}/{} resizers", self.contexts.len());
        redrawn
    }

    /// Release every listener and destroy every context.
    pub fn teardown(&mut self, surface: &mut dyn Surface) {
        self.end_drag();
        self.global.clear();
        for mut context in self.contexts.drain(..) {
            context.destroy(surface);
        }
        log::debug!("resize session torn down");
    }

    /// Remove the move listener, then forget the active context.
    fn end_drag(&mut self) {
        self.drag_listener = None;
        self.active = None;
    }
}
