//! Global (document-level) listener subscriptions.
//!
//! The session manager listens for pointer and layout events on the whole
//! editing surface. Each subscription is held as a `ListenerGuard`: dropping
//! the guard releases the listener, so teardown happens on every exit path.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerDown,
    PointerMove,
    PointerUp,
    LayoutChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Where global listeners are installed (the document, in a browser host).
pub trait ListenerRegistry {
    fn listen(&mut self, kind: ListenerKind) -> ListenerId;
    fn unlisten(&mut self, id: ListenerId);
}

/// Shared handle to a registry. The UI thread is the only user.
pub type SharedListeners = Rc<RefCell<dyn ListenerRegistry>>;

/// Releases its listener when dropped.
#[must_use = "dropping the guard removes the listener immediately"]
pub struct ListenerGuard {
    id: ListenerId,
    kind: ListenerKind,
    registry: Weak<RefCell<dyn ListenerRegistry>>,
}

impl ListenerGuard {
    pub fn install(registry: &SharedListeners, kind: ListenerKind) -> Self {
        let id = registry.borrow_mut().listen(kind);
        log::trace!("listen {kind:?} as {id:?}");
        Self {
            id,
            kind,
            registry: Rc::downgrade(registry),
        }
    }

    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // Registry already gone: nothing left to unsubscribe from.
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        match registry.try_borrow_mut() {
            Ok(mut registry) => {
                registry.unlisten(self.id);
                log::trace!("unlisten {:?} ({:?})", self.kind, self.id);
            }
            Err(_) => log::warn!(
                "listener registry busy, {:?} listener {:?} leaked",
                self.kind,
                self.id
            ),
        }
    }
}

/// In-memory registry that tracks which listeners are live.
#[derive(Debug, Default)]
pub struct MemoryListeners {
    next_id: u64,
    active: HashMap<ListenerId, ListenerKind>,
    installed: u64,
}

impl MemoryListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live listeners of `kind`.
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.active.values().filter(|k| **k == kind).count()
    }

    /// Live listeners of any kind.
    pub fn total(&self) -> usize {
        self.active.len()
    }

    /// Listeners ever installed.
    pub fn installed(&self) -> u64 {
        self.installed
    }
}

impl ListenerRegistry for MemoryListeners {
    fn listen(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.installed += 1;
        self.active.insert(id, kind);
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.active.remove(&id);
    }
}
