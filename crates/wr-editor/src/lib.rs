pub mod context;
pub mod input;
pub mod session;
pub mod state;

pub use context::{
    CommitOutcome, ContextId, ContextState, HostConfig, LiveSize, ResizeContext, SkipReason,
};
pub use input::SurfaceEvent;
pub use session::ResizeSession;
pub use state::{ReferenceGeometry, ResizeState, ResizeStrategy};
