pub mod hit;
pub mod overlay;

pub use hit::{HandleHit, find_handle, find_overlay_root, handle_position};
pub use overlay::{LabelPosition, Overlay, class};
