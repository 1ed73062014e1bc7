//! Resize state: the size math behind one drag.
//!
//! `begin_drag` freezes the reference geometry (fixed corner, original size,
//! aspect ratio); `propose_size` turns each pointer position into a size.
//! Width is the dominant axis: it follows the horizontal distance between
//! the pointer and the fixed corner, and height is derived from the ratio.
//!
//! ## Sign convention
//!
//! | Dragged side | Width grows when pointer x… |
//! |--------------|-----------------------------|
//! | right        | increases                   |
//! | left         | decreases                   |

use kurbo::{Point, Rect, Size};
use wr_core::config::ResizerOptions;
use wr_core::error::ResizeError;
use wr_core::geometry::{HandlePosition, absolute_corner};

/// Geometry captured once per drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceGeometry {
    /// The dragged handle.
    pub handle: HandlePosition,
    /// Absolute position of the corner opposite `handle`. Fixed for the drag.
    pub reference_point: Point,
    /// Host size at drag start.
    pub original_size: Size,
    /// Width / height, frozen for the whole drag.
    pub aspect_ratio: f64,
}

/// Pluggable size math used by a resize context.
pub trait ResizeStrategy {
    /// Capture reference geometry for a drag from `handle`.
    fn begin_drag(
        &mut self,
        handle: HandlePosition,
        host_rect: Rect,
        aspect_ratio: Option<f64>,
    ) -> Result<ReferenceGeometry, ResizeError>;

    /// Size for a pointer at `pointer`. Same input, same output.
    fn propose_size(&mut self, pointer: Point) -> Result<Size, ResizeError>;

    fn geometry(&self) -> Option<&ReferenceGeometry>;

    /// Last proposed size, or the ratio-conformed original size right after `begin_drag`.
    fn proposed_size(&self) -> Option<Size>;

    /// Drop the drag's geometry.
    fn reset(&mut self);
}

/// Corner-anchored strategy: the opposite corner stays put.
#[derive(Debug, Clone)]
pub struct ResizeState {
    min_size: f64,
    lock_aspect_ratio: bool,
    geometry: Option<ReferenceGeometry>,
    proposed: Option<Size>,
}

impl ResizeState {
    pub fn new(min_size: f64, lock_aspect_ratio: bool) -> Self {
        Self {
            min_size,
            lock_aspect_ratio,
            geometry: None,
            proposed: None,
        }
    }

    pub fn from_options(options: &ResizerOptions) -> Self {
        Self::new(options.min_size, options.lock_aspect_ratio)
    }

    /// Smallest width keeping both dimensions above the floor at `ratio`.
    fn min_width(&self, ratio: f64) -> f64 {
        self.min_size.max(self.min_size * ratio)
    }
}

impl Default for ResizeState {
    fn default() -> Self {
        Self::from_options(&ResizerOptions::default())
    }
}

/// Distance from the fixed corner along one axis, positive when the dragged
/// side is on the pointer's side of the reference corner.
fn signed_extent(pointer: f64, reference: f64, dragged_is_min_side: bool) -> f64 {
    let delta = pointer - reference;
    if dragged_is_min_side { -delta } else { delta }
}

impl ResizeStrategy for ResizeState {
    fn begin_drag(
        &mut self,
        handle: HandlePosition,
        host_rect: Rect,
        aspect_ratio: Option<f64>,
    ) -> Result<ReferenceGeometry, ResizeError> {
        self.reset();
        let original_size = host_rect.size();

        let aspect_ratio = match aspect_ratio {
            Some(ratio) if ratio.is_finite() && ratio > 0.0 => ratio,
            Some(ratio) => {
                return Err(ResizeError::invalid_geometry(format!(
                    "aspect ratio override {ratio} is not a positive number"
                )));
            }
            None if original_size.height <= 0.0 => {
                return Err(ResizeError::invalid_geometry(
                    "resize host has zero height and no aspect ratio override",
                ));
            }
            None if original_size.width <= 0.0 => {
                return Err(ResizeError::invalid_geometry("resize host has zero width"));
            }
            None => original_size.width / original_size.height,
        };

        let geometry = ReferenceGeometry {
            handle,
            reference_point: absolute_corner(host_rect, handle.inverted()),
            original_size,
            aspect_ratio,
        };
        self.proposed = Some(if self.lock_aspect_ratio {
            Size::new(original_size.width, original_size.width / aspect_ratio)
        } else {
            original_size
        });
        self.geometry = Some(geometry);
        log::trace!("begin drag {geometry:?}");
        Ok(geometry)
    }

    fn propose_size(&mut self, pointer: Point) -> Result<Size, ResizeError> {
        let geometry = self.geometry.ok_or(ResizeError::NotDragging)?;
        let previous = self.proposed.unwrap_or(geometry.original_size);
        let handle = geometry.handle;

        let width = signed_extent(pointer.x, geometry.reference_point.x, handle.is_left());

        let size = if self.lock_aspect_ratio {
            // Pointer crossed the fixed corner: hold the previous proposal.
            if width.is_nan() || width <= 0.0 {
                return Ok(previous);
            }
            let ratio = geometry.aspect_ratio;
            let width = width.max(self.min_width(ratio));
            Size::new(width, width / ratio)
        } else {
            let height = signed_extent(pointer.y, geometry.reference_point.y, handle.is_top());
            let width = if width > 0.0 {
                width.max(self.min_size)
            } else {
                previous.width
            };
            let height = if height > 0.0 {
                height.max(self.min_size)
            } else {
                previous.height
            };
            Size::new(width, height)
        };

        self.proposed = Some(size);
        log::trace!("propose {size:?} for pointer {pointer:?}");
        Ok(size)
    }

    fn geometry(&self) -> Option<&ReferenceGeometry> {
        self.geometry.as_ref()
    }

    fn proposed_size(&self) -> Option<Size> {
        self.proposed
    }

    fn reset(&mut self) {
        self.geometry = None;
        self.proposed = None;
    }
}
