//! Corner-handle geometry.
//!
//! A resize handle sits on one corner of the resize host. Dragging it keeps
//! the opposite corner (the *reference corner*) fixed, so every drag starts
//! by inverting the dragged handle's position.

use crate::error::ResizeError;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vertical half of a corner label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalSide {
    Top,
    Bottom,
}

/// Horizontal half of a corner label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalSide {
    Left,
    Right,
}

/// One of the four corner handles drawn around a resizable widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandlePosition {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl HandlePosition {
    /// All handles in overlay markup order.
    pub const ALL: [HandlePosition; 4] = [
        HandlePosition::TopLeft,
        HandlePosition::TopRight,
        HandlePosition::BottomRight,
        HandlePosition::BottomLeft,
    ];

    pub fn from_sides(vertical: VerticalSide, horizontal: HorizontalSide) -> Self {
        match (vertical, horizontal) {
            (VerticalSide::Top, HorizontalSide::Left) => Self::TopLeft,
            (VerticalSide::Top, HorizontalSide::Right) => Self::TopRight,
            (VerticalSide::Bottom, HorizontalSide::Right) => Self::BottomRight,
            (VerticalSide::Bottom, HorizontalSide::Left) => Self::BottomLeft,
        }
    }

    pub fn vertical(self) -> VerticalSide {
        match self {
            Self::TopLeft | Self::TopRight => VerticalSide::Top,
            Self::BottomLeft | Self::BottomRight => VerticalSide::Bottom,
        }
    }

    pub fn horizontal(self) -> HorizontalSide {
        match self {
            Self::TopLeft | Self::BottomLeft => HorizontalSide::Left,
            Self::TopRight | Self::BottomRight => HorizontalSide::Right,
        }
    }

    pub fn is_left(self) -> bool {
        self.horizontal() == HorizontalSide::Left
    }

    pub fn is_top(self) -> bool {
        self.vertical() == VerticalSide::Top
    }

    /// The diagonally opposite corner. Each axis is flipped independently.
    pub fn inverted(self) -> Self {
        let vertical = match self.vertical() {
            VerticalSide::Top => VerticalSide::Bottom,
            VerticalSide::Bottom => VerticalSide::Top,
        };
        let horizontal = match self.horizontal() {
            HorizontalSide::Left => HorizontalSide::Right,
            HorizontalSide::Right => HorizontalSide::Left,
        };
        Self::from_sides(vertical, horizontal)
    }

    /// Index into `ALL`.
    pub fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomRight => 2,
            Self::BottomLeft => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
        }
    }
}

impl fmt::Display for HandlePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandlePosition {
    type Err = ResizeError;

    /// Parse a `vertical-horizontal` label, one axis at a time.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let invalid = || ResizeError::InvalidHandle(label.to_string());
        let (vertical, horizontal) = label.split_once('-').ok_or_else(invalid)?;
        let vertical = match vertical {
            "top" => VerticalSide::Top,
            "bottom" => VerticalSide::Bottom,
            _ => return Err(invalid()),
        };
        let horizontal = match horizontal {
            "left" => HorizontalSide::Left,
            "right" => HorizontalSide::Right,
            _ => return Err(invalid()),
        };
        Ok(Self::from_sides(vertical, horizontal))
    }
}

/// Invert a corner label: `top-left` ↔ `bottom-right`, `top-right` ↔ `bottom-left`.
pub fn invert_position(position: HandlePosition) -> HandlePosition {
    position.inverted()
}

/// Absolute coordinate of `position`'s corner on `rect`.
pub fn absolute_corner(rect: Rect, position: HandlePosition) -> Point {
    let x = match position.horizontal() {
        HorizontalSide::Left => rect.min_x(),
        HorizontalSide::Right => rect.max_x(),
    };
    let y = match position.vertical() {
        VerticalSide::Top => rect.min_y(),
        VerticalSide::Bottom => rect.max_y(),
    };
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inversion_is_an_involution() {
        for position in HandlePosition::ALL {
            assert_eq!(invert_position(invert_position(position)), position);
            assert_ne!(invert_position(position), position);
        }
    }

    #[test]
    fn inversion_flips_both_axes() {
        assert_eq!(
            invert_position(HandlePosition::TopLeft),
            HandlePosition::BottomRight
        );
        assert_eq!(
            invert_position(HandlePosition::TopRight),
            HandlePosition::BottomLeft
        );
        for position in HandlePosition::ALL {
            let inverted = position.inverted();
            assert_ne!(inverted.vertical(), position.vertical());
            assert_ne!(inverted.horizontal(), position.horizontal());
        }
    }

    #[test]
    fn labels_parse_and_print() {
        for position in HandlePosition::ALL {
            assert_eq!(position.as_str().parse::<HandlePosition>(), Ok(position));
        }
        assert_eq!(
            "middle-left".parse::<HandlePosition>(),
            Err(ResizeError::InvalidHandle("middle-left".into()))
        );
        assert!("top".parse::<HandlePosition>().is_err());
        assert!("left-top".parse::<HandlePosition>().is_err());
    }

    #[test]
    fn labels_match_serde_names() {
        let json = serde_json::to_string(&HandlePosition::BottomLeft).unwrap();
        assert_eq!(json, "\"bottom-left\"");
    }

    #[test]
    fn absolute_corners() {
        let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(
            absolute_corner(rect, HandlePosition::TopLeft),
            Point::new(10.0, 20.0)
        );
        assert_eq!(
            absolute_corner(rect, HandlePosition::TopRight),
            Point::new(110.0, 20.0)
        );
        assert_eq!(
            absolute_corner(rect, HandlePosition::BottomRight),
            Point::new(110.0, 70.0)
        );
        assert_eq!(
            absolute_corner(rect, HandlePosition::BottomLeft),
            Point::new(10.0, 70.0)
        );
    }
}
