// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alignment vocabulary: symbolic alignments, connection positions and candidates.
//!
//! ## Two coordinate systems
//!
//! Callers speak in *alignments* ([`HorizontalAlign`], [`VerticalAlign`], or the
//! combined [`Placement`] shorthand). A positioning engine speaks in *connection
//! positions*: a point on the anchor ([`Origin`]) glued to a point on the panel
//! ([`OverlayPoint`]). The [`resolve`](crate::resolve) module maps between them.

use core::fmt;
use core::str::FromStr;

use kurbo::Vec2;

use crate::error::{ParseError, parse_keyword};

/// Alignment of a panel on the horizontal axis.
///
/// `Left` and `Right` place the panel entirely beside the anchor; `Start`,
/// `Center` and `End` let it overlap the anchor's horizontal extent.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum HorizontalAlign {
    /// Panel sits to the left of the anchor.
    Left,
    /// Panel's start edge lines up with the anchor's start edge.
    Start,
    /// Panel is centered on the anchor.
    #[default]
    Center,
    /// Panel's end edge lines up with the anchor's end edge.
    End,
    /// Panel sits to the right of the anchor.
    Right,
}

impl HorizontalAlign {
    /// Every horizontal alignment, left to right.
    pub const ALL: [Self; 5] = [
        Self::Left,
        Self::Start,
        Self::Center,
        Self::End,
        Self::Right,
    ];

    const NAMES: [&'static str; 5] = ["left", "start", "center", "end", "right"];

    /// The keyword for this alignment.
    pub const fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Whether a panel with this alignment may cover the anchor horizontally.
    pub const fn overlaps_anchor(self) -> bool {
        !matches!(self, Self::Left | Self::Right)
    }
}

impl FromStr for HorizontalAlign {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword("horizontalAlign", s, &Self::ALL, &Self::NAMES)
    }
}

impl fmt::Display for HorizontalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alignment of a panel on the vertical axis.
///
/// `Top` and `Bottom` place the panel entirely above or below the anchor; `Start`,
/// `Center` and `End` let it overlap the anchor's vertical extent.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum VerticalAlign {
    /// Panel sits above the anchor.
    Top,
    /// Panel's bottom edge lines up with the anchor's bottom edge.
    Start,
    /// Panel is centered on the anchor.
    Center,
    /// Panel's top edge lines up with the anchor's top edge.
    End,
    /// Panel sits below the anchor.
    #[default]
    Bottom,
}

impl VerticalAlign {
    /// Every vertical alignment, top to bottom.
    pub const ALL: [Self; 5] = [
        Self::Top,
        Self::Start,
        Self::Center,
        Self::End,
        Self::Bottom,
    ];

    const NAMES: [&'static str; 5] = ["top", "start", "center", "end", "bottom"];

    /// The keyword for this alignment.
    pub const fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Whether a panel with this alignment may cover the anchor vertically.
    pub const fn overlaps_anchor(self) -> bool {
        !matches!(self, Self::Top | Self::Bottom)
    }
}

impl FromStr for VerticalAlign {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword("verticalAlign", s, &Self::ALL, &Self::NAMES)
    }
}

impl fmt::Display for VerticalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The side of the anchor a [`Placement`] leads with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// Left of the anchor.
    Left,
    /// Right of the anchor.
    Right,
}

impl Side {
    /// The side across the anchor from this one.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the side is above or below the anchor.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Where along the chosen side the panel is pinned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Pin {
    /// Centered on the side.
    Center,
    /// Pinned toward the left (for top/bottom) or top (for left/right).
    Near,
    /// Pinned toward the right (for top/bottom) or bottom (for left/right).
    Far,
}

/// Combined alignment shorthand, e.g. `top-left`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Placement {
    /// Above, centered.
    Top,
    /// Above, start edges aligned.
    TopLeft,
    /// Above, end edges aligned.
    TopRight,
    /// Below, centered.
    #[default]
    Bottom,
    /// Below, start edges aligned.
    BottomLeft,
    /// Below, end edges aligned.
    BottomRight,
    /// Left, centered.
    Left,
    /// Left, bottom edges aligned.
    LeftTop,
    /// Left, top edges aligned.
    LeftBottom,
    /// Right, centered.
    Right,
    /// Right, bottom edges aligned.
    RightTop,
    /// Right, top edges aligned.
    RightBottom,
}

impl Placement {
    /// Every placement in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Top,
        Self::TopLeft,
        Self::TopRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::BottomRight,
        Self::Left,
        Self::LeftTop,
        Self::LeftBottom,
        Self::Right,
        Self::RightTop,
        Self::RightBottom,
    ];

    const NAMES: [&'static str; 12] = [
        "top",
        "top-left",
        "top-right",
        "bottom",
        "bottom-left",
        "bottom-right",
        "left",
        "left-top",
        "left-bottom",
        "right",
        "right-top",
        "right-bottom",
    ];

    /// The keyword for this placement.
    pub const fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Build a placement from its leading side and pin.
    pub const fn from_parts(side: Side, pin: Pin) -> Self {
        match (side, pin) {
            (Side::Top, Pin::Center) => Self::Top,
            (Side::Top, Pin::Near) => Self::TopLeft,
            (Side::Top, Pin::Far) => Self::TopRight,
            (Side::Bottom, Pin::Center) => Self::Bottom,
            (Side::Bottom, Pin::Near) => Self::BottomLeft,
            (Side::Bottom, Pin::Far) => Self::BottomRight,
            (Side::Left, Pin::Center) => Self::Left,
            (Side::Left, Pin::Near) => Self::LeftTop,
            (Side::Left, Pin::Far) => Self::LeftBottom,
            (Side::Right, Pin::Center) => Self::Right,
            (Side::Right, Pin::Near) => Self::RightTop,
            (Side::Right, Pin::Far) => Self::RightBottom,
        }
    }

    /// The side of the anchor this placement leads with.
    pub const fn side(self) -> Side {
        match self {
            Self::Top | Self::TopLeft | Self::TopRight => Side::Top,
            Self::Bottom | Self::BottomLeft | Self::BottomRight => Side::Bottom,
            Self::Left | Self::LeftTop | Self::LeftBottom => Side::Left,
            Self::Right | Self::RightTop | Self::RightBottom => Side::Right,
        }
    }

    /// Where along its side the placement pins the panel.
    pub const fn pin(self) -> Pin {
        match self {
            Self::Top | Self::Bottom | Self::Left | Self::Right => Pin::Center,
            Self::TopLeft | Self::BottomLeft | Self::LeftTop | Self::RightTop => Pin::Near,
            Self::TopRight | Self::BottomRight | Self::LeftBottom | Self::RightBottom => Pin::Far,
        }
    }

    /// The same pin on the given side.
    pub const fn with_side(self, side: Side) -> Self {
        Self::from_parts(side, self.pin())
    }

    /// The per-axis alignments this shorthand stands for.
    pub const fn alignment(self) -> (HorizontalAlign, VerticalAlign) {
        use HorizontalAlign as H;
        use VerticalAlign as V;
        match self {
            Self::Top => (H::Center, V::Top),
            Self::TopLeft => (H::Start, V::Top),
            Self::TopRight => (H::End, V::Top),
            Self::Bottom => (H::Center, V::Bottom),
            Self::BottomLeft => (H::Start, V::Bottom),
            Self::BottomRight => (H::End, V::Bottom),
            Self::Left => (H::Left, V::Center),
            Self::LeftTop => (H::Left, V::Start),
            Self::LeftBottom => (H::Left, V::End),
            Self::Right => (H::Right, V::Center),
            Self::RightTop => (H::Right, V::Start),
            Self::RightBottom => (H::Right, V::End),
        }
    }
}

impl FromStr for Placement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword("placement", s, &Self::ALL, &Self::NAMES)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal connection point on an element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HorizontalPos {
    /// Leading edge (left in LTR, right in RTL).
    Start,
    /// Horizontal center.
    Center,
    /// Trailing edge.
    End,
}

impl HorizontalPos {
    /// Swap `Start` and `End`, leaving `Center` alone.
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
            Self::Center => Self::Center,
        }
    }
}

/// Vertical connection point on an element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VerticalPos {
    /// Top edge.
    Top,
    /// Vertical center.
    Center,
    /// Bottom edge.
    Bottom,
}

impl VerticalPos {
    /// Swap `Top` and `Bottom`, leaving `Center` alone.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Center => Self::Center,
        }
    }
}

/// Attachment point on the anchor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Origin {
    /// Horizontal attachment on the anchor.
    pub x: HorizontalPos,
    /// Vertical attachment on the anchor.
    pub y: VerticalPos,
}

/// Attachment point on the floating panel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OverlayPoint {
    /// Horizontal attachment on the panel.
    pub x: HorizontalPos,
    /// Vertical attachment on the panel.
    pub y: VerticalPos,
}

/// A concrete placement considered by the positioning engine.
///
/// The engine glues `overlay` on the panel to `origin` on the anchor and then
/// shifts the panel by `offset`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionCandidate {
    /// Anchor-side attachment point.
    pub origin: Origin,
    /// Panel-side attachment point.
    pub overlay: OverlayPoint,
    /// Extra displacement applied after attachment, in pixels.
    pub offset: Vec2,
}

impl PositionCandidate {
    /// A candidate with no extra offset.
    pub const fn new(origin: Origin, overlay: OverlayPoint) -> Self {
        Self {
            origin,
            overlay,
            offset: Vec2::ZERO,
        }
    }

    /// Return the candidate shifted by `offset`.
    pub const fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

/// Text direction of the surface hosting the overlay.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl Direction {
    /// Whether this is left-to-right.
    pub const fn is_ltr(self) -> bool {
        matches!(self, Self::Ltr)
    }
}
