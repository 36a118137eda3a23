// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip placement near screen edges.
//!
//! ## Overview
//!
//! Tooltips have a roughly fixed footprint, so instead of a full fallback list
//! they classify where the anchor sits on screen ([`ScreenArea`]) and adjust the
//! request up front:
//!
//! - Near the right edge, a top/bottom tooltip grows leftward ("before") and a
//!   `right` request becomes `left`.
//! - Near the bottom edge, a `bottom` request becomes `top`.
//!
//! [`tooltip_positions`] then produces the main and fallback candidates for the
//! adjusted placement, and [`arrow_for_change`] maps the candidate the engine
//! settled on back to an arrow variant.

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Size, Vec2};

use crate::error::{ParseError, parse_keyword};
use crate::types::{Direction, HorizontalPos, Origin, OverlayPoint, PositionCandidate, VerticalPos};

/// Requested side for a tooltip.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TooltipPlacement {
    /// Left of the anchor.
    Left,
    /// Right of the anchor.
    Right,
    /// Above the anchor.
    Top,
    /// Below the anchor.
    #[default]
    Bottom,
}

impl TooltipPlacement {
    /// Every tooltip placement.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    const NAMES: [&'static str; 4] = ["left", "right", "top", "bottom"];

    /// The keyword for this placement.
    pub const fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Whether the tooltip sits above or below the anchor.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

impl FromStr for TooltipPlacement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword("placement", s, &Self::ALL, &Self::NAMES)
    }
}

impl fmt::Display for TooltipPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of where the anchor sits in the viewport.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ScreenArea {
    /// Away from the right and bottom edges.
    #[default]
    Main,
    /// Near the right edge only.
    Right,
    /// Near the bottom edge only.
    Bottom,
    /// Near both edges.
    BottomRight,
}

/// Distances from the viewport's right and bottom edges that count as "near".
///
/// The defaults match the stock tooltip panel's maximum footprint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeThresholds {
    /// Horizontal room, in pixels, below which the anchor is near the right edge.
    pub right: f64,
    /// Vertical room, in pixels, below which the anchor is near the bottom edge.
    pub bottom: f64,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            right: 282.0,
            bottom: 120.0,
        }
    }
}

impl ScreenArea {
    /// Classify an anchor whose top-left corner is at `anchor_origin`.
    ///
    /// Room is measured from the anchor's origin to the viewport's far edges. An
    /// anchor exactly `thresholds.right` from the right edge and near the bottom
    /// counts as [`Bottom`](Self::Bottom), not [`BottomRight`](Self::BottomRight).
    pub fn classify(anchor_origin: Point, viewport: Size, thresholds: EdgeThresholds) -> Self {
        let room_x = viewport.width - anchor_origin.x;
        let room_y = viewport.height - anchor_origin.y;
        if room_x <= thresholds.right && room_y > thresholds.bottom {
            Self::Right
        } else if room_x >= thresholds.right && room_y <= thresholds.bottom {
            Self::Bottom
        } else if room_x < thresholds.right && room_y <= thresholds.bottom {
            Self::BottomRight
        } else {
            Self::Main
        }
    }
}

/// Arrow decoration variant drawn on a tooltip.
///
/// Top/bottom variants name the tooltip's side and whether it grows before or
/// after the anchor; `Left`/`Right` name the side the arrow is drawn on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TooltipArrow {
    /// Tooltip above the anchor, growing leftward.
    TopBefore,
    /// Tooltip above the anchor, growing rightward.
    TopAfter,
    /// Tooltip below the anchor, growing leftward.
    BottomBefore,
    /// Tooltip below the anchor, growing rightward.
    BottomAfter,
    /// Arrow on the tooltip's left side.
    Left,
    /// Arrow on the tooltip's right side.
    Right,
}

impl TooltipArrow {
    /// Arrow for a tooltip shown at `placement`.
    pub const fn for_placement(placement: TooltipPlacement, before: bool) -> Self {
        match (placement, before) {
            (TooltipPlacement::Top, true) => Self::TopBefore,
            (TooltipPlacement::Top, false) => Self::TopAfter,
            (TooltipPlacement::Bottom, true) => Self::BottomBefore,
            (TooltipPlacement::Bottom, false) => Self::BottomAfter,
            (TooltipPlacement::Left, _) => Self::Right,
            (TooltipPlacement::Right, _) => Self::Left,
        }
    }

    /// CSS class suffix for this arrow.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopBefore => "top-before",
            Self::TopAfter => "top-after",
            Self::BottomBefore => "bottom-before",
            Self::BottomAfter => "bottom-after",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Result of adjusting a tooltip request to its screen area.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ScreenAdjustment {
    /// Area the anchor was classified into.
    pub area: ScreenArea,
    /// Placement actually used for positioning.
    pub placement: TooltipPlacement,
    /// Whether a top/bottom tooltip grows leftward from the anchor.
    pub before: bool,
    /// Arrow variant to draw.
    pub arrow: TooltipArrow,
}

/// Override `requested` for an anchor in `area`.
pub fn adjust(requested: TooltipPlacement, area: ScreenArea) -> ScreenAdjustment {
    let placement = match (area, requested) {
        (ScreenArea::Bottom | ScreenArea::BottomRight, TooltipPlacement::Bottom) => {
            TooltipPlacement::Top
        }
        (ScreenArea::Right, TooltipPlacement::Right) => TooltipPlacement::Left,
        _ => requested,
    };
    let before =
        requested.is_vertical() && matches!(area, ScreenArea::Right | ScreenArea::BottomRight);
    ScreenAdjustment {
        area,
        placement,
        before,
        arrow: TooltipArrow::for_placement(placement, before),
    }
}

/// Main and fallback candidates for a tooltip.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TooltipPositions {
    /// Preferred candidate.
    pub main: PositionCandidate,
    /// Candidate on the opposite side of the anchor.
    pub fallback: PositionCandidate,
}

impl TooltipPositions {
    /// Both candidates, preferred first.
    pub fn to_array(self) -> [PositionCandidate; 2] {
        [self.main, self.fallback]
    }
}

/// Compute tooltip candidates for the adjusted placement.
///
/// `arrow_size` is the gap left for the arrow; top/bottom tooltips are also
/// shifted sideways by one and a half arrows so the arrow lands over the anchor.
/// In right-to-left layouts `left` and `right` swap their start/end attachment.
pub fn tooltip_positions(
    adjustment: &ScreenAdjustment,
    direction: Direction,
    arrow_size: f64,
) -> TooltipPositions {
    let ltr = direction.is_ltr();
    let shift = arrow_size + arrow_size / 2.0;
    let sideways = if adjustment.before { shift } else { -shift };
    let grow = if adjustment.before {
        HorizontalPos::End
    } else {
        HorizontalPos::Start
    };

    let main = match adjustment.placement {
        TooltipPlacement::Top => PositionCandidate::new(
            Origin {
                x: HorizontalPos::Center,
                y: VerticalPos::Top,
            },
            OverlayPoint {
                x: grow,
                y: VerticalPos::Bottom,
            },
        )
        .with_offset(Vec2::new(sideways, -arrow_size)),
        TooltipPlacement::Bottom => PositionCandidate::new(
            Origin {
                x: HorizontalPos::Center,
                y: VerticalPos::Bottom,
            },
            OverlayPoint {
                x: grow,
                y: VerticalPos::Top,
            },
        )
        .with_offset(Vec2::new(sideways, arrow_size)),
        side => {
            let leading = (side == TooltipPlacement::Left) == ltr;
            let (origin_x, overlay_x, dx) = if leading {
                (HorizontalPos::Start, HorizontalPos::End, -arrow_size)
            } else {
                (HorizontalPos::End, HorizontalPos::Start, arrow_size)
            };
            PositionCandidate::new(
                Origin {
                    x: origin_x,
                    y: VerticalPos::Center,
                },
                OverlayPoint {
                    x: overlay_x,
                    y: VerticalPos::Center,
                },
            )
            .with_offset(Vec2::new(dx, 0.0))
        }
    };

    TooltipPositions {
        main,
        fallback: invert(main, adjustment.placement.is_vertical(), arrow_size),
    }
}

/// Mirror a candidate across the anchor along the placement's axis.
fn invert(c: PositionCandidate, vertical: bool, arrow_size: f64) -> PositionCandidate {
    let flip = |d: f64| {
        if d == arrow_size || d == -arrow_size {
            -d
        } else {
            d
        }
    };
    if vertical {
        PositionCandidate {
            origin: Origin {
                x: c.origin.x,
                y: c.origin.y.flipped(),
            },
            overlay: OverlayPoint {
                x: c.overlay.x,
                y: c.overlay.y.flipped(),
            },
            offset: Vec2::new(c.offset.x, flip(c.offset.y)),
        }
    } else {
        PositionCandidate {
            origin: Origin {
                x: c.origin.x.mirrored(),
                y: c.origin.y,
            },
            overlay: OverlayPoint {
                x: c.overlay.x.mirrored(),
                y: c.overlay.y,
            },
            offset: Vec2::new(flip(c.offset.x), c.offset.y),
        }
    }
}

/// Arrow variant for the candidate the engine selected, if it indicates a flip.
///
/// `requested` is the placement the caller asked for (before any screen-area
/// adjustment). Returns `None` when the selected offset says nothing new and the
/// current arrow should stay.
pub fn arrow_for_change(
    requested: TooltipPlacement,
    before: bool,
    offset: Vec2,
    arrow_size: f64,
) -> Option<TooltipArrow> {
    let flipped = match requested {
        TooltipPlacement::Right if offset.x == -arrow_size => TooltipPlacement::Left,
        TooltipPlacement::Left if offset.x == arrow_size => TooltipPlacement::Right,
        TooltipPlacement::Top if offset.y == arrow_size => TooltipPlacement::Bottom,
        TooltipPlacement::Bottom if offset.y == -arrow_size => TooltipPlacement::Top,
        _ => return None,
    };
    Some(TooltipArrow::for_placement(flipped, before))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1280.0, 800.0);
    const ARROW: f64 = 12.0;

    fn classify(x: f64, y: f64) -> ScreenArea {
        ScreenArea::classify(Point::new(x, y), VIEWPORT, EdgeThresholds::default())
    }

    #[test]
    fn quadrants() {
        assert_eq!(classify(10.0, 10.0), ScreenArea::Main);
        assert_eq!(classify(1270.0, 10.0), ScreenArea::Right);
        assert_eq!(classify(10.0, 790.0), ScreenArea::Bottom);
        assert_eq!(classify(1270.0, 790.0), ScreenArea::BottomRight);
        // Exactly on the right threshold while near the bottom reads as bottom.
        assert_eq!(classify(1280.0 - 282.0, 790.0), ScreenArea::Bottom);
        // Exactly on the bottom threshold counts as near.
        assert_eq!(classify(10.0, 800.0 - 120.0), ScreenArea::Bottom);
    }

    #[test]
    fn bottom_right_flips_bottom_to_top_before() {
        let area = classify(VIEWPORT.width - 10.0, VIEWPORT.height - 10.0);
        assert_eq!(area, ScreenArea::BottomRight);
        let adj = adjust(TooltipPlacement::Bottom, area);
        assert_eq!(adj.placement, TooltipPlacement::Top);
        assert!(adj.before);
        assert_eq!(adj.arrow, TooltipArrow::TopBefore);
        assert_eq!(adj.arrow.as_str(), "top-before");
    }

    #[test]
    fn area_overrides() {
        let main = adjust(TooltipPlacement::Top, ScreenArea::Main);
        assert_eq!(
            (main.placement, main.before, main.arrow),
            (TooltipPlacement::Top, false, TooltipArrow::TopAfter)
        );

        let right = adjust(TooltipPlacement::Bottom, ScreenArea::Right);
        assert_eq!(
            (right.placement, right.before, right.arrow),
            (TooltipPlacement::Bottom, true, TooltipArrow::BottomBefore)
        );

        let bottom = adjust(TooltipPlacement::Bottom, ScreenArea::Bottom);
        assert_eq!(
            (bottom.placement, bottom.before, bottom.arrow),
            (TooltipPlacement::Top, false, TooltipArrow::TopAfter)
        );

        let side = adjust(TooltipPlacement::Right, ScreenArea::Right);
        assert_eq!(
            (side.placement, side.before, side.arrow),
            (TooltipPlacement::Left, false, TooltipArrow::Right)
        );

        let kept = adjust(TooltipPlacement::Left, ScreenArea::BottomRight);
        assert_eq!(kept.placement, TooltipPlacement::Left);
        assert_eq!(kept.arrow, TooltipArrow::Right);
    }

    #[test]
    fn bottom_positions_and_inverted_fallback() {
        let adj = adjust(TooltipPlacement::Bottom, ScreenArea::Main);
        let p = tooltip_positions(&adj, Direction::Ltr, ARROW);
        assert_eq!(p.main.origin.x, HorizontalPos::Center);
        assert_eq!(p.main.origin.y, VerticalPos::Bottom);
        assert_eq!(p.main.overlay.x, HorizontalPos::Start);
        assert_eq!(p.main.overlay.y, VerticalPos::Top);
        assert_eq!(p.main.offset, Vec2::new(-18.0, 12.0));
        assert_eq!(p.fallback.origin.y, VerticalPos::Top);
        assert_eq!(p.fallback.overlay.y, VerticalPos::Bottom);
        assert_eq!(p.fallback.offset, Vec2::new(-18.0, -12.0));
    }

    #[test]
    fn before_grows_from_end() {
        let adj = adjust(TooltipPlacement::Top, ScreenArea::Right);
        let p = tooltip_positions(&adj, Direction::Ltr, ARROW);
        assert_eq!(p.main.overlay.x, HorizontalPos::End);
        assert_eq!(p.main.offset, Vec2::new(18.0, -12.0));
    }

    #[test]
    fn side_positions_mirror_in_rtl() {
        let adj = adjust(TooltipPlacement::Left, ScreenArea::Main);
        let ltr = tooltip_positions(&adj, Direction::Ltr, ARROW);
        assert_eq!(ltr.main.origin.x, HorizontalPos::Start);
        assert_eq!(ltr.main.overlay.x, HorizontalPos::End);
        assert_eq!(ltr.main.offset, Vec2::new(-12.0, 0.0));
        assert_eq!(ltr.fallback.origin.x, HorizontalPos::End);
        assert_eq!(ltr.fallback.offset, Vec2::new(12.0, 0.0));

        let rtl = tooltip_positions(&adj, Direction::Rtl, ARROW);
        assert_eq!(rtl.main.origin.x, HorizontalPos::End);
        assert_eq!(rtl.main.overlay.x, HorizontalPos::Start);
        assert_eq!(rtl.main.offset, Vec2::new(12.0, 0.0));
    }

    #[test]
    fn arrow_follows_flipped_candidate() {
        let adj = adjust(TooltipPlacement::Top, ScreenArea::Main);
        let p = tooltip_positions(&adj, Direction::Ltr, ARROW);
        assert_eq!(
            arrow_for_change(TooltipPlacement::Top, adj.before, p.main.offset, ARROW),
            None
        );
        assert_eq!(
            arrow_for_change(TooltipPlacement::Top, adj.before, p.fallback.offset, ARROW),
            Some(TooltipArrow::BottomAfter)
        );
        let leftward = Vec2::new(-ARROW, 0.0);
        assert_eq!(
            arrow_for_change(TooltipPlacement::Right, false, leftward, ARROW),
            Some(TooltipArrow::Right)
        );
        let above = Vec2::new(18.0, -ARROW);
        assert_eq!(
            arrow_for_change(TooltipPlacement::Bottom, true, above, ARROW),
            Some(TooltipArrow::TopBefore)
        );
    }

    #[test]
    fn parse_tooltip_placement() {
        assert_eq!(
            "left".parse::<TooltipPlacement>(),
            Ok(TooltipPlacement::Left)
        );
        assert!("top-left".parse::<TooltipPlacement>().is_err());
    }
}
