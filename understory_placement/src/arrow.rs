// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow alignment for popover panels.
//!
//! A popover draws a small square arrow pointing at its anchor. When the panel is
//! wider (or taller) than the anchor and pinned to one end, the arrow is moved off
//! center so it keeps pointing at the anchor's middle. Otherwise it is centered
//! on the panel edge with a translate transform.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;

use crate::types::{Pin, Placement};

/// Side length of the arrow square used by the default popover theme, in pixels.
pub const DEFAULT_ARROW_SIDE: f64 = 5.0;

/// Panel edge an arrow offset is measured from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Edge {
    /// Measured from the left edge.
    Left,
    /// Measured from the right edge.
    Right,
    /// Measured from the top edge.
    Top,
    /// Measured from the bottom edge.
    Bottom,
}

impl Edge {
    /// CSS property name for this edge.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// Style directive for the arrow decoration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ArrowStyle {
    /// Offset the arrow `px` pixels from `edge`.
    Offset {
        /// Edge the offset is measured from.
        edge: Edge,
        /// Distance from the edge, in pixels.
        px: f64,
    },
    /// Center along the horizontal edge (top/bottom placements).
    CenterHorizontal,
    /// Center along the vertical edge (left/right placements).
    CenterVertical,
}

impl ArrowStyle {
    /// Render the directive as CSS `(property, value)` declarations.
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        let centered = |prop: &'static str, translate: &str| {
            let transform = format!("translate({translate})");
            alloc::vec![
                (prop, String::from("50%")),
                ("-webkit-transform", transform.clone()),
                ("-ms-transform", transform.clone()),
                ("transform", transform),
            ]
        };
        match *self {
            Self::Offset { edge, px } => alloc::vec![(edge.as_str(), format!("{px}px"))],
            Self::CenterHorizontal => centered("left", "-50%, 0"),
            Self::CenterVertical => centered("top", "0, -50%"),
        }
    }
}

/// Compute the arrow style for `placement`.
///
/// `anchor` and `panel` are the measured sizes of the anchor element and the
/// floating pane; `side` is the arrow square's side length. A near pin offsets
/// by half the anchor minus half the arrow, a far pin by half the anchor minus
/// the full arrow, matching how the arrow is drawn from its leading corner.
pub fn arrow_style(placement: Placement, anchor: Size, panel: Size, side: f64) -> ArrowStyle {
    if placement.side().is_vertical() {
        if panel.width <= anchor.width {
            return ArrowStyle::CenterHorizontal;
        }
        let half = anchor.width / 2.0;
        match placement.pin() {
            Pin::Near => ArrowStyle::Offset {
                edge: Edge::Left,
                px: half - side / 2.0,
            },
            Pin::Far => ArrowStyle::Offset {
                edge: Edge::Right,
                px: half - side,
            },
            Pin::Center => ArrowStyle::CenterHorizontal,
        }
    } else {
        if panel.height <= anchor.height {
            return ArrowStyle::CenterVertical;
        }
        let half = anchor.height / 2.0;
        match placement.pin() {
            Pin::Near => ArrowStyle::Offset {
                edge: Edge::Bottom,
                px: half - side / 2.0,
            },
            Pin::Far => ArrowStyle::Offset {
                edge: Edge::Top,
                px: half - side,
            },
            Pin::Center => ArrowStyle::CenterVertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    const ANCHOR: Size = Size::new(100.0, 40.0);

    fn offset(edge: Edge, px: f64) -> ArrowStyle {
        ArrowStyle::Offset { edge, px }
    }

    #[test]
    fn near_pin_subtracts_half_arrow() {
        let wide = Size::new(300.0, 80.0);
        let s = arrow_style(Placement::TopLeft, ANCHOR, wide, DEFAULT_ARROW_SIDE);
        assert_eq!(s, offset(Edge::Left, 47.5));
        assert_eq!(s.css_declarations(), [("left", "47.5px".to_string())]);
    }

    #[test]
    fn far_pin_subtracts_full_arrow() {
        let wide = Size::new(300.0, 80.0);
        let s = arrow_style(Placement::BottomRight, ANCHOR, wide, DEFAULT_ARROW_SIDE);
        assert_eq!(s.css_declarations(), [("right", "45px".to_string())]);
    }

    #[test]
    fn side_placements_measure_vertically() {
        let tall = Size::new(50.0, 200.0);
        assert_eq!(
            arrow_style(Placement::LeftTop, ANCHOR, tall, DEFAULT_ARROW_SIDE),
            offset(Edge::Bottom, 17.5)
        );
        assert_eq!(
            arrow_style(Placement::RightBottom, ANCHOR, tall, DEFAULT_ARROW_SIDE),
            offset(Edge::Top, 15.0)
        );
        assert_eq!(
            arrow_style(Placement::Right, ANCHOR, tall, DEFAULT_ARROW_SIDE),
            ArrowStyle::CenterVertical
        );
    }

    #[test]
    fn narrow_panel_centers() {
        let narrow = Size::new(80.0, 30.0);
        assert_eq!(
            arrow_style(Placement::TopRight, ANCHOR, narrow, DEFAULT_ARROW_SIDE),
            ArrowStyle::CenterHorizontal
        );
        assert_eq!(
            arrow_style(Placement::LeftBottom, ANCHOR, narrow, DEFAULT_ARROW_SIDE),
            ArrowStyle::CenterVertical
        );
        let css = ArrowStyle::CenterHorizontal.css_declarations();
        assert_eq!(css[0], ("left", "50%".to_string()));
        assert_eq!(css[3], ("transform", "translate(-50%, 0)".to_string()));
        let css = ArrowStyle::CenterVertical.css_declarations();
        assert_eq!(css[0], ("top", "50%".to_string()));
        assert_eq!(
            css[1],
            ("-webkit-transform", "translate(0, -50%)".to_string())
        );
    }
}
