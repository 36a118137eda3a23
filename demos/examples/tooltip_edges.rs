// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip screen-edge avoidance and delayed show/hide.
//!
//! Moves one anchor through the four screen areas and prints the placement,
//! arrow and main candidate the tooltip hands to the positioning engine. Then
//! drives a hover with show and hide delays on an explicit clock.
//!
//! Run:
//! - `cargo run -p understory_demos --example tooltip_edges`

use std::time::Duration;

use kurbo::{Rect, Size};
use understory_overlay::{
    FloatingSurface, OverlayConfig, OverlayHost, PointerInput, Tooltip, TooltipEvent,
    TooltipOptions, Visibility,
};
use understory_placement::{PositionCandidate, ScreenArea, TooltipArrow, TooltipPlacement};

struct Surface {
    attached: bool,
}

impl FloatingSurface for Surface {
    fn attach(&mut self) {
        self.attached = true;
    }
    fn detach(&mut self) {
        self.attached = false;
    }
    fn dispose(&mut self) {
        self.attached = false;
    }
    fn has_attached(&self) -> bool {
        self.attached
    }
    fn set_positions(&mut self, candidates: &[PositionCandidate]) {
        let main = candidates[0];
        println!(
            "  main: origin=({:?}, {:?}) overlay=({:?}, {:?}) offset=({}, {})",
            main.origin.x,
            main.origin.y,
            main.overlay.x,
            main.overlay.y,
            main.offset.x,
            main.offset.y
        );
    }
    fn set_lock_alignment(&mut self, _: bool) {}
    fn update_position(&mut self) {}
    fn reapply_last_position(&mut self) {}
    fn pane_size(&self) -> Size {
        Size::new(180.0, 40.0)
    }
}

struct Host {
    anchor: Rect,
}

impl OverlayHost for Host {
    type Surface = Surface;

    fn create_surface(&mut self, _: &OverlayConfig) -> Surface {
        Surface { attached: false }
    }

    fn anchor_rect(&self) -> Rect {
        self.anchor
    }

    fn viewport_size(&self) -> Size {
        Size::new(1280.0, 800.0)
    }
}

fn main() {
    let corners = [
        (Rect::new(100.0, 100.0, 180.0, 124.0), ScreenArea::Main, TooltipArrow::BottomAfter),
        (Rect::new(1200.0, 100.0, 1260.0, 124.0), ScreenArea::Right, TooltipArrow::BottomBefore),
        (Rect::new(100.0, 760.0, 180.0, 784.0), ScreenArea::Bottom, TooltipArrow::TopAfter),
        (Rect::new(1200.0, 760.0, 1260.0, 784.0), ScreenArea::BottomRight, TooltipArrow::TopBefore),
    ];
    for (anchor, area, arrow) in corners {
        let mut tooltip = Tooltip::new(Host { anchor });
        tooltip.set_message("Saved to drafts");
        tooltip.show(None);
        let adjustment = tooltip.adjustment();
        println!(
            "== {area:?}: bottom -> {} (arrow {}) ==",
            adjustment.placement,
            adjustment.arrow.as_str()
        );
        assert_eq!(adjustment.area, area);
        assert_eq!(tooltip.instance().map(|i| i.arrow()), Some(arrow));
    }

    println!("== Right placement near the right edge ==");
    let mut tooltip = Tooltip::new(Host {
        anchor: Rect::new(1200.0, 100.0, 1260.0, 124.0),
    });
    tooltip.set_message("Flipped");
    tooltip.set_placement(TooltipPlacement::Right);
    tooltip.show(None);
    assert_eq!(tooltip.adjustment().placement, TooltipPlacement::Left);

    println!("== Hover with delays ==");
    let options = TooltipOptions {
        show_delay: Duration::from_millis(300),
        hide_delay: Duration::from_millis(100),
        ..TooltipOptions::default()
    };
    let mut tooltip = Tooltip::with_options(
        Host {
            anchor: Rect::new(100.0, 100.0, 180.0, 124.0),
        },
        options,
    );
    tooltip.set_message("Hovered");
    tooltip.handle_pointer(PointerInput::MouseEnter);
    for ms in [100, 300, 350] {
        tooltip.advance(Duration::from_millis(ms));
        println!("  t={ms}ms visible={}", tooltip.is_visible());
    }
    tooltip.handle_pointer(PointerInput::MouseLeave);
    tooltip.advance(Duration::from_millis(450));
    println!("  t=450ms visible={}", tooltip.is_visible());
    assert_eq!(
        tooltip.drain_events(),
        [
            TooltipEvent::VisibilityChanged(Visibility::Visible),
            TooltipEvent::VisibilityChanged(Visibility::Hidden),
        ]
    );
}
