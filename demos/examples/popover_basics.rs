// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover lifecycle against a printing host.
//!
//! This example anchors a popover panel, opens it through the notification
//! channel, simulates the positioning engine falling back to the opposite side,
//! and closes it with the escape key.
//!
//! Run:
//! - `cargo run -p understory_demos --example popover_basics`

use kurbo::{Rect, Size};
use understory_overlay::{
    FloatingSurface, IdGenerator, Key, OverlayConfig, OverlayHost, Popover, PopoverAnchor,
    PopoverConfig, PopoverEvent, PositionChange, SurfaceEvent,
};
use understory_placement::resolve::resolve;
use understory_placement::{
    HorizontalAlign, Placement, PositionCandidate, VerticalAlign, VerticalPos,
};

struct PrintingSurface {
    attached: bool,
    candidates: Vec<PositionCandidate>,
}

impl FloatingSurface for PrintingSurface {
    fn attach(&mut self) {
        self.attached = true;
        println!("  surface: attach");
    }
    fn detach(&mut self) {
        self.attached = false;
        println!("  surface: detach");
    }
    fn dispose(&mut self) {
        println!("  surface: dispose");
    }
    fn has_attached(&self) -> bool {
        self.attached
    }
    fn set_positions(&mut self, candidates: &[PositionCandidate]) {
        self.candidates = candidates.to_vec();
        println!("  surface: {} candidates", candidates.len());
    }
    fn set_lock_alignment(&mut self, lock: bool) {
        println!("  surface: lock alignment = {lock}");
    }
    fn update_position(&mut self) {
        println!("  surface: update position");
    }
    fn reapply_last_position(&mut self) {
        println!("  surface: reapply last position");
    }
    fn pane_size(&self) -> Size {
        Size::new(240.0, 96.0)
    }
}

struct PrintingHost;

impl OverlayHost for PrintingHost {
    type Surface = PrintingSurface;

    fn create_surface(&mut self, config: &OverlayConfig) -> PrintingSurface {
        println!(
            "  host: create surface ({} candidates, backdrop={}, scroll={})",
            config.candidates.len(),
            config.has_backdrop,
            config.scroll_strategy
        );
        PrintingSurface {
            attached: false,
            candidates: config.candidates.clone(),
        }
    }

    fn anchor_rect(&self) -> Rect {
        Rect::new(40.0, 500.0, 120.0, 532.0)
    }

    fn viewport_size(&self) -> Size {
        Size::new(800.0, 600.0)
    }
}

fn main() {
    let mut ids = IdGenerator::new();
    let mut popover: Popover<&'static str> =
        Popover::with_config(ids.next_id(), PopoverConfig::at(Placement::BottomLeft));
    let mut anchor = PopoverAnchor::new(PrintingHost);
    anchor.attach(&mut popover).unwrap();

    println!("== Open ==");
    popover.open().unwrap();
    anchor.pump().unwrap();
    anchor.layout_settled();
    let classes: Vec<_> = popover.alignment_classes().class_names().collect();
    println!("  classes: {classes:?}");
    println!(
        "  arrow: {:?}",
        popover.arrow_style().map(|a| a.css_declarations())
    );

    println!("== Engine falls back above the anchor ==");
    let above = anchor
        .surface()
        .and_then(|s| {
            s.candidates
                .iter()
                .copied()
                .find(|c| c.origin.y == VerticalPos::Top)
        })
        .unwrap_or_else(|| resolve(HorizontalAlign::Start, VerticalAlign::Top));
    anchor.handle_surface_event(SurfaceEvent::PositionChanged(PositionChange {
        candidate: above,
        clipped: false,
    }));
    let classes: Vec<_> = popover.alignment_classes().class_names().collect();
    println!("  classes: {classes:?}");
    assert_eq!(classes, ["d-v-top", "d-h-start"]);

    println!("== Escape ==");
    anchor.handle_surface_event(SurfaceEvent::Keydown(Key::Escape));

    println!("== Reopen and close with a value ==");
    popover.toggle().unwrap();
    popover.close(Some("saved")).unwrap();
    anchor.pump().unwrap();

    let events = anchor.drain_events();
    println!("== Events ==\n  {events:?}");
    assert_eq!(
        events,
        vec![
            PopoverEvent::Opened,
            PopoverEvent::OverlayKeydown(Key::Escape),
            PopoverEvent::Closed(None),
            PopoverEvent::Opened,
            PopoverEvent::Closed(Some("saved")),
        ]
    );
}
