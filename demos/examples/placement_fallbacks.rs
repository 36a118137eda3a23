// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fallback candidate lists for every popover placement.
//!
//! Prints the candidates a positioning engine would try, preferred first, and
//! checks that beside-the-anchor placements never fall back onto the anchor.
//!
//! Run:
//! - `cargo run -p understory_demos --example placement_fallbacks`

use understory_placement::fallback::plan;
use understory_placement::{HorizontalAlign, HorizontalPos, Placement, VerticalAlign};

fn main() {
    for placement in Placement::ALL {
        let (h, v) = placement.alignment();
        let candidates = plan(h, v, false);
        println!(
            "== {placement} ({h}, {v}): {} candidates ==",
            candidates.len()
        );
        for c in candidates.iter().take(4) {
            println!(
                "  origin=({:?}, {:?}) overlay=({:?}, {:?})",
                c.origin.x, c.origin.y, c.overlay.x, c.overlay.y
            );
        }

        if h == HorizontalAlign::Left || h == HorizontalAlign::Right {
            assert!(
                candidates
                    .iter()
                    .all(|c| c.origin.x != HorizontalPos::Center && c.origin.x != c.overlay.x),
                "{placement} fell back over the anchor"
            );
        }
        if v == VerticalAlign::Top || v == VerticalAlign::Bottom {
            assert!(
                candidates.iter().all(|c| c.origin.y != c.overlay.y),
                "{placement} fell back over the anchor"
            );
        }
    }

    let forced = plan(HorizontalAlign::Right, VerticalAlign::Center, true);
    println!("== forced right: {} candidate ==", forced.len());
    assert_eq!(forced.len(), 1);
}
