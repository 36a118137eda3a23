// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: where to put a floating panel relative to its anchor.
//!
//! This crate is the pure half of anchored overlays (popovers, tooltips, menus).
//! It computes candidate positions and decorations; it does not measure elements
//! or move anything on screen. A positioning engine (a browser overlay layer, a
//! retained-mode UI, a test double) consumes the candidates and reports back which
//! one it used.
//!
//! ## Vocabulary
//!
//! - [`HorizontalAlign`] / [`VerticalAlign`]: per-axis requests such as `start` or `bottom`.
//! - [`Placement`]: combined shorthand such as `top-left`.
//! - [`PositionCandidate`]: an anchor attachment point ([`Origin`]), a panel
//!   attachment point ([`OverlayPoint`]) and a pixel offset.
//!
//! ## Modules
//!
//! - [`resolve`]: alignment → candidate, and the coarse inverse used for feedback.
//! - [`fallback`]: ordered fallback candidates around a preferred alignment.
//! - [`arrow`]: popover arrow offsets from measured anchor and panel sizes.
//! - [`screen_area`]: tooltip edge avoidance and tooltip candidates.
//!
//! ## Example
//!
//! ```
//! use understory_placement::{Placement, fallback::plan, resolve::infer};
//!
//! let placement: Placement = "top-left".parse().unwrap();
//! let (h, v) = placement.alignment();
//! let candidates = plan(h, v, false);
//! assert_eq!(candidates[0], understory_placement::resolve::resolve(h, v));
//!
//! // The engine picked the third candidate; derive decoration alignment from it.
//! let (dh, dv) = infer(candidates[2].overlay);
//! # let _ = (dh, dv);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod arrow;
pub mod error;
pub mod fallback;
pub mod resolve;
pub mod screen_area;
pub mod types;

pub use arrow::{ArrowStyle, Edge, arrow_style};
pub use error::{ParseError, parse_keyword};
pub use screen_area::{EdgeThresholds, ScreenAdjustment, ScreenArea, TooltipArrow, TooltipPlacement};
pub use types::{
    Direction, HorizontalAlign, HorizontalPos, Origin, OverlayPoint, Pin, Placement,
    PositionCandidate, Side, VerticalAlign, VerticalPos,
};
