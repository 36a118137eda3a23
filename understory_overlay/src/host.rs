// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the engines consume from the host positioning layer.
//!
//! ## Overview
//!
//! The engines never measure or move anything themselves. A host provides:
//!
//! - [`OverlayHost`]: measuring the anchor, the viewport size, the text
//!   direction, and creating floating surfaces from an [`OverlayConfig`].
//! - [`FloatingSurface`]: attaching, detaching and disposing one surface, and
//!   feeding it candidate positions.
//!
//! The host's asynchronous notifications (position changes, backdrop clicks,
//! key presses, detachments, finished animations) are delivered back to an
//! engine as [`SurfaceEvent`] values on the same event loop.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use kurbo::{Rect, Size};
use understory_placement::{Direction, ParseError, PositionCandidate, parse_keyword};

/// Backdrop class used when a popover does not name one.
pub const DEFAULT_BACKDROP_CLASS: &str = "cdk-overlay-transparent-backdrop";

/// How an open surface reacts to its anchor scrolling.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ScrollStrategy {
    /// Do nothing.
    Noop,
    /// Block page scrolling while open.
    Block,
    /// Follow the anchor.
    #[default]
    Reposition,
    /// Close the surface on scroll.
    Close,
}

impl ScrollStrategy {
    /// Every strategy.
    pub const ALL: [Self; 4] = [Self::Noop, Self::Block, Self::Reposition, Self::Close];

    const NAMES: [&'static str; 4] = ["noop", "block", "reposition", "close"];

    /// The keyword for this strategy.
    pub const fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

impl FromStr for ScrollStrategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword("scrollStrategy", s, &Self::ALL, &Self::NAMES)
    }
}

impl fmt::Display for ScrollStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a host needs to create a floating surface.
///
/// Built once per surface and left untouched until the surface is disposed;
/// later candidate lists and alignment locks go through
/// [`FloatingSurface::set_positions`] and [`FloatingSurface::set_lock_alignment`].
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Candidate positions, preferred first.
    pub candidates: Vec<PositionCandidate>,
    /// Whether a backdrop is drawn behind the surface.
    pub has_backdrop: bool,
    /// Class applied to the backdrop.
    pub backdrop_class: String,
    /// Scroll behavior while open.
    pub scroll_strategy: ScrollStrategy,
    /// Keep the first resolved position instead of re-running fallbacks on scroll/resize.
    pub lock_alignment: bool,
    /// Only the first candidate is ever used.
    pub force_alignment: bool,
    /// Text direction of the surface.
    pub direction: Direction,
    /// Optional class applied to the surface pane.
    pub panel_class: Option<String>,
}

/// The host positioning/rendering layer for one anchor element.
pub trait OverlayHost {
    /// Surface type created by this host.
    type Surface: FloatingSurface;

    /// Create a detached floating surface.
    fn create_surface(&mut self, config: &OverlayConfig) -> Self::Surface;

    /// The anchor's bounding box in viewport coordinates.
    fn anchor_rect(&self) -> Rect;

    /// Size of the viewport.
    fn viewport_size(&self) -> Size;

    /// Text direction around the anchor.
    fn direction(&self) -> Direction {
        Direction::Ltr
    }
}

/// A floating surface created by an [`OverlayHost`].
pub trait FloatingSurface {
    /// Show the panel content in the surface.
    fn attach(&mut self);
    /// Remove the panel content from the surface, keeping the surface for reuse.
    fn detach(&mut self);
    /// Tear the surface down; it is never used again.
    fn dispose(&mut self);
    /// Whether content is currently attached.
    fn has_attached(&self) -> bool;
    /// Replace the candidate list.
    fn set_positions(&mut self, candidates: &[PositionCandidate]);
    /// Whether the position chosen at open time is kept on scroll and resize.
    ///
    /// Replaces [`OverlayConfig::lock_alignment`] for the rest of the surface's life.
    fn set_lock_alignment(&mut self, lock: bool);
    /// Recompute the position from the current candidate list.
    fn update_position(&mut self);
    /// Re-apply the last chosen candidate without re-running fallbacks.
    fn reapply_last_position(&mut self);
    /// Measured size of the surface pane.
    fn pane_size(&self) -> Size;
}

/// A key press delivered to a surface.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// The escape key.
    Escape,
    /// Any other key, by key code.
    Other(u32),
}

impl Key {
    /// Key code of the escape key.
    pub const ESCAPE_CODE: u32 = 27;

    /// Classify a raw key code.
    pub const fn from_code(code: u32) -> Self {
        if code == Self::ESCAPE_CODE {
            Self::Escape
        } else {
            Self::Other(code)
        }
    }
}

/// The candidate the positioning engine settled on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionChange {
    /// The candidate in use.
    pub candidate: PositionCandidate,
    /// Whether a scrollable ancestor clips the surface at this position.
    pub clipped: bool,
}

/// Notification from the host about a surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// The engine (re)selected a candidate, e.g. after scroll or resize.
    PositionChanged(PositionChange),
    /// The backdrop was clicked.
    BackdropClick,
    /// A key was pressed while the surface had focus.
    Keydown(Key),
    /// The content was detached, possibly by the host itself.
    Detached,
    /// An open or close animation started.
    AnimationStart,
    /// An open or close animation finished.
    AnimationDone,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn scroll_strategy_keywords() {
        let close = "close".parse::<ScrollStrategy>();
        assert_eq!(close, Ok(ScrollStrategy::Close));
        let err = "smooth".parse::<ScrollStrategy>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid scrollStrategy: 'smooth'. Valid options are 'noop', 'block', 'reposition', 'close'."
        );
    }

    #[test]
    fn escape_key_code() {
        assert_eq!(Key::from_code(27), Key::Escape);
        assert_eq!(Key::from_code(13), Key::Other(13));
    }
}
