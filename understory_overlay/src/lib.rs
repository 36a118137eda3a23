// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlay --heading-base-level=0

//! Understory Overlay: lifecycle engines for anchored popovers and tooltips.
//!
//! This crate decides *when* a floating panel is shown, which candidates a
//! positioning engine receives, and how the panel is decorated once the engine
//! reports back. Placement math lives in [`understory_placement`]; measuring
//! elements and moving surfaces is left to an [`OverlayHost`].
//!
//! ## Pieces
//!
//! - [`Popover`]: the panel half. Holds a [`PopoverConfig`], turns actions into
//!   [`Notification`]s and observes open state and decoration.
//! - [`PopoverAnchor`]: the anchor half. Owns the floating surface, runs the
//!   open/close lifecycle and emits [`PopoverEvent`]s.
//! - [`notification`]: the single-consumer link between the two halves.
//! - [`Tooltip`]: a self-contained tooltip directive with delayed show/hide
//!   ([`VisibilityTimer`]) and screen-edge avoidance.
//!
//! Everything is single-threaded and deterministic. Host signals are pushed in
//! with `handle_surface_event`, time with `advance`, and outputs are pulled with
//! `drain_events`.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_overlay::{
//!     FloatingSurface, IdGenerator, OverlayConfig, OverlayHost, Popover, PopoverAnchor,
//!     PopoverEvent,
//! };
//! use understory_placement::PositionCandidate;
//!
//! struct Surface(bool);
//!
//! impl FloatingSurface for Surface {
//!     fn attach(&mut self) { self.0 = true; }
//!     fn detach(&mut self) { self.0 = false; }
//!     fn dispose(&mut self) { self.0 = false; }
//!     fn has_attached(&self) -> bool { self.0 }
//!     fn set_positions(&mut self, _: &[PositionCandidate]) {}
//!     fn set_lock_alignment(&mut self, _: bool) {}
//!     fn update_position(&mut self) {}
//!     fn reapply_last_position(&mut self) {}
//!     fn pane_size(&self) -> Size { Size::new(200.0, 80.0) }
//! }
//!
//! struct Host;
//!
//! impl OverlayHost for Host {
//!     type Surface = Surface;
//!     fn create_surface(&mut self, _: &OverlayConfig) -> Surface { Surface(false) }
//!     fn anchor_rect(&self) -> Rect { Rect::new(10.0, 10.0, 90.0, 30.0) }
//!     fn viewport_size(&self) -> Size { Size::new(800.0, 600.0) }
//! }
//!
//! let mut ids = IdGenerator::new();
//! let mut popover: Popover = Popover::new(ids.next_id());
//! let mut anchor = PopoverAnchor::new(Host);
//! anchor.attach(&mut popover).unwrap();
//!
//! popover.open().unwrap();
//! anchor.pump().unwrap();
//! assert!(popover.is_open());
//!
//! popover.close(None).unwrap();
//! anchor.pump().unwrap();
//! assert_eq!(anchor.drain_events(), [PopoverEvent::Opened, PopoverEvent::Closed(None)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod anchor;
pub mod error;
pub mod host;
pub mod ids;
pub mod notification;
pub mod popover;
pub mod timer;
pub mod tooltip;

pub use anchor::{PopoverAnchor, PopoverEvent, Subscriptions};
pub use error::OverlayError;
pub use host::{
    FloatingSurface, Key, OverlayConfig, OverlayHost, PositionChange, ScrollStrategy, SurfaceEvent,
};
pub use ids::{IdGenerator, WidgetId};
pub use notification::{Decoration, Notification, NotificationReceiver, NotificationSender, channel};
pub use popover::{AlignmentClasses, Effect, Popover, PopoverConfig, alignment_classes_for};
pub use timer::{Visibility, VisibilityTimer};
pub use tooltip::{
    PointerInput, PointerListeners, Tooltip, TooltipEvent, TooltipInstance, TooltipOptions,
    TooltipType, Trigger,
};
