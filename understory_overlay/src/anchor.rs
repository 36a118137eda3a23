// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover anchor: the open/close lifecycle of one floating surface.
//!
//! ## States
//!
//! The anchor is either closed (initial) or open. Transitions:
//!
//! - [`open`](PopoverAnchor::open): detach a stale surface if one is still
//!   attached, create the surface on first use, attach it, subscribe to backdrop,
//!   escape and detachment signals, emit [`PopoverEvent::Opened`]. A no-op while
//!   already open.
//! - [`close`](PopoverAnchor::close): emit [`PopoverEvent::Closed`] with the
//!   value and detach. A no-op while closed.
//! - A [`SurfaceEvent::Detached`] from the host closes without a value.
//! - [`attach`](PopoverAnchor::attach) to a new panel tears everything down and
//!   starts closed.
//!
//! The surface is created once per anchoring and reused across open/close
//! cycles. Surface-level configuration changes rebuild it once closed.
//!
//! ## Subscriptions
//!
//! Every signal the anchor reacts to has a bit in [`Subscriptions`]. Backdrop and
//! escape bits live only while open; everything is cleared by
//! [`destroy`](PopoverAnchor::destroy) and by dropping the anchor, so no host
//! event can act on a surface that has gone away.
//!
//! ## Deferred measurement
//!
//! The arrow depends on the laid-out pane size, which is only known after the
//! host has rendered the open surface. `open` marks a measurement as pending and
//! the host calls [`layout_settled`](PopoverAnchor::layout_settled) on a later
//! tick.

use alloc::vec::Vec;

use tracing::{debug, trace, warn};
use understory_placement::Direction;
use understory_placement::arrow::{DEFAULT_ARROW_SIDE, arrow_style};
use understory_placement::fallback::plan;
use understory_placement::resolve::infer;

use crate::error::OverlayError;
use crate::host::{
    DEFAULT_BACKDROP_CLASS, FloatingSurface, Key, OverlayConfig, OverlayHost, PositionChange,
    SurfaceEvent,
};
use crate::ids::WidgetId;
use crate::notification::{Notification, NotificationReceiver, channel};
use crate::popover::{AlignmentClasses, Popover, PopoverConfig, alignment_classes_for};

bitflags::bitflags! {
    /// Signals an engine is currently listening to.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Subscriptions: u8 {
        /// Notifications from the anchored panel.
        const NOTIFICATIONS    = 0b0000_0001;
        /// Position changes of the surface.
        const POSITION_CHANGES = 0b0000_0010;
        /// Backdrop clicks.
        const BACKDROP         = 0b0000_0100;
        /// Keydown events (escape closes).
        const KEYDOWN          = 0b0000_1000;
        /// Detachments of the surface.
        const DETACHMENTS      = 0b0001_0000;
        /// Pointer listeners on the anchor element.
        const POINTER          = 0b0010_0000;
    }
}

/// Output events of a popover anchor.
#[derive(Clone, Debug, PartialEq)]
pub enum PopoverEvent<V = ()> {
    /// The popover opened.
    Opened,
    /// The popover closed, with the value passed to `close`, if any.
    Closed(Option<V>),
    /// The backdrop was clicked (the popover closes right after).
    BackdropClicked,
    /// A key was pressed while the popover was open.
    OverlayKeydown(Key),
    /// The opening animation finished.
    AfterOpen,
    /// The closing animation finished.
    AfterClose,
}

/// Build the surface configuration for a popover.
pub fn overlay_config(config: &PopoverConfig, direction: Direction) -> OverlayConfig {
    OverlayConfig {
        candidates: plan(
            config.horizontal_align,
            config.vertical_align,
            config.force_alignment,
        ),
        has_backdrop: config.has_backdrop,
        backdrop_class: if config.backdrop_class.is_empty() {
            DEFAULT_BACKDROP_CLASS.into()
        } else {
            config.backdrop_class.clone()
        },
        scroll_strategy: config.scroll_strategy,
        lock_alignment: config.lock_alignment,
        force_alignment: config.force_alignment,
        direction,
        panel_class: None,
    }
}

/// Anchors a [`Popover`] to an element and owns its floating surface.
pub struct PopoverAnchor<H: OverlayHost, V = ()> {
    host: H,
    panel: Option<WidgetId>,
    config: PopoverConfig,
    link: Option<NotificationReceiver<V>>,
    surface: Option<H::Surface>,
    open: bool,
    subscriptions: Subscriptions,
    destroy_on_detach: bool,
    measure_pending: bool,
    events: Vec<PopoverEvent<V>>,
}

impl<H: OverlayHost, V> core::fmt::Debug for PopoverAnchor<H, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PopoverAnchor")
            .field("panel", &self.panel)
            .field("open", &self.open)
            .field("has_surface", &self.surface.is_some())
            .field("subscriptions", &self.subscriptions)
            .finish_non_exhaustive()
    }
}

impl<H: OverlayHost, V> PopoverAnchor<H, V> {
    /// An anchor over `host` with no panel attached.
    pub fn new(host: H) -> Self {
        Self {
            host,
            panel: None,
            config: PopoverConfig::default(),
            link: None,
            surface: None,
            open: false,
            subscriptions: Subscriptions::empty(),
            destroy_on_detach: false,
            measure_pending: false,
            events: Vec::new(),
        }
    }

    /// The host this anchor positions against.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The live surface, if one has been created.
    pub fn surface(&self) -> Option<&H::Surface> {
        self.surface.as_ref()
    }

    /// Identifier of the anchored panel.
    pub fn panel(&self) -> Option<WidgetId> {
        self.panel
    }

    /// Signals currently subscribed.
    pub fn subscriptions(&self) -> Subscriptions {
        self.subscriptions
    }

    /// Whether the popover is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Anchor `popover` to this element.
    ///
    /// Any previous panel is released and its surface disposed; the anchor starts
    /// closed with a fresh notification channel.
    pub fn attach(&mut self, popover: &mut Popover<V>) -> Result<(), OverlayError> {
        if popover.is_destroyed() {
            warn!(id = %popover.id(), "refusing to anchor a destroyed popover");
            return Err(OverlayError::InvalidPanel);
        }
        self.destroy_surface();
        if let Some(old) = self.link.take() {
            old.dispose();
        }
        let (tx, rx) = channel();
        rx.publish_classes(AlignmentClasses::for_placement(popover.config().placement));
        popover.link(tx);
        self.link = Some(rx);
        self.panel = Some(popover.id());
        self.config = popover.config().clone();
        self.subscriptions = Subscriptions::NOTIFICATIONS;
        debug!(id = %popover.id(), placement = %self.config.placement, "popover anchored");
        Ok(())
    }

    /// Open the popover.
    pub fn open(&mut self) -> Result<(), OverlayError> {
        self.ensure_anchored()?;
        if self.open {
            trace!("open ignored: already open");
            return Ok(());
        }
        if let Some(surface) = self.surface.as_mut()
            && surface.has_attached()
        {
            surface.detach();
        }
        if self.surface.is_none() {
            let config = overlay_config(&self.config, self.host.direction());
            self.surface = Some(self.host.create_surface(&config));
            self.subscriptions |= Subscriptions::POSITION_CHANGES;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.attach();
        }
        self.measure_pending = true;
        self.subscriptions |=
            Subscriptions::BACKDROP | Subscriptions::KEYDOWN | Subscriptions::DETACHMENTS;
        self.save_opened_state();
        Ok(())
    }

    /// Close the popover with an optional result value.
    pub fn close(&mut self, value: Option<V>) -> Result<(), OverlayError> {
        self.ensure_anchored()?;
        if self.surface.is_some() {
            self.save_closed_state(value);
            self.detach_surface();
        }
        Ok(())
    }

    /// Close if open, open if closed.
    pub fn toggle(&mut self) -> Result<(), OverlayError> {
        if self.open {
            self.close(None)
        } else {
            self.open()
        }
    }

    /// Re-apply the last resolved position without changing state.
    pub fn realign(&mut self) -> Result<(), OverlayError> {
        self.ensure_anchored()?;
        if let Some(surface) = self.surface.as_mut() {
            surface.reapply_last_position();
        }
        Ok(())
    }

    /// Apply every notification the panel has queued, in order.
    ///
    /// If the panel has been destroyed the anchor releases it as
    /// [`destroy`](Self::destroy) would.
    pub fn pump(&mut self) -> Result<(), OverlayError> {
        if self.link.as_ref().is_some_and(|l| l.is_disposed()) {
            debug!(panel = ?self.panel, "panel destroyed; releasing it");
            self.destroy();
            return Ok(());
        }
        while let Some(notification) = self.link.as_ref().and_then(|l| l.try_recv()) {
            trace!(action = notification.action(), "popover notification");
            match notification {
                Notification::Open => self.open()?,
                Notification::Close(value) => self.close(value)?,
                Notification::Toggle => self.toggle()?,
                Notification::Realign => self.realign()?,
                Notification::UpdateConfig(config) => {
                    self.config = config;
                    self.destroy_once_closed();
                }
                Notification::Reposition(config) => {
                    self.config = config;
                    self.reposition();
                }
            }
        }
        Ok(())
    }

    /// React to a signal from the host about the surface.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::PositionChanged(change) => {
                if self.subscriptions.contains(Subscriptions::POSITION_CHANGES) {
                    self.apply_position_change(change);
                }
            }
            SurfaceEvent::BackdropClick => {
                if self.subscriptions.contains(Subscriptions::BACKDROP) {
                    self.events.push(PopoverEvent::BackdropClicked);
                    self.close_from_surface();
                }
            }
            SurfaceEvent::Keydown(key) => {
                if self.subscriptions.contains(Subscriptions::KEYDOWN) {
                    self.events.push(PopoverEvent::OverlayKeydown(key));
                    if key == Key::Escape {
                        self.close_from_surface();
                    }
                }
            }
            SurfaceEvent::Detached => {
                if self.subscriptions.contains(Subscriptions::DETACHMENTS) {
                    self.save_closed_state(None);
                    if self.destroy_on_detach {
                        self.destroy_surface();
                    }
                }
            }
            SurfaceEvent::AnimationStart => {}
            SurfaceEvent::AnimationDone => {
                if self.surface.is_some() {
                    self.events.push(if self.open {
                        PopoverEvent::AfterOpen
                    } else {
                        PopoverEvent::AfterClose
                    });
                }
            }
        }
    }

    /// Measure the open surface and publish the arrow style.
    ///
    /// Call on the tick after opening, once layout has settled.
    pub fn layout_settled(&mut self) {
        if !self.measure_pending {
            return;
        }
        self.measure_pending = false;
        let (Some(surface), Some(link)) = (self.surface.as_ref(), self.link.as_ref()) else {
            return;
        };
        if !self.open {
            return;
        }
        let style = arrow_style(
            self.config.placement,
            self.host.anchor_rect().size(),
            surface.pane_size(),
            DEFAULT_ARROW_SIDE,
        );
        link.publish_arrow(style);
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<PopoverEvent<V>> {
        core::mem::take(&mut self.events)
    }

    /// Dispose the surface, drop every subscription and close the panel link.
    pub fn destroy(&mut self) {
        self.destroy_surface();
        if let Some(link) = self.link.take() {
            link.dispose();
        }
        self.panel = None;
        self.subscriptions = Subscriptions::empty();
    }

    fn ensure_anchored(&self) -> Result<(), OverlayError> {
        if self.link.as_ref().is_some_and(|l| !l.is_disposed()) {
            Ok(())
        } else {
            Err(OverlayError::Unanchored)
        }
    }

    fn close_from_surface(&mut self) {
        self.save_closed_state(None);
        self.detach_surface();
    }

    fn detach_surface(&mut self) {
        if let Some(surface) = self.surface.as_mut()
            && surface.has_attached()
        {
            surface.detach();
        }
        if self.destroy_on_detach {
            self.destroy_surface();
        }
    }

    fn apply_position_change(&mut self, change: PositionChange) {
        let (h, v) = infer(change.candidate.overlay);
        let classes = alignment_classes_for(self.config.placement, h, v);
        trace!(?classes, "popover position changed");
        if let Some(link) = &self.link {
            link.publish_classes(classes);
        }
    }

    fn reposition(&mut self) {
        if let Some(link) = &self.link {
            link.publish_classes(AlignmentClasses::for_placement(self.config.placement));
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let candidates = plan(
            self.config.horizontal_align,
            self.config.vertical_align,
            self.config.force_alignment,
        );
        surface.set_lock_alignment(self.config.lock_alignment);
        surface.set_positions(&candidates);
        if self.open {
            surface.update_position();
        }
    }

    fn destroy_once_closed(&mut self) {
        if self.open && self.surface.is_some() {
            self.destroy_on_detach = true;
        } else {
            self.destroy_surface();
        }
    }

    fn destroy_surface(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            self.save_closed_state(None);
            surface.dispose();
            debug!(panel = ?self.panel, "popover surface disposed");
        }
        self.subscriptions &= Subscriptions::NOTIFICATIONS;
        self.destroy_on_detach = false;
        self.measure_pending = false;
    }

    fn save_opened_state(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        if let Some(link) = &self.link {
            link.publish_open(true);
        }
        debug!(panel = ?self.panel, "popover opened");
        self.events.push(PopoverEvent::Opened);
    }

    fn save_closed_state(&mut self, value: Option<V>) {
        if !self.open {
            return;
        }
        self.open = false;
        self.subscriptions
            .remove(Subscriptions::BACKDROP | Subscriptions::KEYDOWN);
        if let Some(link) = &self.link {
            link.publish_open(false);
        }
        debug!(panel = ?self.panel, "popover closed");
        self.events.push(PopoverEvent::Closed(value));
    }
}

impl<H: OverlayHost, V> Drop for PopoverAnchor<H, V> {
    fn drop(&mut self) {
        self.destroy();
    }
}
