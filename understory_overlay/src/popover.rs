// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The popover panel: configuration, action requests and decoration.
//!
//! ## Overview
//!
//! A [`Popover`] is the panel half of a popover. It owns a [`PopoverConfig`] and,
//! once an anchor has attached it, the sender end of a
//! [notification channel](crate::notification). It never touches a surface:
//!
//! - Actions ([`open`](Popover::open), [`close`](Popover::close), ...) become
//!   notifications and fail with [`OverlayError::Unanchored`] before anchoring.
//! - Setters return an [`Effect`] describing the side effect the change needs,
//!   and forward that effect to the anchor if there is one.
//! - Open state and [decoration](crate::notification::Decoration) are observed
//!   from what the anchor publishes.

use alloc::string::String;

use tracing::trace;
use understory_placement::{ArrowStyle, HorizontalAlign, Pin, Placement, Side, VerticalAlign};

use crate::error::OverlayError;
use crate::host::ScrollStrategy;
use crate::ids::WidgetId;
use crate::notification::{Notification, NotificationSender};

/// Configuration of a popover panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PopoverConfig {
    /// Combined placement shorthand.
    pub placement: Placement,
    /// Horizontal alignment actually requested from the engine.
    pub horizontal_align: HorizontalAlign,
    /// Vertical alignment actually requested from the engine.
    pub vertical_align: VerticalAlign,
    /// Always use the requested alignment, with no fallbacks.
    pub force_alignment: bool,
    /// Keep the alignment chosen at open time while scrolling or resizing.
    pub lock_alignment: bool,
    /// How the open popover reacts to scrolling.
    pub scroll_strategy: ScrollStrategy,
    /// Whether a backdrop is drawn (clicking it closes the popover).
    pub has_backdrop: bool,
    /// Backdrop class; empty selects [`DEFAULT_BACKDROP_CLASS`](crate::host::DEFAULT_BACKDROP_CLASS).
    pub backdrop_class: String,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        let placement = Placement::default();
        let (horizontal_align, vertical_align) = placement.alignment();
        Self {
            placement,
            horizontal_align,
            vertical_align,
            force_alignment: false,
            lock_alignment: true,
            scroll_strategy: ScrollStrategy::Reposition,
            has_backdrop: false,
            backdrop_class: String::new(),
        }
    }
}

impl PopoverConfig {
    /// Default configuration at `placement`.
    pub fn at(placement: Placement) -> Self {
        let (horizontal_align, vertical_align) = placement.alignment();
        Self {
            placement,
            horizontal_align,
            vertical_align,
            ..Self::default()
        }
    }
}

/// Side effect required by a configuration change.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// The candidate list must be rebuilt.
    Reposition,
    /// The floating surface must be rebuilt once closed.
    UpdateConfig,
}

bitflags::bitflags! {
    /// CSS alignment classes applied to a popover panel.
    ///
    /// Every placement sets exactly one `V_*` and one `H_*` flag.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AlignmentClasses: u16 {
        /// `d-v-top`
        const V_TOP    = 1 << 0;
        /// `d-v-start`
        const V_START  = 1 << 1;
        /// `d-v-center`
        const V_CENTER = 1 << 2;
        /// `d-v-end`
        const V_END    = 1 << 3;
        /// `d-v-bottom`
        const V_BOTTOM = 1 << 4;
        /// `d-h-left`
        const H_LEFT   = 1 << 5;
        /// `d-h-start`
        const H_START  = 1 << 6;
        /// `d-h-center`
        const H_CENTER = 1 << 7;
        /// `d-h-end`
        const H_END    = 1 << 8;
        /// `d-h-right`
        const H_RIGHT  = 1 << 9;
    }
}

const CLASS_NAMES: [(AlignmentClasses, &str); 10] = [
    (AlignmentClasses::V_TOP, "d-v-top"),
    (AlignmentClasses::V_START, "d-v-start"),
    (AlignmentClasses::V_CENTER, "d-v-center"),
    (AlignmentClasses::V_END, "d-v-end"),
    (AlignmentClasses::V_BOTTOM, "d-v-bottom"),
    (AlignmentClasses::H_LEFT, "d-h-left"),
    (AlignmentClasses::H_START, "d-h-start"),
    (AlignmentClasses::H_CENTER, "d-h-center"),
    (AlignmentClasses::H_END, "d-h-end"),
    (AlignmentClasses::H_RIGHT, "d-h-right"),
];

impl AlignmentClasses {
    /// Classes for a panel shown at `placement`.
    pub fn for_placement(placement: Placement) -> Self {
        let lead = match placement.side() {
            Side::Top => Self::V_TOP,
            Side::Bottom => Self::V_BOTTOM,
            Side::Left => Self::H_LEFT,
            Side::Right => Self::H_RIGHT,
        };
        let pin = match (placement.side().is_vertical(), placement.pin()) {
            (true, Pin::Near) => Self::H_START,
            (true, Pin::Center) => Self::H_CENTER,
            (true, Pin::Far) => Self::H_END,
            (false, Pin::Near) => Self::V_START,
            (false, Pin::Center) => Self::V_CENTER,
            (false, Pin::Far) => Self::V_END,
        };
        lead | pin
    }

    /// CSS class names of the set flags.
    pub fn class_names(self) -> impl Iterator<Item = &'static str> {
        CLASS_NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

/// Classes for `placement` after the engine reported coarse alignment `(h, v)`.
///
/// When the engine fell back to the opposite side, the placement's leading side
/// is flipped before deriving classes; pins are kept.
pub fn alignment_classes_for(
    placement: Placement,
    h: HorizontalAlign,
    v: VerticalAlign,
) -> AlignmentClasses {
    let mut side = placement.side();
    match (h, side) {
        (HorizontalAlign::Right, Side::Left) => side = Side::Right,
        (HorizontalAlign::Left, Side::Right) => side = Side::Left,
        _ => {}
    }
    match (v, side) {
        (VerticalAlign::Top, Side::Bottom) => side = Side::Top,
        (VerticalAlign::Bottom, Side::Top) => side = Side::Bottom,
        _ => {}
    }
    AlignmentClasses::for_placement(placement.with_side(side))
}

/// A popover panel.
#[derive(Debug)]
pub struct Popover<V = ()> {
    id: WidgetId,
    config: PopoverConfig,
    link: Option<NotificationSender<V>>,
    destroyed: bool,
}

impl<V> Popover<V> {
    /// A panel with default configuration.
    pub fn new(id: WidgetId) -> Self {
        Self::with_config(id, PopoverConfig::default())
    }

    /// A panel with the given configuration.
    pub fn with_config(id: WidgetId, config: PopoverConfig) -> Self {
        Self {
            id,
            config,
            link: None,
            destroyed: false,
        }
    }

    /// The panel's identifier.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Current configuration.
    pub fn config(&self) -> &PopoverConfig {
        &self.config
    }

    /// Whether an anchor has attached this panel and is still alive.
    pub fn is_anchored(&self) -> bool {
        self.link.as_ref().is_some_and(|l| !l.is_disposed())
    }

    /// Whether [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Request the anchor to open the panel.
    pub fn open(&self) -> Result<(), OverlayError> {
        self.dispatch_action(Notification::Open)
    }

    /// Request the anchor to close the panel with an optional result.
    pub fn close(&self, value: Option<V>) -> Result<(), OverlayError> {
        self.dispatch_action(Notification::Close(value))
    }

    /// Request the anchor to toggle the panel.
    pub fn toggle(&self) -> Result<(), OverlayError> {
        self.dispatch_action(Notification::Toggle)
    }

    /// Request the anchor to re-apply the last position.
    pub fn realign(&self) -> Result<(), OverlayError> {
        self.dispatch_action(Notification::Realign)
    }

    /// Whether the anchor reports the panel as open.
    pub fn is_open(&self) -> bool {
        self.link.as_ref().is_some_and(NotificationSender::is_open)
    }

    /// Alignment classes to draw.
    ///
    /// Until an anchor reports a resolved position this is derived from the
    /// configured placement.
    pub fn alignment_classes(&self) -> AlignmentClasses {
        match &self.link {
            Some(link) if !link.decoration().classes.is_empty() => link.decoration().classes,
            _ => AlignmentClasses::for_placement(self.config.placement),
        }
    }

    /// Arrow style, once the anchor has measured the open panel.
    pub fn arrow_style(&self) -> Option<ArrowStyle> {
        self.link.as_ref().and_then(|l| l.decoration().arrow)
    }

    /// Set the placement shorthand; also sets both axis alignments.
    pub fn set_placement(&mut self, placement: Placement) -> Effect {
        if self.config.placement == placement {
            return Effect::None;
        }
        self.config.placement = placement;
        let (h, v) = placement.alignment();
        self.config.horizontal_align = h;
        self.config.vertical_align = v;
        self.notify(Effect::Reposition)
    }

    /// Override the horizontal alignment.
    pub fn set_horizontal_align(&mut self, align: HorizontalAlign) -> Effect {
        if self.config.horizontal_align == align {
            return Effect::None;
        }
        self.config.horizontal_align = align;
        self.notify(Effect::Reposition)
    }

    /// Override the vertical alignment.
    pub fn set_vertical_align(&mut self, align: VerticalAlign) -> Effect {
        if self.config.vertical_align == align {
            return Effect::None;
        }
        self.config.vertical_align = align;
        self.notify(Effect::Reposition)
    }

    /// Set whether fallbacks are disabled.
    pub fn set_force_alignment(&mut self, force: bool) -> Effect {
        if self.config.force_alignment == force {
            return Effect::None;
        }
        self.config.force_alignment = force;
        self.notify(Effect::Reposition)
    }

    /// Set whether the alignment is locked after opening.
    pub fn set_lock_alignment(&mut self, lock: bool) -> Effect {
        if self.config.lock_alignment == lock {
            return Effect::None;
        }
        self.config.lock_alignment = lock;
        self.notify(Effect::Reposition)
    }

    /// Set the scroll strategy.
    pub fn set_scroll_strategy(&mut self, strategy: ScrollStrategy) -> Effect {
        if self.config.scroll_strategy == strategy {
            return Effect::None;
        }
        self.config.scroll_strategy = strategy;
        self.notify(Effect::UpdateConfig)
    }

    /// Set whether a backdrop is drawn.
    pub fn set_has_backdrop(&mut self, has_backdrop: bool) -> Effect {
        if self.config.has_backdrop == has_backdrop {
            return Effect::None;
        }
        self.config.has_backdrop = has_backdrop;
        self.notify(Effect::UpdateConfig)
    }

    /// Set the backdrop class.
    pub fn set_backdrop_class(&mut self, class: &str) -> Effect {
        if self.config.backdrop_class == class {
            return Effect::None;
        }
        self.config.backdrop_class = class.into();
        self.notify(Effect::UpdateConfig)
    }

    /// Tear down the panel; its anchor link is closed and it cannot be anchored again.
    pub fn destroy(&mut self) {
        if let Some(link) = self.link.take() {
            link.dispose();
        }
        self.destroyed = true;
    }

    pub(crate) fn link(&mut self, sender: NotificationSender<V>) {
        self.link = Some(sender);
    }

    fn notify(&self, effect: Effect) -> Effect {
        let notification = match effect {
            Effect::None => return effect,
            Effect::Reposition => Notification::Reposition(self.config.clone()),
            Effect::UpdateConfig => Notification::UpdateConfig(self.config.clone()),
        };
        // Config changes before anchoring are picked up when an anchor attaches.
        if let Some(link) = &self.link
            && link.dispatch(notification).is_err()
        {
            trace!(id = %self.id, "anchor gone; config change not forwarded");
        }
        effect
    }

    fn dispatch_action(&self, notification: Notification<V>) -> Result<(), OverlayError> {
        let link = self.link.as_ref().ok_or(OverlayError::Unanchored)?;
        link.dispatch(notification)
            .map_err(|_| OverlayError::Unanchored)
    }
}
