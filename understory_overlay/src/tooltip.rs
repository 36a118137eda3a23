// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip directive: a message panel shown next to an anchor on hover or click.
//!
//! ## Overview
//!
//! A [`Tooltip`] owns one lazily created floating surface and, while shown, a
//! [`TooltipInstance`] holding the panel's message, classes, arrow and
//! [`VisibilityTimer`]. Input arrives three ways:
//!
//! - [`handle_pointer`](Tooltip::handle_pointer) for pointer input on the anchor
//!   and clicks anywhere on the page.
//! - [`handle_surface_event`](Tooltip::handle_surface_event) for host signals.
//! - [`advance`](Tooltip::advance) with the current time, which fires due
//!   show/hide transitions.
//!
//! Delays passed to [`show`](Tooltip::show) and [`hide`](Tooltip::hide) run from
//! the time of the last `advance`.
//!
//! ## Placement
//!
//! Every time the tooltip is shown the anchor is classified into a
//! [`ScreenArea`]; near the right or bottom viewport edge the requested
//! placement is overridden (see [`adjust`]) and the engine receives a main and a
//! fallback candidate (see [`tooltip_positions`]).

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use tracing::{debug, trace};
use understory_placement::screen_area::{adjust, arrow_for_change, tooltip_positions};
use understory_placement::{
    EdgeThresholds, ParseError, ScreenAdjustment, ScreenArea, TooltipArrow, TooltipPlacement,
    parse_keyword,
};

use crate::anchor::Subscriptions;
use crate::host::{FloatingSurface, OverlayConfig, OverlayHost, ScrollStrategy, SurfaceEvent};
use crate::timer::{Visibility, VisibilityTimer};

/// Class applied to every tooltip surface pane.
pub const TOOLTIP_PANEL_CLASS: &str = "d-tooltip-panel";

/// Styling variant of a tooltip.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TooltipType {
    /// Neutral information.
    #[default]
    Info,
    /// A warning.
    Warning,
    /// An error.
    Error,
    /// A success message.
    Success,
}

impl TooltipType {
    /// Every tooltip type.
    pub const ALL: [Self; 4] = [Self::Info, Self::Warning, Self::Error, Self::Success];

    const NAMES: [&'static str; 4] = ["info", "warning", "error", "success"];

    /// The keyword for this type, also used as its panel class.
    pub const fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

impl FromStr for TooltipType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword("tooltipType", s, &Self::ALL, &Self::NAMES)
    }
}

impl fmt::Display for TooltipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What shows the tooltip on pointer platforms.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Trigger {
    /// Show on pointer enter, hide on pointer leave.
    #[default]
    Hover,
    /// Toggle on click.
    Click,
}

impl Trigger {
    /// Every trigger.
    pub const ALL: [Self; 2] = [Self::Hover, Self::Click];

    const NAMES: [&'static str; 2] = ["hover", "click"];

    /// The keyword for this trigger.
    pub const fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

impl FromStr for Trigger {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword("trigger", s, &Self::ALL, &Self::NAMES)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defaults for a tooltip.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TooltipOptions {
    /// Delay before showing when no delay is passed to `show`.
    pub show_delay: Duration,
    /// Delay before hiding when no delay is passed to `hide`.
    pub hide_delay: Duration,
    /// Delay before hiding after a touch ends.
    pub touchend_hide_delay: Duration,
    /// Requested placement.
    pub placement: TooltipPlacement,
    /// Pointer trigger.
    pub trigger: Trigger,
    /// Whether the platform is touch-first; mouse listeners are skipped there.
    pub touch_platform: bool,
    /// Edge distances used to classify the anchor's screen area.
    pub thresholds: EdgeThresholds,
    /// Gap left for the arrow between anchor and panel, in pixels.
    pub arrow_offset: f64,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            show_delay: Duration::ZERO,
            hide_delay: Duration::ZERO,
            touchend_hide_delay: Duration::from_millis(1500),
            placement: TooltipPlacement::Bottom,
            trigger: Trigger::Hover,
            touch_platform: false,
            thresholds: EdgeThresholds::default(),
            arrow_offset: 12.0,
        }
    }
}

bitflags::bitflags! {
    /// Pointer listeners installed on the anchor.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerListeners: u8 {
        /// `click`
        const CLICK       = 0b0000_0001;
        /// `mouseenter`
        const MOUSE_ENTER = 0b0000_0010;
        /// `mouseleave`
        const MOUSE_LEAVE = 0b0000_0100;
        /// `touchstart`
        const TOUCH_START = 0b0000_1000;
        /// `touchend`
        const TOUCH_END   = 0b0001_0000;
    }
}

impl PointerListeners {
    /// Listeners installed for a platform.
    pub fn for_platform(touch_platform: bool) -> Self {
        if touch_platform {
            Self::TOUCH_START | Self::TOUCH_END
        } else {
            Self::CLICK | Self::MOUSE_ENTER | Self::MOUSE_LEAVE
        }
    }
}

/// Pointer input relevant to a tooltip.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerInput {
    /// Click on the anchor.
    Click,
    /// Pointer entered the anchor.
    MouseEnter,
    /// Pointer left the anchor.
    MouseLeave,
    /// Touch started on the anchor.
    TouchStart,
    /// Touch ended on the anchor.
    TouchEnd,
    /// Click anywhere on the page.
    BodyClick,
}

impl PointerInput {
    fn listener(self) -> PointerListeners {
        match self {
            Self::Click => PointerListeners::CLICK,
            Self::MouseEnter => PointerListeners::MOUSE_ENTER,
            Self::MouseLeave => PointerListeners::MOUSE_LEAVE,
            Self::TouchStart => PointerListeners::TOUCH_START,
            Self::TouchEnd => PointerListeners::TOUCH_END,
            Self::BodyClick => PointerListeners::empty(),
        }
    }
}

/// Output events of a tooltip.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TooltipEvent {
    /// A timer fired and set the visibility.
    VisibilityChanged(Visibility),
    /// The hide animation finished; the panel has been detached.
    AfterHidden,
}

/// The attached tooltip panel.
#[derive(Clone, Debug)]
pub struct TooltipInstance {
    message: String,
    classes: Vec<String>,
    arrow: TooltipArrow,
    timer: VisibilityTimer,
}

impl TooltipInstance {
    fn new(arrow: TooltipArrow) -> Self {
        Self {
            message: String::new(),
            classes: Vec::new(),
            arrow,
            timer: VisibilityTimer::new(),
        }
    }

    /// Message shown in the panel.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Panel classes: the user class and the type class.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Arrow variant to draw.
    pub fn arrow(&self) -> TooltipArrow {
        self.arrow
    }

    /// Visibility timer of the panel.
    pub fn timer(&self) -> &VisibilityTimer {
        &self.timer
    }

    fn add_class(&mut self, class: &str) {
        if !class.is_empty() && !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.into());
        }
    }
}

/// Tooltip attached to one anchor element.
pub struct Tooltip<H: OverlayHost> {
    host: H,
    options: TooltipOptions,
    placement: TooltipPlacement,
    trigger: Trigger,
    message: String,
    tooltip_class: String,
    tooltip_type: TooltipType,
    adjustment: ScreenAdjustment,
    surface: Option<H::Surface>,
    instance: Option<TooltipInstance>,
    listeners: PointerListeners,
    subscriptions: Subscriptions,
    destroyed: bool,
    now: Duration,
    events: Vec<TooltipEvent>,
}

impl<H: OverlayHost> fmt::Debug for Tooltip<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tooltip")
            .field("placement", &self.placement)
            .field("message", &self.message)
            .field("adjustment", &self.adjustment)
            .field("instance", &self.instance)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl<H: OverlayHost> Tooltip<H> {
    /// A tooltip over `host` with default options.
    pub fn new(host: H) -> Self {
        Self::with_options(host, TooltipOptions::default())
    }

    /// A tooltip over `host` with the given options.
    pub fn with_options(host: H, options: TooltipOptions) -> Self {
        Self {
            host,
            placement: options.placement,
            trigger: options.trigger,
            message: String::new(),
            tooltip_class: String::new(),
            tooltip_type: TooltipType::default(),
            adjustment: adjust(options.placement, ScreenArea::Main),
            surface: None,
            instance: None,
            listeners: PointerListeners::for_platform(options.touch_platform),
            subscriptions: Subscriptions::POINTER,
            destroyed: false,
            now: Duration::ZERO,
            events: Vec::new(),
            options,
        }
    }

    /// The host this tooltip positions against.
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

    /// The attached panel, if any.
    pub fn instance(&self) -> Option<&TooltipInstance> {
        self.instance.as_ref()
    }

    /// Options this tooltip was created with.
    pub fn options(&self) -> &TooltipOptions {
        &self.options
    }

    /// Requested placement.
    pub fn placement(&self) -> TooltipPlacement {
        self.placement
    }

    /// The most recent screen-area adjustment.
    pub fn adjustment(&self) -> ScreenAdjustment {
        self.adjustment
    }

    /// Message to show.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Current trigger.
    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// Installed pointer listeners.
    pub fn listeners(&self) -> PointerListeners {
        self.listeners
    }

    /// Signals currently subscribed.
    pub fn subscriptions(&self) -> Subscriptions {
        self.subscriptions
    }

    /// Whether the panel is visible.
    pub fn is_visible(&self) -> bool {
        self.instance.as_ref().is_some_and(|i| i.timer.is_visible())
    }

    /// Show the panel after `delay`, or the configured show delay.
    ///
    /// Does nothing without a message, after [`destroy`](Self::destroy), or when
    /// the panel is already visible with no transition pending.
    pub fn show(&mut self, delay: Option<Duration>) {
        if self.destroyed {
            trace!("show ignored: tooltip destroyed");
            return;
        }
        if self.message.is_empty() {
            trace!("show ignored: empty message");
            return;
        }
        if let Some(instance) = &self.instance
            && instance.timer.is_visible()
            && !instance.timer.has_pending()
        {
            return;
        }
        let delay = delay.unwrap_or(self.options.show_delay);
        self.ensure_surface();
        self.update_positions();

        let adjustment = self.adjustment;
        let mut instance = match self.instance.take() {
            Some(instance) => instance,
            None => {
                if let Some(surface) = self.surface.as_mut()
                    && !surface.has_attached()
                {
                    surface.attach();
                }
                TooltipInstance::new(adjustment.arrow)
            }
        };
        instance.arrow = adjustment.arrow;
        instance.add_class(&self.tooltip_class);
        instance.add_class(self.tooltip_type.as_str());
        instance.message.clone_from(&self.message);
        instance.timer.show(self.now, delay);
        self.instance = Some(instance);
        debug!(
            placement = %adjustment.placement,
            arrow = adjustment.arrow.as_str(),
            ?delay,
            "tooltip show scheduled"
        );
        if let Some(surface) = self.surface.as_mut() {
            surface.update_position();
        }
    }

    /// Hide the panel after `delay`, or the configured hide delay.
    pub fn hide(&mut self, delay: Option<Duration>) {
        let delay = delay.unwrap_or(self.options.hide_delay);
        if let Some(instance) = self.instance.as_mut() {
            instance.timer.hide(self.now, delay);
            trace!(?delay, "tooltip hide scheduled");
        }
    }

    /// Hide if visible, show otherwise.
    pub fn toggle(&mut self) {
        if self.is_visible() {
            self.hide(None);
        } else {
            self.show(None);
        }
    }

    /// Set the current time and fire due transitions.
    pub fn advance(&mut self, now: Duration) {
        self.now = now;
        if let Some(instance) = self.instance.as_mut()
            && let Some(visibility) = instance.timer.advance(now)
        {
            debug!(%visibility, "tooltip visibility changed");
            self.events.push(TooltipEvent::VisibilityChanged(visibility));
        }
    }

    /// React to pointer input.
    pub fn handle_pointer(&mut self, input: PointerInput) {
        if !self.subscriptions.contains(Subscriptions::POINTER) {
            return;
        }
        if input == PointerInput::BodyClick {
            if self
                .instance
                .as_ref()
                .is_some_and(|i| i.timer.close_on_interaction())
            {
                self.hide(Some(Duration::ZERO));
            }
            return;
        }
        if !self.listeners.contains(input.listener()) {
            return;
        }
        match (input, self.trigger) {
            (PointerInput::Click, Trigger::Click) => self.toggle(),
            (PointerInput::MouseEnter, Trigger::Hover) => self.show(None),
            (PointerInput::MouseLeave, Trigger::Hover) => self.hide(None),
            (PointerInput::TouchStart, _) => self.show(None),
            (PointerInput::TouchEnd, _) => self.hide(Some(self.options.touchend_hide_delay)),
            _ => {}
        }
    }

    /// React to a signal from the host about the surface.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::PositionChanged(change) => {
                if !self.subscriptions.contains(Subscriptions::POSITION_CHANGES) {
                    return;
                }
                let Some(instance) = self.instance.as_ref() else {
                    return;
                };
                if change.clipped && instance.timer.is_visible() {
                    trace!("tooltip clipped by a scroll container");
                    self.hide(Some(Duration::ZERO));
                } else if let Some(arrow) = arrow_for_change(
                    self.placement,
                    self.adjustment.before,
                    change.candidate.offset,
                    self.options.arrow_offset,
                ) && let Some(instance) = self.instance.as_mut()
                {
                    instance.arrow = arrow;
                }
            }
            SurfaceEvent::Detached => {
                if self.subscriptions.contains(Subscriptions::DETACHMENTS) {
                    self.detach();
                }
            }
            SurfaceEvent::AnimationStart => {
                if let Some(instance) = self.instance.as_mut() {
                    instance.timer.animation_started();
                }
            }
            SurfaceEvent::AnimationDone => {
                if self
                    .instance
                    .as_mut()
                    .is_some_and(|i| i.timer.animation_done())
                {
                    self.detach();
                    self.events.push(TooltipEvent::AfterHidden);
                }
            }
            SurfaceEvent::BackdropClick | SurfaceEvent::Keydown(_) => {}
        }
    }

    /// Change the requested placement.
    ///
    /// With a live surface the candidates are recomputed, an attached panel is
    /// re-shown immediately and the position updated.
    pub fn set_placement(&mut self, placement: TooltipPlacement) {
        if placement == self.placement {
            return;
        }
        self.placement = placement;
        if self.surface.is_none() {
            return;
        }
        self.update_positions();
        let (now, arrow) = (self.now, self.adjustment.arrow);
        if let Some(instance) = self.instance.as_mut() {
            instance.arrow = arrow;
            instance.timer.show(now, Duration::ZERO);
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.update_position();
        }
    }

    /// Set the message; surrounding whitespace is trimmed.
    ///
    /// Emptying the message of a visible tooltip hides it immediately.
    pub fn set_message(&mut self, message: &str) {
        self.message = message.trim().into();
        if self.message.is_empty() && self.is_visible() {
            self.hide(Some(Duration::ZERO));
            return;
        }
        if let Some(instance) = self.instance.as_mut() {
            instance.message.clone_from(&self.message);
            if let Some(surface) = self.surface.as_mut() {
                surface.update_position();
            }
        }
    }

    /// Set an extra class for the panel.
    pub fn set_tooltip_class(&mut self, class: &str) {
        self.tooltip_class = class.into();
        if let Some(instance) = self.instance.as_mut() {
            instance.add_class(class);
        }
    }

    /// Set the styling variant.
    pub fn set_tooltip_type(&mut self, tooltip_type: TooltipType) {
        self.tooltip_type = tooltip_type;
        if let Some(instance) = self.instance.as_mut() {
            instance.arrow = self.adjustment.arrow;
            instance.add_class(tooltip_type.as_str());
        }
    }

    /// Set the pointer trigger.
    pub fn set_trigger(&mut self, trigger: Trigger) {
        self.trigger = trigger;
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<TooltipEvent> {
        core::mem::take(&mut self.events)
    }

    /// Whether [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Dispose the surface and remove every listener; the tooltip never shows again.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        if let Some(mut surface) = self.surface.take() {
            surface.dispose();
            debug!("tooltip surface disposed");
        }
        self.instance = None;
        self.listeners = PointerListeners::empty();
        self.subscriptions = Subscriptions::empty();
    }

    fn ensure_surface(&mut self) {
        if self.surface.is_some() {
            return;
        }
        let config = OverlayConfig {
            candidates: Vec::new(),
            has_backdrop: false,
            backdrop_class: String::new(),
            scroll_strategy: ScrollStrategy::Reposition,
            lock_alignment: false,
            force_alignment: false,
            direction: self.host.direction(),
            panel_class: Some(TOOLTIP_PANEL_CLASS.into()),
        };
        self.surface = Some(self.host.create_surface(&config));
        self.subscriptions |= Subscriptions::POSITION_CHANGES | Subscriptions::DETACHMENTS;
    }

    fn update_positions(&mut self) {
        let area = ScreenArea::classify(
            self.host.anchor_rect().origin(),
            self.host.viewport_size(),
            self.options.thresholds,
        );
        self.adjustment = adjust(self.placement, area);
        let positions = tooltip_positions(
            &self.adjustment,
            self.host.direction(),
            self.options.arrow_offset,
        );
        trace!(?area, placement = %self.adjustment.placement, "tooltip positions");
        if let Some(surface) = self.surface.as_mut() {
            surface.set_positions(&positions.to_array());
        }
    }

    fn detach(&mut self) {
        if let Some(surface) = self.surface.as_mut()
            && surface.has_attached()
        {
            surface.detach();
        }
        self.instance = None;
    }
}

impl<H: OverlayHost> Drop for Tooltip<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::tests::{Log, MockHost};
    use crate::host::PositionChange;
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use alloc::vec;
    use core::cell::RefCell;
    use kurbo::{Rect, Vec2};
    use understory_placement::{Direction, HorizontalPos, VerticalPos};

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn tooltip(message: &str) -> (Tooltip<MockHost>, Rc<RefCell<Log>>) {
        let (host, log) = MockHost::new();
        let mut t = Tooltip::new(host);
        t.set_message(message);
        (t, log)
    }

    #[test]
    fn keywords_parse() {
        assert_eq!("click".parse::<Trigger>(), Ok(Trigger::Click));
        assert_eq!("error".parse::<TooltipType>(), Ok(TooltipType::Error));
        let err = "fancy".parse::<TooltipType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid tooltipType: 'fancy'. Valid options are 'info', 'warning', 'error', 'success'."
        );
        let err = "focus".parse::<Trigger>().unwrap_err();
        assert_eq!(err.api(), "trigger");
        assert_eq!(err.valid(), ["hover", "click"]);
    }

    #[test]
    fn empty_message_never_shows() {
        let (mut t, log) = tooltip("   ");
        assert_eq!(t.message(), "");
        t.show(None);
        t.advance(ms(10));
        assert!(!t.is_visible());
        assert!(log.borrow().created.is_empty());
    }

    #[test]
    fn show_creates_surface_once_and_becomes_visible() {
        let (mut t, log) = tooltip("  Hello  ");
        t.show(Some(ms(100)));
        t.advance(ms(50));
        assert!(!t.is_visible());
        t.advance(ms(100));
        assert!(t.is_visible());
        assert_eq!(
            t.drain_events(),
            vec![TooltipEvent::VisibilityChanged(Visibility::Visible)]
        );
        let instance = t.instance().unwrap();
        assert_eq!(instance.message(), "Hello");
        assert_eq!(instance.classes(), ["info"]);
        assert_eq!(instance.arrow(), TooltipArrow::BottomAfter);

        // Visible with nothing pending: a second show is ignored.
        t.show(None);
        assert!(!t.instance().unwrap().timer().has_pending());
        let log = log.borrow();
        assert_eq!(log.created.len(), 1);
        let config = &log.created[0];
        assert_eq!(config.panel_class.as_deref(), Some(TOOLTIP_PANEL_CLASS));
        assert_eq!(config.scroll_strategy, ScrollStrategy::Reposition);
        assert_eq!(log.attached, 1);
    }

    #[test]
    fn hide_cancels_pending_show() {
        let (mut t, _log) = tooltip("Hi");
        t.show(Some(ms(200)));
        t.hide(Some(ms(0)));
        t.advance(ms(300));
        assert!(!t.is_visible());
        assert_eq!(
            t.drain_events(),
            vec![TooltipEvent::VisibilityChanged(Visibility::Hidden)]
        );
    }

    #[test]
    fn hidden_animation_detaches() {
        let (mut t, log) = tooltip("Hi");
        t.show(None);
        t.advance(ms(0));
        t.handle_surface_event(SurfaceEvent::AnimationDone);
        assert!(t.instance().is_some());
        t.hide(None);
        t.advance(ms(1));
        t.handle_surface_event(SurfaceEvent::AnimationStart);
        t.handle_surface_event(SurfaceEvent::AnimationDone);
        assert!(t.instance().is_none());
        assert_eq!(log.borrow().detached, 1);
        assert_eq!(t.drain_events().last(), Some(&TooltipEvent::AfterHidden));

        // Showing again reattaches the same surface.
        t.show(None);
        assert_eq!(log.borrow().created.len(), 1);
        assert_eq!(log.borrow().attached, 2);
    }

    #[test]
    fn hover_trigger_follows_pointer() {
        let (mut t, _log) = tooltip("Hi");
        t.handle_pointer(PointerInput::Click);
        t.advance(ms(0));
        assert!(!t.is_visible());
        t.handle_pointer(PointerInput::MouseEnter);
        t.advance(ms(1));
        assert!(t.is_visible());
        t.handle_pointer(PointerInput::MouseLeave);
        t.advance(ms(2));
        assert!(!t.is_visible());
    }

    #[test]
    fn click_trigger_toggles() {
        let (mut t, _log) = tooltip("Hi");
        t.set_trigger(Trigger::Click);
        t.handle_pointer(PointerInput::MouseEnter);
        t.advance(ms(0));
        assert!(!t.is_visible());
        t.handle_pointer(PointerInput::Click);
        t.advance(ms(1));
        assert!(t.is_visible());
        t.handle_pointer(PointerInput::Click);
        t.advance(ms(2));
        assert!(!t.is_visible());
    }

    #[test]
    fn touch_platform_uses_touch_listeners() {
        let (host, _log) = MockHost::new();
        let options = TooltipOptions {
            touch_platform: true,
            ..TooltipOptions::default()
        };
        let mut t = Tooltip::with_options(host, options);
        t.set_message("Tap");
        assert_eq!(
            t.listeners(),
            PointerListeners::TOUCH_START | PointerListeners::TOUCH_END
        );
        t.handle_pointer(PointerInput::MouseEnter);
        t.advance(ms(0));
        assert!(!t.is_visible());
        t.handle_pointer(PointerInput::TouchStart);
        t.advance(ms(1));
        assert!(t.is_visible());
        t.handle_pointer(PointerInput::TouchEnd);
        t.advance(ms(1000));
        assert!(t.is_visible());
        t.advance(ms(1501));
        assert!(!t.is_visible());
    }

    #[test]
    fn body_click_closes_outside_animations() {
        let (mut t, _log) = tooltip("Hi");
        t.show(Some(ms(500)));
        // Pending show: body interaction still cancels it.
        t.handle_pointer(PointerInput::BodyClick);
        t.advance(ms(600));
        assert!(!t.is_visible());

        t.show(None);
        t.advance(ms(600));
        t.handle_surface_event(SurfaceEvent::AnimationStart);
        t.handle_pointer(PointerInput::BodyClick);
        t.advance(ms(601));
        assert!(t.is_visible());
        t.handle_surface_event(SurfaceEvent::AnimationDone);
        t.handle_pointer(PointerInput::BodyClick);
        t.advance(ms(602));
        assert!(!t.is_visible());
    }

    #[test]
    fn clipped_position_hides() {
        let (mut t, _log) = tooltip("Hi");
        t.show(None);
        t.advance(ms(0));
        let candidate = tooltip_positions(&t.adjustment(), Direction::Ltr, 12.0).main;
        t.handle_surface_event(SurfaceEvent::PositionChanged(PositionChange {
            candidate,
            clipped: true,
        }));
        t.advance(ms(1));
        assert!(!t.is_visible());
    }

    #[test]
    fn fallback_position_flips_arrow() {
        let (mut t, _log) = tooltip("Hi");
        t.show(None);
        t.advance(ms(0));
        let fallback = tooltip_positions(&t.adjustment(), Direction::Ltr, 12.0).fallback;
        assert_eq!(fallback.offset, Vec2::new(-18.0, -12.0));
        t.handle_surface_event(SurfaceEvent::PositionChanged(PositionChange {
            candidate: fallback,
            clipped: false,
        }));
        assert_eq!(t.instance().unwrap().arrow(), TooltipArrow::TopAfter);
        assert!(t.is_visible());
    }

    #[test]
    fn bottom_right_corner_flips_to_top_before() {
        let (mut t, log) = tooltip("Near the corner");
        t.host_mut().anchor = Rect::new(1270.0, 790.0, 1280.0, 800.0);
        t.show(None);
        let adjustment = t.adjustment();
        assert_eq!(adjustment.area, ScreenArea::BottomRight);
        assert_eq!(adjustment.placement, TooltipPlacement::Top);
        assert!(adjustment.before);
        assert_eq!(t.instance().unwrap().arrow(), TooltipArrow::TopBefore);
        let log = log.borrow();
        let main = log.positions.last().unwrap()[0];
        assert_eq!(main.origin.y, VerticalPos::Top);
        assert_eq!(main.overlay.x, HorizontalPos::End);
        assert_eq!(main.offset, Vec2::new(18.0, -12.0));
    }

    #[test]
    fn set_placement_reshows_and_repositions() {
        let (mut t, log) = tooltip("Hi");
        t.set_placement(TooltipPlacement::Left);
        assert!(log.borrow().positions.is_empty());
        t.show(None);
        t.advance(ms(0));
        t.hide(Some(ms(100)));
        t.set_placement(TooltipPlacement::Right);
        assert!(t.instance().unwrap().timer().show_pending());
        assert_eq!(t.instance().unwrap().arrow(), TooltipArrow::Left);
        let log = log.borrow();
        assert_eq!(log.positions.len(), 2);
        assert_eq!(log.updates, 2);
    }

    #[test]
    fn clearing_message_hides_visible_tooltip() {
        let (mut t, _log) = tooltip("Hi");
        t.show(None);
        t.advance(ms(0));
        t.set_message("  ");
        t.advance(ms(1));
        assert!(!t.is_visible());
    }

    #[test]
    fn classes_accumulate_without_duplicates() {
        let (mut t, _log) = tooltip("Hi");
        t.set_tooltip_class("wide");
        t.show(None);
        t.set_tooltip_type(TooltipType::Warning);
        t.set_tooltip_type(TooltipType::Warning);
        let classes = t.instance().unwrap().classes();
        assert_eq!(classes, ["wide", "info", "warning"]);
    }

    #[test]
    fn destroy_clears_listeners() {
        let (mut t, log) = tooltip("Hi");
        t.show(None);
        t.destroy();
        assert_eq!(t.listeners(), PointerListeners::empty());
        assert_eq!(t.subscriptions(), Subscriptions::empty());
        assert_eq!(log.borrow().disposed, 1);
        t.handle_pointer(PointerInput::MouseEnter);
        assert!(t.surface().is_none());
    }

    #[test]
    fn destroyed_tooltip_stays_down() {
        let (mut t, log) = tooltip("Hi");
        t.show(None);
        t.destroy();
        assert!(t.is_destroyed());
        t.show(None);
        t.set_placement(TooltipPlacement::Top);
        t.advance(ms(10));
        assert!(!t.is_visible());
        assert!(t.surface().is_none());
        assert_eq!(t.subscriptions(), Subscriptions::empty());
        assert_eq!(log.borrow().created.len(), 1);
    }
}
