// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delayed show/hide for tooltips.
//!
//! Time is a [`Duration`] since an arbitrary epoch chosen by the host. Nothing
//! fires on its own: the host calls [`VisibilityTimer::advance`] with the current
//! time and due transitions are applied then.
//!
//! At most one transition is pending. Scheduling a show cancels a pending hide
//! and vice versa; scheduling the same kind again replaces the deadline.

use core::fmt;
use core::time::Duration;

/// Visibility of a tooltip panel.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Visibility {
    /// Never shown.
    #[default]
    Initial,
    /// Shown.
    Visible,
    /// Hidden after having been scheduled to hide.
    Hidden,
}

impl Visibility {
    /// Keyword used by the animation states.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Pending {
    Show(Duration),
    Hide(Duration),
}

/// Visibility state with a single pending transition.
#[derive(Clone, Debug, Default)]
pub struct VisibilityTimer {
    visibility: Visibility,
    pending: Option<Pending>,
    close_on_interaction: bool,
}

impl VisibilityTimer {
    /// A timer in the [`Initial`](Visibility::Initial) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the panel is visible.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Whether a show or hide is scheduled.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether a show is scheduled.
    pub fn show_pending(&self) -> bool {
        matches!(self.pending, Some(Pending::Show(_)))
    }

    /// Whether a hide is scheduled.
    pub fn hide_pending(&self) -> bool {
        matches!(self.pending, Some(Pending::Hide(_)))
    }

    /// When the pending transition is due.
    pub fn deadline(&self) -> Option<Duration> {
        match self.pending {
            Some(Pending::Show(at) | Pending::Hide(at)) => Some(at),
            None => None,
        }
    }

    /// Schedule a show `delay` after `now`, cancelling any pending hide.
    ///
    /// Body interactions close the panel from here on, even while the show is
    /// still pending.
    pub fn show(&mut self, now: Duration, delay: Duration) {
        self.close_on_interaction = true;
        self.pending = Some(Pending::Show(now.saturating_add(delay)));
    }

    /// Schedule a hide `delay` after `now`, cancelling any pending show.
    pub fn hide(&mut self, now: Duration, delay: Duration) {
        self.pending = Some(Pending::Hide(now.saturating_add(delay)));
    }

    /// Apply the pending transition if it is due at `now`.
    ///
    /// Returns the visibility set by the transition that fired.
    pub fn advance(&mut self, now: Duration) -> Option<Visibility> {
        let (at, to) = match self.pending? {
            Pending::Show(at) => (at, Visibility::Visible),
            Pending::Hide(at) => (at, Visibility::Hidden),
        };
        if now < at {
            return None;
        }
        self.pending = None;
        self.visibility = to;
        Some(to)
    }

    /// Whether a body click should close the panel.
    pub fn close_on_interaction(&self) -> bool {
        self.close_on_interaction
    }

    /// A show or hide animation started; body clicks are ignored until it ends.
    pub fn animation_started(&mut self) {
        self.close_on_interaction = false;
    }

    /// A show or hide animation finished.
    ///
    /// Returns `true` when the panel finished hiding and is still hidden, at which
    /// point it can be detached.
    pub fn animation_done(&mut self) -> bool {
        match self.visibility {
            Visibility::Initial => false,
            Visibility::Visible => {
                self.close_on_interaction = true;
                false
            }
            Visibility::Hidden => {
                self.close_on_interaction = true;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn show_then_hide_cancels_show() {
        let mut t = VisibilityTimer::new();
        t.show(ms(0), ms(100));
        t.hide(ms(10), ms(50));
        assert!(t.hide_pending());
        assert_eq!(t.advance(ms(100)), Some(Visibility::Hidden));
        assert!(!t.is_visible());
        assert!(!t.has_pending());
    }

    #[test]
    fn hide_then_show_cancels_hide() {
        let mut t = VisibilityTimer::new();
        t.show(ms(0), ms(0));
        assert_eq!(t.advance(ms(0)), Some(Visibility::Visible));
        t.hide(ms(5), ms(1500));
        t.show(ms(6), ms(0));
        assert_eq!(t.advance(ms(6)), Some(Visibility::Visible));
        assert_eq!(t.advance(ms(2000)), None);
        assert!(t.is_visible());
    }

    #[test]
    fn nothing_fires_early() {
        let mut t = VisibilityTimer::new();
        t.show(ms(100), ms(250));
        assert_eq!(t.deadline(), Some(ms(350)));
        assert_eq!(t.advance(ms(349)), None);
        assert_eq!(t.visibility(), Visibility::Initial);
        assert_eq!(t.advance(ms(350)), Some(Visibility::Visible));
    }

    #[test]
    fn interaction_closing_follows_animations() {
        let mut t = VisibilityTimer::new();
        assert!(!t.close_on_interaction());
        t.show(ms(0), ms(0));
        assert!(t.close_on_interaction());
        t.advance(ms(0));
        t.animation_started();
        assert!(!t.close_on_interaction());
        assert!(!t.animation_done());
        assert!(t.close_on_interaction());
        t.hide(ms(1), ms(0));
        t.advance(ms(1));
        t.animation_started();
        assert!(t.animation_done());
    }

    #[derive(Clone, Debug)]
    enum Op {
        Show(u64, u64),
        Hide(u64, u64),
        Advance(u64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..50_u64, 0..200_u64).prop_map(|(n, d)| Op::Show(n, d)),
            (0..50_u64, 0..200_u64).prop_map(|(n, d)| Op::Hide(n, d)),
            (0..50_u64).prop_map(Op::Advance),
        ]
    }

    proptest! {
        // Whatever the interleaving, the last scheduled transition wins.
        #[test]
        fn last_scheduled_transition_wins(ops in proptest::collection::vec(op(), 1..40)) {
            let mut t = VisibilityTimer::new();
            let mut now = 0_u64;
            let mut last = None;
            for op in ops {
                match op {
                    Op::Show(step, delay) => {
                        now += step;
                        t.show(ms(now), ms(delay));
                        last = Some(Visibility::Visible);
                    }
                    Op::Hide(step, delay) => {
                        now += step;
                        t.hide(ms(now), ms(delay));
                        last = Some(Visibility::Hidden);
                    }
                    Op::Advance(step) => {
                        now += step;
                        if t.advance(ms(now)).is_some() {
                            prop_assert!(!t.has_pending());
                        }
                    }
                }
            }
            t.advance(ms(now + 1_000));
            prop_assert!(!t.has_pending());
            prop_assert_eq!(t.visibility(), last.unwrap_or(Visibility::Initial));
        }
    }
}
