// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notification channel between a popover panel and its anchor.
//!
//! ## Overview
//!
//! The panel ([`Popover`](crate::popover::Popover)) and the anchor
//! ([`PopoverAnchor`](crate::anchor::PopoverAnchor)) are separate objects with no
//! other connection. [`channel`] creates one link per pairing:
//!
//! - Panel → anchor: [`Notification`]s queued by [`NotificationSender::dispatch`]
//!   and consumed in emission order by the anchor's single
//!   [`NotificationReceiver`].
//! - Anchor → panel: the open flag and the [`Decoration`] the panel should draw,
//!   published by the receiver and observed by the sender.
//!
//! Dropping or [disposing](NotificationReceiver::dispose) the receiver closes the
//! link; later dispatches fail with [`OverlayError::Disposed`]. A panel that is
//! torn down closes it from its end with [`NotificationSender::dispose`].
//!
//! ```
//! use understory_overlay::notification::{channel, Notification};
//!
//! let (tx, rx) = channel::<()>();
//! tx.dispatch(Notification::Open).unwrap();
//! tx.dispatch(Notification::Close(None)).unwrap();
//! assert_eq!(rx.try_recv(), Some(Notification::Open));
//! assert_eq!(rx.try_recv(), Some(Notification::Close(None)));
//! assert_eq!(rx.try_recv(), None);
//! ```

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use understory_placement::ArrowStyle;

use crate::error::OverlayError;
use crate::popover::{AlignmentClasses, PopoverConfig};

/// A request from a panel to its anchor.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification<V = ()> {
    /// Open the panel.
    Open,
    /// Close the panel, optionally with a result value.
    Close(Option<V>),
    /// Open if closed, close if open.
    Toggle,
    /// Re-apply the last position.
    Realign,
    /// Surface-level configuration changed; the surface must be rebuilt.
    UpdateConfig(PopoverConfig),
    /// Alignment changed; the candidate list must be rebuilt.
    Reposition(PopoverConfig),
}

impl<V> Notification<V> {
    /// Short name of the action, for diagnostics.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close(_) => "close",
            Self::Toggle => "toggle",
            Self::Realign => "realign",
            Self::UpdateConfig(_) => "update_config",
            Self::Reposition(_) => "reposition",
        }
    }
}

/// What the panel should draw, as decided by its anchor.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Decoration {
    /// Alignment classes for the panel's transform origin and arrow side.
    pub classes: AlignmentClasses,
    /// Arrow style, once the anchor and panel have been measured.
    pub arrow: Option<ArrowStyle>,
}

#[derive(Debug)]
struct Shared<V> {
    queue: VecDeque<Notification<V>>,
    disposed: bool,
    open: bool,
    decoration: Decoration,
}

/// Panel end of the link.
#[derive(Debug)]
pub struct NotificationSender<V = ()> {
    shared: Rc<RefCell<Shared<V>>>,
}

/// Anchor end of the link.
#[derive(Debug)]
pub struct NotificationReceiver<V = ()> {
    shared: Rc<RefCell<Shared<V>>>,
}

/// Create a linked sender/receiver pair.
pub fn channel<V>() -> (NotificationSender<V>, NotificationReceiver<V>) {
    let shared = Rc::new(RefCell::new(Shared {
        queue: VecDeque::new(),
        disposed: false,
        open: false,
        decoration: Decoration::default(),
    }));
    (
        NotificationSender {
            shared: Rc::clone(&shared),
        },
        NotificationReceiver { shared },
    )
}

impl<V> NotificationSender<V> {
    /// Queue a notification for the anchor.
    pub fn dispatch(&self, notification: Notification<V>) -> Result<(), OverlayError> {
        let mut shared = self.shared.borrow_mut();
        if shared.disposed {
            return Err(OverlayError::Disposed);
        }
        shared.queue.push_back(notification);
        Ok(())
    }

    /// Whether the anchor reports the panel as open.
    pub fn is_open(&self) -> bool {
        self.shared.borrow().open
    }

    /// The decoration most recently published by the anchor.
    pub fn decoration(&self) -> Decoration {
        self.shared.borrow().decoration
    }

    /// Whether either end has closed the link.
    pub fn is_disposed(&self) -> bool {
        self.shared.borrow().disposed
    }

    /// Close the link from the panel end, dropping anything still queued.
    pub fn dispose(&self) {
        let mut shared = self.shared.borrow_mut();
        shared.disposed = true;
        shared.queue.clear();
    }
}

impl<V> NotificationReceiver<V> {
    /// Take the oldest pending notification.
    pub fn try_recv(&self) -> Option<Notification<V>> {
        self.shared.borrow_mut().queue.pop_front()
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Notification<V>> {
        self.shared.borrow_mut().queue.drain(..).collect()
    }

    /// Number of notifications waiting.
    pub fn pending(&self) -> usize {
        self.shared.borrow().queue.len()
    }

    /// Whether either end has closed the link.
    pub fn is_disposed(&self) -> bool {
        self.shared.borrow().disposed
    }

    /// Publish the panel's open state.
    pub fn publish_open(&self, open: bool) {
        self.shared.borrow_mut().open = open;
    }

    /// Publish new alignment classes, keeping the arrow style.
    pub fn publish_classes(&self, classes: AlignmentClasses) {
        self.shared.borrow_mut().decoration.classes = classes;
    }

    /// Publish a measured arrow style.
    pub fn publish_arrow(&self, arrow: ArrowStyle) {
        self.shared.borrow_mut().decoration.arrow = Some(arrow);
    }

    /// Close the link, dropping anything still queued.
    pub fn dispose(&self) {
        let mut shared = self.shared.borrow_mut();
        shared.disposed = true;
        shared.open = false;
        shared.queue.clear();
    }
}

impl<V> Drop for NotificationReceiver<V> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_placement::Edge;

    #[test]
    fn delivery_is_in_emission_order() {
        let (tx, rx) = channel::<u8>();
        tx.dispatch(Notification::Toggle).unwrap();
        tx.dispatch(Notification::Close(Some(3))).unwrap();
        tx.dispatch(Notification::Realign).unwrap();
        assert_eq!(rx.pending(), 3);
        assert_eq!(rx.try_recv(), Some(Notification::Toggle));
        assert_eq!(rx.try_recv(), Some(Notification::Close(Some(3))));
        assert_eq!(rx.try_recv(), Some(Notification::Realign));
        assert_eq!(rx.try_recv(), None);

        tx.dispatch(Notification::Open).unwrap();
        tx.dispatch(Notification::Toggle).unwrap();
        assert_eq!(rx.drain(), [Notification::Open, Notification::Toggle]);
        assert_eq!(rx.pending(), 0);
    }

    #[test]
    fn feedback_reaches_sender() {
        let (tx, rx) = channel::<()>();
        assert!(!tx.is_open());
        rx.publish_open(true);
        rx.publish_classes(AlignmentClasses::V_TOP | AlignmentClasses::H_CENTER);
        rx.publish_arrow(ArrowStyle::Offset {
            edge: Edge::Left,
            px: 4.0,
        });
        assert!(tx.is_open());
        let d = tx.decoration();
        assert!(d.classes.contains(AlignmentClasses::V_TOP));
        assert!(d.arrow.is_some());
    }

    #[test]
    fn dropping_receiver_disposes() {
        let (tx, rx) = channel::<()>();
        rx.publish_open(true);
        drop(rx);
        assert!(tx.is_disposed());
        assert!(!tx.is_open());
        let sent = tx.dispatch(Notification::Open);
        assert_eq!(sent, Err(OverlayError::Disposed));
    }

    #[test]
    fn sender_dispose_closes_both_ends() {
        let (tx, rx) = channel::<()>();
        tx.dispatch(Notification::Open).unwrap();
        tx.dispose();
        assert!(rx.is_disposed());
        assert_eq!(rx.pending(), 0);
        assert_eq!(rx.try_recv(), None);
        let sent = tx.dispatch(Notification::Toggle);
        assert_eq!(sent, Err(OverlayError::Disposed));
    }
}
