// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Faults raised by the overlay engines.
//!
//! All of these are programming errors surfaced immediately; nothing here is
//! retried.

/// A misuse of a popover or tooltip engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    /// An action was requested before the panel was anchored.
    #[error("Popover is not anchored to any popover anchor.")]
    Unanchored,
    /// An anchor was given something that is not a live popover panel.
    #[error("Popover anchor must be provided a live popover instance.")]
    InvalidPanel,
    /// The other end of a notification channel has been disposed.
    #[error("Popover notification channel has been disposed.")]
    Disposed,
}
