// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget identifiers.
//!
//! Each panel gets a [`WidgetId`] from an [`IdGenerator`] owned by whoever
//! registers widgets (an application, a test). There is no global counter:
//! tests construct or [`reset`](IdGenerator::reset) their own generator to get
//! stable ids.

use core::fmt;

/// Identifier for a popover or tooltip panel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct WidgetId(u32);

impl WidgetId {
    /// The raw index.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    /// Formats as a DOM-friendly id, e.g. `d-overlay-3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d-overlay-{}", self.0)
    }
}

/// Hands out increasing [`WidgetId`]s.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    /// A generator starting at zero.
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// A generator whose first id is `seed`.
    pub const fn with_seed(seed: u32) -> Self {
        Self { next: seed }
    }

    /// Take the next id.
    pub fn next_id(&mut self) -> WidgetId {
        let id = WidgetId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Start over from zero.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn ids_increase_and_reset() {
        let mut ids = IdGenerator::with_seed(7);
        assert_eq!(ids.next_id().get(), 7);
        let b = ids.next_id();
        assert_eq!(b.to_string(), "d-overlay-8");
        ids.reset();
        assert_eq!(ids.next_id().get(), 0);
    }
}
