// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration faults raised when parsing keyword inputs.

use alloc::string::String;
use core::fmt;

/// An input string did not name one of the enumerated values of an option.
///
/// The display form enumerates every valid keyword so the caller can fix the
/// configuration without consulting documentation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {api}: '{value}'. Valid options are {}.", Quoted(.valid))]
pub struct ParseError {
    api: &'static str,
    value: String,
    valid: &'static [&'static str],
}

impl ParseError {
    /// Create a fault for option `api` rejecting `value`.
    pub fn new(api: &'static str, value: &str, valid: &'static [&'static str]) -> Self {
        Self {
            api,
            value: value.into(),
            valid,
        }
    }

    /// Name of the rejected option, e.g. `placement`.
    pub fn api(&self) -> &'static str {
        self.api
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Every accepted keyword.
    pub fn valid(&self) -> &'static [&'static str] {
        self.valid
    }
}

/// Parse `s` as the entry of `all` whose keyword in `valid` matches.
///
/// `all` and `valid` are parallel arrays; a failure reports `api` and every
/// keyword in `valid`.
///
/// ```
/// use understory_placement::parse_keyword;
///
/// #[derive(Copy, Clone, Debug, PartialEq)]
/// enum Size { Small, Large }
///
/// const NAMES: [&str; 2] = ["small", "large"];
/// let all = [Size::Small, Size::Large];
/// assert_eq!(parse_keyword("size", "large", &all, &NAMES), Ok(Size::Large));
/// assert!(parse_keyword("size", "huge", &all, &NAMES).is_err());
/// ```
pub fn parse_keyword<T: Copy>(
    api: &'static str,
    s: &str,
    all: &[T],
    valid: &'static [&'static str],
) -> Result<T, ParseError> {
    valid
        .iter()
        .position(|name| *name == s)
        .and_then(|i| all.get(i).copied())
        .ok_or_else(|| ParseError::new(api, s, valid))
}

struct Quoted<'a>(&'a [&'a str]);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{name}'")?;
        }
        Ok(())
    }
}
