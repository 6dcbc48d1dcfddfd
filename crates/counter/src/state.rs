// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Counter state
//!
//! The counter is a single unsigned integer with two guarded transitions.
//! Rather than tracking the error flag next to the count, the state is a tagged
//! variant: [`Counter::Blocked`] can only ever mean "zero, and the last decrement
//! was refused", so an error can never be shown next to a non-zero count.
//!
//! ```
//! use counter::{Action, Counter, Outcome};
//!
//! let mut counter = Counter::new();
//!
//! assert_eq!(counter.decrement(), Outcome::Refused);
//! assert!(counter.error_visible());
//!
//! assert_eq!(counter.apply(Action::Increment), Outcome::Counted);
//! assert_eq!(counter.count(), 1);
//! assert!(!counter.error_visible());
//! ```

use std::error;
use std::fmt::{self, Display};
use std::str::FromStr;

/// State of the counter view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Counter {
    /// Error message hidden, count can be anything.
    Normal(u32),
    /// A decrement was refused at zero, error message visible.
    Blocked,
}

impl Default for Counter {
    fn default() -> Self {
        Counter::new()
    }
}

impl Counter {
    /// Fresh counter at zero with the error hidden.
    pub const fn new() -> Self {
        Counter::Normal(0)
    }

    /// Fold a sequence of actions starting from [`Counter::new`].
    pub fn replay<I>(actions: I) -> Self
    where
        I: IntoIterator<Item = Action>,
    {
        let mut counter = Counter::new();

        for action in actions {
            counter.apply(action);
        }

        counter
    }

    pub const fn count(&self) -> u32 {
        match self {
            Counter::Normal(count) => *count,
            Counter::Blocked => 0,
        }
    }

    pub const fn error_visible(&self) -> bool {
        matches!(self, Counter::Blocked)
    }

    pub fn apply(&mut self, action: Action) -> Outcome {
        match action {
            Action::Increment => self.increment(),
            Action::Decrement => self.decrement(),
        }
    }

    /// Add one to the count and hide the error.
    ///
    /// The count saturates at [`u32::MAX`].
    pub fn increment(&mut self) -> Outcome {
        match *self {
            Counter::Blocked => {
                *self = Counter::Normal(1);
                Outcome::Counted
            }
            Counter::Normal(count) => match count.checked_add(1) {
                Some(next) => {
                    *self = Counter::Normal(next);
                    Outcome::Counted
                }
                None => Outcome::Unchanged,
            },
        }
    }

    /// Subtract one from the count, or show the error if the count is already zero.
    pub fn decrement(&mut self) -> Outcome {
        match *self {
            Counter::Blocked => Outcome::Unchanged,
            Counter::Normal(0) => {
                *self = Counter::Blocked;
                Outcome::Refused
            }
            Counter::Normal(count) => {
                *self = Counter::Normal(count - 1);
                Outcome::Counted
            }
        }
    }
}

/// What a single [`Action`] did to the [`Counter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The count moved by one.
    Counted,
    /// Decrement was refused at zero, the error is now visible.
    Refused,
    /// Nothing observable changed.
    Unchanged,
}

impl Outcome {
    /// Whether the view needs to be rendered again after this outcome.
    pub const fn should_render(self) -> bool {
        !matches!(self, Outcome::Unchanged)
    }
}

/// User-triggered request for a state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    Increment,
    Decrement,
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Increment => "increment",
            Action::Decrement => "decrement",
        })
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increment" | "inc" | "+" => Ok(Action::Increment),
            "decrement" | "dec" | "-" => Ok(Action::Decrement),
            _ => Err(ParseActionError {
                input: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseActionError {
    input: String,
}

impl ParseActionError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for ParseActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown action `{}`, expected `increment` (`inc`, `+`) or `decrement` (`dec`, `-`)",
            self.input
        )
    }
}

impl error::Error for ParseActionError {}
