// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Counter
//!
//! _A counter that refuses to go below zero._
//!
//! The view shows a count, an increment and a decrement button, and an error
//! message that only appears after a decrement was attempted at zero.
//!
//! * [`state`] holds the [`Counter`] state machine and its [`Action`]s.
//! * [`surface`] describes what the view renders for a given state: the
//!   `data-test` tags of every element and the `hidden` class of the error.
//!
//! When compiled for `wasm32` the crate also exports a start function that
//! mounts the [kobold](https://docs.rs/kobold) component in the document body.
//!
//! ```
//! use counter::{Action, Counter, Surface};
//!
//! let counter = Counter::replay([Action::Increment, Action::Decrement, Action::Decrement]);
//! let surface = Surface::of(&counter);
//!
//! assert_eq!(surface.count, 0);
//! assert!(!surface.error_hidden);
//! ```

pub mod state;
pub mod surface;

#[cfg(target_arch = "wasm32")]
mod view;

pub use state::{Action, Counter, Outcome, ParseActionError};
pub use surface::Surface;
