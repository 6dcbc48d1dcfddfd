// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Render surface
//!
//! Every element of the counter view is addressable through a `data-test`
//! attribute. These tags, the `hidden` class on the error message, and the
//! decimal text of the count are the stable interface of the view: the
//! browser component and the static markup produced here render the exact
//! same structure.
//!
//! ```
//! use counter::{Counter, Surface};
//!
//! let surface = Surface::of(&Counter::Blocked);
//!
//! assert_eq!(surface.count, 0);
//! assert_eq!(surface.error_class(), "");
//! assert!(surface.to_html().contains(r#"<span data-test="count">0</span>"#));
//! ```

use std::fmt::{self, Display};

use crate::state::Counter;

/// Name of the attribute every addressable element is tagged with.
pub const TEST_ATTRIBUTE: &str = "data-test";

/// Class marking the error message as not displayed.
pub const HIDDEN: &str = "hidden";

/// Text of the error message, shown after a refused decrement.
pub const ERROR_TEXT: &str = "The counter cannot go below 0";

/// Values of the [`TEST_ATTRIBUTE`].
pub mod tag {
    pub const APP: &str = "component-app";
    pub const DISPLAY: &str = "counter-display";
    pub const COUNT: &str = "count";
    pub const INCREMENT: &str = "increment-button";
    pub const DECREMENT: &str = "decrement-button";
    pub const ERROR: &str = "error-message";

    pub const ALL: [&str; 6] = [APP, DISPLAY, COUNT, INCREMENT, DECREMENT, ERROR];
}

/// Observable projection of a [`Counter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Surface {
    pub count: u32,
    pub error_hidden: bool,
}

impl Surface {
    pub const fn of(counter: &Counter) -> Self {
        Surface {
            count: counter.count(),
            error_hidden: !counter.error_visible(),
        }
    }

    /// Class attribute value of the error message.
    pub const fn error_class(&self) -> &'static str {
        if self.error_hidden {
            HIDDEN
        } else {
            ""
        }
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

/// Renders the static markup of the view.
impl Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut count = itoa::Buffer::new();
        let count = count.format(self.count);

        write!(f, r#"<div {TEST_ATTRIBUTE}="{}">"#, tag::APP)?;
        write!(
            f,
            r#"<h1 {TEST_ATTRIBUTE}="{}">The counter is currently <span {TEST_ATTRIBUTE}="{}">{count}</span></h1>"#,
            tag::DISPLAY,
            tag::COUNT,
        )?;

        write!(f, r#"<div {TEST_ATTRIBUTE}="{}""#, tag::ERROR)?;
        match self.error_class() {
            "" => f.write_str(">")?,
            class => write!(f, r#" class="{class}">"#)?,
        }
        write!(f, "{ERROR_TEXT}</div>")?;

        write!(
            f,
            r#"<button {TEST_ATTRIBUTE}="{}">Increment counter</button>"#,
            tag::INCREMENT,
        )?;
        write!(
            f,
            r#"<button {TEST_ATTRIBUTE}="{}">Decrement counter</button>"#,
            tag::DECREMENT,
        )?;

        f.write_str("</div>")
    }
}
