use std::fmt;
use std::sync::OnceLock;

use crossterm::style::Stylize;

static VERBOSE_OUTPUT: OnceLock<()> = OnceLock::new();

pub fn enable_verbose_output() {
    let _ = VERBOSE_OUTPUT.set(());
}

pub fn is_verbose_output_enabled() -> bool {
    VERBOSE_OUTPUT.get().is_some()
}

static COLOR_OUTPUT: OnceLock<()> = OnceLock::new();

pub fn enable_color_output() {
    let _ = COLOR_OUTPUT.set(());
}

pub fn is_color_output_enabled() -> bool {
    COLOR_OUTPUT.get().is_some()
}

/// Status line with a right-aligned title, printed to stderr.
#[macro_export]
macro_rules! status {
    ($title:literal, $($arg:tt)*) => {{
        eprintln!("{} {}", $crate::log::Title($title), format_args!($($arg)*));
    }};
}

pub use status;

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        eprintln!("{}: {}", $crate::log::Error, format_args!($($arg)*));
    }};
}

pub use error;

#[macro_export]
macro_rules! building {
    ($($arg:tt)*) => { $crate::log::status!("Building", $($arg)*) };
}

pub use building;

#[macro_export]
macro_rules! bundling {
    ($($arg:tt)*) => { $crate::log::status!("Bundling", $($arg)*) };
}

pub use bundling;

#[macro_export]
macro_rules! optimized {
    ($($arg:tt)*) => { $crate::log::status!("Optimized", $($arg)*) };
}

pub use optimized;

#[macro_export]
macro_rules! finished {
    ($($arg:tt)*) => { $crate::log::status!("Finished", $($arg)*) };
}

pub use finished;

#[macro_export]
macro_rules! watching {
    ($($arg:tt)*) => { $crate::log::status!("Watching", $($arg)*) };
}

pub use watching;

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        if $crate::log::is_verbose_output_enabled() {
            $crate::log::status!("Info", $($arg)*);
        }
    }};
}

pub use info;

pub struct Error;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = "error";
        if is_color_output_enabled() {
            write!(f, "{}", title.dark_red().bold())
        } else {
            f.write_str(title)
        }
    }
}

pub struct Title(pub &'static str);

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("{:>12}", self.0);
        if is_color_output_enabled() {
            write!(f, "{}", title.as_str().dark_blue().bold())
        } else {
            f.write_str(&title)
        }
    }
}
