use clap::ValueEnum;
use counter::{Action, Counter, Surface};
use serde::Serialize;

use crate::log;
use crate::report::{ErrorExt, Report};
use crate::Render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Markup of the view, as the browser would show it
    Html,
    /// One line summary
    Text,
    /// State and surface as JSON
    Json,
}

#[derive(Serialize)]
struct Snapshot {
    state: Counter,
    surface: Surface,
}

pub fn render(r: &Render) -> Report<()> {
    println!("{}", snapshot(&r.actions, r.format)?);

    Ok(())
}

fn snapshot(actions: &[Action], format: Format) -> Report<String> {
    let mut counter = Counter::new();

    for &action in actions {
        let outcome = counter.apply(action);

        log::info!("{action}: {outcome:?}, count is {}", counter.count());
    }

    let surface = Surface::of(&counter);

    Ok(match format {
        Format::Html => surface.to_html(),
        Format::Text => format!(
            "count: {}, error: {}",
            surface.count,
            if surface.error_hidden { "hidden" } else { "visible" },
        ),
        Format::Json => serde_json::to_string_pretty(&Snapshot {
            state: counter,
            surface,
        })
        .message("failed to serialize snapshot")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use Action::{Decrement, Increment};

    #[test]
    fn text() {
        assert_eq!(
            snapshot(&[], Format::Text).unwrap(),
            "count: 0, error: hidden"
        );
        assert_eq!(
            snapshot(&[Decrement, Decrement], Format::Text).unwrap(),
            "count: 0, error: visible"
        );
        assert_eq!(
            snapshot(&[Decrement, Increment, Increment], Format::Text).unwrap(),
            "count: 2, error: hidden"
        );
    }

    #[test]
    fn json() {
        let json: serde_json::Value =
            serde_json::from_str(&snapshot(&[Increment, Increment], Format::Json).unwrap())
                .unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "state": { "normal": 2 },
                "surface": { "count": 2, "error_hidden": true },
            })
        );

        let json: serde_json::Value =
            serde_json::from_str(&snapshot(&[Decrement], Format::Json).unwrap()).unwrap();

        assert_eq!(json["state"], "blocked");
        assert_eq!(json["surface"]["error_hidden"], false);
    }

    #[test]
    fn html() {
        let html = snapshot(&[Increment], Format::Html).unwrap();

        assert_eq!(html, Surface::of(&Counter::Normal(1)).to_html());
    }
}
