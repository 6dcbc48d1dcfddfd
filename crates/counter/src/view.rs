// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use kobold::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::state::{Action, Counter, Outcome};
use crate::surface::{Surface, ERROR_TEXT};

// The tag literals below must stay in step with `surface::tag`;
// `tests/view_markup.rs` compares them against the static markup.
#[component]
fn app() -> impl View {
    stateful(Counter::new, |counter| {
        let surface = Surface::of(counter);

        // Repeated refused decrements leave nothing to redraw.
        let increment = counter.bind(|counter, _| render_if(counter.apply(Action::Increment)));
        let decrement = counter.bind(|counter, _| render_if(counter.apply(Action::Decrement)));

        view! {
            <div data-test="component-app">
                <h1 data-test="counter-display">
                    "The counter is currently "<span data-test="count">{ surface.count }</span>
                </h1>
                <div data-test="error-message" class={ surface.error_class() }>
                    { ERROR_TEXT }
                </div>
                <button data-test="increment-button" onclick={increment}>"Increment counter"</button>
                <button data-test="decrement-button" onclick={decrement}>"Decrement counter"</button>
            </div>
        }
    })
}

fn render_if(outcome: Outcome) -> Then {
    if outcome.should_render() {
        Then::Render
    } else {
        Then::Stop
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    kobold::start(view! {
        <!app>
    });
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;

    #[wasm_bindgen_test]
    fn only_unchanged_stops() {
        assert!(matches!(render_if(Outcome::Counted), Then::Render));
        assert!(matches!(render_if(Outcome::Refused), Then::Render));
        assert!(matches!(render_if(Outcome::Unchanged), Then::Stop));
    }

    #[wasm_bindgen_test]
    fn second_refusal_stops() {
        let mut counter = Counter::new();

        assert!(matches!(render_if(counter.apply(Action::Decrement)), Then::Render));
        assert!(matches!(render_if(counter.apply(Action::Decrement)), Then::Stop));
        assert!(matches!(render_if(counter.apply(Action::Increment)), Then::Render));
    }
}
