use std::cell::RefCell;

use counter::surface::{tag, HIDDEN, TEST_ATTRIBUTE};
use counter::{Action, Counter, Surface};
use lol_html::{element, rewrite_str, text, RewriteStrSettings};

/// Counter driven through its tagged controls, queried through its markup.
struct App {
    counter: Counter,
}

#[derive(Default, Debug)]
struct Found {
    elements: usize,
    text: String,
    classes: Vec<String>,
}

impl Found {
    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

fn setup() -> App {
    App {
        counter: Counter::new(),
    }
}

impl App {
    fn html(&self) -> String {
        Surface::of(&self.counter).to_html()
    }

    fn find_by_test_attribute(&self, value: &str) -> Found {
        let selector = format!(r#"[{TEST_ATTRIBUTE}="{value}"]"#);
        let found = RefCell::new(Found::default());

        rewrite_str(
            &self.html(),
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!(selector, |el| {
                        let mut found = found.borrow_mut();

                        found.elements += 1;
                        if let Some(class) = el.get_attribute("class") {
                            found
                                .classes
                                .extend(class.split_whitespace().map(str::to_owned));
                        }

                        Ok(())
                    }),
                    text!(selector, |t| {
                        found.borrow_mut().text.push_str(t.as_str());

                        Ok(())
                    }),
                ],
                ..RewriteStrSettings::new()
            },
        )
        .expect("surface markup should be well formed");

        found.into_inner()
    }

    fn count(&self) -> String {
        self.find_by_test_attribute(tag::COUNT).text
    }

    fn click(&mut self, value: &str) {
        assert_eq!(self.find_by_test_attribute(value).elements, 1, "{value}");

        let action = match value {
            tag::INCREMENT => Action::Increment,
            tag::DECREMENT => Action::Decrement,
            _ => panic!("`{value}` is not a control"),
        };

        self.counter.apply(action);
    }
}

#[test]
fn renders_without_error() {
    let app = setup();

    assert_eq!(app.find_by_test_attribute(tag::APP).elements, 1);
}

#[test]
fn renders_every_tagged_element_once() {
    let app = setup();

    for value in tag::ALL {
        assert_eq!(app.find_by_test_attribute(value).elements, 1, "{value}");
    }
}

#[test]
fn renders_counter_display() {
    let app = setup();

    assert_eq!(app.find_by_test_attribute(tag::DISPLAY).elements, 1);
}

#[test]
fn counter_display_starts_from_0() {
    assert_eq!(setup().count(), "0");
}

mod increment {
    use super::*;

    #[test]
    fn renders_increment_button() {
        let app = setup();

        assert_eq!(app.find_by_test_attribute(tag::INCREMENT).elements, 1);
    }

    #[test]
    fn counter_increments_when_button_is_clicked() {
        let mut app = setup();

        app.click(tag::INCREMENT);

        assert_eq!(app.count(), "1");
    }
}

mod decrement {
    use super::*;

    #[test]
    fn renders_decrement_button() {
        let app = setup();

        assert_eq!(app.find_by_test_attribute(tag::DECREMENT).elements, 1);
    }

    #[test]
    fn decrements_counter_display_when_state_is_greater_than_0() {
        let mut app = setup();

        app.click(tag::INCREMENT);
        app.click(tag::DECREMENT);

        assert_eq!(app.count(), "0");
        assert!(app.find_by_test_attribute(tag::ERROR).has_class(HIDDEN));
    }
}

mod error_below_zero {
    use super::*;

    #[test]
    fn error_does_not_show_when_not_needed() {
        let app = setup();

        assert!(app.find_by_test_attribute(tag::ERROR).has_class(HIDDEN));
    }

    fn blocked() -> App {
        let mut app = setup();

        app.click(tag::DECREMENT);
        app
    }

    #[test]
    fn error_shows() {
        let app = blocked();

        assert!(!app.find_by_test_attribute(tag::ERROR).has_class(HIDDEN));
    }

    #[test]
    fn error_stays_in_the_tree() {
        let error = blocked().find_by_test_attribute(tag::ERROR);

        assert_eq!(error.elements, 1);
        assert_eq!(error.text, counter::surface::ERROR_TEXT);
    }

    #[test]
    fn counter_still_displays_0() {
        assert_eq!(blocked().count(), "0");
    }

    #[test]
    fn clicking_increment_clears_the_error() {
        let mut app = blocked();

        app.click(tag::INCREMENT);

        assert_eq!(app.count(), "1");
        assert!(app.find_by_test_attribute(tag::ERROR).has_class(HIDDEN));
    }

    #[test]
    fn repeated_decrements_stay_at_0() {
        let mut app = blocked();

        for _ in 0..5 {
            app.click(tag::DECREMENT);

            assert_eq!(app.count(), "0");
            assert!(!app.find_by_test_attribute(tag::ERROR).has_class(HIDDEN));
        }
    }
}
