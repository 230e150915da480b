//! Play button wiring for `.glb-audio-description` blocks.
//!
//! Each block lists the selectors to read in `data-containerstoread` as a
//! JSON array. Its visual state lives in CSS classes on the block itself.

use std::cell::RefCell;
use std::rc::Rc;

use reader::TextReader;
use tracing::{debug, error};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::Element;

use crate::engine::js_message;

pub const CONTAINERS_ATTR: &str = "data-containerstoread";
pub const NOT_PLAYED: &str = "is-not-played";
pub const PLAYING: &str = "is-playing";
pub const STOPPED: &str = "is-stopped";
pub const PAUSED: &str = "is-paused";

const BUTTON_SELECTOR: &str = ".glb-audio-description__play";
const BUTTON_HTML: &str = r#"<button class="glb-audio-description__button glb-audio-description__play" type="button" aria-label="Ouvir"></button>"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    Play,
    Stop,
}

/// What one click asks of the reader, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Activation {
    pub read_first: bool,
    pub transport: Transport,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WidgetState {
    pub not_played: bool,
    pub playing: bool,
    pub stopped: bool,
    pub paused: bool,
}

impl WidgetState {
    pub fn fresh() -> Self {
        Self {
            not_played: true,
            ..Self::default()
        }
    }

    pub fn from_classes(has: impl Fn(&str) -> bool) -> Self {
        Self {
            not_played: has(NOT_PLAYED),
            playing: has(PLAYING),
            stopped: has(STOPPED),
            paused: has(PAUSED),
        }
    }

    /// Write every class back, adding those set and removing the rest.
    pub fn apply<E>(&self, mut set: impl FnMut(&'static str, bool) -> Result<(), E>) -> Result<(), E> {
        set(NOT_PLAYED, self.not_played)?;
        set(PLAYING, self.playing)?;
        set(STOPPED, self.stopped)?;
        set(PAUSED, self.paused)
    }

    /// Advance the state for one click.
    ///
    /// A block that was never played (or was stopped) re-reads its selectors
    /// before playing; a playing block stops.
    pub fn activate(&mut self) -> Activation {
        let read_first = self.not_played;
        if read_first {
            self.not_played = false;
            self.stopped = false;
        }
        let transport = if self.playing {
            self.playing = false;
            self.stopped = true;
            self.not_played = true;
            Transport::Stop
        } else {
            self.paused = false;
            self.playing = true;
            Transport::Play
        };
        Activation {
            read_first,
            transport,
        }
    }
}

/// Selector list from a `data-containerstoread` value; `None` when it is not a JSON string array.
pub fn parse_containers(raw: &str) -> Option<Vec<String>> {
    serde_json::from_str(raw).ok()
}

/// Attach the play button of `element` to `reader`. Blocks without a valid selector list are left alone.
pub fn wire(element: &Element, reader: &Rc<RefCell<TextReader>>) -> Result<(), JsValue> {
    let Some(raw) = element.get_attribute(CONTAINERS_ATTR) else {
        return Ok(());
    };
    let Some(containers) = parse_containers(&raw) else {
        debug!(%raw, "ignoring malformed selector list");
        return Ok(());
    };

    if element.query_selector(BUTTON_SELECTOR)?.is_none() {
        element.class_list().add_1(NOT_PLAYED)?;
        element.insert_adjacent_html("afterbegin", BUTTON_HTML)?;
    }
    let Some(button) = element.query_selector(BUTTON_SELECTOR)? else {
        return Ok(());
    };

    let block = element.clone();
    let reader = Rc::clone(reader);
    let on_click = Closure::<dyn FnMut()>::new(move || {
        if let Err(err) = activate(&block, &reader, &containers) {
            error!(error = %js_message(&err), "audio description control failed");
        }
    });
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn activate(block: &Element, reader: &RefCell<TextReader>, containers: &[String]) -> Result<(), JsValue> {
    let classes = block.class_list();
    let mut state = WidgetState::from_classes(|name| classes.contains(name));
    let activation = state.activate();
    state.apply(|name, on| {
        if on {
            classes.add_1(name)
        } else {
            classes.remove_1(name)
        }
    })?;

    let mut reader = reader.borrow_mut();
    if activation.read_first {
        reader.read_from_selectors(containers);
    }
    match activation.transport {
        Transport::Play => reader.play(),
        Transport::Stop => reader
            .stop()
            .map_err(|err| JsValue::from_str(&err.to_string()))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_click_reads_then_plays() {
        let mut state = WidgetState::fresh();
        let activation = state.activate();
        assert_eq!(
            activation,
            Activation {
                read_first: true,
                transport: Transport::Play
            }
        );
        assert!(state.playing);
        assert!(!state.not_played);
    }

    #[test]
    fn clicks_alternate_stop_and_replay() {
        let mut state = WidgetState::fresh();
        state.activate();

        let stop = state.activate();
        assert_eq!(stop.transport, Transport::Stop);
        assert!(!stop.read_first);
        assert!(state.stopped && state.not_played && !state.playing);

        let replay = state.activate();
        assert_eq!(
            replay,
            Activation {
                read_first: true,
                transport: Transport::Play
            }
        );
        assert!(!state.stopped);
    }

    #[test]
    fn playing_clears_paused() {
        let mut state = WidgetState {
            paused: true,
            ..WidgetState::default()
        };
        let activation = state.activate();
        assert_eq!(activation.transport, Transport::Play);
        assert!(!activation.read_first);
        assert!(!state.paused);
    }

    #[test]
    fn classes_round_trip_through_state() {
        let state = WidgetState::from_classes(|c| c == PLAYING || c == PAUSED);
        assert!(state.playing && state.paused && !state.stopped && !state.not_played);

        let mut written = Vec::new();
        state
            .apply(|name, on| {
                written.push((name, on));
                Ok::<_, ()>(())
            })
            .unwrap();
        assert_eq!(
            written,
            vec![(NOT_PLAYED, false), (PLAYING, true), (STOPPED, false), (PAUSED, true)]
        );
    }

    #[test]
    fn parses_selector_lists() {
        assert_eq!(
            parse_containers(r##"["#title", ".lead > p", "[data-x=\"1\"]"]"##),
            Some(vec!["#title".into(), ".lead > p".into(), "[data-x=\"1\"]".into()])
        );
        assert_eq!(parse_containers("[]"), Some(vec![]));
    }

    #[test]
    fn rejects_malformed_selector_lists() {
        assert_eq!(parse_containers("[#title"), None);
        assert_eq!(parse_containers(r##""#title""##), None);
        assert_eq!(parse_containers(""), None);
        assert_eq!(parse_containers("[1, 2]"), None);
    }
}
