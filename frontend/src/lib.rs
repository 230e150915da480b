//! Browser entry point: read marked page sections aloud with the Web Speech API.

pub mod document;
pub mod engine;
pub mod logging;
pub mod timer;
pub mod widget;

use std::cell::RefCell;
use std::rc::Rc;

use reader::{ReaderError, ReaderOptions, TextReader};
use serde::Deserialize;
use tracing::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

pub use document::WebDocument;
pub use engine::WebSpeechEngine;
pub use logging::init_logging;
pub use timer::GlooTimer;

pub const DEFAULT_SELECTOR: &str = ".glb-audio-description";

/// Options accepted by `initAudioDescription`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InitOptions {
    /// Blocks to wire up.
    pub selector: String,
    #[serde(flatten)]
    pub reader: ReaderOptions,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.into(),
            reader: ReaderOptions::default(),
        }
    }
}

/// Handle returned to page scripts.
#[wasm_bindgen]
pub struct AudioDescription {
    reader: Rc<RefCell<TextReader>>,
}

#[wasm_bindgen]
impl AudioDescription {
    #[wasm_bindgen(js_name = readFromSelectors)]
    pub fn read_from_selectors(&self, selectors: Vec<String>) {
        self.reader.borrow_mut().read_from_selectors(&selectors);
    }

    pub fn play(&self) {
        self.reader.borrow_mut().play();
    }

    pub fn pause(&self) -> Result<(), JsValue> {
        self.reader.borrow_mut().pause().map_err(to_js)
    }

    pub fn resume(&self) -> Result<(), JsValue> {
        self.reader.borrow_mut().resume().map_err(to_js)
    }

    pub fn stop(&self) -> Result<(), JsValue> {
        self.reader.borrow_mut().stop().map_err(to_js)
    }

    #[wasm_bindgen(js_name = isSupported)]
    pub fn is_supported(&self) -> bool {
        self.reader.borrow().is_supported()
    }
}

/// Build the reader, start its event loop and wire every block matching `options.selector`.
#[wasm_bindgen(js_name = initAudioDescription)]
pub fn init_audio_description(options: JsValue) -> Result<AudioDescription, JsValue> {
    init_logging();
    let InitOptions { selector, reader } = if options.is_undefined() || options.is_null() {
        InitOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let (text_reader, mut events) = TextReader::new(
        Box::new(WebSpeechEngine::new(window)),
        Box::new(WebDocument::new(document.clone())),
        Box::new(GlooTimer),
        reader,
    );
    let reader = Rc::new(RefCell::new(text_reader));

    let pump = Rc::clone(&reader);
    spawn_local(async move {
        while let Some(event) = events.recv().await {
            pump.borrow_mut().handle(event);
        }
    });

    let wiring = Rc::clone(&reader);
    reader.borrow_mut().initialize(move |_| -> Result<(), JsValue> {
        let blocks = document.query_selector_all(&selector)?;
        for i in 0..blocks.length() {
            if let Some(block) = blocks.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                widget::wire(&block, &wiring)?;
            }
        }
        info!(blocks = blocks.length(), %selector, "audio description ready");
        Ok(())
    })?;

    Ok(AudioDescription { reader })
}

fn to_js(err: ReaderError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
