use reader::{Document, SelectorError, TextNode};
use web_sys::Element;

use crate::engine::js_message;

pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

struct WebNode(Element);

impl TextNode for WebNode {
    fn text_content(&self) -> Option<String> {
        self.0.text_content()
    }
}

impl Document for WebDocument {
    fn query_selector(&self, selector: &str) -> Result<Option<Box<dyn TextNode>>, SelectorError> {
        self.document
            .query_selector(selector)
            .map(|found| found.map(|el| Box::new(WebNode(el)) as Box<dyn TextNode>))
            .map_err(|err| SelectorError::Invalid {
                selector: selector.to_owned(),
                reason: js_message(&err),
            })
    }
}
