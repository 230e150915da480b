use crate::SelectorError;

/// An element whose text can be read aloud.
pub trait TextNode {
    fn text_content(&self) -> Option<String>;
}

/// Source of elements, queried by CSS selector.
pub trait Document {
    /// First element matching `selector`, `Ok(None)` when nothing matches.
    fn query_selector(&self, selector: &str) -> Result<Option<Box<dyn TextNode>>, SelectorError>;
}
