//! Read a page aloud one fragment at a time.
//!
//! [`TextReader`] resolves selectors against a [`Document`], then feeds each
//! non-empty fragment to the speech engine, waiting a fixed delay between
//! fragments. Host notifications arrive as [`ReaderEvent`]s which the host
//! hands back to [`TextReader::handle`].

pub mod document;
pub mod error;
pub mod event;
pub mod options;
pub mod reader;
pub mod session;
pub mod timer;

pub use document::{Document, TextNode};
pub use error::{ReaderError, SelectorError};
pub use event::{ReaderEvent, ReaderEvents};
pub use options::ReaderOptions;
pub use reader::{ReaderState, TextReader, FRAGMENT_DELAY};
pub use session::{Phase, Session};
#[cfg(not(target_arch = "wasm32"))]
pub use timer::TokioTimer;
pub use timer::{Timer, TimerTask};
