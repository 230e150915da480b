//! Test doubles shared by the speech crates.
//!
//! [`MockEngine`] records every host call and lets a test decide when an
//! utterance ends. [`capture`] collects the log records emitted by a closure.

pub mod engine;
pub mod logs;

pub use engine::{Call, MockEngine};
pub use logs::{capture, Captured};
