//! Walk state for one `read_from_selectors` call.

use crate::TextNode;

/// Where a session is in its deliver / wait cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Fragment `index` has been handed to the engine.
    Delivering { index: usize },
    /// Waiting out the pause before fragment `index`.
    Waiting { index: usize },
}

pub struct Session {
    id: u64,
    fragments: Vec<Box<dyn TextNode>>,
    cursor: usize,
    phase: Phase,
}

impl Session {
    pub fn new(id: u64, fragments: Vec<Box<dyn TextNode>>) -> Self {
        Self {
            id,
            fragments,
            cursor: 0,
            phase: Phase::Delivering { index: 0 },
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Trimmed text of the next non-empty fragment at or after the current index.
    ///
    /// Empty fragments are skipped without a pause. Returns `None` and goes idle
    /// once the fragments run out.
    pub fn next_text(&mut self) -> Option<String> {
        let Phase::Delivering { mut index } = self.phase else {
            return None;
        };
        while let Some(node) = self.fragments.get(index) {
            let text = node.text_content().unwrap_or_default();
            let text = text.trim();
            if !text.is_empty() {
                self.cursor = index;
                self.phase = Phase::Delivering { index };
                return Some(text.to_owned());
            }
            index += 1;
        }
        self.phase = Phase::Idle;
        None
    }

    /// The delivered fragment finished; start waiting before the next one.
    pub fn complete(&mut self) -> Option<usize> {
        match self.phase {
            Phase::Delivering { index } => {
                self.phase = Phase::Waiting { index: index + 1 };
                Some(index + 1)
            }
            _ => None,
        }
    }

    /// The pause before `index` elapsed. False if the session moved on or stopped meanwhile.
    pub fn resume_after_delay(&mut self, index: usize) -> bool {
        if self.phase == (Phase::Waiting { index }) {
            self.phase = Phase::Delivering { index };
            return true;
        }
        false
    }

    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Mark the most recently delivered fragment as being delivered again.
    pub fn replay(&mut self) {
        self.phase = Phase::Delivering { index: self.cursor };
    }
}
