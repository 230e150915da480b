use tokio::sync::mpsc;

/// Host notification routed back into the reader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReaderEvent {
    /// The host voice list changed.
    VoicesChanged,
    /// The utterance submitted with `ticket` finished speaking.
    UtteranceEnded { ticket: u64 },
    /// The pause before fragment `index` of `session` elapsed.
    DelayElapsed { session: u64, index: usize },
}

/// Receiving half of the reader's event channel.
pub struct ReaderEvents {
    rx: mpsc::UnboundedReceiver<ReaderEvent>,
}

impl ReaderEvents {
    pub(crate) fn channel() -> (mpsc::UnboundedSender<ReaderEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }

    /// Wait for the next event. Only returns `None` once the reader is dropped.
    pub async fn recv(&mut self) -> Option<ReaderEvent> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<ReaderEvent> {
        self.rx.try_recv().ok()
    }
}
