use std::time::Duration;

pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// One-shot delayed execution supplied by the host.
pub trait Timer {
    fn after(&self, delay: Duration, task: TimerTask);
}

/// [`Timer`] backed by a tokio runtime.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone)]
pub struct TokioTimer {
    handle: tokio::runtime::Handle,
}

#[cfg(not(target_arch = "wasm32"))]
impl TokioTimer {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Timer for TokioTimer {
    fn after(&self, delay: Duration, task: TimerTask) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}
