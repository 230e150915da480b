use std::time::Duration;

use gloo_timers::callback::Timeout;
use reader::{Timer, TimerTask};

/// [`Timer`] on the browser's `setTimeout`.
#[derive(Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    fn after(&self, delay: Duration, task: TimerTask) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}
