//! One-shot, cancelable, reschedulable deadline on the tokio runtime.
//!
//! At most one deadline is pending. Scheduling a new one cancels the old one
//! first. Every schedule gets a fresh generation number and the expiry
//! callback receives it; the owner checks [`DeadlineTimer::take_expired`]
//! under its own lock so a task that woke up just as it was cancelled or
//! replaced does nothing.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug)]
pub struct DeadlineTimer {
    rt: Handle,
    task: Option<JoinHandle<()>>,
    generation: u64,
    armed: bool,
    closed: bool,
}

impl DeadlineTimer {
    /// Create a timer spawning onto `rt`
    pub fn new(rt: Handle) -> Self {
        Self {
            rt,
            task: None,
            generation: 0,
            armed: false,
            closed: false,
        }
    }

    /// Arm the timer. Any pending deadline is cancelled first.
    ///
    /// `on_expiry` runs on the runtime after `delay` with the generation of
    /// this schedule. Returns that generation, or None once the timer has
    /// been shut down.
    pub fn schedule<F>(&mut self, delay: Duration, on_expiry: F) -> Option<u64>
    where
        F: FnOnce(u64) + Send + 'static,
    {
        if self.closed {
            return None;
        }
        self.cancel();

        self.generation += 1;
        self.armed = true;
        let generation = self.generation;
        debug!(generation, delay_ms = delay.as_millis() as u64, "scheduling deadline");

        self.task = Some(self.rt.spawn(async move {
            tokio::time::sleep(delay).await;
            on_expiry(generation);
        }));
        Some(generation)
    }

    /// Disarm the pending deadline, if any. Safe to call repeatedly and on a
    /// deadline that already fired.
    pub fn cancel(&mut self) {
        self.armed = false;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Claim an expiry. Returns true only for the generation currently armed,
    /// and disarms it so the same expiry is never handled twice.
    pub fn take_expired(&mut self, generation: u64) -> bool {
        if !self.armed || generation != self.generation {
            debug!(generation, current = self.generation, "stale deadline ignored");
            return false;
        }
        self.armed = false;
        // Detach rather than abort: this is the task running the callback.
        self.task = None;
        true
    }

    /// Cancel and refuse all future schedules
    pub fn shutdown(&mut self) {
        self.cancel();
        self.closed = true;
    }

    pub fn is_pending(&self) -> bool {
        self.armed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
