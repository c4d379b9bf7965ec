//! # Periodic Reminder Timer
//!
//! [`ReminderTimer`] runs a tick callback on a background thread every
//! `interval`. The first tick fires one interval after start. The timer stops
//! when it is cancelled, when it is dropped, after an optional tick limit, or
//! when the callback returns [`ControlFlow::Break`].
//!
//! The callback owns whatever it needs; nothing is shared with the thread that
//! started the timer.

use std::ops::ControlFlow;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, trace};

pub struct ReminderTimer {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<usize>>,
}

impl ReminderTimer {
    /// Starts an unbounded timer.
    pub fn start<F>(interval: Duration, tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        Self::spawn(interval, None, tick)
    }

    /// Starts a timer that stops by itself after `max_ticks` ticks.
    pub fn start_bounded<F>(interval: Duration, max_ticks: usize, tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        Self::spawn(interval, Some(max_ticks), tick)
    }

    fn spawn<F>(interval: Duration, max_ticks: Option<usize>, mut tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = std::thread::spawn(move || {
            let mut ticks = 0usize;
            loop {
                if max_ticks.is_some_and(|max| ticks >= max) {
                    break;
                }
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        ticks += 1;
                        trace!(tick = ticks, "reminder timer tick");
                        if tick().is_break() {
                            debug!(tick = ticks, "reminder timer stopped by callback");
                            break;
                        }
                    }
                    // Explicit cancel, or the timer handle was dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            debug!(ticks, "reminder timer stopped");
            ticks
        });

        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Stops the timer and returns the number of ticks that ran.
    pub fn cancel(mut self) -> usize {
        self.shutdown()
    }

    /// Blocks until the timer stops by itself: a bounded timer runs out, the
    /// callback breaks, or the callback panics.
    pub fn wait(mut self) -> usize {
        let ticks = self
            .handle
            .take()
            .map(|h| h.join().unwrap_or(0))
            .unwrap_or(0);
        self.stop.take();
        ticks
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    fn shutdown(&mut self) -> usize {
        if let Some(stop) = self.stop.take() {
            // The thread may already be gone
            let _ = stop.send(());
        }
        self.handle
            .take()
            .map(|h| h.join().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl Drop for ReminderTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
