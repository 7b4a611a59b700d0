//! Busy signalling for long-running actions.
//!
//! The capability is a single `set_busy` method on an explicitly passed
//! sink — no ambient global. Headless callers (tests) use [`NoopBusy`];
//! the TTY console uses [`SpinnerBusy`].

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// The one capability panels get: flip the busy indicator.
pub trait BusySink: Send + Sync {
    fn set_busy(&self, busy: bool);
}

/// No-op sink for headless runs.
#[derive(Default, Clone, Copy)]
pub struct NoopBusy;

impl BusySink for NoopBusy {
    fn set_busy(&self, _busy: bool) {}
}

/// Terminal spinner shown while a request is in flight.
pub struct SpinnerBusy {
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerBusy {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }
}

impl Default for SpinnerBusy {
    fn default() -> Self {
        Self::new()
    }
}

impl BusySink for SpinnerBusy {
    fn set_busy(&self, busy: bool) {
        let mut guard = self.bar.lock().expect("spinner lock");
        if busy {
            if guard.is_none() {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::with_template("{spinner} {msg}")
                        .expect("static template")
                        .tick_chars("-\\|/ "),
                );
                pb.set_message("waiting for server");
                pb.enable_steady_tick(Duration::from_millis(80));
                *guard = Some(pb);
            }
        } else if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

/// RAII helper: busy on construction, idle on drop (even on early return).
pub struct BusyGuard<'a> {
    sink: &'a dyn BusySink,
}

impl<'a> BusyGuard<'a> {
    pub fn new(sink: &'a dyn BusySink) -> Self {
        sink.set_busy(true);
        Self { sink }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.sink.set_busy(false);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI32, Ordering};

    use super::*;

    struct CountingSink {
        level: AtomicI32,
    }

    impl BusySink for CountingSink {
        fn set_busy(&self, busy: bool) {
            self.level
                .fetch_add(if busy { 1 } else { -1 }, Ordering::SeqCst);
        }
    }

    #[test]
    fn guard_balances_busy_and_idle() {
        let sink = CountingSink {
            level: AtomicI32::new(0),
        };
        {
            let _guard = BusyGuard::new(&sink);
            assert_eq!(sink.level.load(Ordering::SeqCst), 1);
        }
        assert_eq!(sink.level.load(Ordering::SeqCst), 0);
    }
}
