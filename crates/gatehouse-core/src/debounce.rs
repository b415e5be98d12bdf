//! Cancellable, replaceable delayed callback.
//!
//! A `Debouncer` is either Idle or Armed. `arm` always cancels the previous
//! countdown before starting a new one, so at most one callback is in flight.
//! `cancel` (and `Drop`) return the timer to Idle; a canceled callback never
//! runs, even if its sleep finished on another worker at the same moment.
//!
//! ## Cancellation
//!
//! Each countdown is a tokio task racing `sleep(delay)` against a
//! `CancellationToken`. The token only wakes the task early. The guarantee
//! that a canceled callback never runs comes from the shared `armed` slot:
//! the task fires only if the slot still holds its own generation, and it
//! clears the slot under the same lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Quiet period used when nothing else is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    armed: Arc<Mutex<Option<u64>>>,
    cancel: Option<CancellationToken>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            armed: Arc::new(Mutex::new(None)),
            cancel: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns true while a countdown is pending.
    pub fn is_armed(&self) -> bool {
        lock(&self.armed).is_some()
    }

    /// Cancels any pending countdown and starts a new one that runs `fire`
    /// once the delay elapses uninterrupted.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn arm<F>(&mut self, fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        *lock(&self.armed) = Some(generation);

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        let armed = Arc::clone(&self.armed);
        let delay = self.delay;
        tracing::trace!(generation, ?delay, "debounce armed");

        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    let mut slot = lock(&armed);
                    if *slot == Some(generation) {
                        *slot = None;
                        tracing::trace!(generation, "debounce fired");
                        fire();
                    }
                }
            }
        });
    }

    /// Cancels the pending countdown, if any.
    ///
    /// Returns true if a countdown was pending.
    pub fn cancel(&mut self) -> bool {
        let was_armed = lock(&self.armed).take().is_some();
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        if was_armed {
            tracing::trace!(generation = self.generation, "debounce canceled");
        }
        was_armed
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock(slot: &Mutex<Option<u64>>) -> MutexGuard<'_, Option<u64>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;
    use tokio::time::sleep;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<&'static str>) -> Vec<&'static str> {
        let mut out = Vec::new();
        while let Ok(v) = rx.try_recv() {
            out.push(v);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(ms(500));

        debouncer.arm(move || {
            let _ = tx.send("fired");
        });
        assert!(debouncer.is_armed());

        sleep(ms(499)).await;
        assert!(drain(&mut rx).is_empty());
        assert!(debouncer.is_armed());

        sleep(ms(2)).await;
        assert_eq!(drain(&mut rx), vec!["fired"]);
        assert!(!debouncer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_collapses_burst_into_last_callback() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(ms(500));

        for value in ["a", "a@", "a@b"] {
            let tx = tx.clone();
            debouncer.arm(move || {
                let _ = tx.send(value);
            });
            sleep(ms(200)).await;
        }
        assert!(drain(&mut rx).is_empty());

        sleep(ms(400)).await;
        assert_eq!(drain(&mut rx), vec!["a@b"]);

        sleep(ms(2000)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_fire() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(ms(500));

        debouncer.arm(move || {
            let _ = tx.send("fired");
        });
        sleep(ms(100)).await;
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        sleep(ms(1000)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_prevents_fire() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut debouncer = Debouncer::new(ms(500));
            debouncer.arm(move || {
                let _ = tx.send("fired");
            });
        }

        sleep(ms(1000)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_can_rearm_after_firing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(ms(50));

        let first = tx.clone();
        debouncer.arm(move || {
            let _ = first.send("first");
        });
        sleep(ms(60)).await;

        debouncer.arm(move || {
            let _ = tx.send("second");
        });
        sleep(ms(60)).await;

        assert_eq!(drain(&mut rx), vec!["first", "second"]);
    }

    #[test]
    fn test_default_delay_is_half_a_second() {
        assert_eq!(Debouncer::default().delay(), ms(500));
    }
}
