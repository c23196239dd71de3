//! The stopwatch controller.
//!
//! [`Stopwatch`] owns the [`StopwatchState`], the clock and the tick thread.
//! Display layers do not poll it: they [`subscribe`](Stopwatch::subscribe)
//! and receive a [`Snapshot`] after every command and every tick.
//!
//! Snapshots are queued while the state lock is held, so the queue follows
//! the order of state changes. Whichever thread finds the queue idle drains
//! it, which keeps deliveries in that order even when a command races a
//! tick. A callback that issues a command only enqueues; the drain it is
//! running inside delivers the result once the callback returns.

mod commands;
mod config;
mod ticker;

pub use config::{StopwatchConfig, DEFAULT_TICK_INTERVAL_MS};

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::state::StopwatchState;

use ticker::Ticker;

/// Handle returned by [`Stopwatch::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(&Snapshot) + Send + Sync>;

/// State shared between command handlers and the tick thread.
struct Shared {
    state: Mutex<StopwatchState>,
    clock: Box<dyn Clock>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_subscription: AtomicU64,
    delivery: Mutex<Delivery>,
}

/// Snapshots waiting for delivery, and whether a thread is draining them.
#[derive(Default)]
struct Delivery {
    pending: VecDeque<Snapshot>,
    draining: bool,
}

/// Clears the draining flag if an observer panics mid-drain.
struct DrainGuard<'a>(&'a Shared);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.delivery().draining = false;
        }
    }
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, StopwatchState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn observers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Observer)>> {
        self.observers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn delivery(&self) -> MutexGuard<'_, Delivery> {
        self.delivery
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// One tick of the update loop. Returns `false` once the stopwatch has
    /// left the running phase.
    fn tick(&self) -> bool {
        {
            let mut state = self.state();
            if !state.tick(self.clock.now_ms()) {
                return false;
            }
            self.publish(&state);
        }
        self.notify();
        true
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::from(&*self.state())
    }

    /// Queue a snapshot of `state`. Callers hold the state lock, which is
    /// what orders the queue.
    fn publish(&self, state: &StopwatchState) {
        self.delivery().pending.push_back(Snapshot::from(state));
    }

    /// Deliver queued snapshots, unless another drain is already running.
    fn notify(&self) {
        {
            let mut delivery = self.delivery();
            if delivery.draining {
                return;
            }
            delivery.draining = true;
        }
        let _guard = DrainGuard(self);

        loop {
            let snapshot = {
                let mut delivery = self.delivery();
                match delivery.pending.pop_front() {
                    Some(snapshot) => snapshot,
                    None => {
                        delivery.draining = false;
                        return;
                    }
                }
            };
            // Clone the list so callbacks may subscribe or unsubscribe.
            let observers: Vec<Observer> = self
                .observers()
                .iter()
                .map(|(_, observer)| observer.clone())
                .collect();
            for observer in observers {
                observer(&snapshot);
            }
        }
    }
}

/// A lap-recording stopwatch with a live-updating display feed.
pub struct Stopwatch {
    shared: Arc<Shared>,
    config: StopwatchConfig,
    ticker: Mutex<Option<Ticker>>,
}

impl Stopwatch {
    /// Create a stopwatch driven by the system's monotonic clock.
    pub fn new(config: StopwatchConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock::new())
    }

    /// Create a stopwatch reading time from `clock`.
    pub fn with_clock(config: StopwatchConfig, clock: impl Clock + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(StopwatchState::new()),
                clock: Box::new(clock),
                observers: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(1),
                delivery: Mutex::new(Delivery::default()),
            }),
            config,
            ticker: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &StopwatchConfig {
        &self.config
    }

    /// Current view, as of the last command or tick.
    pub fn snapshot(&self) -> Snapshot {
        self.shared.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.shared.state().is_running()
    }

    /// Register a callback receiving every new [`Snapshot`].
    ///
    /// Callbacks run on the thread that produced the snapshot: the caller's
    /// thread for commands, the tick thread for live updates. When both
    /// race, the thread already delivering also delivers the other's
    /// snapshot, so every observer sees snapshots in state order.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(
            self.shared
                .next_subscription
                .fetch_add(1, Ordering::Relaxed),
        );
        let observer: Observer = Arc::new(observer);
        self.shared.observers().push((id, observer));
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.shared.observers();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    fn ticker(&self) -> MutexGuard<'_, Option<Ticker>> {
        self.ticker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        let ticker = self.ticker().take();
        if let Some(mut ticker) = ticker {
            ticker.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::time::Duration;

    fn manual() -> (Stopwatch, ManualClock) {
        let clock = ManualClock::new(0);
        // Long interval: tests drive ticks by hand.
        let config = StopwatchConfig::default().with_tick_interval(Duration::from_secs(3600));
        let stopwatch = Stopwatch::with_clock(config, clock.clone()).unwrap();
        (stopwatch, clock)
    }

    #[test]
    fn subscribers_see_ticks() {
        let (stopwatch, clock) = manual();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        stopwatch.subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.elapsed.clone()));

        stopwatch.start().unwrap();
        clock.advance(1_500);
        assert!(stopwatch.shared.tick());

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec!["00:00:00:00", "00:00:01:50"]);
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let (stopwatch, _clock) = manual();
        let calls = Arc::new(AtomicU64::new(0));
        let counter = calls.clone();
        let id = stopwatch.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        stopwatch.start().unwrap();
        assert!(stopwatch.unsubscribe(id));
        assert!(!stopwatch.unsubscribe(id));
        stopwatch.pause();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn tick_stops_once_paused() {
        let (stopwatch, clock) = manual();
        stopwatch.start().unwrap();
        clock.advance(200);
        stopwatch.pause();
        clock.advance(200);
        assert!(!stopwatch.shared.tick());
        assert_eq!(stopwatch.snapshot().elapsed_ms, 200);
    }

    #[test]
    fn command_from_a_callback_is_delivered_after_it_returns() {
        let (stopwatch, _clock) = manual();
        let stopwatch = Arc::new(stopwatch);
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let weak = Arc::downgrade(&stopwatch);
            let seen = seen.clone();
            stopwatch.subscribe(move |snapshot| {
                let laps = snapshot.laps.len();
                seen.lock().unwrap().push(("enter", laps));
                if laps == 0 {
                    if let Some(stopwatch) = weak.upgrade() {
                        assert!(stopwatch.lap().is_some());
                    }
                }
                seen.lock().unwrap().push(("exit", laps));
            });
        }

        stopwatch.start().unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("enter", 0), ("exit", 0), ("enter", 1), ("exit", 1)]
        );
    }

    #[test]
    fn rejects_invalid_config() {
        let config = StopwatchConfig::default().with_tick_interval(Duration::ZERO);
        assert!(Stopwatch::new(config).is_err());
    }
}
