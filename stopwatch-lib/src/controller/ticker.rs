//! Periodic tick thread driving live display updates.

use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::error::Result;

#[cfg(test)]
thread_local! {
    /// Makes the next spawn on this thread fail, as if the OS refused a thread.
    pub(super) static FAIL_NEXT_SPAWN: std::cell::Cell<bool> = std::cell::Cell::new(false);
}

/// Background thread calling `on_tick` every `interval` until stopped.
///
/// The thread waits on a channel rather than sleeping, so [`Ticker::stop`]
/// wakes it straight away instead of after the current interval.
pub(super) struct Ticker {
    stop_tx: Option<Sender<()>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn the tick thread. The loop also ends when `on_tick` returns `false`.
    pub(super) fn spawn<F>(interval: Duration, mut on_tick: F) -> Result<Self>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        #[cfg(test)]
        if FAIL_NEXT_SPAWN.with(|fail| fail.replace(false)) {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "thread limit reached").into());
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("stopwatch-tick".to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if !on_tick() {
                            break;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        log::debug!("tick thread started ({}ms interval)", interval.as_millis());
        Ok(Self {
            stop_tx: Some(stop_tx),
            thread_handle: Some(handle),
        })
    }

    /// Stop the tick thread and wait for it to exit.
    pub(super) fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.thread_handle.take() {
            if handle.thread().id() == thread::current().id() {
                log::warn!("ticker stop called from tick thread; skipping join");
            } else if handle.join().is_err() {
                log::warn!("tick thread panicked during join");
            } else {
                log::debug!("tick thread stopped");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn ticks_until_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let mut ticker = Ticker::spawn(Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();

        thread::sleep(Duration::from_millis(60));
        ticker.stop();
        let seen = count.load(Ordering::SeqCst);
        assert!(seen > 0);

        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }

    #[test]
    fn stop_does_not_wait_for_interval() {
        let mut ticker = Ticker::spawn(Duration::from_secs(30), || true).unwrap();
        let started = Instant::now();
        ticker.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn exits_when_callback_declines() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let mut ticker = Ticker::spawn(Duration::from_millis(1), move || {
            counter.fetch_add(1, Ordering::SeqCst) < 2
        })
        .unwrap();

        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), 3);
        ticker.stop();
    }
}
