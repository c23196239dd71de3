//! User commands for `Stopwatch`.
//!
//! Each command applies one state transition, starts or cancels the tick
//! thread to match the new phase, and notifies subscribers. Commands that are
//! unavailable in the current phase change nothing and notify nobody.

use log::{debug, info};

use crate::error::Result;
use crate::format::format_elapsed;
use crate::state::Lap;

use super::ticker::Ticker;
use super::Stopwatch;

impl Stopwatch {
    /// Start (or resume) timing.
    ///
    /// Returns `Ok(false)` when already running; the current segment is kept.
    /// If the tick thread cannot be spawned the stopwatch is left exactly as
    /// it was.
    pub fn start(&self) -> Result<bool> {
        {
            let mut ticker = self.ticker();
            let mut state = self.shared.state();
            let previous = state.clone();
            if !state.start(self.shared.clock.now_ms()) {
                debug!("start ignored: already running");
                return Ok(false);
            }

            let shared = self.shared.clone();
            match Ticker::spawn(self.config.tick_interval, move || shared.tick()) {
                Ok(new_ticker) => *ticker = Some(new_ticker),
                Err(err) => {
                    *state = previous;
                    return Err(err);
                }
            }
            self.shared.publish(&state);
        }

        info!("Stopwatch started");
        self.shared.notify();
        Ok(true)
    }

    /// Pause timing, folding the current segment into the total.
    ///
    /// Returns `false` when not running.
    pub fn pause(&self) -> bool {
        let (previous, elapsed_ms) = {
            let mut ticker = self.ticker();
            let mut state = self.shared.state();
            if !state.pause(self.shared.clock.now_ms()) {
                debug!("pause ignored: not running");
                return false;
            }
            self.shared.publish(&state);
            (ticker.take(), state.elapsed_ms())
        };
        if let Some(mut previous) = previous {
            previous.stop();
        }

        info!("Stopwatch paused at {}", format_elapsed(elapsed_ms));
        self.shared.notify();
        true
    }

    /// Stop timing and clear elapsed time, lap mark and laps.
    pub fn reset(&self) {
        let previous = {
            let mut ticker = self.ticker();
            let mut state = self.shared.state();
            state.reset(self.shared.clock.now_ms());
            self.shared.publish(&state);
            ticker.take()
        };
        if let Some(mut previous) = previous {
            previous.stop();
        }

        info!("Stopwatch reset");
        self.shared.notify();
    }

    /// Record a lap from the current elapsed time.
    ///
    /// Returns `None` while paused, where the lap control is hidden.
    pub fn lap(&self) -> Option<Lap> {
        let lap = {
            let _ticker = self.ticker();
            let mut state = self.shared.state();
            let lap = state.lap(self.shared.clock.now_ms());
            if lap.is_some() {
                self.shared.publish(&state);
            }
            lap
        };

        match lap {
            Some(lap) => {
                info!("Lap {} at {}", lap.number, lap.text);
                self.shared.notify();
                Some(lap)
            }
            None => {
                debug!("lap ignored: stopwatch is paused");
                None
            }
        }
    }
}
