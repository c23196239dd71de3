//! Stopwatch state and its transitions.
//!
//! Every transition takes the current clock reading as an argument, so the
//! arithmetic here is deterministic and does not depend on any thread or
//! timer. [`Stopwatch`](crate::Stopwatch) owns one of these behind a lock and
//! feeds it readings from its [`Clock`](crate::Clock).

use serde::Serialize;

use crate::format::format_elapsed;

/// Which of the three screens the stopwatch is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Freshly created or just reset.
    Idle,
    Running,
    Paused,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
        }
    }
}

/// Visibility of the four command affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub start: bool,
    pub pause: bool,
    pub reset: bool,
    pub lap: bool,
}

impl Controls {
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Idle => Self {
                start: true,
                pause: false,
                reset: false,
                lap: true,
            },
            Phase::Running => Self {
                start: false,
                pause: true,
                reset: false,
                lap: true,
            },
            Phase::Paused => Self {
                start: true,
                pause: false,
                reset: true,
                lap: false,
            },
        }
    }
}

/// A recorded split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lap {
    /// 1-based, counted from the last reset.
    pub number: usize,
    pub elapsed_ms: u64,
    /// Elapsed display at the moment the lap was taken.
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct StopwatchState {
    phase: Phase,
    accumulated_ms: u64,
    baseline_ms: u64,
    segment_start_ms: u64,
    last_lap_mark: Option<u64>,
    /// Newest first.
    laps: Vec<Lap>,
}

impl Default for StopwatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwatchState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            accumulated_ms: 0,
            baseline_ms: 0,
            segment_start_ms: 0,
            last_lap_mark: None,
            laps: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn controls(&self) -> Controls {
        Controls::for_phase(self.phase)
    }

    /// Elapsed time as of the last tick or command.
    pub fn elapsed_ms(&self) -> u64 {
        self.accumulated_ms
    }

    /// Time since the last lap, when one has been recorded since the last reset.
    pub fn diff_ms(&self) -> Option<u64> {
        self.last_lap_mark
            .map(|mark| self.accumulated_ms.saturating_sub(mark))
    }

    pub fn last_lap_mark(&self) -> Option<u64> {
        self.last_lap_mark
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Begin a run segment. Returns `false` when already running.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.is_running() {
            return false;
        }
        self.baseline_ms = self.accumulated_ms;
        self.segment_start_ms = now_ms;
        self.phase = Phase::Running;
        true
    }

    /// End the current segment, folding it into the baseline. Returns `false`
    /// when not running.
    pub fn pause(&mut self, now_ms: u64) -> bool {
        if !self.is_running() {
            return false;
        }
        self.refresh(now_ms);
        self.baseline_ms = self.accumulated_ms;
        self.phase = Phase::Paused;
        true
    }

    /// Pause if needed, then clear everything back to the idle state.
    pub fn reset(&mut self, now_ms: u64) {
        self.pause(now_ms);
        *self = Self::new();
    }

    /// Record a lap. Rejected while paused, where the lap control is hidden.
    pub fn lap(&mut self, now_ms: u64) -> Option<Lap> {
        if !self.controls().lap {
            return None;
        }
        self.refresh(now_ms);
        let lap = Lap {
            number: self.laps.len() + 1,
            elapsed_ms: self.accumulated_ms,
            text: format_elapsed(self.accumulated_ms),
        };
        self.last_lap_mark = Some(self.accumulated_ms);
        self.laps.insert(0, lap.clone());
        Some(lap)
    }

    /// Recompute elapsed time for one tick. Returns `false` when not running.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.is_running() {
            return false;
        }
        self.refresh(now_ms);
        true
    }

    fn refresh(&mut self, now_ms: u64) {
        if !self.is_running() {
            return;
        }
        let current = self.baseline_ms + now_ms.saturating_sub(self.segment_start_ms);
        self.accumulated_ms = self.accumulated_ms.max(current);
    }
}
