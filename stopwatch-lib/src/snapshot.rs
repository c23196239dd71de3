//! Immutable view of the stopwatch handed to subscribers.

use serde::Serialize;

use crate::format::format_elapsed;
use crate::state::{Controls, Lap, Phase, StopwatchState};

/// Everything a display needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub elapsed_ms: u64,
    pub elapsed: String,
    /// Present only once a lap has been recorded since the last reset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    /// Newest first.
    pub laps: Vec<Lap>,
    pub controls: Controls,
}

impl Snapshot {
    /// One-line summary, e.g. `running 00:00:01:20 diff 00:00:00:40 laps=2`.
    pub fn status_line(&self) -> String {
        let mut line = format!("{} {}", self.phase.label(), self.elapsed);
        if let Some(diff) = &self.diff {
            line.push_str(" diff ");
            line.push_str(diff);
        }
        line.push_str(&format!(" laps={}", self.laps.len()));
        line
    }
}

impl From<&StopwatchState> for Snapshot {
    fn from(state: &StopwatchState) -> Self {
        let diff_ms = state.diff_ms();
        Self {
            phase: state.phase(),
            elapsed_ms: state.elapsed_ms(),
            elapsed: format_elapsed(state.elapsed_ms()),
            diff_ms,
            diff: diff_ms.map(format_elapsed),
            laps: state.laps().to_vec(),
            controls: state.controls(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_snapshot_has_no_diff() {
        let snapshot = Snapshot::from(&StopwatchState::new());
        assert_eq!(snapshot.elapsed, "00:00:00:00");
        assert_eq!(snapshot.diff, None);
        assert_eq!(snapshot.status_line(), "idle 00:00:00:00 laps=0");
    }

    #[test]
    fn status_line_includes_diff_after_lap() {
        let mut state = StopwatchState::new();
        state.start(0);
        state.lap(800);
        state.tick(1_200);
        let snapshot = Snapshot::from(&state);
        assert_eq!(
            snapshot.status_line(),
            "running 00:00:01:20 diff 00:00:00:40 laps=1"
        );
    }

    #[test]
    fn serializes_phase_and_controls() {
        let mut state = StopwatchState::new();
        state.start(0);
        state.pause(2_500);
        let value = serde_json::to_value(Snapshot::from(&state)).unwrap();
        assert_eq!(value["phase"], "paused");
        assert_eq!(value["elapsed"], "00:00:02:50");
        assert_eq!(value["controls"]["reset"], true);
        assert!(value.get("diff").is_none());
    }
}
