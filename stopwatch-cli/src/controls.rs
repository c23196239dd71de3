use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use stopwatch_lib::{Controls, Phase, Snapshot, Stopwatch};

/// Text blocks for the stopwatch panels.
pub struct StatusSnapshot {
    pub text: String,
    pub laps: Vec<String>,
    pub help: String,
}

/// A key press resolved against the visible controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Pause,
    Reset,
    Lap,
    Quit,
}

pub fn status_text(snapshot: &Snapshot) -> StatusSnapshot {
    let state = match snapshot.phase {
        Phase::Idle => "■ Idle",
        Phase::Running => "▶ Running",
        Phase::Paused => "⏸ Paused",
    };
    let mut text = format!("{}   {}", state, snapshot.elapsed);
    if let Some(diff) = &snapshot.diff {
        text.push_str(&format!("\nSince last lap: {}", diff));
    }

    let laps = snapshot
        .laps
        .iter()
        .map(|lap| format!("#{:<3} {}", lap.number, lap.text))
        .collect();

    StatusSnapshot {
        text,
        laps,
        help: controls_help(snapshot.controls),
    }
}

/// Key hints for the affordances currently shown.
pub fn controls_help(controls: Controls) -> String {
    let mut hints = Vec::new();
    if controls.start {
        hints.push("space=start");
    }
    if controls.pause {
        hints.push("space=pause");
    }
    if controls.lap {
        hints.push("l=lap");
    }
    if controls.reset {
        hints.push("r=reset");
    }
    hints.push("q=quit");
    hints.join("  ")
}

/// Map a key to an action. Keys for hidden controls map to nothing.
pub fn action_for_key(code: KeyCode, controls: Controls) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => {
            if controls.start {
                Some(Action::Start)
            } else if controls.pause {
                Some(Action::Pause)
            } else {
                None
            }
        }
        KeyCode::Char('l') | KeyCode::Char('L') if controls.lap => Some(Action::Lap),
        KeyCode::Char('r') | KeyCode::Char('R') if controls.reset => Some(Action::Reset),
        _ => None,
    }
}

/// Apply an action. Returns `false` when the app should exit.
pub fn apply_action(stopwatch: &Stopwatch, action: Action) -> stopwatch_lib::Result<bool> {
    match action {
        Action::Start => {
            stopwatch.start()?;
        }
        Action::Pause => {
            stopwatch.pause();
        }
        Action::Reset => stopwatch.reset(),
        Action::Lap => {
            stopwatch.lap();
        }
        Action::Quit => {
            stopwatch.pause();
            return Ok(false);
        }
    }
    Ok(true)
}

/// Wait up to `timeout` for a key press and apply it.
pub fn handle_key_event(stopwatch: &Stopwatch, timeout: Duration) -> stopwatch_lib::Result<bool> {
    if event::poll(timeout).unwrap_or(false) {
        if let Ok(Event::Key(key)) = event::read() {
            if key.kind != KeyEventKind::Press {
                return Ok(true);
            }
            let controls = stopwatch.snapshot().controls;
            if let Some(action) = action_for_key(key.code, controls) {
                return apply_action(stopwatch, action);
            }
        }
    }

    Ok(true)
}
