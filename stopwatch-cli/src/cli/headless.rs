//! Scriptable stopwatch driven by stdin lines instead of key presses.

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::thread::sleep;
use std::time::Duration;

use log::{info, warn};
use stopwatch_lib::{Snapshot, Stopwatch};

/// One line of headless input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCommand {
    Start,
    Pause,
    Reset,
    Lap,
    /// Let the stopwatch run for the given time.
    Wait(Duration),
    Status,
    Quit,
}

impl FromStr for ScriptCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();
        let argument = parts.next();
        if parts.next().is_some() {
            return Err(format!("too many arguments: {}", line.trim()));
        }

        match (command.as_str(), argument) {
            ("start", None) => Ok(Self::Start),
            ("pause", None) => Ok(Self::Pause),
            ("reset", None) => Ok(Self::Reset),
            ("lap", None) => Ok(Self::Lap),
            ("status", None) => Ok(Self::Status),
            ("quit" | "exit", None) => Ok(Self::Quit),
            ("wait", Some(ms)) => ms
                .parse::<u64>()
                .map(|ms| Self::Wait(Duration::from_millis(ms)))
                .map_err(|_| format!("invalid wait duration: {}", ms)),
            _ => Err(format!("unknown command: {}", line.trim())),
        }
    }
}

/// Run commands from `input` until `quit` or EOF, printing a snapshot after
/// each one.
pub fn run_script<R, W>(
    stopwatch: &Stopwatch,
    input: R,
    out: &mut W,
    json: bool,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    info!("Headless mode: reading commands from stdin");
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let command = match line.parse::<ScriptCommand>() {
            Ok(command) => command,
            Err(err) => {
                warn!("{}", err);
                continue;
            }
        };

        match command {
            ScriptCommand::Start => {
                stopwatch.start()?;
            }
            ScriptCommand::Pause => {
                stopwatch.pause();
            }
            ScriptCommand::Reset => stopwatch.reset(),
            ScriptCommand::Lap => {
                stopwatch.lap();
            }
            ScriptCommand::Wait(duration) => sleep(duration),
            ScriptCommand::Status => {}
            ScriptCommand::Quit => break,
        }

        write_snapshot(out, &stopwatch.snapshot(), json)?;
    }

    out.flush()?;
    Ok(())
}

fn write_snapshot<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, snapshot)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", snapshot.status_line())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use stopwatch_lib::StopwatchConfig;

    fn run(script: &str, json: bool) -> Vec<String> {
        let stopwatch = Stopwatch::new(StopwatchConfig::default()).unwrap();
        let mut out = Vec::new();
        run_script(&stopwatch, Cursor::new(script), &mut out, json).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parses_commands() {
        assert_eq!("start".parse::<ScriptCommand>(), Ok(ScriptCommand::Start));
        assert_eq!(" LAP ".parse::<ScriptCommand>(), Ok(ScriptCommand::Lap));
        assert_eq!(
            "wait 150".parse::<ScriptCommand>(),
            Ok(ScriptCommand::Wait(Duration::from_millis(150)))
        );
        assert!("wait".parse::<ScriptCommand>().is_err());
        assert!("wait soon".parse::<ScriptCommand>().is_err());
        assert!("start now".parse::<ScriptCommand>().is_err());
        assert!("rewind".parse::<ScriptCommand>().is_err());
    }

    #[test]
    fn start_pause_reset_scenario() {
        let lines = run("start\nwait 150\npause\nreset\n", false);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("running "));
        assert!(lines[2].starts_with("paused 00:00:00:"));
        assert_eq!(lines[3], "idle 00:00:00:00 laps=0");
    }

    #[test]
    fn unknown_commands_are_skipped() {
        let lines = run("# comment\nrewind\nstatus\nquit\nstart\n", false);
        assert_eq!(lines, vec!["idle 00:00:00:00 laps=0"]);
    }

    #[test]
    fn laps_show_diff() {
        let lines = run("start\nlap\nwait 20\nlap\npause\n", false);
        assert!(lines[1].contains(" diff 00:00:00:00 laps=1"));
        assert!(lines[4].starts_with("paused "));
        assert!(lines[4].ends_with("laps=2"));
    }

    #[test]
    fn json_lines_carry_snapshot_fields() {
        let lines = run("lap\nstart\n", true);
        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["phase"], "idle");
        assert_eq!(first["diff"], "00:00:00:00");
        assert_eq!(first["laps"][0]["number"], 1);
        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["phase"], "running");
        assert_eq!(second["controls"]["pause"], true);
    }
}
