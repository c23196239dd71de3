use std::{
    io,
    sync::{Arc, Mutex},
    time::Duration,
};

use clap::ArgMatches;
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use stopwatch_lib::{Stopwatch, StopwatchConfig, DEFAULT_TICK_INTERVAL_MS};

use crate::{
    cli, controls,
    logging::{self, LogBuffer},
    ui,
};

pub fn run(args: &ArgMatches, log_buffer: LogBuffer) -> anyhow::Result<i32> {
    if let Some(("format", sub_args)) = args.subcommand() {
        let values: Vec<String> = sub_args
            .get_many::<String>("MS")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        return Ok(cli::format::run_format(&values, &mut io::stdout())?);
    }

    let interval_ms = args
        .get_one::<u64>("interval-ms")
        .copied()
        .unwrap_or(DEFAULT_TICK_INTERVAL_MS);
    if interval_ms == 0 {
        error!("--interval-ms must be greater than zero");
        return Ok(1);
    }
    let config =
        StopwatchConfig::default().with_tick_interval(Duration::from_millis(interval_ms));
    let stopwatch = Stopwatch::new(config)?;

    if args.get_flag("headless") {
        let stdin = io::stdin();
        cli::headless::run_script(
            &stopwatch,
            stdin.lock(),
            &mut io::stdout(),
            args.get_flag("json"),
        )?;
        return Ok(0);
    }

    info!("Starting stopwatch ({}ms refresh)", interval_ms);
    run_tui(&stopwatch, &log_buffer)?;
    Ok(0)
}

fn run_tui(stopwatch: &Stopwatch, log_buffer: &LogBuffer) -> anyhow::Result<()> {
    // The tick thread publishes here; the draw loop reads the latest frame.
    let latest = Arc::new(Mutex::new(stopwatch.snapshot()));
    let subscription = {
        let latest = latest.clone();
        stopwatch.subscribe(move |snapshot| {
            if let Ok(mut latest) = latest.lock() {
                *latest = snapshot.clone();
            }
        })
    };

    let _raw_mode = RawModeGuard::enable()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let poll_interval = stopwatch.config().tick_interval;
    let result = loop {
        let status = match latest.lock() {
            Ok(snapshot) => controls::status_text(&snapshot),
            Err(_) => controls::status_text(&stopwatch.snapshot()),
        };
        let log_lines = logging::snapshot(log_buffer);
        ui::draw_status(&mut terminal, &status, &log_lines);

        match controls::handle_key_event(stopwatch, poll_interval) {
            Ok(true) => {}
            Ok(false) => break Ok(()),
            Err(err) => break Err(err.into()),
        }
    };

    stopwatch.unsubscribe(subscription);

    // Restore the terminal state before exiting.
    let _ = terminal.show_cursor();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show);

    result
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
