//! # Stopwatch
//!
//! A terminal stopwatch with lap splits.

use log::error;

mod cli;
mod controls;
mod logging;
mod runner;
mod ui;

fn main() {
    dotenv::dotenv().ok();
    let args = cli::args::build_cli().get_matches();

    // The TUI shows logs in its own panel; other modes write them to stderr.
    let echo_stderr = args.get_flag("headless") || args.subcommand().is_some();
    let log_buffer = logging::init(echo_stderr);

    let code = match runner::run(&args, log_buffer) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err.to_string().to_lowercase());
            -1
        }
    };

    std::process::exit(code)
}
