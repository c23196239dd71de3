//! CLI argument definitions for `stopwatch-cli`.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    Command::new("Stopwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A terminal stopwatch with lap splits")
        .arg(
            Arg::new("interval-ms")
                .long("interval-ms")
                .short('i')
                .value_name("MS")
                .default_value("50")
                .value_parser(value_parser!(u64))
                .help("Display refresh interval while running"),
        )
        .arg(
            Arg::new("headless")
                .long("headless")
                .action(ArgAction::SetTrue)
                .help("Read commands from stdin (start, pause, lap, reset, wait <ms>, status, quit) instead of opening the TUI"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .requires("headless")
                .help("Print headless snapshots as JSON lines"),
        )
        .subcommand(
            Command::new("format")
                .about("Print milliseconds as H:MM:SS:HH")
                .arg(
                    Arg::new("MS")
                        .help("Elapsed milliseconds")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                ),
        )
}
