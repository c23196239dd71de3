//! # Stopwatch Library
//!
//! The timer component behind the `stopwatch` command-line app: start, pause
//! and reset a running timer, record lap splits, and format elapsed time as
//! `H:MM:SS:HH`.
//!
//! ```no_run
//! use stopwatch_lib::{Stopwatch, StopwatchConfig};
//!
//! let stopwatch = Stopwatch::new(StopwatchConfig::default())?;
//! stopwatch.subscribe(|snapshot| println!("{}", snapshot.elapsed));
//! stopwatch.start()?;
//! # Ok::<(), stopwatch_lib::Error>(())
//! ```
//!
//! ## Deterministic time
//!
//! [`ManualClock`] is a test clock: it reads only what the caller sets, so
//! elapsed values are exact. Hand a clone to [`Stopwatch::with_clock`] and
//! keep the other to move time.
//!
//! ```
//! use stopwatch_lib::{ManualClock, Phase, Stopwatch, StopwatchConfig};
//!
//! let clock = ManualClock::new(0);
//! let stopwatch = Stopwatch::with_clock(StopwatchConfig::default(), clock.clone())?;
//! stopwatch.start()?;
//! clock.advance(1_250);
//! stopwatch.lap();
//! clock.advance(500);
//! stopwatch.pause();
//!
//! let snapshot = stopwatch.snapshot();
//! assert_eq!(snapshot.phase, Phase::Paused);
//! assert_eq!(snapshot.elapsed, "00:00:01:75");
//! assert_eq!(snapshot.laps[0].text, "00:00:01:25");
//! assert_eq!(snapshot.diff.as_deref(), Some("00:00:00:50"));
//! # Ok::<(), stopwatch_lib::Error>(())
//! ```

pub mod clock;
pub mod controller;
pub mod error;
pub mod format;
pub mod snapshot;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{Stopwatch, StopwatchConfig, SubscriptionId, DEFAULT_TICK_INTERVAL_MS};
pub use error::{Error, Result};
pub use format::{format_elapsed, ZERO_DISPLAY};
pub use snapshot::Snapshot;
pub use state::{Controls, Lap, Phase};
