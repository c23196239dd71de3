use log::{LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, OnceLock};

const LOG_CAPACITY: usize = 500;

/// Most recent log lines, oldest first.
pub type LogBuffer = Arc<Mutex<VecDeque<String>>>;

struct SharedLogger {
    level: LevelFilter,
    buffer: LogBuffer,
    echo_stderr: bool,
}

impl Log for SharedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{}] {}", record.level(), record.args());
        if self.echo_stderr {
            eprintln!("{}", line);
        }

        push_line(&self.buffer, line);
    }

    fn flush(&self) {}
}

static LOG_BUFFER: OnceLock<LogBuffer> = OnceLock::new();
static LOGGER: OnceLock<SharedLogger> = OnceLock::new();

/// Install the global logger and return its line buffer.
///
/// `RUST_LOG` picks the level (default info). Lines are echoed to stderr when
/// `echo_stderr` is set or `STOPWATCH_LOG_STDERR` is anything but `0`.
pub fn init(echo_stderr: bool) -> LogBuffer {
    let buffer = LOG_BUFFER
        .get_or_init(|| Arc::new(Mutex::new(VecDeque::with_capacity(LOG_CAPACITY))))
        .clone();

    let level = level_from_env(std::env::var("RUST_LOG").ok().as_deref());

    let echo_stderr = echo_stderr
        || std::env::var("STOPWATCH_LOG_STDERR")
            .map(|value| value != "0")
            .unwrap_or(false);

    let logger = SharedLogger {
        level,
        buffer: buffer.clone(),
        echo_stderr,
    };

    let logger_ref = LOGGER.get_or_init(|| logger);
    if log::set_logger(logger_ref).is_ok() {
        log::set_max_level(level);
    }

    buffer
}

pub fn snapshot(buffer: &LogBuffer) -> Vec<String> {
    buffer
        .lock()
        .map(|lines| lines.iter().cloned().collect())
        .unwrap_or_default()
}

fn push_line(buffer: &LogBuffer, line: String) {
    let Ok(mut buffer) = buffer.lock() else {
        return;
    };
    if buffer.len() >= LOG_CAPACITY {
        buffer.pop_front();
    }
    buffer.push_back(line);
}

fn level_from_env(value: Option<&str>) -> LevelFilter {
    match value.map(str::to_lowercase).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_case_insensitively() {
        assert_eq!(level_from_env(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(level_from_env(Some("warn")), LevelFilter::Warn);
        assert_eq!(level_from_env(Some("off")), LevelFilter::Off);
        assert_eq!(level_from_env(Some("verbose")), LevelFilter::Info);
        assert_eq!(level_from_env(None), LevelFilter::Info);
    }

    #[test]
    fn buffer_keeps_latest_lines() {
        let buffer: LogBuffer = Arc::new(Mutex::new(VecDeque::new()));
        for i in 0..LOG_CAPACITY + 3 {
            push_line(&buffer, format!("line {}", i));
        }
        let lines = snapshot(&buffer);
        assert_eq!(lines.len(), LOG_CAPACITY);
        assert_eq!(lines[0], "line 3");
        assert_eq!(lines.last().unwrap(), &format!("line {}", LOG_CAPACITY + 2));
    }
}
