//! `format` subcommand: print elapsed milliseconds as clock strings.

use std::io::{self, Write};

use log::error;
use stopwatch_lib::format_elapsed;

/// Format every value, one per line. Nothing is printed if any value is not a
/// non-negative integer; the exit code is `1` in that case.
pub fn run_format<W: Write>(values: &[String], out: &mut W) -> io::Result<i32> {
    let mut parsed = Vec::with_capacity(values.len());
    for value in values {
        match value.trim().parse::<u64>() {
            Ok(ms) => parsed.push(ms),
            Err(_) => {
                error!("invalid milliseconds value: {:?}", value);
                return Ok(1);
            }
        }
    }

    for ms in parsed {
        writeln!(out, "{}", format_elapsed(ms))?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_all(values: &[&str]) -> (i32, String) {
        let values: Vec<String> = values.iter().map(|value| value.to_string()).collect();
        let mut out = Vec::new();
        let code = run_format(&values, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_one_line_per_value() {
        let (code, out) = format_all(&["0", "61000", "3661999"]);
        assert_eq!(code, 0);
        assert_eq!(out, "00:00:00:00\n00:01:01:00\n01:01:01:99\n");
    }

    #[test]
    fn rejects_negative_and_non_numeric_input() {
        assert_eq!(format_all(&["12", "-5"]), (1, String::new()));
        assert_eq!(format_all(&["abc"]), (1, String::new()));
    }
}
