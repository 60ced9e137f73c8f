//! Holds a `date` program that speaks Jalali.
//!
//! This is a `coreutils`' `date` compatible printer where the date directives of the format are
//! resolved in Jalali. The behavior may slightly differ from `date`.
//!
//! Differences with `date`:
//! - Jalali by default, `-G` for the plain Gregorian output
//! - `-g` prints a Jalali date in Gregorian, `-f` converts stored `YYYY-MM-DD` lines to Jalali
//! - does not warn if multiple flags are set for one value and the last one is used only
//! - no support for `set`, POSIX `MMDDhhmm` input or localized formats (`rfc-email`)
//! - parsing `-d` is done with the `parse_datetime` crate so its limitations apply

use std::io::{self, BufRead, BufReader, Write};

use jiff::{Timestamp, Zoned, civil, tz::TimeZone};
use taqvim::{
    clap_helper::Parse, fmt::Digits, iso::parse_gregorian_iso, logging, strftime::jalali_strftime,
};

use crate::arg_parser::{Args, Reader, When, at_midnight};

mod arg_parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Args::parse();
    logging::init(config.verbosity);

    let zoned = match config.when {
        When::Reader(reader) => {
            let failed = file_apply(reader, &config.format, config.timezone, config.digits)?;
            if failed > 0 {
                return Err(format!("failed to convert {failed} line(s)").into());
            }
            return Ok(());
        }
        When::Given(v) => v,
        When::Now => Zoned::now().with_time_zone(config.timezone),
        When::Reference(path_buf) => {
            let time = std::fs::File::open(path_buf)?.metadata()?.modified()?;
            Timestamp::try_from(time)?.to_zoned(config.timezone)
        }
    };

    tracing::debug!(format = %config.format, basis = %zoned, "formatting");
    println!(
        "{}",
        strftime(&config.format, &zoned, config.jalali, config.digits)?
    );
    Ok(())
}

/// Format a time in the given calendar.
fn strftime(format: &str, tm: &Zoned, jalali: bool, digits: Digits) -> taqvim::Result<String> {
    if jalali {
        jalali_strftime(format, tm, digits)
    } else {
        Ok(digits.apply(jiff::fmt::strtime::format(format, tm)?))
    }
}

/// Convert each stored Gregorian `YYYY-MM-DD` line of a stream to Jalali and print it.
///
/// Returns how many lines failed.
fn file_apply(reader: Reader, format: &str, timezone: TimeZone, digits: Digits) -> io::Result<usize> {
    let read: Box<dyn io::Read> = match reader {
        Reader::Stdin => Box::new(io::stdin()),
        Reader::File(path) => Box::new(std::fs::File::open(path)?),
    };

    let now = Zoned::now().with_time_zone(timezone);
    convert_lines(BufReader::new(read), format, &now, digits, &mut io::stdout().lock())
}

/// Write the Jalali form of each Gregorian line of `read` to `out`.
///
/// Empty lines are skipped. Lines that are not UTF-8 or fail to parse are warned about and
/// counted, the rest of the stream is still converted. Only I/O errors stop the run.
fn convert_lines(
    read: impl BufRead,
    format: &str,
    now: &Zoned,
    digits: Digits,
    out: &mut impl Write,
) -> io::Result<usize> {
    let mut failed = 0;
    for (i, bytes) in read.split(b'\n').enumerate() {
        let line = match String::from_utf8(bytes?) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(line = i + 1, "{e}");
                failed += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let converted = parse_gregorian_iso(&line).and_then(|date| {
            let midnight = at_midnight(now, civil::Date::try_from(date)?)?;
            jalali_strftime(format, &midnight, digits)
        });
        match converted {
            Ok(v) => writeln!(out, "{v}")?,
            Err(e) => {
                tracing::warn!(line = i + 1, "{e}");
                failed += 1;
            }
        }
    }

    Ok(failed)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_convert_lines_keeps_going() {
        let now = civil::date(2025, 1, 1)
            .at(0, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap();
        let input = Cursor::new(&b"2024-03-20\n\xff\xfe\n\n2025-02-30\n2025-05-21\n"[..]);
        let mut out = Vec::new();

        let failed = convert_lines(input, "%Y/%m/%d", &now, Digits::Latin, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "1403/01/01\n1404/02/31\n");
        assert_eq!(failed, 2);
    }
}
