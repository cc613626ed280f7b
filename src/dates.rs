// src/dates.rs
//
// Diary date counting.
//
// - Each entry line holds a `DD Mon YYYY` date, optionally followed by a `#`
//   comment. Everything from the first `#` on is dropped.
// - Blank lines (after comment removal) are skipped.
// - A listed date marks the boundary before an entry, so the day actually
//   counted is the one after it.
// - Any malformed line stops the run with an error naming the line.

use std::fmt;

use time::{macros::format_description, Date, Weekday};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The line is not a real `DD Mon YYYY` date.
    #[error("line {line}: invalid date {text:?}")]
    Parse {
        line: usize,
        text: String,
        #[source]
        source: time::error::Parse,
    },

    #[error("line {line}: the following day is out of range")]
    Overflow { line: usize },
}

/* ================================ Parsing ================================ */

/// Drop everything from the first `#` on.
pub fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(before, _)| before)
}

/// Parse `DD Mon YYYY`. Runs of whitespace between fields are allowed.
/// `line` is only used for error reporting.
pub fn parse_date(text: &str, line: usize) -> Result<Date, Error> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    Date::parse(
        &fields.join(" "),
        format_description!("[day padding:none] [month repr:short case_sensitive:false] [year]"),
    )
    .map_err(|source| Error::Parse {
        line,
        text: text.to_string(),
        source,
    })
}

/// Parse every entry in a date list and shift it to the day it stands for.
pub fn parse_entries(src: &str) -> Result<Vec<Date>, Error> {
    let mut dates = Vec::new();
    for (index, raw) in src.lines().enumerate() {
        let line = index + 1;
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }
        let date = parse_date(text, line)?;
        let day = date.next_day().ok_or(Error::Overflow { line })?;
        log::trace!("line {line}: {date} -> {day} ({})", day.weekday());
        dates.push(day);
    }
    Ok(dates)
}

/* ================================ Counting =============================== */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DayCounts {
    pub week_days: usize,
    pub weekend_days: usize,
}

impl DayCounts {
    pub fn add(&mut self, date: Date) {
        match date.weekday() {
            Weekday::Saturday | Weekday::Sunday => self.weekend_days += 1,
            _ => self.week_days += 1,
        }
    }
}

impl FromIterator<Date> for DayCounts {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        let mut counts = Self::default();
        for date in iter {
            counts.add(date);
        }
        counts
    }
}

impl fmt::Display for DayCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Week days: {}", self.week_days)?;
        write!(f, "Weekend days: {}", self.weekend_days)
    }
}

pub fn count_days(src: &str) -> Result<DayCounts, Error> {
    Ok(parse_entries(src)?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use time::macros::date;

    #[test]
    fn single_entry_is_shifted() {
        assert_eq!(parse_entries("1 Jan 2024\n").unwrap(), vec![date!(2024 - 01 - 02)]);
        let counts = count_days("1 Jan 2024").unwrap();
        assert_eq!(
            counts,
            DayCounts {
                week_days: 1,
                weekend_days: 0
            }
        );
        assert_eq!(counts.to_string(), "Week days: 1\nWeekend days: 0");
    }

    #[test]
    fn comments_and_blank_lines() {
        assert_eq!(strip_comment("5 Jan 2024 # holiday"), "5 Jan 2024 ");
        assert_eq!(strip_comment("#"), "");
        let src = "# header\n\n5 Jan 2024 # holiday\n5  Jan 2024\n   \n6 jan 2024#\n";
        assert_eq!(
            parse_entries(src).unwrap(),
            vec![date!(2024 - 01 - 06), date!(2024 - 01 - 06), date!(2024 - 01 - 07)]
        );
    }

    #[test]
    fn weekends_counted() {
        // Fri, Sat, Sun entries count as Sat, Sun, Mon.
        let counts = count_days("5 Jan 2024\n6 Jan 2024\n7 Jan 2024\n").unwrap();
        assert_eq!(
            counts,
            DayCounts {
                week_days: 1,
                weekend_days: 2
            }
        );
    }

    #[test]
    fn shift_crosses_month_and_year() {
        assert_eq!(
            parse_entries("31 Dec 2023\n29 Feb 2024").unwrap(),
            vec![date!(2024 - 01 - 01), date!(2024 - 03 - 01)]
        );
    }

    #[test]
    fn malformed_lines_fail_with_line_number() {
        let err = count_days("1 Jan 2024\n2 Foo 2024").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }), "{err:?}");

        let err = count_days("\n\n30 Feb 2023").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }), "{err:?}");

        for bad in ["1 Jan", "1 Jan 2024 x", "123 Jan 2024", "1 Jan 24"] {
            assert!(matches!(count_days(bad), Err(Error::Parse { line: 1, .. })), "{bad}");
        }
    }
}
