//! Calendar date parsing for due dates.
//!
//! Accepts the ISO-8601 calendar forms clients send: `YYYY-MM-DD`,
//! `YYYYMMDD`, `YYYY-MM` and `YYYY`, optionally followed by a time of day
//! after `T` or a space. The time part is checked but dropped; only the
//! calendar date is kept. Month and day must be two digits.

use chrono::{NaiveDate, NaiveTime, Timelike};

/// Canonical storage and wire format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses `input` into a calendar date, or `None` when it is not one.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    if !input.is_ascii() {
        return None;
    }
    let (date, time) = match input.find(['T', ' ']) {
        Some(i) => (&input[..i], Some(&input[i + 1..])),
        None => (input, None),
    };
    if let Some(time) = time {
        // a time needs a full date in front of it
        if date.len() < 8 || !is_time_of_day(time) {
            return None;
        }
    }
    parse_calendar_date(date)
}

/// Renders a date in canonical `YYYY-MM-DD` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let (year, month, day) = match bytes.len() {
        4 => (s, "01", "01"),
        7 if bytes[4] == b'-' => (&s[..4], &s[5..], "01"),
        8 => (&s[..4], &s[4..6], &s[6..]),
        10 if bytes[4] == b'-' && bytes[7] == b'-' => (&s[..4], &s[5..7], &s[8..]),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(digits(year)? as i32, digits(month)?, digits(day)?)
}

fn is_time_of_day(s: &str) -> bool {
    let (clock, zone) = match s.find(['Z', '+', '-']) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    };
    is_zone(zone) && is_clock(clock)
}

/// `HH`, `HHMM`, `HHMMSS`, `HH:MM`, `HH:MM:SS`, each with an optional
/// fraction after the seconds. `24` is allowed only as end of day.
fn is_clock(s: &str) -> bool {
    if !s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b':' | b'.' | b',')) {
        return false;
    }
    if let Some(rest) = s.strip_prefix("24") {
        return rest.bytes().all(|b| !b.is_ascii_digit() || b == b'0') && is_clock(&format!("00{rest}"));
    }

    let s = s.replacen(',', ".", 1);
    let bytes = s.as_bytes();
    let colons = |at: &[usize]| at.iter().all(|&i| bytes[i] == b':');
    let parsed = match bytes.len() {
        2 => NaiveTime::parse_from_str(&format!("{s}:00"), "%H:%M"),
        4 if !s.contains([':', '.']) => NaiveTime::parse_from_str(&s, "%H%M"),
        5 if colons(&[2]) => NaiveTime::parse_from_str(&s, "%H:%M"),
        6 if !s.contains([':', '.']) => NaiveTime::parse_from_str(&s, "%H%M%S"),
        8 if colons(&[2, 5]) => NaiveTime::parse_from_str(&s, "%H:%M:%S"),
        n if n > 9 && colons(&[2, 5]) && bytes[8] == b'.' => {
            NaiveTime::parse_from_str(&s, "%H:%M:%S%.f")
        }
        _ => return false,
    };
    // chrono reads second 60 as a leap second
    parsed.is_ok_and(|time| time.nanosecond() < 1_000_000_000)
}

/// Empty, `Z`, or a signed `HH`, `HHMM` or `HH:MM` offset.
fn is_zone(s: &str) -> bool {
    if s.is_empty() || s == "Z" {
        return true;
    }
    let Some(offset) = s.strip_prefix(['+', '-']) else {
        return false;
    };
    let (hours, minutes) = match offset.len() {
        2 => (offset, "00"),
        4 => (&offset[..2], &offset[2..]),
        5 if offset.as_bytes()[2] == b':' => (&offset[..2], &offset[3..]),
        _ => return false,
    };
    matches!((two_digits(hours), two_digits(minutes)), (Some(h), Some(m)) if h < 24 && m < 60)
}

fn two_digits(s: &str) -> Option<u32> {
    if s.len() == 2 {
        digits(s)
    } else {
        None
    }
}

fn digits(s: &str) -> Option<u32> {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}
