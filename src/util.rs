//! Extra utilities for use elsewhere in the app.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// The format the show forms are pre-filled with.
const INPUT_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Every shape a submitted start time may take, tried in order.
const ACCEPTED_FORMATS: &[&[FormatItem<'static>]] = &[
    INPUT_FORMAT,
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
];

const DISPLAY_FORMAT: &[FormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day padding:none], [year] [hour repr:12 padding:none]:[minute][period case:lower]"
);

pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Parses a start time as submitted from a form, interpreting it as UTC.
pub fn parse_datetime(input: &str) -> Option<OffsetDateTime> {
    let input = input.trim();

    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(input, *format).ok())
        .map(PrimitiveDateTime::assume_utc)
}

/// Formats a time the way [`parse_datetime`] accepts it back.
pub fn input_datetime(time: OffsetDateTime) -> String {
    time.format(INPUT_FORMAT)
        .unwrap_or_else(|_| time.to_string())
}

/// Formats a time for listings, e.g. "Sat May 21, 2019 9:30pm".
pub fn display_datetime(time: OffsetDateTime) -> String {
    time.format(DISPLAY_FORMAT)
        .unwrap_or_else(|_| time.to_string())
}

/// Maps blank form input to `None`.
pub fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn parses_every_accepted_shape() {
        let expected = datetime!(2035-04-01 20:00 UTC);

        assert_eq!(parse_datetime("2035-04-01 20:00:00"), Some(expected));
        assert_eq!(parse_datetime("2035-04-01 20:00"), Some(expected));
        assert_eq!(parse_datetime("2035-04-01T20:00:00"), Some(expected));
        assert_eq!(parse_datetime(" 2035-04-01T20:00 "), Some(expected));
    }

    #[test]
    fn rejects_garbage_times() {
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("tomorrow night"), None);
        assert_eq!(parse_datetime("2035-13-01 20:00:00"), None);
    }

    #[test]
    fn input_format_round_trips() {
        let time = datetime!(2019-05-21 21:30 UTC);
        assert_eq!(input_datetime(time), "2019-05-21 21:30:00");
        assert_eq!(parse_datetime(&input_datetime(time)), Some(time));
    }

    #[test]
    fn display_format_is_readable() {
        let time = datetime!(2019-05-21 21:30 UTC);
        assert_eq!(display_datetime(time), "Tue May 21, 2019 9:30pm");
    }

    #[test]
    fn blank_input_is_none() {
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty(" x "), Some("x".to_owned()));
    }
}
