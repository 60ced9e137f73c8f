//! Presentation helpers: Persian digits, padding and the textual forms of a Jalali date.

use std::fmt::Display;

use jiff::civil::Time;

use crate::{JALALI_MONTHS_FA, calendar::get_jalali_day_of_week, date::Ymd};

/// Persian digits `۰` to `۹`, indexed by value.
pub const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Arabic-Indic digits `٠` to `٩`, indexed by value.
pub const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Which digits to print numbers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Digits {
    #[default]
    Latin,
    Persian,
}

impl Digits {
    /// Transliterate if needed.
    pub fn apply(&self, s: impl Display) -> String {
        match self {
            Digits::Latin => s.to_string(),
            Digits::Persian => to_persian_digits(s),
        }
    }
}

/// Replace every ASCII digit with its Persian counterpart and leave everything else untouched.
///
/// ```
/// assert_eq!(taqvim::fmt::to_persian_digits("1403/01/01"), "۱۴۰۳/۰۱/۰۱");
/// assert_eq!(taqvim::fmt::to_persian_digits(-12.5), "-۱۲.۵");
/// ```
pub fn to_persian_digits(s: impl Display) -> String {
    s.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => PERSIAN_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

/// Replace Persian and Arabic-Indic digits with ASCII ones.
pub fn to_latin_digits(s: &str) -> String {
    s.chars()
        .map(|c| {
            PERSIAN_DIGITS
                .iter()
                .chain(ARABIC_INDIC_DIGITS.iter())
                .position(|d| *d == c)
                .map_or(c, |i| char::from(b'0' + (i % 10) as u8))
        })
        .collect()
}

/// Zero pad to at least two digits.
pub fn pad2(n: impl Display) -> String {
    format!("{n:0>2}")
}

/// `YYYY/MM/DD` in Persian digits, empty if there is no date.
pub fn format_jalali_date(date: Option<&Ymd>) -> String {
    match date {
        Some(date) => to_persian_digits(format_args!(
            "{}/{}/{}",
            date.year,
            pad2(date.month),
            pad2(date.day)
        )),
        None => String::new(),
    }
}

/// `<weekday>، <day> <month> <year>` in Persian, for example `چهارشنبه، ۱ فروردین ۱۴۰۳`.
///
/// # Panics
///
/// If the month is not in `1..=12`.
pub fn format_jalali_date_with_day(date: &Ymd) -> String {
    format!(
        "{}، {} {} {}",
        get_jalali_day_of_week(date),
        to_persian_digits(date.day),
        JALALI_MONTHS_FA[date.month as usize - 1],
        to_persian_digits(date.year),
    )
}

/// Transliterate the hour and minute of a `HH:MM` string, empty for an empty input.
///
/// Anything after the minute is dropped.
pub fn format_time(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }
    let mut parts = time.split(':');
    let hour = parts.next().unwrap_or_default();
    let minute = parts.next().unwrap_or_default();
    format!("{}:{}", to_persian_digits(hour), to_persian_digits(minute))
}

/// Hours between two `HH:MM` times of the same day, 0 if either is malformed or the end is not
/// after the start.
pub fn hours_between(start: &str, end: &str) -> f64 {
    let parse = |s: &str| Time::strptime("%H:%M", s).ok();
    match (parse(start), parse(end)) {
        (Some(start), Some(end)) if end > start => {
            let span = end - start;
            span.get_hours() as f64
                + span.get_minutes() as f64 / 60.0
                + span.get_seconds() as f64 / 3600.0
        }
        _ => 0.0,
    }
}
