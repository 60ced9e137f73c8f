//! Jalali (Persian solar Hijri) calendar engine and the common utilities of `cal` and `date`.
//!
//! The heart of the crate is [`convert`], an exact and total mapping between proleptic Gregorian
//! and Jalali dates. Everything else ([`calendar`], [`fmt`], [`iso`], ...) is built on it.
//!
//! ```
//! use taqvim::{convert::gregorian_to_jalali, fmt::format_jalali_date_with_day, Ymd};
//!
//! let (y, m, d) = gregorian_to_jalali(2024, 3, 20);
//! assert_eq!((y, m, d), (1403, 1, 1));
//! assert_eq!(
//!     format_jalali_date_with_day(&Ymd::new(y, m, d)),
//!     "چهارشنبه، ۱ فروردین ۱۴۰۳",
//! );
//! ```
pub mod calendar;
pub mod clap_helper;
pub mod clock;
pub mod convert;
pub mod date;
pub mod error;
pub mod fmt;
pub mod iso;
pub mod logging;
pub mod parser;
pub mod range;
pub mod strftime;

pub use date::{Date, Ymd};
pub use error::{Error, Result};

/// Sunday based weekdays in English.
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// [`WEEKDAYS`] abbreviations to 3 letters.
pub const WEEKDAYS_ABB: [&str; 7] = abbr_strarr(WEEKDAYS);

/// Gregorian months in English.
pub const GREGORIAN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// [`GREGORIAN_MONTHS`] abbreviations to 3 letters.
pub const GREGORIAN_MONTHS_ABB: [&str; 12] = abbr_strarr(GREGORIAN_MONTHS);

/// Jalali months transliterated to English.
// these spellings are the common ones, keep them
pub const JALALI_MONTHS: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

/// [`JALALI_MONTHS`] abbreviations to 3 letters.
pub const JALALI_MONTHS_ABB: [&str; 12] = abbr_strarr(JALALI_MONTHS);

/// Jalali months in Persian.
pub const JALALI_MONTHS_FA: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Saturday based weekdays in Persian.
pub const JALALI_WEEKDAYS_FA: [&str; 7] = [
    "شنبه",
    "یکشنبه",
    "دوشنبه",
    "سه\u{200c}شنبه",
    "چهارشنبه",
    "پنجشنبه",
    "جمعه",
];

/// [`JALALI_WEEKDAYS_FA`] as the one letter headers of a calendar grid.
pub const JALALI_WEEKDAYS_FA_ABB: [&str; 7] = ["ش", "ی", "د", "س", "چ", "پ", "ج"];

/// Abbreviate ASCII names to their first 3 letters.
const fn abbr_strarr<const N: usize>(original: [&'static str; N]) -> [&'static str; N] {
    const CHARS: usize = 3;

    let mut v = [""; N];
    let mut i = 0;
    while i < N {
        assert!(
            original[i].is_ascii() && original[i].len() >= CHARS,
            "automatic abbrevations only work with ASCII strings with enough length",
        );

        // a way around Index not being in const
        let head = match original[i].as_bytes().first_chunk::<CHARS>() {
            Some(head) => head.as_slice(),
            None => unreachable!(),
        };
        v[i] = match core::str::from_utf8(head) {
            Ok(v) => v,
            Err(_) => unreachable!(),
        };
        i += 1;
    }
    v
}
