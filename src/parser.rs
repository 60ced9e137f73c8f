//! Holds the parsers of user given dates, months and weekdays.

use crate::{
    GREGORIAN_MONTHS, JALALI_MONTHS, JALALI_MONTHS_FA, JALALI_WEEKDAYS_FA, WEEKDAYS,
    calendar::Weekday,
    date::Ymd,
    error::{Error, Result},
    fmt::to_latin_digits,
};

/// Parse a Jalali `Y/M/D` (or `Y-M-D`) date in ASCII or Persian digits and validate it.
///
/// ```
/// use taqvim::{Ymd, parser::parse_ymd_jalali};
///
/// assert_eq!(parse_ymd_jalali("1403/1/1").unwrap(), Ymd::new(1403, 1, 1));
/// assert_eq!(parse_ymd_jalali("۱۴۰۴-۰۲-۳۱").unwrap(), Ymd::new(1404, 2, 31));
/// assert!(parse_ymd_jalali("1404/12/30").is_err());
/// ```
///
/// A negative year is only accepted with `/` separators.
///
/// # Errors
///
/// [`Error::Parse`] for a malformed string and the invalid date errors of [`Ymd::jalali`].
pub fn parse_ymd_jalali(s: &str) -> Result<Ymd> {
    let latin = to_latin_digits(s.trim());
    let separator = if latin.contains('/') { '/' } else { '-' };
    let mut parts = latin.splitn(3, separator);

    let mut next = |name: &str| {
        parts
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::parse(s, format_args!("missing {name}")))
    };
    let (year, month, day) = (next("year")?, next("month")?, next("day")?);

    let year = year
        .parse::<i32>()
        .map_err(|e| Error::parse(s, format_args!("year: {e}")))?;
    let month = month
        .parse::<u8>()
        .map_err(|e| Error::parse(s, format_args!("month: {e}")))?;
    let day = day
        .parse::<u8>()
        .map_err(|e| Error::parse(s, format_args!("day: {e}")))?;

    Ymd::jalali(year, month, day)
}

/// Match prefix of strings if uniquely identifiable without casing (ASCII only).
struct IgnoreCasePrefixMatch<const N: usize> {
    /// How many characters this matching index need before being uniquely matched.
    common_prefixes: [usize; N],
    /// Given values.
    values: [&'static str; N],
}

impl<const N: usize> IgnoreCasePrefixMatch<N> {
    /// Create an instance or panic (at compile time for constants).
    pub const fn new(list: [&'static str; N]) -> Self {
        assert!(N > 0, "cannot initialize with empty list");

        let mut common_prefixes = [0; N];
        let mut i = 0;
        while i < N {
            assert!(list[i].is_ascii(), "only ASCII values are supported");

            let mut j = i + 1;
            while j < N {
                let (a, b) = (list[i], list[j]);
                let eq_up_to = Self::eq_up_to_bytes(a, b);

                assert!(
                    a.len() != eq_up_to && b.len() != eq_up_to,
                    "one entry is the prefix for another so cannot be uniquely identified"
                );

                if common_prefixes[i] < eq_up_to {
                    common_prefixes[i] = eq_up_to;
                }
                if common_prefixes[j] < eq_up_to {
                    common_prefixes[j] = eq_up_to;
                }
                j += 1;
            }
            i += 1;
        }

        Self {
            values: list,
            common_prefixes,
        }
    }

    /// Index of the value the key is a unique prefix of, regardless of ASCII casing.
    pub const fn position(&self, key: &str) -> Option<usize> {
        let mut i = 0;
        while i < N {
            if key.len() > self.common_prefixes[i]
                && key.len() == Self::eq_up_to_bytes(self.values[i], key)
            {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// How many leading bytes the two strings share if compared with ASCII ignore case.
    pub const fn eq_up_to_bytes(a: &str, b: &str) -> usize {
        let min_len = if a.len() < b.len() { a.len() } else { b.len() };
        let (a, b) = (a.as_bytes(), b.as_bytes());

        let mut i = 0;
        while i < min_len {
            if a[i].to_ascii_lowercase() != b[i].to_ascii_lowercase() {
                return i;
            }
            i += 1;
        }
        min_len
    }
}

const JALALI_MATCHER: IgnoreCasePrefixMatch<12> = IgnoreCasePrefixMatch::new(JALALI_MONTHS);

const GREGORIAN_MATCHER: IgnoreCasePrefixMatch<12> = IgnoreCasePrefixMatch::new(GREGORIAN_MONTHS);

const WEEKDAYS_MATCHER: IgnoreCasePrefixMatch<7> = IgnoreCasePrefixMatch::new(WEEKDAYS);

/// Parse from 1..=12 the valid month range.
fn parse_month_numeric(s: &str) -> Option<u8> {
    to_latin_digits(s)
        .parse()
        .ok()
        .filter(|m| (1..=12).contains(m))
}

/// Parse from 1..=12, a Jalali month name in English (unique prefix) or its exact Persian name.
///
/// # Errors
///
/// [`Error::Parse`] if none of the above.
pub fn parse_jalali_month(s: &str) -> Result<u8> {
    let s = s.trim();
    parse_month_numeric(s)
        .or_else(|| JALALI_MATCHER.position(s).map(|i| i as u8 + 1))
        .or_else(|| JALALI_MONTHS_FA.iter().position(|m| *m == s).map(|i| i as u8 + 1))
        .ok_or_else(|| {
            Error::parse(s, "expected a Jalali month (\"mehr\", \"مهر\" or 1 to 12)")
        })
}

/// Parse from 1..=12 or a Gregorian month name in English (unique prefix).
///
/// # Errors
///
/// [`Error::Parse`] if none of the above.
pub fn parse_gregorian_month(s: &str) -> Result<u8> {
    let s = s.trim();
    parse_month_numeric(s)
        .or_else(|| GREGORIAN_MATCHER.position(s).map(|i| i as u8 + 1))
        .ok_or_else(|| Error::parse(s, "expected a Gregorian month (\"september\" or 1 to 12)"))
}

/// Parse a weekday from 0 (Saturday) to 6 (Friday), an English name (unique prefix) or its exact
/// Persian name.
///
/// # Errors
///
/// [`Error::Parse`] if none of the above.
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    let s = s.trim();
    if let Ok(v) = to_latin_digits(s).parse::<u8>() {
        if v > 6 {
            return Err(Error::parse(
                s,
                "weekday is from 0 (Saturday) to 6 (Friday) when a number",
            ));
        }
        return Ok(Weekday::new(v));
    }

    // WEEKDAYS is Sunday based
    WEEKDAYS_MATCHER
        .position(s)
        .map(|i| Weekday::from_sunday_zero(i as u8))
        .or_else(|| {
            JALALI_WEEKDAYS_FA
                .iter()
                .position(|d| *d == s)
                .map(|i| Weekday::new(i as u8))
        })
        .ok_or_else(|| Error::parse(s, "expected a weekday (\"saturday\", \"شنبه\" or 0 to 6)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ymd() {
        assert_eq!(parse_ymd_jalali("1403/01/01").unwrap(), Ymd::new(1403, 1, 1));
        assert_eq!(parse_ymd_jalali(" 1403-12-30 ").unwrap(), Ymd::new(1403, 12, 30));
        assert_eq!(parse_ymd_jalali("۱۳۴۸/۱۰/۱۱").unwrap(), Ymd::new(1348, 10, 11));
        assert_eq!(parse_ymd_jalali("-622/10/10").unwrap(), Ymd::new(-622, 10, 10));
    }

    #[test]
    fn test_parse_ymd_errors() {
        assert!(matches!(parse_ymd_jalali("1403/01"), Err(Error::Parse { .. })));
        assert!(matches!(parse_ymd_jalali("1403//01"), Err(Error::Parse { .. })));
        assert!(matches!(parse_ymd_jalali("a/1/1"), Err(Error::Parse { .. })));
        assert!(matches!(parse_ymd_jalali("1403/1/1/1"), Err(Error::Parse { .. })));
        assert!(matches!(
            parse_ymd_jalali("1404/12/30"),
            Err(Error::InvalidDay { .. })
        ));
        assert!(matches!(
            parse_ymd_jalali("1404/13/1"),
            Err(Error::InvalidMonth { month: 13 })
        ));
    }

    #[test]
    fn test_matcher() {
        assert_eq!(JALALI_MATCHER.position("mo"), Some(4));
        assert_eq!(JALALI_MATCHER.position("me"), Some(6));
        assert_eq!(JALALI_MATCHER.position("m"), None);
        assert_eq!(JALALI_MATCHER.position(""), None);
        assert_eq!(JALALI_MATCHER.position("Esfandd"), None);
        assert_eq!(GREGORIAN_MATCHER.position("JU"), None);
        assert_eq!(GREGORIAN_MATCHER.position("jun"), Some(5));
    }

    #[test]
    fn test_parse_months() {
        assert_eq!(parse_jalali_month("7").unwrap(), 7);
        assert_eq!(parse_jalali_month("۷").unwrap(), 7);
        assert_eq!(parse_jalali_month("Mehr").unwrap(), 7);
        assert_eq!(parse_jalali_month("ordi").unwrap(), 2);
        assert_eq!(parse_jalali_month("اسفند").unwrap(), 12);
        assert!(parse_jalali_month("13").is_err());
        assert!(parse_jalali_month("0").is_err());
        assert!(parse_jalali_month("september").is_err());
        assert_eq!(parse_gregorian_month("september").unwrap(), 9);
        assert!(parse_gregorian_month("mehr").is_err());
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("0").unwrap(), Weekday::SAT);
        assert_eq!(parse_weekday("6").unwrap(), Weekday::FRI);
        assert!(parse_weekday("7").is_err());
        assert_eq!(parse_weekday("sat").unwrap(), Weekday::SAT);
        assert_eq!(parse_weekday("Su").unwrap(), Weekday::SUN);
        assert_eq!(parse_weekday("fri").unwrap(), Weekday::FRI);
        assert_eq!(parse_weekday("جمعه").unwrap(), Weekday::FRI);
        assert!(parse_weekday("t").is_err());
    }
}
