//! Gregorian `YYYY-MM-DD` strings, the form dates are stored and sent in, to and from Jalali.

use jiff::fmt::strtime::BrokenDownTime;

use crate::{
    date::Ymd,
    error::{Error, Result},
};

/// `YYYY-MM-DD` of a Gregorian triple with at least 4 digits of year.
pub fn format_gregorian_iso(date: &Ymd) -> String {
    format!("{:04}-{:02}-{:02}", date.year, date.month, date.day)
}

/// Parse a strict `YYYY-MM-DD` string into a valid Gregorian date.
///
/// # Errors
///
/// [`Error::Parse`] for anything but three dash separated numbers and the invalid date errors
/// for a triple that is not a Gregorian date.
pub fn parse_gregorian_iso(s: &str) -> Result<Ymd> {
    let s = s.trim();
    let tm = BrokenDownTime::parse("%Y-%m-%d", s).map_err(|e| Error::parse(s, e))?;
    let (Some(year), Some(month), Some(day)) = (tm.year(), tm.month(), tm.day()) else {
        return Err(Error::parse(s, "expected year, month and day"));
    };
    let (Ok(month), Ok(day)) = (u8::try_from(month), u8::try_from(day)) else {
        return Err(Error::parse(s, "month and day must be positive"));
    };
    Ymd::gregorian(year.into(), month, day)
}

/// Load a stored Gregorian date as Jalali.
///
/// ```
/// use taqvim::{Ymd, iso::jalali_from_iso};
///
/// assert_eq!(jalali_from_iso("2024-03-20").unwrap(), Ymd::new(1403, 1, 1));
/// ```
///
/// # Errors
///
/// See [`parse_gregorian_iso`].
pub fn jalali_from_iso(s: &str) -> Result<Ymd> {
    let date = parse_gregorian_iso(s)?.gregorian_to_jalali();
    tracing::trace!(input = s, %date, "loaded stored date");
    Ok(date)
}

/// Validate a Jalali date and turn it into the stored Gregorian form.
///
/// # Errors
///
/// The invalid date errors of [`Ymd::jalali`].
pub fn jalali_to_iso(date: &Ymd) -> Result<String> {
    let date = Ymd::jalali(date.year, date.month, date.day)?;
    Ok(format_gregorian_iso(&date.jalali_to_gregorian()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(format_gregorian_iso(&Ymd::new(2024, 3, 20)), "2024-03-20");
        assert_eq!(format_gregorian_iso(&Ymd::new(622, 3, 21)), "0622-03-21");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_gregorian_iso("2025-05-21").unwrap(), Ymd::new(2025, 5, 21));
        assert_eq!(parse_gregorian_iso(" 2024-02-29\n").unwrap(), Ymd::new(2024, 2, 29));
        assert!(parse_gregorian_iso("2023-02-29").unwrap_err().is_invalid_date());
        assert!(matches!(
            parse_gregorian_iso("2024/03/20"),
            Err(Error::Parse { .. })
        ));
        assert!(matches!(parse_gregorian_iso(""), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_storage_round_trip() {
        let stored = "2025-03-20";
        let loaded = jalali_from_iso(stored).unwrap();
        assert_eq!(loaded, Ymd::new(1403, 12, 30));
        assert_eq!(jalali_to_iso(&loaded).unwrap(), stored);
    }

    #[test]
    fn test_to_iso_rejects_invalid() {
        assert!(matches!(
            jalali_to_iso(&Ymd::new(1404, 12, 30)),
            Err(Error::InvalidDay { max_day: 29, .. })
        ));
    }
}
