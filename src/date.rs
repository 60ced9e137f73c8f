//! Date values of both calendars and their checked construction.

use std::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

use jiff::civil;

use crate::{
    GREGORIAN_MONTHS, JALALI_MONTHS,
    calendar::{
        Weekday, add_gregorian_months, add_jalali_months, days_in_gregorian_month,
        days_in_jalali_month, gregorian_weekday, jalali_weekday,
    },
    convert::{gregorian_day_number, gregorian_to_jalali, jalali_day_number, jalali_to_gregorian},
    error::{Error, Result},
};

/// The smallest Gregorian year the checked constructors accept.
pub const MIN_YEAR: i32 = -1_000_000;

/// The largest Gregorian year the checked constructors accept.
///
/// Jalali years are bound to the same days, so roughly 621 years less on both ends.
pub const MAX_YEAR: i32 = 1_000_000;

/// The smallest year [`jiff`] can hold.
const JIFF_MIN_YEAR: i32 = -9999;

/// The largest year [`jiff`] can hold.
const JIFF_MAX_YEAR: i32 = 9999;

/// The first and the last day (Gregorian `MIN_YEAR-01-01` and `MAX_YEAR-12-31`) the checked
/// constructors accept, the same days in both calendars.
const DAY_NUMBER_RANGE: std::ops::RangeInclusive<i64> =
    gregorian_day_number(MIN_YEAR, 1, 1)..=gregorian_day_number(MAX_YEAR, 12, 31);

/// A tuple of year, month (1..=12) and day (1..=31) of either calendar, without any checks.
///
/// Which calendar the triple belongs to is up to the holder, see [`Date`] for a tagged version.
/// Equality is field by field. There is deliberately no ordering on this type, compare
/// [`Date`]s or day numbers instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ymd {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Ymd {
    /// Create a triple as is.
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Create a valid Jalali date or fail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::YearOutOfRange`], [`Error::InvalidMonth`] or [`Error::InvalidDay`] if the
    /// triple is not a Jalali date.
    pub fn jalali(year: i32, month: u8, day: u8) -> Result<Self> {
        check(year, month, day, days_in_jalali_month, jalali_day_number)
    }

    /// Create a valid proleptic Gregorian date or fail.
    ///
    /// # Errors
    ///
    /// Same as [`Self::jalali`] with Gregorian month lengths.
    pub fn gregorian(year: i32, month: u8, day: u8) -> Result<Self> {
        check(year, month, day, days_in_gregorian_month, gregorian_day_number)
    }

    /// Treat this as Jalali and return the same day in Gregorian.
    pub const fn jalali_to_gregorian(self) -> Self {
        let (y, m, d) = jalali_to_gregorian(self.year, self.month, self.day);
        Self::new(y, m, d)
    }

    /// Treat this as Gregorian and return the same day in Jalali.
    pub const fn gregorian_to_jalali(self) -> Self {
        let (y, m, d) = gregorian_to_jalali(self.year, self.month, self.day);
        Self::new(y, m, d)
    }

    /// The raw tuple.
    pub const fn get(&self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }
}

impl From<(i32, u8, u8)> for Ymd {
    fn from((year, month, day): (i32, u8, u8)) -> Self {
        Self::new(year, month, day)
    }
}

impl From<Ymd> for (i32, u8, u8) {
    fn from(value: Ymd) -> Self {
        value.get()
    }
}

impl From<civil::Date> for Ymd {
    fn from(value: civil::Date) -> Self {
        // jiff guarantees 1..=12 and 1..=31
        Self::new(value.year().into(), value.month() as u8, value.day() as u8)
    }
}

impl TryFrom<Ymd> for civil::Date {
    type Error = Error;

    /// Take a Gregorian triple to [`jiff`], which only covers the years `-9999..=9999`.
    fn try_from(value: Ymd) -> Result<Self> {
        if !(JIFF_MIN_YEAR..=JIFF_MAX_YEAR).contains(&value.year) {
            return Err(Error::YearOutOfRange {
                year: value.year.into(),
            });
        }
        // in range so it fits
        let year = value.year as i16;
        let (Ok(month), Ok(day)) = (i8::try_from(value.month), i8::try_from(value.day)) else {
            return Err(Error::InvalidMonth { month: value.month });
        };
        Ok(civil::Date::new(year, month, day)?)
    }
}

impl Display for Ymd {
    /// `YYYY/MM/DD` with at least 4 digits of year.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// Shared checks of the calendar constructors.
fn check(
    year: i32,
    month: u8,
    day: u8,
    days_in_month: fn(i32, u8) -> u8,
    day_number: fn(i32, u8, u8) -> i64,
) -> Result<Ymd> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidMonth { month });
    }
    let max_day = days_in_month(year, month);
    if !(1..=max_day).contains(&day) {
        return Err(Error::InvalidDay {
            day,
            month,
            max_day,
        });
    }
    if !DAY_NUMBER_RANGE.contains(&day_number(year, month, day)) {
        return Err(Error::YearOutOfRange { year: year.into() });
    }
    Ok(Ymd::new(year, month, day))
}

/// [`gregorian_to_jalali`] for untrusted input.
///
/// # Errors
///
/// See [`Ymd::gregorian`].
pub fn checked_gregorian_to_jalali(year: i32, month: u8, day: u8) -> Result<Ymd> {
    let date = Ymd::gregorian(year, month, day).inspect_err(|e| {
        tracing::debug!(year, month, day, "rejected Gregorian date: {e}");
    })?;
    Ok(date.gregorian_to_jalali())
}

/// [`jalali_to_gregorian`] for untrusted input.
///
/// # Errors
///
/// See [`Ymd::jalali`].
pub fn checked_jalali_to_gregorian(year: i32, month: u8, day: u8) -> Result<Ymd> {
    let date = Ymd::jalali(year, month, day).inspect_err(|e| {
        tracing::debug!(year, month, day, "rejected Jalali date: {e}");
    })?;
    Ok(date.jalali_to_gregorian())
}

/// Holds the calendars that this package concerns.
///
/// Dates of different calendars compare equal if they are the same day, and are ordered on the
/// shared day number axis:
/// ```
/// use taqvim::date::{Date, Ymd};
///
/// let nowruz = Date::Jalali(Ymd::new(1403, 1, 1));
/// assert_eq!(nowruz, Date::Gregorian(Ymd::new(2024, 3, 20)));
/// assert!(nowruz < Date::Gregorian(Ymd::new(2024, 3, 21)));
/// ```
#[derive(Clone, Copy, Debug)]
pub enum Date {
    Jalali(Ymd),
    Gregorian(Ymd),
}

impl Date {
    /// The untagged triple.
    pub const fn ymd(&self) -> Ymd {
        match self {
            Date::Jalali(ymd) | Date::Gregorian(ymd) => *ymd,
        }
    }

    /// Position on the linear axis shared by both calendars.
    pub const fn day_number(&self) -> i64 {
        match self {
            Date::Jalali(Ymd { year, month, day }) => jalali_day_number(*year, *month, *day),
            Date::Gregorian(Ymd { year, month, day }) => {
                gregorian_day_number(*year, *month, *day)
            }
        }
    }

    /// The same day in Jalali.
    pub const fn to_jalali(&self) -> Ymd {
        match self {
            Date::Jalali(ymd) => *ymd,
            Date::Gregorian(ymd) => ymd.gregorian_to_jalali(),
        }
    }

    /// The same day in Gregorian.
    pub const fn to_gregorian(&self) -> Ymd {
        match self {
            Date::Jalali(ymd) => ymd.jalali_to_gregorian(),
            Date::Gregorian(ymd) => *ymd,
        }
    }

    /// Return true if the triple is valid in its calendar.
    pub fn is_valid(&self) -> bool {
        let Ymd { year, month, day } = self.ymd();
        match self {
            Date::Jalali(_) => Ymd::jalali(year, month, day).is_ok(),
            Date::Gregorian(_) => Ymd::gregorian(year, month, day).is_ok(),
        }
    }

    /// What weekday it is.
    pub const fn weekday(&self) -> Weekday {
        match self {
            Date::Jalali(ymd) => jalali_weekday(ymd),
            Date::Gregorian(Ymd { year, month, day }) => {
                Weekday::from_sunday_zero(gregorian_weekday(*year, *month, *day))
            }
        }
    }

    /// The last day of this month.
    pub const fn month_end_day(&self) -> u8 {
        match self {
            Date::Jalali(ymd) => days_in_jalali_month(ymd.year, ymd.month),
            Date::Gregorian(ymd) => days_in_gregorian_month(ymd.year, ymd.month),
        }
    }

    /// Move by whole months across year boundaries, saturating the day to the new month.
    pub fn add_months(&self, months: i64) -> Self {
        match self {
            Date::Jalali(ymd) => Date::Jalali(add_jalali_months(*ymd, months)),
            Date::Gregorian(ymd) => Date::Gregorian(add_gregorian_months(*ymd, months)),
        }
    }

    /// English names of the months of this calendar.
    pub fn month_names(&self) -> &'static [&'static str; 12] {
        match self {
            Date::Jalali(_) => &JALALI_MONTHS,
            Date::Gregorian(_) => &GREGORIAN_MONTHS,
        }
    }

    /// English name of this month.
    ///
    /// # Panics
    ///
    /// If the month is not in `1..=12`.
    pub fn month_name(&self) -> &'static str {
        self.month_names()[self.ymd().month as usize - 1]
    }
}

impl PartialEq for Date {
    fn eq(&self, other: &Self) -> bool {
        self.day_number() == other.day_number()
    }
}

impl Eq for Date {}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.day_number().cmp(&other.day_number())
    }
}

impl Hash for Date {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.day_number().hash(state);
    }
}

impl From<civil::Date> for Date {
    fn from(value: civil::Date) -> Self {
        Date::Gregorian(value.into())
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Date::Jalali(ymd) => ymd.fmt(f),
            Date::Gregorian(Ymd { year, month, day }) => {
                write!(f, "{year:04}-{month:02}-{day:02}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_constructors() {
        assert!(Ymd::jalali(1403, 12, 30).is_ok());
        assert!(matches!(
            Ymd::jalali(1404, 12, 30),
            Err(Error::InvalidDay {
                day: 30,
                month: 12,
                max_day: 29
            })
        ));
        assert!(matches!(
            Ymd::jalali(1404, 13, 1),
            Err(Error::InvalidMonth { month: 13 })
        ));
        assert!(matches!(
            Ymd::jalali(1404, 1, 0),
            Err(Error::InvalidDay { day: 0, .. })
        ));
        assert!(matches!(
            Ymd::gregorian(i32::MAX, 1, 1),
            Err(Error::YearOutOfRange { .. })
        ));
        assert!(Ymd::gregorian(2024, 2, 29).is_ok());
        assert!(Ymd::gregorian(2023, 2, 29).is_err());
        // a valid Jalali day that is not a Gregorian one
        assert!(Ymd::jalali(1404, 2, 31).is_ok());
        assert!(Ymd::gregorian(2025, 2, 31).is_err());
    }

    #[test]
    fn test_year_bounds_cover_the_same_days() {
        for (y, m, d) in [
            (MIN_YEAR, 1, 1),
            (MIN_YEAR, 12, 31),
            (MAX_YEAR, 1, 1),
            (MAX_YEAR, 12, 31),
        ] {
            let jalali = checked_gregorian_to_jalali(y, m, d).unwrap();
            assert!(Ymd::jalali(jalali.year, jalali.month, jalali.day).is_ok());
            assert_eq!(
                checked_jalali_to_gregorian(jalali.year, jalali.month, jalali.day).unwrap(),
                Ymd::new(y, m, d)
            );
        }

        // the day before the first and after the last
        let before = Ymd::new(MIN_YEAR, 1, 1).gregorian_to_jalali();
        let before = if before.day > 1 {
            Ymd::new(before.year, before.month, before.day - 1)
        } else {
            Ymd::new(before.year, before.month - 1, 30)
        };
        assert!(matches!(
            Ymd::jalali(before.year, before.month, before.day),
            Err(Error::YearOutOfRange { .. })
        ));
        assert!(matches!(
            Ymd::gregorian(MAX_YEAR + 1, 1, 1),
            Err(Error::YearOutOfRange { .. })
        ));
        assert!(Ymd::jalali(MIN_YEAR, 1, 1).is_ok());
        assert!(matches!(
            Ymd::jalali(MAX_YEAR, 1, 1),
            Err(Error::YearOutOfRange { .. })
        ));
    }

    #[test]
    fn test_checked_conversions() {
        assert_eq!(
            checked_gregorian_to_jalali(2024, 3, 20).unwrap(),
            Ymd::new(1403, 1, 1)
        );
        assert_eq!(
            checked_jalali_to_gregorian(1403, 1, 1).unwrap(),
            Ymd::new(2024, 3, 20)
        );
        assert!(checked_gregorian_to_jalali(2024, 0, 20).is_err());
        assert!(checked_jalali_to_gregorian(1403, 7, 31).is_err());
    }

    #[test]
    fn test_cross_calendar_eq() {
        let nowruz = Date::Jalali(Ymd::new(1403, 1, 1));
        let gregorian = Date::Gregorian(Ymd::new(2024, 3, 20));
        assert_eq!(nowruz, gregorian);
        assert_eq!(gregorian.to_jalali(), nowruz.ymd());
        assert_eq!(nowruz.to_gregorian(), gregorian.ymd());
        assert_ne!(nowruz, Date::Gregorian(Ymd::new(2024, 3, 21)));
        assert!(nowruz < Date::Jalali(Ymd::new(1403, 1, 2)));
        assert!(Date::Jalali(Ymd::new(1402, 12, 29)) < gregorian);
    }

    #[test]
    fn test_weekday_and_month_end() {
        assert_eq!(Date::Gregorian(Ymd::new(2024, 3, 20)).weekday(), Weekday::WED);
        assert_eq!(Date::Jalali(Ymd::new(1403, 1, 1)).weekday(), Weekday::WED);
        assert_eq!(Date::Jalali(Ymd::new(1403, 12, 1)).month_end_day(), 30);
        assert_eq!(Date::Gregorian(Ymd::new(2023, 2, 1)).month_end_day(), 28);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(Date::Jalali(Ymd::new(1404, 2, 1)).month_name(), "Ordibehesht");
        assert_eq!(Date::Gregorian(Ymd::new(2025, 5, 1)).month_name(), "May");
        assert_eq!(
            Date::Jalali(Ymd::new(1403, 12, 30)).add_months(1),
            Date::Jalali(Ymd::new(1404, 1, 30))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Ymd::new(1403, 1, 1).to_string(), "1403/01/01");
        assert_eq!(Date::Gregorian(Ymd::new(622, 3, 21)).to_string(), "0622-03-21");
        assert_eq!(Date::Jalali(Ymd::new(1, 1, 1)).to_string(), "0001/01/01");
    }

    #[test]
    fn test_from_jiff() {
        let date = civil::date(2025, 5, 21);
        assert_eq!(Ymd::from(date), Ymd::new(2025, 5, 21));
        assert_eq!(Date::from(date).to_jalali(), Ymd::new(1404, 2, 31));
    }

    #[test]
    fn test_to_jiff() {
        let nowruz = Ymd::new(1403, 1, 1).jalali_to_gregorian();
        assert_eq!(civil::Date::try_from(nowruz).unwrap(), civil::date(2024, 3, 20));
        assert!(matches!(
            civil::Date::try_from(Ymd::new(10_000, 1, 1)),
            Err(Error::YearOutOfRange { year: 10_000 })
        ));
        assert!(
            civil::Date::try_from(Ymd::new(32_767, 1, 1))
                .unwrap_err()
                .is_invalid_date()
        );
        assert!(civil::Date::try_from(Ymd::new(-9999, 1, 1)).is_ok());
        assert!(civil::Date::try_from(Ymd::new(9999, 12, 31)).is_ok());
        assert!(matches!(
            civil::Date::try_from(Ymd::new(2025, 2, 31)),
            Err(Error::Time(_))
        ));
    }
}
