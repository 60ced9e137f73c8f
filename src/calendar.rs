//! Calendar math on top of [`crate::convert`]: leap years, month lengths, weekdays and grids.

use crate::{
    JALALI_WEEKDAYS_FA, JALALI_WEEKDAYS_FA_ABB, WEEKDAYS, WEEKDAYS_ABB,
    convert::{self, gregorian_day_number, jalali_day_number},
    date::Ymd,
};

/// How many weeks a month grid holds at most.
pub const WEEK_COUNT: usize = 6;

/// How many days are in a week.
pub const WEEK_DAYS: usize = 7;

/// A month laid out as week rows, `0` for the cells outside the month.
pub type RawGrid = [[u8; WEEK_DAYS]; WEEK_COUNT];

/// Return true if the Jalali year has 366 days.
///
/// This is the 33 year arithmetic rule that [`convert`] is built on: counting from the cycle
/// start, every fourth year is leap except that the eighth leap of a cycle comes five years after
/// the seventh. Any date this admits as valid round-trips through the conversion.
///
/// For the astronomically tuned 2820 year rule see [`is_jalali_leap_2820`].
pub const fn is_jalali_leap(year: i32) -> bool {
    let position = (year as i64 + convert::JALALI_YEAR_OFFSET).rem_euclid(33);
    position % 4 == 0 && position < 32
}

/// Return true if the Jalali year is leap according to the 2820 year cycle.
///
/// `(((((year - 474) mod 2820) + 474 + 38) * 682) mod 2816) < 682`
///
/// This differs from [`is_jalali_leap`] in a pair of neighbouring years roughly every 33 years
/// (1403 and 1404 being one such pair, where the official calendar agrees with
/// [`is_jalali_leap`]). Month lengths in this crate never use it.
pub const fn is_jalali_leap_2820(year: i32) -> bool {
    let cycle_year = (year as i64 - 474).rem_euclid(2820) + 474;
    ((cycle_year + 38) * 682).rem_euclid(2816) < 682
}

/// Days in the given Jalali month, `0` if the month is not in `1..=12`.
pub const fn days_in_jalali_month(year: i32, month: u8) -> u8 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        12 if is_jalali_leap(year) => 30,
        12 => 29,
        _ => 0,
    }
}

/// Return true if this is a leap year in proleptic Gregorian.
pub const fn is_gregorian_leap(year: i32) -> bool {
    convert::is_gregorian_leap(year as i64)
}

/// Days in the given Gregorian month, `0` if the month is not in `1..=12`.
pub const fn days_in_gregorian_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_gregorian_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        _ => 0,
    }
}

/// Days in the given Jalali year.
pub const fn days_in_jalali_year(year: i32) -> u16 {
    if is_jalali_leap(year) { 366 } else { 365 }
}

/// Weekday of a Gregorian date where Sunday is 0 and Saturday is 6.
pub const fn gregorian_weekday(year: i32, month: u8, day: u8) -> u8 {
    // day number 0 falls on a Tuesday
    (gregorian_day_number(year, month, day) + 2).rem_euclid(7) as u8
}

/// A day of the Persian week, Saturday being the first (0) and Friday the last (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Weekday(u8);

impl Weekday {
    pub const SAT: Self = Self(0);
    pub const SUN: Self = Self(1);
    pub const MON: Self = Self(2);
    pub const TUE: Self = Self(3);
    pub const WED: Self = Self(4);
    pub const THU: Self = Self(5);
    pub const FRI: Self = Self(6);

    /// Create from a Persian week index, wrapping anything past Friday.
    pub const fn new(index: u8) -> Self {
        Self(index % WEEK_DAYS as u8)
    }

    /// Create from a weekday counted from Sunday (0) as most hosts do.
    pub const fn from_sunday_zero(weekday: u8) -> Self {
        Self::new(weekday % WEEK_DAYS as u8 + 1)
    }

    /// The index in the Persian week (0 is Saturday).
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// The index in a Sunday based week (0 is Sunday).
    pub const fn to_sunday_zero(&self) -> u8 {
        (self.0 + 6) % WEEK_DAYS as u8
    }

    /// The weekday this many days later.
    pub const fn forward(&self, days: usize) -> Self {
        Self(((self.0 as usize + days) % WEEK_DAYS) as u8)
    }

    /// How many days forward until `other` (0 if the same).
    pub const fn till(&self, other: &Self) -> u8 {
        (other.0 + WEEK_DAYS as u8 - self.0) % WEEK_DAYS as u8
    }

    /// Persian name of this weekday.
    pub const fn name(&self) -> &'static str {
        JALALI_WEEKDAYS_FA[self.0 as usize]
    }

    /// One letter Persian abbreviation of this weekday.
    pub const fn abbreviation(&self) -> &'static str {
        JALALI_WEEKDAYS_FA_ABB[self.0 as usize]
    }

    /// English name of this weekday.
    pub const fn english_name(&self) -> &'static str {
        WEEKDAYS[self.to_sunday_zero() as usize]
    }

    /// Three letter English abbreviation of this weekday.
    pub const fn english_abbreviation(&self) -> &'static str {
        WEEKDAYS_ABB[self.to_sunday_zero() as usize]
    }
}

/// Weekday of a Jalali date.
pub const fn jalali_weekday(date: &Ymd) -> Weekday {
    // same axis and offset as gregorian_weekday
    let sunday_zero = (jalali_day_number(date.year, date.month, date.day) + 2).rem_euclid(7);
    Weekday::from_sunday_zero(sunday_zero as u8)
}

/// Persian name of the weekday of a Jalali date.
pub const fn get_jalali_day_of_week(date: &Ymd) -> &'static str {
    jalali_weekday(date).name()
}

/// What is needed to draw a Jalali month as a 7 column grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthGrid {
    /// Number of day cells.
    pub days_in_month: u8,
    /// Blank cells before the first day in a Saturday based week (the weekday of the 1st).
    pub start_day_of_week: u8,
}

impl MonthGrid {
    /// Blank cells before the first day in a week starting with `base`.
    pub const fn offset_from(&self, base: Weekday) -> usize {
        base.till(&Weekday::new(self.start_day_of_week)) as usize
    }

    /// How many week rows this month uses in a week starting with `base`.
    pub const fn weeks_from(&self, base: Weekday) -> usize {
        let days = if self.days_in_month > 31 { 31 } else { self.days_in_month };
        (self.offset_from(base) + days as usize).div_ceil(WEEK_DAYS)
    }

    /// Lay the month out in Saturday based weeks.
    pub fn cells(&self) -> RawGrid {
        self.cells_from(Weekday::SAT)
    }

    /// Lay the month out in weeks starting with `base`, at most 31 days.
    ///
    /// For example a month starting on Wednesday looks like this with a Saturday base:
    /// ```text
    /// Sa Su Mo Tu We Th Fr
    /// 00 00 00 00 01 02 03
    /// ```
    pub fn cells_from(&self, base: Weekday) -> RawGrid {
        let mut cells = [[0; WEEK_DAYS]; WEEK_COUNT];
        let offset = self.offset_from(base);
        for day in 1..=self.days_in_month.min(31) {
            let i = offset + day as usize - 1;
            cells[i / WEEK_DAYS][i % WEEK_DAYS] = day;
        }
        cells
    }
}

/// Month length and weekday of the 1st for the given Jalali month.
pub const fn jalali_month_grid(year: i32, month: u8) -> MonthGrid {
    MonthGrid {
        days_in_month: days_in_jalali_month(year, month),
        start_day_of_week: jalali_weekday(&Ymd::new(year, month, 1)).get(),
    }
}

/// Move a date by whole months and clamp the day to the length of the new month.
fn offset_months(date: Ymd, months: i64, days_in_month: fn(i32, u8) -> u8) -> Ymd {
    let total = date.year as i64 * 12 + (date.month as i64 - 1) + months;
    let year = total.div_euclid(12) as i32;
    let month = (total.rem_euclid(12) + 1) as u8;
    Ymd::new(year, month, date.day.min(days_in_month(year, month)))
}

/// Move a Jalali date by whole months, crossing years, keeping the day where possible.
///
/// `1403/12/30` plus 12 months is `1404/12/29` since 1404 is not leap.
pub fn add_jalali_months(date: Ymd, months: i64) -> Ymd {
    offset_months(date, months, days_in_jalali_month)
}

/// Move a Jalali date by whole years, keeping the day where possible.
pub fn add_jalali_years(date: Ymd, years: i64) -> Ymd {
    offset_months(date, years.saturating_mul(12), days_in_jalali_month)
}

/// Move a Gregorian date by whole months, crossing years, keeping the day where possible.
pub fn add_gregorian_months(date: Ymd, months: i64) -> Ymd {
    offset_months(date, months, days_in_gregorian_month)
}
