//! Exact conversion between proleptic Gregorian and Jalali dates.
//!
//! Both directions go through a single linear day count (the "day number"). The Gregorian side
//! counts days with the 400/100/4 year leap rule, the Jalali side with the 33 year arithmetic
//! cycle (8 leap years per 33). The epoch constants below align the two counts, so that
//! Gregorian 622-03-21 is Jalali 1/1/1 and 2024-03-20 is Jalali 1403/1/1.
//!
//! Every division is a floor division (`div_euclid`) and every remainder is Euclidean. For any
//! Gregorian year after -974 the day count is positive and this is plain integer arithmetic; for
//! earlier years the cycles are simply extrapolated backwards.
//!
//! Nothing here validates its input. Use [`crate::date::Ymd::jalali`] and friends for checked
//! construction.

/// Offset of the Gregorian day count.
///
/// With it, the Gregorian day number divided by [`JALALI_33_YEAR_CYCLE_DAYS`] counts whole Jalali
/// cycles starting at Jalali year `-JALALI_YEAR_OFFSET`.
pub const GREGORIAN_EPOCH_DAYS: i64 = 355_666;

/// Offset of the Jalali day count, which lands on zero based days since Gregorian `0001-01-01`.
///
/// `JALALI_EPOCH_DAYS - GREGORIAN_EPOCH_DAYS - 1` is the distance between the two counts, see
/// [`jalali_day_number`].
pub const JALALI_EPOCH_DAYS: i64 = 355_668;

/// Years between the Jalali count used in the cycles and the actual Jalali year.
pub const JALALI_YEAR_OFFSET: i64 = 1595;

/// Days in a 33 year Jalali cycle (`33 * 365 + 8`).
pub const JALALI_33_YEAR_CYCLE_DAYS: i64 = 12_053;

/// Leap years in a 33 year Jalali cycle.
pub const JALALI_33_YEAR_CYCLE_LEAPS: i64 = 8;

/// Days in four years with one leap day (both calendars).
pub const FOUR_YEAR_CYCLE_DAYS: i64 = 1461;

/// Days in a common year.
pub const YEAR_DAYS: i64 = 365;

/// Days in a full 400 year Gregorian cycle.
pub const GREGORIAN_400_YEAR_CYCLE_DAYS: i64 = 146_097;

/// Days in a Gregorian century without its leading leap day.
pub const GREGORIAN_100_YEAR_CYCLE_DAYS: i64 = 36_524;

/// Days in the first six (31 day) Jalali months.
pub const FIRST_HALF_DAYS: i64 = 186;

/// Days before each Gregorian month in a common year.
pub const CUMULATIVE_DAYS_BEFORE_MONTH: [i64; 12] =
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// A raw `(year, month, day)` triple.
pub type Triple = (i32, u8, u8);

/// Return true if this is a leap year in proleptic Gregorian.
pub(crate) const fn is_gregorian_leap(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// The linear day count of a Gregorian date.
///
/// This is the first step of [`gregorian_to_jalali`] and is the axis every comparison of dates in
/// this crate uses. Consecutive dates have consecutive numbers.
pub const fn gregorian_day_number(year: i32, month: u8, day: u8) -> i64 {
    let year = year as i64;
    // the leap day of a year is only counted once February is passed
    let leap_year = if month > 2 { year + 1 } else { year };
    GREGORIAN_EPOCH_DAYS
        + YEAR_DAYS * year
        + (leap_year + 3).div_euclid(4)
        - (leap_year + 99).div_euclid(100)
        + (leap_year + 399).div_euclid(400)
        + day as i64
        + CUMULATIVE_DAYS_BEFORE_MONTH[(month as usize).saturating_sub(1) % 12]
}

/// Days since `0001-01-01` (zero based) of a Jalali date.
///
/// This is where the Gregorian unpacking of [`jalali_to_gregorian`] starts.
const fn jalali_days_since_gregorian_one(year: i32, month: u8, day: u8) -> i64 {
    let year = year as i64 + JALALI_YEAR_OFFSET;
    let month = month as i64;
    let month_offset = if month < 7 {
        (month - 1) * 31
    } else {
        (month - 7) * 30 + FIRST_HALF_DAYS
    };
    -JALALI_EPOCH_DAYS
        + YEAR_DAYS * year
        + year.div_euclid(33) * JALALI_33_YEAR_CYCLE_LEAPS
        + (year.rem_euclid(33) + 3).div_euclid(4)
        + day as i64
        + month_offset
}

/// The linear day count of a Jalali date, on the same axis as [`gregorian_day_number`].
pub const fn jalali_day_number(year: i32, month: u8, day: u8) -> i64 {
    jalali_days_since_gregorian_one(year, month, day) + GREGORIAN_EPOCH_DAYS + 1
}

/// Split a count of days into years of a four year cycle where the first year is the leap one.
///
/// Returns the years and the remaining zero based day of year.
const fn split_four_year_cycle(days: i64) -> (i64, i64) {
    let mut years = 4 * days.div_euclid(FOUR_YEAR_CYCLE_DAYS);
    let mut days = days.rem_euclid(FOUR_YEAR_CYCLE_DAYS);
    if days > YEAR_DAYS {
        years += (days - 1).div_euclid(YEAR_DAYS);
        days = (days - 1).rem_euclid(YEAR_DAYS);
    }
    (years, days)
}

/// Convert a Gregorian date to a Jalali one.
///
/// The input must be a valid proleptic Gregorian date (see [`days_in_gregorian_month`]). Any
/// valid date has exactly one result and [`jalali_to_gregorian`] maps it back.
///
/// [`days_in_gregorian_month`]: crate::calendar::days_in_gregorian_month
pub const fn gregorian_to_jalali(year: i32, month: u8, day: u8) -> Triple {
    let days = gregorian_day_number(year, month, day);

    let mut jy = -JALALI_YEAR_OFFSET + 33 * days.div_euclid(JALALI_33_YEAR_CYCLE_DAYS);
    let (years, days) = split_four_year_cycle(days.rem_euclid(JALALI_33_YEAR_CYCLE_DAYS));
    jy += years;

    let (jm, jd) = if days < FIRST_HALF_DAYS {
        (1 + days / 31, 1 + days % 31)
    } else {
        let days = days - FIRST_HALF_DAYS;
        (7 + days / 30, 1 + days % 30)
    };

    (jy as i32, jm as u8, jd as u8)
}

/// Convert a Jalali date to a Gregorian one.
///
/// The input must be a valid Jalali date (see [`days_in_jalali_month`]). This is the exact
/// inverse of [`gregorian_to_jalali`].
///
/// [`days_in_jalali_month`]: crate::calendar::days_in_jalali_month
pub const fn jalali_to_gregorian(year: i32, month: u8, day: u8) -> Triple {
    let mut days = jalali_days_since_gregorian_one(year, month, day);

    let mut gy = 400 * days.div_euclid(GREGORIAN_400_YEAR_CYCLE_DAYS);
    days = days.rem_euclid(GREGORIAN_400_YEAR_CYCLE_DAYS);

    if days > GREGORIAN_100_YEAR_CYCLE_DAYS {
        days -= 1;
        gy += 100 * days.div_euclid(GREGORIAN_100_YEAR_CYCLE_DAYS);
        days = days.rem_euclid(GREGORIAN_100_YEAR_CYCLE_DAYS);
        // a century other than the first of the cycle starts without its leap day
        if days >= YEAR_DAYS {
            days += 1;
        }
    }

    let (years, days) = split_four_year_cycle(days);
    gy += years;

    let february = if is_gregorian_leap(gy) { 29 } else { 28 };
    let month_lengths: [i64; 13] = [0, 31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let mut gd = days + 1;
    let mut gm = 0;
    while gm < 13 && gd > month_lengths[gm] {
        gd -= month_lengths[gm];
        gm += 1;
    }

    (gy as i32, gm as u8, gd as u8)
}
