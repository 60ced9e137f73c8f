//! Where "today" comes from.

use jiff::{Zoned, tz::TimeZone};

use crate::date::Ymd;

/// A source of the current Gregorian date.
pub trait Clock {
    /// The Gregorian date of today.
    fn today(&self) -> Ymd;
}

/// The host clock in a given time zone.
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    /// Falls back to the system time zone if unset.
    pub time_zone: Option<TimeZone>,
}

impl SystemClock {
    pub fn new(time_zone: TimeZone) -> Self {
        Self {
            time_zone: Some(time_zone),
        }
    }

    /// The current time in the zone of this clock.
    pub fn now(&self) -> Zoned {
        match &self.time_zone {
            Some(tz) => Zoned::now().with_time_zone(tz.clone()),
            None => Zoned::now(),
        }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Ymd {
        self.now().date().into()
    }
}

/// A clock stuck on one Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedClock(pub Ymd);

impl Clock for FixedClock {
    fn today(&self) -> Ymd {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> Ymd {
        (**self).today()
    }
}

/// Today in Jalali.
///
/// ```
/// use taqvim::{Ymd, clock::{FixedClock, today_jalali}};
///
/// assert_eq!(today_jalali(&FixedClock(Ymd::new(2024, 3, 20))), Ymd::new(1403, 1, 1));
/// ```
pub fn today_jalali(clock: &impl Clock) -> Ymd {
    let today = clock.today().gregorian_to_jalali();
    tracing::trace!(%today, "today in Jalali");
    today
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(Ymd::new(2026, 10, 18));
        assert_eq!(today_jalali(&clock), Ymd::new(1405, 7, 26));
    }

    #[test]
    fn test_system_clock_in_utc() {
        let clock = SystemClock::new(TimeZone::UTC);
        let expected: Ymd = jiff::Timestamp::now().to_zoned(TimeZone::UTC).date().into();
        let today = clock.today();
        // the test may run across midnight
        let next = Ymd::from(jiff::Timestamp::now().to_zoned(TimeZone::UTC).date());
        assert!(today == expected || today == next);
        assert!(Ymd::gregorian(today.year, today.month, today.day).is_ok());
    }

    #[test]
    fn test_dyn_clock() {
        let clock: &dyn Clock = &FixedClock(Ymd::new(2024, 3, 20));
        assert_eq!(today_jalali(&clock), Ymd::new(1403, 1, 1));
    }
}
