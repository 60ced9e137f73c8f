//! Errors of the checked constructors and parsers.
//!
//! The conversion functions themselves never fail (see [`crate::convert`]), only the boundaries
//! that take untrusted input do.

/// The default result of this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong at the checked boundaries of this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Month is not in `1..=12`.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth { month: u8 },

    /// Day is zero or after the last day of its month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay { day: u8, month: u8, max_day: u8 },

    /// Year is outside [`crate::date::MIN_YEAR`]`..=`[`crate::date::MAX_YEAR`] (or the same days
    /// in Jalali), or outside what [`jiff`] can hold.
    #[error("year {year} is out of the supported range")]
    YearOutOfRange { year: i64 },

    /// A string that does not hold what it was expected to.
    #[error("cannot parse {input:?}: {reason}")]
    Parse { input: String, reason: String },

    /// Passed on from `jiff` (clock, time zones and strtime).
    #[error(transparent)]
    Time(#[from] jiff::Error),
}

impl Error {
    pub(crate) fn parse(input: &str, reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            input: input.to_owned(),
            reason: reason.to_string(),
        }
    }

    /// Return true if this is a broken precondition of a date triple.
    pub fn is_invalid_date(&self) -> bool {
        matches!(
            self,
            Self::InvalidMonth { .. } | Self::InvalidDay { .. } | Self::YearOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::InvalidMonth { month: 13 }.to_string(),
            "invalid month: 13 (must be 1..=12)"
        );
        assert_eq!(
            Error::InvalidDay {
                day: 30,
                month: 12,
                max_day: 29
            }
            .to_string(),
            "invalid day: 30 for month 12 (max 29)"
        );
        assert_eq!(
            Error::parse("2024-13", "missing day").to_string(),
            "cannot parse \"2024-13\": missing day"
        );
    }

    #[test]
    fn test_invalid_date_kind() {
        assert!(Error::InvalidMonth { month: 0 }.is_invalid_date());
        assert!(Error::YearOutOfRange { year: i64::MAX }.is_invalid_date());
        assert!(!Error::parse("", "empty").is_invalid_date());
    }

    #[test]
    fn test_is_send_sync_error() {
        fn assert_impl<T: std::error::Error + Send + Sync + 'static>() {}
        assert_impl::<Error>();
    }
}
