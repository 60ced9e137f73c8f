//! Inclusive Jalali date ranges, open on a missing bound.

use crate::{convert::jalali_day_number, date::Ymd};

/// Days from `start` to `end`, both included, on the linear day axis.
///
/// A missing bound does not limit that side. A range whose start is after its end contains
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct JalaliRange {
    pub start: Option<Ymd>,
    pub end: Option<Ymd>,
}

fn day_number(date: &Ymd) -> i64 {
    jalali_day_number(date.year, date.month, date.day)
}

impl JalaliRange {
    pub const fn new(start: Option<Ymd>, end: Option<Ymd>) -> Self {
        Self { start, end }
    }

    /// Return true if the Jalali date is in this range.
    pub fn contains(&self, date: &Ymd) -> bool {
        let n = day_number(date);
        self.start.is_none_or(|start| day_number(&start) <= n)
            && self.end.is_none_or(|end| n <= day_number(&end))
    }

    /// Keep the items whose Jalali date is in this range.
    ///
    /// ```
    /// use taqvim::{Ymd, range::JalaliRange};
    ///
    /// let rows = [("a", Ymd::new(1403, 12, 30)), ("b", Ymd::new(1404, 1, 1))];
    /// let range = JalaliRange::new(Some(Ymd::new(1404, 1, 1)), None);
    /// let kept: Vec<_> = range.filter(rows, |(_, date)| *date).collect();
    /// assert_eq!(kept, [("b", Ymd::new(1404, 1, 1))]);
    /// ```
    pub fn filter<T, I, F>(&self, items: I, mut key: F) -> impl Iterator<Item = T>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> Ymd,
    {
        let range = *self;
        items.into_iter().filter(move |item| range.contains(&key(item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        let range = JalaliRange::new(Some(Ymd::new(1403, 12, 1)), Some(Ymd::new(1404, 1, 13)));
        assert!(range.contains(&Ymd::new(1403, 12, 1)));
        assert!(range.contains(&Ymd::new(1403, 12, 30)));
        assert!(range.contains(&Ymd::new(1404, 1, 13)));
        assert!(!range.contains(&Ymd::new(1404, 1, 14)));
        assert!(!range.contains(&Ymd::new(1403, 11, 30)));
    }

    #[test]
    fn test_open_bounds() {
        assert!(JalaliRange::default().contains(&Ymd::new(-5000, 1, 1)));
        let until = JalaliRange::new(None, Some(Ymd::new(1400, 1, 1)));
        assert!(until.contains(&Ymd::new(1, 1, 1)));
        assert!(!until.contains(&Ymd::new(1400, 1, 2)));
    }

    #[test]
    fn test_reversed_is_empty() {
        let range = JalaliRange::new(Some(Ymd::new(1404, 1, 1)), Some(Ymd::new(1403, 1, 1)));
        assert!(!range.contains(&Ymd::new(1403, 6, 1)));
    }

    #[test]
    fn test_filter() {
        let days = (1..=31).map(|d| Ymd::new(1404, 2, d));
        let range = JalaliRange::new(Some(Ymd::new(1404, 2, 10)), Some(Ymd::new(1404, 2, 20)));
        assert_eq!(range.filter(days, |d| *d).count(), 11);
    }
}
