use std::fmt::{Debug, Formatter};

use chrono::NaiveDate;

/// Occupied date range of an existing reservation.
#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct BookingInterval {
    /// Inclusive.
    pub start: NaiveDate,

    /// Inclusive: the check-out day stays blocked.
    pub end: NaiveDate,
}

impl Debug for BookingInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..={:?}", self.start, self.end)
    }
}

impl BookingInterval {
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Every calendar day of the interval, boundaries included.
    ///
    /// A reversed interval yields nothing.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take_while(move |day| *day <= self.end)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_days_inclusive() {
        let interval = BookingInterval::new(
            NaiveDate::from_ymd_opt(2025, 1, 30).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
        );
        let days = interval.days().map(|day| day.to_string()).collect_vec();
        assert_eq!(days, ["2025-01-30", "2025-01-31", "2025-02-01", "2025-02-02"]);
    }

    #[test]
    fn test_days_single() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(BookingInterval::new(day, day).days().collect_vec(), [day]);
    }

    #[test]
    fn test_days_reversed() {
        let interval = BookingInterval::new(
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        );
        assert_eq!(interval.days().count(), 0);
    }
}
