use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::core::interval::BookingInterval;

/// Calendar days that cannot be picked for a room.
///
/// Booked days are enumerated, past days are covered by the `today` cut-off.
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct DisabledDates {
    today: NaiveDate,
    booked: BTreeSet<NaiveDate>,
}

impl DisabledDates {
    /// Block every day of every booking, both boundaries included, and everything before `today`.
    ///
    /// No same-day turnover: a check-out day is not a valid check-in day.
    pub fn compute(bookings: impl IntoIterator<Item = BookingInterval>, today: NaiveDate) -> Self {
        let booked = bookings.into_iter().flat_map(BookingInterval::days).collect();
        Self { today, booked }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date < self.today || self.booked.contains(&date)
    }

    /// First disabled day within `from..=to`.
    #[must_use]
    pub fn first_in(&self, from: NaiveDate, to: NaiveDate) -> Option<NaiveDate> {
        if from < self.today {
            Some(from)
        } else {
            self.booked.range(from..=to).next().copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn test_every_booked_day_is_disabled() {
        let bookings = [
            BookingInterval::new(date(3, 1), date(3, 3)),
            BookingInterval::new(date(3, 10), date(3, 10)),
        ];
        let disabled = DisabledDates::compute(bookings, date(1, 1));
        for booking in bookings {
            assert!(booking.days().all(|day| disabled.contains(day)));
        }
        assert_eq!(
            disabled.booked.iter().copied().collect_vec(),
            [date(3, 1), date(3, 2), date(3, 3), date(3, 10)]
        );
    }

    #[test]
    fn test_free_future_days_are_enabled() {
        let disabled =
            DisabledDates::compute([BookingInterval::new(date(3, 1), date(3, 3))], date(1, 1));
        assert!(!disabled.contains(date(2, 28)));
        assert!(!disabled.contains(date(3, 4)));
        assert!(!disabled.contains(date(1, 1)));
    }

    #[test]
    fn test_past_days_are_always_disabled() {
        let today = date(6, 15);
        let disabled = DisabledDates::compute([], today);
        assert!(disabled.contains(date(6, 14)));
        assert!(disabled.contains(date(1, 1)));
        assert!(disabled.contains(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()));
        assert!(!disabled.contains(today));
    }

    #[test]
    fn test_overlapping_bookings_are_deduplicated() {
        let disabled = DisabledDates::compute(
            [
                BookingInterval::new(date(3, 1), date(3, 5)),
                BookingInterval::new(date(3, 4), date(3, 7)),
            ],
            date(1, 1),
        );
        assert_eq!(disabled.booked.len(), 7);
    }

    #[test]
    fn test_check_out_day_blocks_check_in() {
        let disabled =
            DisabledDates::compute([BookingInterval::new(date(3, 1), date(3, 3))], date(1, 1));
        assert_eq!(disabled.first_in(date(3, 3), date(3, 6)), Some(date(3, 3)));
        assert_eq!(disabled.first_in(date(3, 4), date(3, 6)), None);
    }
}
