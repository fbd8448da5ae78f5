use crate::{core::selection::DateRangeSelection, quantity::Money};

/// Billable nights and the price for a date range.
#[derive(Copy, Clone, Debug, PartialEq)]
#[must_use]
pub struct Stay {
    pub nights: u32,
    pub total_price: Money,
}

impl Stay {
    pub const EMPTY: Self = Self { nights: 0, total_price: Money::ZERO };

    /// Compute the stay for a selection, empty unless check-out is strictly after check-in.
    ///
    /// Dates are whole calendar days, so the day difference needs no rounding up.
    pub fn compute(selection: DateRangeSelection, nightly_rate: Money) -> Self {
        let (Some(from), Some(to)) = (selection.from, selection.to) else {
            return Self::EMPTY;
        };
        let Ok(nights) = u32::try_from((to - from).num_days()) else {
            return Self::EMPTY;
        };
        if nights == 0 {
            return Self::EMPTY;
        }
        Self { nights, total_price: nightly_rate * nights }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_three_nights() {
        let stay = Stay::compute(
            DateRangeSelection::between(date(2025, 1, 1), date(2025, 1, 4)),
            Money(100.0),
        );
        assert_eq!(stay.nights, 3);
        assert_abs_diff_eq!(stay.total_price.0, 300.0);
    }

    #[test]
    fn test_zero_length_range() {
        for rate in [0.0, 1.0, 149.99] {
            let day = date(2025, 5, 5);
            let selection = DateRangeSelection::between(day, day);
            assert_eq!(Stay::compute(selection, Money(rate)), Stay::EMPTY);
        }
    }

    #[test]
    fn test_missing_from() {
        let selection = DateRangeSelection::new(None, Some(date(2025, 1, 4)));
        assert_eq!(Stay::compute(selection, Money(100.0)), Stay::EMPTY);
    }

    #[test]
    fn test_missing_to() {
        let selection = DateRangeSelection::new(Some(date(2025, 1, 4)), None);
        assert_eq!(Stay::compute(selection, Money(100.0)), Stay::EMPTY);
    }

    #[test]
    fn test_reversed_range() {
        let selection = DateRangeSelection::between(date(2025, 1, 4), date(2025, 1, 1));
        assert_eq!(Stay::compute(selection, Money(100.0)), Stay::EMPTY);
    }

    #[test]
    fn test_across_year_boundary() {
        let stay = Stay::compute(
            DateRangeSelection::between(date(2024, 12, 30), date(2025, 1, 2)),
            Money(89.5),
        );
        assert_eq!(stay.nights, 3);
        assert_abs_diff_eq!(stay.total_price.0, 268.5);
    }
}
