use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};

/// Quick report period relative to today.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ReportPreset {
    #[clap(name = "last7")]
    Last7Days,

    #[clap(name = "last30")]
    Last30Days,

    #[clap(name = "this-month")]
    ThisMonth,
}

impl ReportPreset {
    /// Inclusive report period.
    #[must_use]
    pub fn period(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Last7Days => (today - Days::new(6), today),
            Self::Last30Days => (today - Days::new(29), today),
            Self::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(today);
                (first, last)
            }
        }
    }
}

/// Booked units and their share of all booked units, per room type.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyShare<'a> {
    pub room_type: &'a str,
    pub count: u32,

    /// Zero when nothing was booked at all.
    pub share: f64,
}

pub fn occupancy_shares(occupancy: &BTreeMap<String, u32>) -> Vec<OccupancyShare<'_>> {
    let total: f64 = occupancy.values().copied().map(f64::from).sum();
    occupancy
        .iter()
        .map(|(room_type, count)| OccupancyShare {
            room_type,
            count: *count,
            share: if total > 0.0 { f64::from(*count) / total } else { 0.0 },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_last_7_days() {
        let today = date(2025, 3, 3);
        assert_eq!(ReportPreset::Last7Days.period(today), (date(2025, 2, 25), today));
    }

    #[test]
    fn test_last_30_days() {
        let today = date(2025, 3, 3);
        assert_eq!(ReportPreset::Last30Days.period(today), (date(2025, 2, 2), today));
    }

    #[test]
    fn test_this_month() {
        assert_eq!(
            ReportPreset::ThisMonth.period(date(2024, 2, 14)),
            (date(2024, 2, 1), date(2024, 2, 29)),
        );
        assert_eq!(
            ReportPreset::ThisMonth.period(date(2025, 12, 31)),
            (date(2025, 12, 1), date(2025, 12, 31)),
        );
    }

    #[test]
    fn test_occupancy_shares() {
        let occupancy = BTreeMap::from([("Deluxe".to_owned(), 3), ("Standard".to_owned(), 1)]);
        let shares = occupancy_shares(&occupancy);
        assert_eq!(shares[0].room_type, "Deluxe");
        assert_abs_diff_eq!(shares[0].share, 0.75);
        assert_abs_diff_eq!(shares[1].share, 0.25);
    }

    #[test]
    fn test_occupancy_shares_without_bookings() {
        let occupancy = BTreeMap::from([("Suite".to_owned(), 0)]);
        assert_abs_diff_eq!(occupancy_shares(&occupancy)[0].share, 0.0);
    }

    #[test]
    fn test_occupancy_shares_beyond_u32() {
        let occupancy =
            BTreeMap::from([("Deluxe".to_owned(), u32::MAX), ("Standard".to_owned(), u32::MAX)]);
        let shares = occupancy_shares(&occupancy);
        assert_abs_diff_eq!(shares[0].share, 0.5);
        assert_abs_diff_eq!(shares[1].share, 0.5);
    }
}
