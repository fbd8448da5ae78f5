use std::cmp::Reverse;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::{api::Booking, core::status::BookingStatus};

/// Admin booking list filter: a status, if any, and a guest name or e-mail fragment.
#[derive(Clone, Debug, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub search: Option<String>,
}

impl BookingFilter {
    #[must_use]
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(status) = self.status
            && booking.status != status
        {
            return false;
        }
        let Some(search) = self.search.as_deref().map(str::trim).filter(|term| !term.is_empty())
        else {
            return true;
        };
        let search = search.to_lowercase();
        booking.guest().is_some_and(|guest| {
            guest.name.to_lowercase().contains(&search)
                || guest.email.to_lowercase().contains(&search)
        })
    }

    pub fn apply<'a>(&self, bookings: &'a [Booking]) -> Vec<&'a Booking> {
        bookings.iter().filter(|booking| self.matches(booking)).collect()
    }
}

/// Front desk overview for a given day.
#[derive(Debug)]
pub struct Dashboard<'a> {
    pub check_ins_today: usize,
    pub check_outs_today: usize,

    /// Guests currently in the house.
    pub active: usize,

    pub recent: Vec<&'a Booking>,
}

impl<'a> Dashboard<'a> {
    pub const N_RECENT: usize = 5;

    pub fn compute(bookings: &'a [Booking], today: NaiveDate) -> Self {
        Self {
            check_ins_today: bookings
                .iter()
                .filter(|booking| booking.check_in_date == today)
                .count(),
            check_outs_today: bookings
                .iter()
                .filter(|booking| booking.check_out_date == today)
                .count(),
            active: bookings
                .iter()
                .filter(|booking| booking.status == BookingStatus::CheckedIn)
                .count(),
            recent: bookings
                .iter()
                .sorted_by_key(|booking| Reverse(booking.created_at))
                .take(Self::N_RECENT)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(
        id: &str,
        status: &str,
        check_in: &str,
        check_out: &str,
        created_at: &str,
    ) -> Booking {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "room": {"_id": "r1", "name": "Deluxe"},
            "user": {
                "_id": format!("u-{id}"),
                "name": format!("Guest {id}"),
                "email": format!("{id}@Example.com"),
            },
            "checkInDate": check_in,
            "checkOutDate": check_out,
            "totalPrice": 100,
            "status": status,
            "createdAt": created_at,
        }))
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_filter_by_status() {
        let bookings = [
            booking("a", "Pending", "2025-06-15", "2025-06-16", "2025-06-01T00:00:00Z"),
            booking("b", "Confirmed", "2025-06-15", "2025-06-16", "2025-06-01T00:00:00Z"),
        ];
        let filter = BookingFilter { status: Some(BookingStatus::Confirmed), search: None };
        let filtered = filter.apply(&bookings);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "b");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let bookings = [
            booking("alice", "Pending", "2025-06-15", "2025-06-16", "2025-06-01T00:00:00Z"),
            booking("bob", "Pending", "2025-06-15", "2025-06-16", "2025-06-01T00:00:00Z"),
        ];
        let filter = BookingFilter { status: None, search: Some("ALICE@example".to_owned()) };
        assert_eq!(filter.apply(&bookings).len(), 1);
        let filter = BookingFilter { status: None, search: Some("guest".to_owned()) };
        assert_eq!(filter.apply(&bookings).len(), 2);
        let filter = BookingFilter { status: None, search: Some("  ".to_owned()) };
        assert_eq!(filter.apply(&bookings).len(), 2);
    }

    #[test]
    fn test_dashboard() {
        let bookings = [
            booking("a", "Confirmed", "2025-06-15", "2025-06-18", "2025-06-01T00:00:00Z"),
            booking("b", "Checked-In", "2025-06-12", "2025-06-15", "2025-06-02T00:00:00Z"),
            booking("c", "Checked-In", "2025-06-14", "2025-06-20", "2025-06-03T00:00:00Z"),
            booking("d", "Cancelled", "2025-06-15", "2025-06-16", "2025-06-04T00:00:00Z"),
            booking("e", "Pending", "2025-07-01", "2025-07-02", "2025-06-05T00:00:00Z"),
            booking("f", "Pending", "2025-07-03", "2025-07-04", "2025-06-06T00:00:00Z"),
        ];
        let dashboard = Dashboard::compute(&bookings, today());
        assert_eq!(dashboard.check_ins_today, 2);
        assert_eq!(dashboard.check_outs_today, 1);
        assert_eq!(dashboard.active, 2);
        let recent = dashboard.recent.iter().map(|booking| booking.id.as_str()).collect_vec();
        assert_eq!(recent, ["f", "e", "d", "c", "b"]);
    }
}
