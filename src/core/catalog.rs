use crate::api::Room;

#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum PriceOrder {
    #[clap(name = "price-asc")]
    Ascending,

    #[clap(name = "price-desc")]
    Descending,
}

impl PriceOrder {
    /// Sort the rooms by nightly rate, rooms with equal rates keep their relative order.
    pub fn sort<T>(self, rooms: &mut [T], room: impl Fn(&T) -> &Room) {
        rooms.sort_by(|lhs, rhs| {
            let ordering = room(lhs).price_per_night.0.total_cmp(&room(rhs).price_per_night.0);
            match self {
                Self::Ascending => ordering,
                Self::Descending => ordering.reverse(),
            }
        });
    }
}

/// Room list filter: an exact room type and a case-insensitive name fragment.
#[derive(Clone, Debug, Default)]
pub struct RoomFilter {
    pub kind: Option<String>,
    pub search: Option<String>,
}

impl RoomFilter {
    #[must_use]
    pub fn matches(&self, room: &Room) -> bool {
        if let Some(kind) = &self.kind
            && &room.kind != kind
        {
            return false;
        }
        self.search
            .as_deref()
            .is_none_or(|search| room.name.to_lowercase().contains(&search.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::quantity::Money;

    fn room(id: &str, price: f64) -> Room {
        Room { id: id.to_owned(), price_per_night: Money(price), ..Room::default() }
    }

    fn named(name: &str, kind: &str) -> Room {
        Room { name: name.to_owned(), kind: kind.to_owned(), ..Room::default() }
    }

    fn ids(rooms: &[Room]) -> Vec<&str> {
        rooms.iter().map(|room| room.id.as_str()).collect_vec()
    }

    #[test]
    fn test_ascending_is_stable() {
        let mut rooms = [room("a", 120.0), room("b", 80.0), room("c", 120.0), room("d", 95.5)];
        PriceOrder::Ascending.sort(&mut rooms, |room| room);
        assert_eq!(ids(&rooms), ["b", "d", "a", "c"]);
    }

    #[test]
    fn test_descending_is_stable() {
        let mut rooms = [room("a", 120.0), room("b", 80.0), room("c", 120.0)];
        PriceOrder::Descending.sort(&mut rooms, |room| room);
        assert_eq!(ids(&rooms), ["a", "c", "b"]);
    }

    #[test]
    fn test_filter_by_type() {
        let filter = RoomFilter { kind: Some("Suite".to_owned()), search: None };
        assert!(filter.matches(&named("Royal Suite", "Suite")));
        assert!(!filter.matches(&named("Royal Suite", "suite")));
    }

    #[test]
    fn test_filter_by_name() {
        let filter = RoomFilter { kind: None, search: Some("sea VIEW".to_owned()) };
        assert!(filter.matches(&named("Deluxe Sea View", "Deluxe")));
        assert!(!filter.matches(&named("Garden Twin", "Standard")));
        assert!(RoomFilter::default().matches(&named("Garden Twin", "Standard")));
    }
}
