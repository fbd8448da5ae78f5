use chrono::{Datelike, Months, NaiveDate};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    api::{AvailableRoom, Booking, Room, SummaryReport},
    core::{
        availability::DisabledDates,
        bookings::Dashboard,
        report::occupancy_shares,
        selection::DateRangeSelection,
        stay::Stay,
    },
    quantity::Money,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

pub fn build_rooms_table(rooms: &[Room]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Type", "Per night", "Guests", "Units", "Amenities"]);
    for room in rooms {
        table.add_row(vec![
            Cell::new(&room.id).add_attribute(Attribute::Dim),
            Cell::new(&room.name).add_attribute(Attribute::Bold),
            Cell::new(&room.kind),
            Cell::new(room.price_per_night).set_alignment(CellAlignment::Right),
            Cell::new(room.max_guests).set_alignment(CellAlignment::Right),
            Cell::new(room.room_count).set_alignment(CellAlignment::Right),
            Cell::new(room.amenities.join(", ")).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_availability_table(rooms: &[AvailableRoom]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Type", "Per night", "Guests", "Available"]);
    for AvailableRoom { room, available_count } in rooms {
        table.add_row(vec![
            Cell::new(&room.id).add_attribute(Attribute::Dim),
            Cell::new(&room.name).add_attribute(Attribute::Bold),
            Cell::new(&room.kind),
            Cell::new(room.price_per_night).set_alignment(CellAlignment::Right),
            Cell::new(room.max_guests).set_alignment(CellAlignment::Right),
            if *available_count == 0 {
                Cell::new("sold out").fg(Color::Red)
            } else {
                Cell::new(format!("{available_count} left")).fg(Color::Green)
            },
        ]);
    }
    table
}

pub fn build_bookings_table(bookings: &[&Booking]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "ID",
        "Room",
        "Guest",
        "Check-in",
        "Check-out",
        "Nights",
        "Total",
        "Payment",
        "Status",
        "Next",
    ]);
    for booking in bookings {
        let nights = (booking.check_out_date - booking.check_in_date).num_days();
        table.add_row(vec![
            Cell::new(&booking.id).add_attribute(Attribute::Dim),
            Cell::new(booking.room_label().unwrap_or("N/A")),
            Cell::new(booking.guest_label().unwrap_or("N/A")),
            Cell::new(booking.check_in_date.format("%b %d, %Y")),
            Cell::new(booking.check_out_date.format("%b %d, %Y")),
            Cell::new(nights).set_alignment(CellAlignment::Right),
            Cell::new(booking.total_price).set_alignment(CellAlignment::Right),
            Cell::new(booking.payment_info.as_ref().map_or("N/A", |payment| payment.status.as_str()))
                .add_attribute(Attribute::Dim),
            Cell::new(booking.status).fg(booking.status.color()),
            Cell::new(booking.status.next_statuses().iter().join(", "))
                .add_attribute(Attribute::Dim),
        ]);
    }
    table
}

/// Month view of a room calendar, weeks starting on Monday.
pub fn build_calendar_table(
    month: NaiveDate,
    today: NaiveDate,
    disabled: &DisabledDates,
    selection: DateRangeSelection,
) -> Table {
    let first = month.with_day(1).unwrap_or(month);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);
    let is_selected = |date: NaiveDate| match (selection.from, selection.to) {
        (Some(from), Some(to)) => (from..=to).contains(&date),
        (Some(from), None) => from == date,
        (None, _) => false,
    };

    let mut table = new_table();
    table.set_header(vec!["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]);

    let leading_blanks = first.weekday().num_days_from_monday() as usize;
    let cells = std::iter::repeat_with(|| Cell::new(""))
        .take(leading_blanks)
        .chain(first.iter_days().take_while(|date| *date <= last).map(|date| {
            let cell = Cell::new(date.day()).set_alignment(CellAlignment::Right);
            let cell = if is_selected(date) {
                cell.fg(Color::Green).add_attribute(Attribute::Reverse)
            } else if date < today {
                cell.add_attribute(Attribute::Dim)
            } else if disabled.contains(date) {
                cell.fg(Color::Red).add_attribute(Attribute::CrossedOut)
            } else {
                cell
            };
            if date == today { cell.add_attribute(Attribute::Bold) } else { cell }
        }));
    for week in &cells.chunks(7) {
        table.add_row(week.collect_vec());
    }
    table
}

pub fn build_report_table(report: &SummaryReport) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Room type", "Booked", "Share"]);
    for share in occupancy_shares(&report.summary.occupancy_by_room_type) {
        table.add_row(vec![
            Cell::new(share.room_type),
            Cell::new(share.count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.0}%", share.share * 100.0)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(report.summary.total_bookings)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(report.summary.total_revenue)
            .set_alignment(CellAlignment::Right)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn build_dashboard_table(dashboard: &Dashboard<'_>, n_rooms: usize) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Check-ins today", "Check-outs today", "Checked-in guests", "Rooms"]);
    table.add_row(vec![
        Cell::new(dashboard.check_ins_today).fg(Color::Green),
        Cell::new(dashboard.check_outs_today).fg(Color::DarkYellow),
        Cell::new(dashboard.active).fg(Color::Blue),
        Cell::new(n_rooms),
    ]);
    table
}

/// Two-column table of labelled values.
pub fn build_fields_table<'a>(fields: impl IntoIterator<Item = (&'a str, String)>) -> Table {
    let mut table = new_table();
    for (label, value) in fields {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            if value.is_empty() {
                Cell::new("not set").add_attribute(Attribute::Dim)
            } else {
                Cell::new(value)
            },
        ]);
    }
    table
}

pub fn build_stay_table(from: NaiveDate, to: NaiveDate, nightly_rate: Money, stay: Stay) -> Table {
    build_fields_table([
        ("Check-in", from.format("%a, %b %d, %Y").to_string()),
        ("Check-out", to.format("%a, %b %d, %Y").to_string()),
        ("Nights", stay.nights.to_string()),
        ("Per night", nightly_rate.to_string()),
        ("Total", stay.total_price.to_string()),
    ])
}
