pub mod availability;
pub mod bookings;
pub mod catalog;
pub mod interval;
pub mod report;
pub mod request;
pub mod selection;
pub mod status;
pub mod stay;
