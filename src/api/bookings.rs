use chrono::{DateTime, NaiveDate, Utc};
use http::{Method, StatusCode, header};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::{
    api::{Api, ApiError, Room, User},
    core::{interval::BookingInterval, status::BookingStatus},
    prelude::*,
    quantity::Money,
};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,

    /// Missing when the room has been deleted since.
    #[serde(default)]
    pub room: Option<RoomRef>,

    #[serde(default)]
    pub user: Option<UserRef>,

    #[serde(deserialize_with = "deserialize_date")]
    pub check_in_date: NaiveDate,

    #[serde(deserialize_with = "deserialize_date")]
    pub check_out_date: NaiveDate,

    #[serde(default)]
    pub total_price: Money,

    pub status: BookingStatus,

    #[serde(default)]
    pub payment_info: Option<PaymentInfo>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Room name, or the bare ID when the room is not joined in.
    pub fn room_label(&self) -> Option<&str> {
        Some(match self.room.as_ref()? {
            RoomRef::Populated(room) => &room.name,
            RoomRef::Id(id) => id,
        })
    }

    /// Guest name, or the bare ID when the user is not joined in.
    pub fn guest_label(&self) -> Option<&str> {
        Some(match self.user.as_ref()? {
            UserRef::Populated(user) => &user.name,
            UserRef::Id(id) => id,
        })
    }

    pub fn guest(&self) -> Option<&User> {
        match self.user.as_ref()? {
            UserRef::Populated(user) => Some(user),
            UserRef::Id(_) => None,
        }
    }
}

/// Room reference, populated by the endpoints which join the room in.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RoomRef {
    Id(String),
    Populated(Box<Room>),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(String),
    Populated(User),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub id: String,
    pub status: String,
    pub method: String,
}

impl PaymentInfo {
    pub fn stripe(id: impl Into<String>, status: impl Into<String>) -> Self {
        Self { id: id.into(), status: status.into(), method: "Stripe".to_owned() }
    }
}

#[derive(Clone, Debug, Serialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[builder(into)]
    pub room: String,

    #[builder(into)]
    pub user: String,

    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: Money,
    pub payment_info: PaymentInfo,
}

/// Receipt document, a PDF.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt(pub Vec<u8>);

/// Booking dates arrive as plain dates or as date-times, the latter are taken in UTC.
fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let value = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .or_else(|_| {
            DateTime::parse_from_rfc3339(&value).map(|date_time| date_time.to_utc().date_naive())
        })
        .map_err(|error| de::Error::custom(format!("invalid booking date `{value}`: {error}")))
}

/// Dates of an existing booking, the only part the room bookings endpoint is relied on for.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookedDates {
    #[serde(deserialize_with = "deserialize_date")]
    check_in_date: NaiveDate,

    #[serde(deserialize_with = "deserialize_date")]
    check_out_date: NaiveDate,
}

impl From<BookedDates> for BookingInterval {
    fn from(dates: BookedDates) -> Self {
        Self::new(dates.check_in_date, dates.check_out_date)
    }
}

impl Api {
    #[instrument(skip_all, fields(room = %booking.room, check_in = %booking.check_in_date))]
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, ApiError> {
        info!(total_price = ?booking.total_price, "creating the booking…");
        self.call_with_body(Method::POST, &["bookings"], booking).await
    }

    #[instrument(skip_all)]
    pub async fn my_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        info!("fetching own bookings…");
        self.call(Method::GET, &["bookings", "my-bookings"]).await
    }

    #[instrument(skip_all)]
    pub async fn all_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        info!("fetching all bookings…");
        self.call(Method::GET, &["bookings"]).await
    }

    #[instrument(skip_all, fields(id = id, status = %status))]
    pub async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<Booking, ApiError> {
        #[derive(Serialize)]
        struct StatusUpdate {
            status: BookingStatus,
        }

        info!("updating the status…");
        self.call_with_body(Method::PUT, &["bookings", id, "status"], &StatusUpdate { status })
            .await
    }

    #[instrument(skip_all, fields(room_id = room_id))]
    pub async fn bookings_for_room(&self, room_id: &str) -> Result<Vec<BookingInterval>, ApiError> {
        info!("fetching room bookings…");
        let bookings: Vec<BookedDates> =
            self.call(Method::GET, &["bookings", "room", room_id]).await?;
        Ok(bookings.into_iter().map(BookingInterval::from).collect())
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn booking_receipt(&self, id: &str) -> Result<Receipt, ApiError> {
        info!("fetching the receipt…");
        let response = self.request(Method::GET, &["bookings", id, "receipt"])?.send().await?;
        let status = response.status();
        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("application/json"));
        let body = response.bytes().await?;
        interpret_receipt(status, is_json, body.to_vec())
    }
}

/// The receipt endpoint reports failures as a JSON document, whatever the status code.
fn interpret_receipt(
    status: StatusCode,
    is_json: bool,
    body: Vec<u8>,
) -> Result<Receipt, ApiError> {
    if is_json {
        let message = match ApiError::from_body(status, &body) {
            ApiError::Backend { message: Some(message), .. } => message,
            _ => "An unknown error occurred".to_owned(),
        };
        warn!(%status, reason = %message, "receipt was not generated");
        Err(ApiError::Backend { status, message: Some(message) })
    } else if status.is_success() {
        Ok(Receipt(body))
    } else {
        Err(ApiError::from_body(status, &body))
    }
}
