use chrono::NaiveDate;
use http::Method;
use serde::{Deserialize, Serialize};

use crate::{
    api::{Acknowledgement, Api, ApiError, Image},
    prelude::*,
    quantity::Money,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub price_per_night: Money,

    #[serde(default)]
    pub max_guests: u32,

    /// Number of identical units of this room type.
    #[serde(default)]
    pub room_count: u32,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[serde(default)]
    pub images: Vec<Image>,
}

/// Room as it is submitted for creation or update.
#[derive(Clone, Debug, PartialEq, Serialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct RoomDraft {
    #[builder(into)]
    pub name: String,

    #[serde(rename = "type")]
    #[builder(into)]
    pub kind: String,

    pub price_per_night: Money,

    pub max_guests: u32,

    pub room_count: u32,

    #[builder(into, default)]
    pub description: String,

    #[builder(default)]
    pub amenities: Vec<String>,

    #[builder(default)]
    pub images: Vec<Image>,
}

impl From<Room> for RoomDraft {
    fn from(room: Room) -> Self {
        Self {
            name: room.name,
            kind: room.kind,
            price_per_night: room.price_per_night,
            max_guests: room.max_guests,
            room_count: room.room_count,
            description: room.description,
            amenities: room.amenities,
            images: room.images,
        }
    }
}

/// Room together with the number of units still free for the searched dates.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableRoom {
    #[serde(flatten)]
    pub room: Room,

    #[serde(default)]
    pub available_count: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
}

impl SearchCriteria {
    /// Complete the search form, both dates are required before anything is sent.
    pub fn new(
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        guests: u32,
    ) -> Result<Self, SearchError> {
        let check_in = check_in.ok_or(SearchError::MissingDates)?;
        let check_out = check_out.ok_or(SearchError::MissingDates)?;
        if check_out <= check_in {
            return Err(SearchError::EmptyStay { check_in, check_out });
        }
        if guests == 0 {
            return Err(SearchError::NoGuests);
        }
        Ok(Self { check_in, check_out, guests })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SearchError {
    #[display("please select both check-in and check-out dates")]
    MissingDates,

    #[display("check-out `{check_out}` must be after check-in `{check_in}`")]
    EmptyStay { check_in: NaiveDate, check_out: NaiveDate },

    #[display("at least one guest is required")]
    NoGuests,
}

impl Api {
    #[instrument(skip_all)]
    pub async fn list_rooms(&self) -> Result<Vec<Room>, ApiError> {
        info!("fetching rooms…");
        self.call(Method::GET, &["rooms"]).await
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn get_room(&self, id: &str) -> Result<Room, ApiError> {
        info!("fetching the room…");
        self.call(Method::GET, &["rooms", id]).await
    }

    #[instrument(skip_all, fields(name = %room.name))]
    pub async fn create_room(&self, room: &RoomDraft) -> Result<Room, ApiError> {
        info!("creating the room…");
        self.call_with_body(Method::POST, &["rooms"], room).await
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn update_room(&self, id: &str, room: &RoomDraft) -> Result<Room, ApiError> {
        info!("updating the room…");
        self.call_with_body(Method::PUT, &["rooms", id], room).await
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn delete_room(&self, id: &str) -> Result<Acknowledgement, ApiError> {
        info!("deleting the room…");
        self.call(Method::DELETE, &["rooms", id]).await
    }

    #[instrument(skip_all, fields(check_in = %criteria.check_in, check_out = %criteria.check_out))]
    pub async fn check_availability(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<AvailableRoom>, ApiError> {
        info!(criteria.guests, "checking availability…");
        self.call_with_body(Method::POST, &["rooms", "availability"], criteria).await
    }
}
