//! Hotel booking backend client.

mod auth;
mod bookings;
mod contact;
mod content;
mod error;
mod payments;
mod reports;
mod rooms;
mod uploads;

use std::time::Duration;

use http::{HeaderMap, HeaderValue, Method, header};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub use self::{
    auth::{AuthResponse, Role, User},
    bookings::{Booking, NewBooking, PaymentInfo},
    contact::ContactMessage,
    error::ApiError,
    reports::SummaryReport,
    rooms::{AvailableRoom, Room, RoomDraft, SearchCriteria},
    uploads::{Image, UploadedImage},
};
use crate::prelude::*;

/// Backend client, authenticated when built with a session token.
pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn new(base_url: Url, timeout: Duration, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .context("the session token cannot be sent as a header")?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }
        let client = Client::builder()
            .user_agent(concat!("innkeeper/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Build the endpoint URL by appending the path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.request(method, self.url(segments)?))
    }

    /// Send the request and turn a non-successful status into [`ApiError::Backend`].
    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.bytes().await?;
            let error = ApiError::from_body(status, &body);
            warn!(%status, "request failed");
            Err(error)
        }
    }

    async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    #[instrument(
        skip_all,
        level = Level::DEBUG,
        fields(method = %method, path = %segments.join("/")),
    )]
    async fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<R, ApiError> {
        let response = Self::send(self.request(method, segments)?).await?;
        Self::decode(response).await
    }

    #[instrument(
        skip_all,
        level = Level::DEBUG,
        fields(method = %method, path = %segments.join("/")),
    )]
    async fn call_with_body<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<R, ApiError> {
        let response = Self::send(self.request(method, segments)?.json(body)).await?;
        Self::decode(response).await
    }
}

/// Confirmation the backend sends back for commands without a meaningful result.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> Result<Api> {
        Api::new(base_url.parse()?, Duration::from_secs(1), None)
    }

    #[test]
    fn test_url_with_trailing_slash() -> Result {
        let url = api("http://localhost:8000/api/")?.url(&["bookings", "my-bookings"])?;
        assert_eq!(url.as_str(), "http://localhost:8000/api/bookings/my-bookings");
        Ok(())
    }

    #[test]
    fn test_url_without_trailing_slash() -> Result {
        let url = api("http://localhost:8000/api")?.url(&["rooms", "42"])?;
        assert_eq!(url.as_str(), "http://localhost:8000/api/rooms/42");
        Ok(())
    }

    #[test]
    fn test_url_escapes_segments() -> Result {
        let url = api("http://localhost:8000/api")?.url(&["uploads", "a b.png"])?;
        assert_eq!(url.as_str(), "http://localhost:8000/api/uploads/a%20b.png");
        Ok(())
    }

    #[test]
    fn test_cannot_be_a_base() -> Result {
        let error = api("mailto:desk@hotel.example")?.url(&["rooms"]).unwrap_err();
        assert!(matches!(error, ApiError::InvalidBaseUrl(_)));
        Ok(())
    }
}
