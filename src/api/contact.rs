use http::Method;
use serde::Serialize;

use crate::{
    api::{Acknowledgement, Api, ApiError},
    prelude::*,
};

#[derive(Serialize)]
pub struct ContactMessage<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
}

impl Api {
    #[instrument(skip_all, fields(email = message.email))]
    pub async fn send_message(
        &self,
        message: &ContactMessage<'_>,
    ) -> Result<Acknowledgement, ApiError> {
        info!("sending the message…");
        self.call_with_body(Method::POST, &["contact"], message).await
    }
}
