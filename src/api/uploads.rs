use http::Method;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    api::{Acknowledgement, Api, ApiError},
    prelude::*,
};

/// Hosted image reference.
///
/// The backend sends either a bare URL or an object with a `url` field, and accepts a bare URL.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
#[display("{url}")]
pub struct Image {
    pub url: String,
}

impl<'de> Deserialize<'de> for Image {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Url(String),
            Object { url: String },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Url(url) | Repr::Object { url } => Ok(Self { url }),
        }
    }
}

impl Serialize for Image {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.url)
    }
}

impl From<UploadedImage> for Image {
    fn from(uploaded: UploadedImage) -> Self {
        Self { url: uploaded.url }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

impl Api {
    #[instrument(skip_all, fields(file_name = file_name))]
    pub async fn upload_image(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadedImage, ApiError> {
        info!(n_bytes = contents.len(), "uploading…");
        let form = Form::new().part("image", Part::bytes(contents).file_name(file_name.to_owned()));
        let response = Self::send(self.request(Method::POST, &["uploads"])?.multipart(form)).await?;
        Self::decode(response).await
    }

    #[instrument(skip_all, fields(url = url))]
    pub async fn delete_image(&self, url: &str) -> Result<Acknowledgement, ApiError> {
        let file_name =
            uploaded_file_name(url).ok_or_else(|| ApiError::InvalidImageUrl(url.to_owned()))?;
        info!(file_name, "deleting…");
        self.call(Method::DELETE, &["uploads", file_name]).await
    }
}

/// Hosted file name, the last path segment of the image URL.
fn uploaded_file_name(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|segment| !segment.is_empty())
}
