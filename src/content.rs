//! Site-wide content managed from the admin area.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

use crate::api::Image;

/// General site settings.
///
/// Every recognised field has a default, unknown fields are ignored.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    #[serde_as(as = "DefaultOnNull")]
    pub hotel_name: String,

    #[serde_as(as = "DefaultOnNull")]
    pub address: String,

    #[serde_as(as = "DefaultOnNull")]
    pub phone: String,

    #[serde_as(as = "DefaultOnNull")]
    pub email: String,

    #[serde(rename = "facebookURL")]
    #[serde_as(as = "DefaultOnNull")]
    pub facebook_url: String,

    #[serde(rename = "twitterURL")]
    #[serde_as(as = "DefaultOnNull")]
    pub twitter_url: String,

    #[serde(rename = "instagramURL")]
    #[serde_as(as = "DefaultOnNull")]
    pub instagram_url: String,

    #[serde(flatten)]
    pub about: AboutContent,
}

/// About page, stored alongside the settings.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutContent {
    #[serde_as(as = "DefaultOnNull")]
    pub about_title: String,

    #[serde_as(as = "DefaultOnNull")]
    pub about_subtitle: String,

    #[serde_as(as = "DefaultOnNull")]
    pub about_paragraph_one: String,

    #[serde_as(as = "DefaultOnNull")]
    pub about_paragraph_two: String,

    pub about_image_one: Option<Image>,

    pub about_image_two: Option<Image>,
}

/// Home page banner.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroContent {
    #[serde_as(as = "DefaultOnNull")]
    pub hero_title: String,

    #[serde_as(as = "DefaultOnNull")]
    pub hero_subtitle: String,

    #[serde_as(as = "DefaultOnNull")]
    pub hero_button_text: String,

    #[serde_as(as = "DefaultOnNull")]
    pub hero_button_link: String,

    pub hero_image: Option<Image>,
}

/// Explicitly named overrides merged into [`SiteSettings`] before saving.
#[derive(Clone, Debug, Default, bon::Builder)]
pub struct SettingsPatch {
    pub hotel_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
}

impl SiteSettings {
    /// Apply the overrides, leaving unnamed fields as they are.
    pub fn merge(&mut self, patch: SettingsPatch) {
        let SettingsPatch {
            hotel_name,
            address,
            phone,
            email,
            facebook_url,
            twitter_url,
            instagram_url,
        } = patch;
        for (field, value) in [
            (&mut self.hotel_name, hotel_name),
            (&mut self.address, address),
            (&mut self.phone, phone),
            (&mut self.email, email),
            (&mut self.facebook_url, facebook_url),
            (&mut self.twitter_url, twitter_url),
            (&mut self.instagram_url, instagram_url),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}
