use http::Method;

use crate::{
    api::{Api, ApiError},
    content::{AboutContent, HeroContent, SiteSettings},
    prelude::*,
};

impl Api {
    #[instrument(skip_all)]
    pub async fn get_settings(&self) -> Result<SiteSettings, ApiError> {
        info!("fetching site settings…");
        self.call(Method::GET, &["settings"]).await
    }

    #[instrument(skip_all, fields(hotel_name = %settings.hotel_name))]
    pub async fn update_settings(&self, settings: &SiteSettings) -> Result<SiteSettings, ApiError> {
        info!("saving site settings…");
        self.call_with_body(Method::PUT, &["settings"], settings).await
    }

    #[instrument(skip_all)]
    pub async fn get_hero(&self) -> Result<HeroContent, ApiError> {
        info!("fetching the hero banner…");
        self.call(Method::GET, &["hero"]).await
    }

    #[instrument(skip_all)]
    pub async fn update_hero(&self, hero: &HeroContent) -> Result<HeroContent, ApiError> {
        info!("saving the hero banner…");
        self.call_with_body(Method::PUT, &["hero"], hero).await
    }

    #[instrument(skip_all)]
    pub async fn get_about(&self) -> Result<AboutContent, ApiError> {
        info!("fetching the about page…");
        self.call(Method::GET, &["about"]).await
    }

    #[instrument(skip_all)]
    pub async fn update_about(&self, about: &AboutContent) -> Result<AboutContent, ApiError> {
        info!("saving the about page…");
        self.call_with_body(Method::PUT, &["about"], about).await
    }
}
