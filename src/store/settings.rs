use crate::{api::Api, content::SiteSettings, prelude::*};

/// Last known site settings.
#[derive(Default)]
pub struct SettingsStore {
    settings: Option<SiteSettings>,
}

impl SettingsStore {
    /// Refresh the settings.
    ///
    /// A failure is only logged, the previously fetched settings stay in place.
    pub async fn fetch(&mut self, api: &Api) {
        match api.get_settings().await {
            Ok(settings) => {
                self.settings = Some(settings);
            }
            Err(error) => {
                error!("failed to fetch the settings: {error:#}");
            }
        }
    }

    #[must_use]
    pub const fn settings(&self) -> Option<&SiteSettings> {
        self.settings.as_ref()
    }
}
