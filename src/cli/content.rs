use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    api::{Api, Image},
    cli::{ConnectionArgs, ensure_admin, fetch, room::upload_image},
    content::{AboutContent, HeroContent, SettingsPatch, SiteSettings},
    prelude::*,
    store::settings::SettingsStore,
    tables::build_fields_table,
};

#[derive(Parser)]
pub struct ContentArgs {
    #[command(subcommand)]
    command: ContentCommand,
}

#[derive(Subcommand)]
enum ContentCommand {
    /// Show the site settings.
    Settings,

    /// Change the general settings, only the given fields are replaced.
    SetSettings(SetSettingsArgs),

    /// Show the home page banner.
    Hero,

    /// Change the home page banner, only the given fields are replaced.
    SetHero(SetHeroArgs),

    /// Show the about page.
    About,

    /// Change the about page, only the given fields are replaced.
    SetAbout(SetAboutArgs),
}

impl ContentArgs {
    pub async fn run(self, connection: &ConnectionArgs) -> Result {
        let session = connection.session();
        let api = &connection.api(&session)?;
        match self.command {
            ContentCommand::Settings => {
                let mut store = SettingsStore::default();
                store.fetch(api).await;
                let settings = store.settings().context("the settings are not available")?;
                println!("{}", build_settings_table(settings));
            }
            ContentCommand::SetSettings(args) => {
                ensure_admin(&session)?;
                let mut store = SettingsStore::default();
                store.fetch(api).await;
                let mut settings =
                    store.settings().context("the settings are not available")?.clone();
                settings.merge(args.into());
                let settings = &settings;
                let settings = fetch(move |()| api.update_settings(settings)).await?;
                println!("{}", build_settings_table(&settings));
            }
            ContentCommand::Hero => {
                let hero = fetch(move |()| api.get_hero()).await?;
                println!("{}", build_hero_table(&hero));
            }
            ContentCommand::SetHero(args) => {
                ensure_admin(&session)?;
                let mut hero = fetch(move |()| api.get_hero()).await?;
                args.apply(api, &mut hero).await?;
                let hero = &hero;
                let hero = fetch(move |()| api.update_hero(hero)).await?;
                println!("{}", build_hero_table(&hero));
            }
            ContentCommand::About => {
                let about = fetch(move |()| api.get_about()).await?;
                println!("{}", build_about_table(&about));
            }
            ContentCommand::SetAbout(args) => {
                ensure_admin(&session)?;
                let mut about = fetch(move |()| api.get_about()).await?;
                args.apply(api, &mut about).await?;
                let about = &about;
                let about = fetch(move |()| api.update_about(about)).await?;
                println!("{}", build_about_table(&about));
            }
        }
        Ok(())
    }
}

#[derive(Parser)]
struct SetSettingsArgs {
    #[clap(long)]
    hotel_name: Option<String>,

    #[clap(long)]
    address: Option<String>,

    #[clap(long)]
    phone: Option<String>,

    #[clap(long)]
    email: Option<String>,

    #[clap(long)]
    facebook_url: Option<String>,

    #[clap(long)]
    twitter_url: Option<String>,

    #[clap(long)]
    instagram_url: Option<String>,
}

impl From<SetSettingsArgs> for SettingsPatch {
    fn from(args: SetSettingsArgs) -> Self {
        Self::builder()
            .maybe_hotel_name(args.hotel_name)
            .maybe_address(args.address)
            .maybe_phone(args.phone)
            .maybe_email(args.email)
            .maybe_facebook_url(args.facebook_url)
            .maybe_twitter_url(args.twitter_url)
            .maybe_instagram_url(args.instagram_url)
            .build()
    }
}

/// New image for a content slot: either a hosted URL or a local file to upload.
async fn resolve_image(
    api: &Api,
    url: Option<String>,
    upload: Option<PathBuf>,
) -> Result<Option<Image>> {
    match (url, upload) {
        (Some(url), _) => Ok(Some(Image { url })),
        (None, Some(path)) => Ok(Some(upload_image(api, &path).await?.into())),
        (None, None) => Ok(None),
    }
}

#[derive(Parser)]
struct SetHeroArgs {
    #[clap(long)]
    title: Option<String>,

    #[clap(long)]
    subtitle: Option<String>,

    #[clap(long)]
    button_text: Option<String>,

    #[clap(long)]
    button_link: Option<String>,

    #[clap(long, conflicts_with = "upload")]
    image_url: Option<String>,

    #[clap(long)]
    upload: Option<PathBuf>,
}

impl SetHeroArgs {
    async fn apply(self, api: &Api, hero: &mut HeroContent) -> Result {
        for (field, value) in [
            (&mut hero.hero_title, self.title),
            (&mut hero.hero_subtitle, self.subtitle),
            (&mut hero.hero_button_text, self.button_text),
            (&mut hero.hero_button_link, self.button_link),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(image) = resolve_image(api, self.image_url, self.upload).await? {
            hero.hero_image = Some(image);
        }
        Ok(())
    }
}

#[derive(Parser)]
struct SetAboutArgs {
    #[clap(long)]
    title: Option<String>,

    #[clap(long)]
    subtitle: Option<String>,

    #[clap(long)]
    paragraph_one: Option<String>,

    #[clap(long)]
    paragraph_two: Option<String>,

    #[clap(long, conflicts_with = "upload_one")]
    image_one_url: Option<String>,

    #[clap(long)]
    upload_one: Option<PathBuf>,

    #[clap(long, conflicts_with = "upload_two")]
    image_two_url: Option<String>,

    #[clap(long)]
    upload_two: Option<PathBuf>,
}

impl SetAboutArgs {
    async fn apply(self, api: &Api, about: &mut AboutContent) -> Result {
        for (field, value) in [
            (&mut about.about_title, self.title),
            (&mut about.about_subtitle, self.subtitle),
            (&mut about.about_paragraph_one, self.paragraph_one),
            (&mut about.about_paragraph_two, self.paragraph_two),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(image) = resolve_image(api, self.image_one_url, self.upload_one).await? {
            about.about_image_one = Some(image);
        }
        if let Some(image) = resolve_image(api, self.image_two_url, self.upload_two).await? {
            about.about_image_two = Some(image);
        }
        Ok(())
    }
}

fn image_url(image: Option<&Image>) -> String {
    image.map(|image| image.url.clone()).unwrap_or_default()
}

fn build_settings_table(settings: &SiteSettings) -> comfy_table::Table {
    build_fields_table([
        ("Hotel", settings.hotel_name.clone()),
        ("Address", settings.address.clone()),
        ("Phone", settings.phone.clone()),
        ("E-mail", settings.email.clone()),
        ("Facebook", settings.facebook_url.clone()),
        ("Twitter", settings.twitter_url.clone()),
        ("Instagram", settings.instagram_url.clone()),
    ])
}

fn build_hero_table(hero: &HeroContent) -> comfy_table::Table {
    build_fields_table([
        ("Title", hero.hero_title.clone()),
        ("Subtitle", hero.hero_subtitle.clone()),
        ("Button", hero.hero_button_text.clone()),
        ("Link", hero.hero_button_link.clone()),
        ("Image", image_url(hero.hero_image.as_ref())),
    ])
}

fn build_about_table(about: &AboutContent) -> comfy_table::Table {
    build_fields_table([
        ("Title", about.about_title.clone()),
        ("Subtitle", about.about_subtitle.clone()),
        ("Paragraph 1", about.about_paragraph_one.clone()),
        ("Paragraph 2", about.about_paragraph_two.clone()),
        ("Image 1", image_url(about.about_image_one.as_ref())),
        ("Image 2", image_url(about.about_image_two.as_ref())),
    ])
}
