use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use itertools::Itertools;

use crate::{
    api::{Api, Image, Room, RoomDraft, SearchCriteria, UploadedImage},
    cli::{ConnectionArgs, ensure_admin, fetch, today},
    core::{
        availability::DisabledDates,
        catalog::{PriceOrder, RoomFilter},
        selection::DateRangeSelection,
        stay::Stay,
    },
    prelude::*,
    quantity::Money,
    tables::{
        build_availability_table,
        build_calendar_table,
        build_fields_table,
        build_rooms_table,
        build_stay_table,
    },
};

#[derive(Parser)]
pub struct RoomArgs {
    #[command(subcommand)]
    command: RoomCommand,
}

#[derive(Subcommand)]
enum RoomCommand {
    /// List the room catalog.
    List(ListArgs),

    /// Show a room with its availability calendar and an optional stay quote.
    Show(ShowArgs),

    /// Find rooms available for the dates.
    Search(SearchArgs),

    /// Add a room to the catalog.
    Create(CreateArgs),

    /// Change a room, only the given fields are replaced.
    Update(UpdateArgs),

    /// Remove a room from the catalog.
    Delete { id: String },
}

impl RoomArgs {
    pub async fn run(self, connection: &ConnectionArgs) -> Result {
        let session = connection.session();
        let api = connection.api(&session)?;
        match self.command {
            RoomCommand::List(args) => args.run(&api).await,
            RoomCommand::Show(args) => args.run(&api).await,
            RoomCommand::Search(args) => args.run(&api).await,
            RoomCommand::Create(args) => {
                ensure_admin(&session)?;
                args.run(&api).await
            }
            RoomCommand::Update(args) => {
                ensure_admin(&session)?;
                args.run(&api).await
            }
            RoomCommand::Delete { id } => {
                ensure_admin(&session)?;
                let api = &api;
                let id = id.as_str();
                let acknowledgement = fetch(move |()| api.delete_room(id)).await?;
                info!(response = ?acknowledgement.message, "deleted");
                Ok(())
            }
        }
    }
}

#[derive(Parser)]
struct ListArgs {
    /// Only rooms of this type.
    #[clap(long = "type")]
    kind: Option<String>,

    /// Only rooms whose name contains this.
    #[clap(long)]
    search: Option<String>,

    /// Order by price instead of by name.
    #[clap(long)]
    sort: Option<PriceOrder>,
}

impl ListArgs {
    async fn run(self, api: &Api) -> Result {
        let rooms = fetch(move |()| api.list_rooms()).await?;
        let filter = RoomFilter { kind: self.kind, search: self.search };
        let mut rooms: Vec<Room> = rooms.into_iter().filter(|room| filter.matches(room)).collect();
        match self.sort {
            Some(order) => order.sort(&mut rooms, |room| room),
            None => rooms.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name)),
        }
        println!("{}", build_rooms_table(&rooms));
        Ok(())
    }
}

#[derive(Parser)]
struct ShowArgs {
    id: String,

    /// Any day of the month to show, defaults to the first picked day or today.
    #[clap(long)]
    month: Option<NaiveDate>,

    /// Calendar picks in order: the first one starts the range, the second one completes it.
    #[clap(long = "pick")]
    picks: Vec<NaiveDate>,
}

impl ShowArgs {
    async fn run(self, api: &Api) -> Result {
        let id = self.id.as_str();
        let room = fetch(move |()| api.get_room(id)).await?;
        let bookings = fetch(move |()| api.bookings_for_room(id)).await?;

        let today = today();
        let disabled = DisabledDates::compute(bookings, today);
        let mut selection = DateRangeSelection::default();
        for date in self.picks {
            if !selection.pick(date, &disabled) {
                warn!(%date, "the day is not available, ignoring the pick");
            }
        }

        println!(
            "{}",
            build_fields_table([
                ("Name", room.name.clone()),
                ("Type", room.kind.clone()),
                ("Per night", room.price_per_night.to_string()),
                ("Guests", room.max_guests.to_string()),
                ("Units", room.room_count.to_string()),
                ("Description", room.description.clone()),
                ("Amenities", room.amenities.join(", ")),
                ("Images", room.images.iter().map(|image| &image.url).join("\n")),
            ])
        );

        let month = self.month.or(selection.from).unwrap_or(today);
        println!("{}", month.format("%B %Y"));
        println!("{}", build_calendar_table(month, today, &disabled, selection));

        if selection.is_complete() {
            match selection.validate(&disabled) {
                Ok((from, to)) => {
                    let stay = Stay::compute(selection, room.price_per_night);
                    println!("{}", build_stay_table(from, to, room.price_per_night, stay));
                }
                Err(error) => {
                    warn!("the selection cannot be booked: {error}");
                }
            }
        }
        Ok(())
    }
}

#[derive(Parser)]
struct SearchArgs {
    #[clap(long)]
    check_in: Option<NaiveDate>,

    #[clap(long)]
    check_out: Option<NaiveDate>,

    #[clap(long, default_value = "1")]
    guests: u32,

    #[clap(long)]
    sort: Option<PriceOrder>,
}

impl SearchArgs {
    async fn run(self, api: &Api) -> Result {
        let criteria = &SearchCriteria::new(self.check_in, self.check_out, self.guests)?;
        let mut rooms = fetch(move |()| api.check_availability(criteria)).await?;
        if let Some(order) = self.sort {
            order.sort(&mut rooms, |available| &available.room);
        }
        println!("{}", build_availability_table(&rooms));
        Ok(())
    }
}

/// Image sources for a room: already hosted URLs and local files to upload.
#[derive(Parser)]
struct ImageArgs {
    /// Hosted image URL to attach.
    #[clap(long = "image-url")]
    urls: Vec<String>,

    /// Local image file to upload and attach.
    #[clap(long = "upload")]
    uploads: Vec<PathBuf>,
}

impl ImageArgs {
    async fn collect(self, api: &Api) -> Result<Vec<Image>> {
        let mut images: Vec<Image> = self.urls.into_iter().map(|url| Image { url }).collect();
        for path in self.uploads {
            images.push(upload_image(api, &path).await?.into());
        }
        Ok(images)
    }
}

pub async fn upload_image(api: &Api, path: &Path) -> Result<UploadedImage> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("`{}` is not a file", path.display()))?;
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    fetch(move |()| api.upload_image(file_name, contents.clone())).await
}

#[derive(Parser)]
struct CreateArgs {
    #[clap(long)]
    name: String,

    #[clap(long = "type")]
    kind: String,

    #[clap(long)]
    price_per_night: Money,

    #[clap(long)]
    max_guests: u32,

    /// Number of identical units.
    #[clap(long, default_value = "1")]
    room_count: u32,

    #[clap(long, default_value = "")]
    description: String,

    #[clap(long = "amenity")]
    amenities: Vec<String>,

    #[clap(flatten)]
    images: ImageArgs,
}

impl CreateArgs {
    async fn run(self, api: &Api) -> Result {
        let draft = &RoomDraft::builder()
            .name(self.name)
            .kind(self.kind)
            .price_per_night(self.price_per_night)
            .max_guests(self.max_guests)
            .room_count(self.room_count)
            .description(self.description)
            .amenities(self.amenities)
            .images(self.images.collect(api).await?)
            .build();
        let room = fetch(move |()| api.create_room(draft)).await?;
        println!("{}", build_rooms_table(&[room]));
        Ok(())
    }
}

#[derive(Parser)]
struct UpdateArgs {
    id: String,

    #[clap(long)]
    name: Option<String>,

    #[clap(long = "type")]
    kind: Option<String>,

    #[clap(long)]
    price_per_night: Option<Money>,

    #[clap(long)]
    max_guests: Option<u32>,

    #[clap(long)]
    room_count: Option<u32>,

    #[clap(long)]
    description: Option<String>,

    /// Replace the amenities.
    #[clap(long = "amenity")]
    amenities: Option<Vec<String>>,

    #[clap(flatten)]
    images: ImageArgs,

    /// Delete the hosted image and detach it from the room.
    #[clap(long = "remove-image")]
    remove_images: Vec<String>,
}

impl UpdateArgs {
    async fn run(self, api: &Api) -> Result {
        let id = self.id.as_str();
        let mut draft = RoomDraft::from(fetch(move |()| api.get_room(id)).await?);
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(kind) = self.kind {
            draft.kind = kind;
        }
        if let Some(price_per_night) = self.price_per_night {
            draft.price_per_night = price_per_night;
        }
        if let Some(max_guests) = self.max_guests {
            draft.max_guests = max_guests;
        }
        if let Some(room_count) = self.room_count {
            draft.room_count = room_count;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(amenities) = self.amenities {
            draft.amenities = amenities;
        }
        for url in &self.remove_images {
            let url = url.as_str();
            fetch(move |()| api.delete_image(url)).await?;
            draft.images.retain(|image| image.url != url);
        }
        draft.images.extend(self.images.collect(api).await?);

        let draft = &draft;
        let room = fetch(move |()| api.update_room(id, draft)).await?;
        println!("{}", build_rooms_table(&[room]));
        Ok(())
    }
}
