mod auth;
mod booking;
mod contact;
mod content;
mod report;
mod room;

use std::{future::Future, path::PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use reqwest::Url;

use crate::{
    api::{Api, ApiError, Role},
    cli::{
        auth::AuthArgs,
        booking::BookingArgs,
        contact::ContactArgs,
        content::ContentArgs,
        report::ReportArgs,
        room::RoomArgs,
    },
    core::request::Request,
    notify::TerminalNotifier,
    prelude::*,
    store::{session::SessionStore, storage::LocalStorage},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub async fn run(self) -> Result {
        let connection = self.connection;
        match self.command {
            Command::Auth(args) => args.run(&connection).await,
            Command::Room(args) => args.run(&connection).await,
            Command::Booking(args) => args.run(&connection).await,
            Command::Report(args) => args.run(&connection).await,
            Command::Content(args) => args.run(&connection).await,
            Command::Contact(args) => args.run(&connection).await,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Register, log in, and log out.
    Auth(AuthArgs),

    /// Browse, search, and manage rooms.
    Room(RoomArgs),

    /// Book a room and manage bookings.
    Booking(BookingArgs),

    /// Business reports and the front desk dashboard.
    Report(ReportArgs),

    /// Site settings, hero banner, and about page.
    Content(ContentArgs),

    /// Send a message to the hotel.
    Contact(ContactArgs),
}

#[derive(Parser)]
pub struct ConnectionArgs {
    /// Backend API root, for example `http://localhost:8000/api`.
    #[clap(
        long,
        env = "INNKEEPER_API_BASE_URL",
        default_value = "http://localhost:8000/api",
        global = true
    )]
    pub api_base_url: Url,

    /// Directory where the session is kept between runs.
    #[clap(long, env = "INNKEEPER_STORAGE_DIR", default_value = ".innkeeper", global = true)]
    pub storage_dir: PathBuf,

    /// Backend request timeout.
    #[clap(long, env = "INNKEEPER_TIMEOUT", default_value = "15s", global = true)]
    pub timeout: humantime::Duration,
}

impl ConnectionArgs {
    pub fn session(&self) -> SessionStore {
        SessionStore::load(LocalStorage::new(self.storage_dir.clone()))
    }

    /// Backend client carrying the session token, if any.
    pub fn api(&self, session: &SessionStore) -> Result<Api> {
        Api::new(self.api_base_url.clone(), self.timeout.into(), session.token())
    }
}

/// Refuse admin commands locally for anyone but an administrator.
fn ensure_admin(session: &SessionStore) -> Result {
    ensure!(session.is_authenticated(), "please log in first");
    ensure!(session.role() == Some(&Role::Admin), "this command is for administrators only");
    Ok(())
}

/// Run a single backend call, notifying the user when it fails.
async fn fetch<T, F, Fut>(operation: F) -> Result<T>
where
    T: Clone,
    F: Fn(()) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let request = Request::new(operation, TerminalNotifier);
    let result = request.trigger(()).await;
    trace!(
        loading = request.is_loading(),
        has_data = request.has_data(),
        error = ?request.error(),
        "settled"
    );
    Ok(result?)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
