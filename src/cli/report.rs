use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::{
    api::Api,
    cli::{ConnectionArgs, ensure_admin, fetch, today},
    core::{bookings::Dashboard, report::ReportPreset},
    prelude::*,
    tables::{build_bookings_table, build_dashboard_table, build_report_table},
};

#[derive(Parser)]
pub struct ReportArgs {
    #[command(subcommand)]
    command: ReportCommand,
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Revenue and occupancy over a period.
    Summary(SummaryArgs),

    /// Today's arrivals, departures, and the latest bookings.
    Dashboard,
}

impl ReportArgs {
    pub async fn run(self, connection: &ConnectionArgs) -> Result {
        let session = connection.session();
        ensure_admin(&session)?;
        let api = &connection.api(&session)?;
        match self.command {
            ReportCommand::Summary(args) => args.run(api).await,
            ReportCommand::Dashboard => dashboard(api).await,
        }
    }
}

#[derive(Parser)]
struct SummaryArgs {
    #[clap(long, conflicts_with_all = ["from", "to"])]
    preset: Option<ReportPreset>,

    #[clap(long, requires = "to")]
    from: Option<NaiveDate>,

    #[clap(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Also list the bookings in the period.
    #[clap(long)]
    details: bool,
}

impl SummaryArgs {
    async fn run(self, api: &Api) -> Result {
        let (start, end) = match (self.preset, self.from, self.to) {
            (Some(preset), _, _) => preset.period(today()),
            (None, Some(from), Some(to)) => (from, to),
            _ => bail!("please pick a preset or both dates"),
        };
        let report = fetch(move |()| api.summary_report(start, end)).await?;
        println!("{} – {}", report.report_period.from, report.report_period.to);
        println!("{}", build_report_table(&report));
        if self.details {
            println!("{}", build_bookings_table(&report.bookings.iter().collect::<Vec<_>>()));
        }
        Ok(())
    }
}

async fn dashboard(api: &Api) -> Result {
    let (bookings, rooms) = tokio::try_join!(
        fetch(move |()| api.all_bookings()),
        fetch(move |()| api.list_rooms()),
    )?;
    let dashboard = Dashboard::compute(&bookings, today());
    println!("{}", build_dashboard_table(&dashboard, rooms.len()));
    println!("{}", build_bookings_table(&dashboard.recent));
    Ok(())
}
