use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::{
    api::{Api, NewBooking, PaymentInfo},
    cli::{ConnectionArgs, ensure_admin, fetch, today},
    core::{
        availability::DisabledDates,
        bookings::BookingFilter,
        selection::DateRangeSelection,
        stay::Stay,
        status::BookingStatus,
    },
    prelude::*,
    store::session::SessionStore,
    tables::{build_bookings_table, build_stay_table},
};

#[derive(Parser)]
pub struct BookingArgs {
    #[command(subcommand)]
    command: BookingCommand,
}

#[derive(Subcommand)]
enum BookingCommand {
    /// Book a room for the dates.
    Create(CreateArgs),

    /// List own bookings.
    Mine,

    /// List all bookings.
    List(ListArgs),

    /// Move a booking to the next status.
    Status {
        id: String,

        #[clap(value_enum)]
        status: BookingStatus,
    },

    /// Download the receipt of a paid booking.
    Receipt {
        id: String,

        /// Defaults to `receipt-<id>.pdf`.
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
}

impl BookingArgs {
    pub async fn run(self, connection: &ConnectionArgs) -> Result {
        let session = connection.session();
        ensure!(session.is_authenticated(), "please log in first");
        let api = &connection.api(&session)?;

        match self.command {
            BookingCommand::Create(args) => args.run(api, &session).await,
            BookingCommand::Mine => {
                let bookings = fetch(move |()| api.my_bookings()).await?;
                println!("{}", build_bookings_table(&bookings.iter().collect::<Vec<_>>()));
                Ok(())
            }
            BookingCommand::List(args) => {
                ensure_admin(&session)?;
                args.run(api).await
            }
            BookingCommand::Status { id, status } => {
                ensure_admin(&session)?;
                update_status(api, &id, status).await
            }
            BookingCommand::Receipt { id, output } => {
                let output = output.unwrap_or_else(|| PathBuf::from(format!("receipt-{id}.pdf")));
                let id = id.as_str();
                let bookings = fetch(move |()| api.my_bookings()).await?;
                let booking = bookings
                    .iter()
                    .find(|booking| booking.id == id)
                    .with_context(|| format!("booking `{id}` is not found"))?;
                ensure!(
                    booking.status.is_paid(),
                    "booking `{id}` is `{}`, receipts are only issued for paid bookings",
                    booking.status,
                );
                let receipt = fetch(move |()| api.booking_receipt(id)).await?;
                tokio::fs::write(&output, &receipt.0)
                    .await
                    .with_context(|| format!("failed to write `{}`", output.display()))?;
                info!(path = %output.display(), "saved");
                Ok(())
            }
        }
    }
}

#[derive(Parser)]
struct CreateArgs {
    room_id: String,

    #[clap(long)]
    check_in: Option<NaiveDate>,

    #[clap(long)]
    check_out: Option<NaiveDate>,

    #[clap(flatten)]
    payment: PaymentArgs,
}

/// The only payment intent status a booking is made for.
const PAYMENT_SUCCEEDED: &str = "succeeded";

/// Outcome of the payment as confirmed by the payment provider.
#[derive(Parser)]
struct PaymentArgs {
    /// Confirmed payment intent ID.
    #[clap(long, requires = "payment_status")]
    payment_id: Option<String>,

    /// Status the provider reported for the payment intent.
    #[clap(long, requires = "payment_id")]
    payment_status: Option<String>,
}

impl PaymentArgs {
    /// Payment to attach to the booking, `None` until the provider has confirmed one.
    fn confirmed(self) -> Result<Option<PaymentInfo>> {
        let (Some(id), Some(status)) = (self.payment_id, self.payment_status) else {
            return Ok(None);
        };
        ensure!(
            status == PAYMENT_SUCCEEDED,
            "payment `{id}` is `{status}`, only a `{}` payment can be booked",
            PAYMENT_SUCCEEDED,
        );
        Ok(Some(PaymentInfo::stripe(id, status)))
    }
}

impl CreateArgs {
    #[instrument(skip_all, fields(room_id = %self.room_id))]
    async fn run(self, api: &Api, session: &SessionStore) -> Result {
        let user = session.user().context("please log in first")?;
        let room_id = self.room_id.as_str();
        let payment = self.payment.confirmed()?;

        let room = fetch(move |()| api.get_room(room_id)).await?;
        let bookings = fetch(move |()| api.bookings_for_room(room_id)).await?;
        let disabled = DisabledDates::compute(bookings, today());
        let selection = DateRangeSelection::new(self.check_in, self.check_out);
        let (from, to) = selection.validate(&disabled)?;
        let stay = Stay::compute(selection, room.price_per_night);
        println!("{}", build_stay_table(from, to, room.price_per_night, stay));

        let Some(payment) = payment else {
            ensure!(stay.total_price.is_positive(), "there is nothing to pay for this stay");
            let amount = stay.total_price;
            let intent = fetch(move |()| api.create_payment_intent(amount)).await?;
            info!(intent_id = intent.id(), "payment intent created");
            println!(
                "Confirm the payment with the provider, then book again with \
                 `--payment-id {} --payment-status {}`.",
                intent.id(),
                PAYMENT_SUCCEEDED,
            );
            return Ok(());
        };

        let booking = &NewBooking::builder()
            .room(room_id)
            .user(user.id.as_str())
            .check_in_date(from)
            .check_out_date(to)
            .total_price(stay.total_price)
            .payment_info(payment)
            .build();
        let booking = fetch(move |()| api.create_booking(booking)).await?;
        println!("{}", build_bookings_table(&[&booking]));
        Ok(())
    }
}

#[derive(Parser)]
struct ListArgs {
    #[clap(long, value_enum)]
    status: Option<BookingStatus>,

    /// Guest name or e-mail fragment.
    #[clap(long)]
    search: Option<String>,
}

impl ListArgs {
    async fn run(self, api: &Api) -> Result {
        let bookings = fetch(move |()| api.all_bookings()).await?;
        let filter = BookingFilter { status: self.status, search: self.search };
        println!("{}", build_bookings_table(&filter.apply(&bookings)));
        Ok(())
    }
}

#[instrument(skip_all, fields(id = id, status = %status))]
async fn update_status(api: &Api, id: &str, status: BookingStatus) -> Result {
    let bookings = fetch(move |()| api.all_bookings()).await?;
    let booking = bookings
        .iter()
        .find(|booking| booking.id == id)
        .with_context(|| format!("booking `{id}` is not found"))?;
    booking.status.ensure_transition(status)?;

    let booking = fetch(move |()| api.update_booking_status(id, status)).await?;
    println!("{}", build_bookings_table(&[&booking]));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_waits_for_confirmed_payment() -> Result {
        let args = CreateArgs::try_parse_from([
            "create",
            "r1",
            "--check-in",
            "2025-03-01",
            "--check-out",
            "2025-03-04",
        ])?;
        assert_eq!(args.payment.confirmed()?, None);
        Ok(())
    }

    #[test]
    fn test_confirmed_payment_is_attached() -> Result {
        let args = CreateArgs::try_parse_from([
            "create",
            "r1",
            "--payment-id",
            "pi_3PqR",
            "--payment-status",
            "succeeded",
        ])?;
        assert_eq!(
            args.payment.confirmed()?,
            Some(PaymentInfo::stripe("pi_3PqR", "succeeded")),
        );
        Ok(())
    }

    #[test]
    fn test_payment_id_requires_status() {
        assert!(CreateArgs::try_parse_from(["create", "r1", "--payment-id", "pi_3PqR"]).is_err());
        assert!(
            CreateArgs::try_parse_from(["create", "r1", "--payment-status", "succeeded"]).is_err()
        );
    }

    #[test]
    fn test_unsuccessful_payment_is_refused() -> Result {
        let args = CreateArgs::try_parse_from([
            "create",
            "r1",
            "--payment-id",
            "pi_3PqR",
            "--payment-status",
            "requires_payment_method",
        ])?;
        assert!(args.payment.confirmed().is_err());
        Ok(())
    }
}
