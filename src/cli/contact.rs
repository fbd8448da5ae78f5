use clap::Parser;

use crate::{
    api::ContactMessage,
    cli::{ConnectionArgs, fetch},
    prelude::*,
};

#[derive(Parser)]
pub struct ContactArgs {
    #[clap(long)]
    name: String,

    #[clap(long)]
    email: String,

    #[clap(long)]
    message: String,
}

impl ContactArgs {
    pub async fn run(self, connection: &ConnectionArgs) -> Result {
        ensure!(!self.message.trim().is_empty(), "the message is empty");
        let session = connection.session();
        let api = &connection.api(&session)?;
        let message =
            &ContactMessage { name: &self.name, email: &self.email, message: &self.message };
        let acknowledgement = fetch(move |()| api.send_message(message)).await?;
        println!("{}", acknowledgement.message.as_deref().unwrap_or("Message sent."));
        Ok(())
    }
}
