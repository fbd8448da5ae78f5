use clap::{Parser, Subcommand};

use crate::{
    cli::{ConnectionArgs, fetch},
    prelude::*,
    tables::build_fields_table,
};

#[derive(Parser)]
pub struct AuthArgs {
    #[command(subcommand)]
    command: AuthCommand,
}

#[derive(Subcommand)]
enum AuthCommand {
    /// Create an account and log in with it.
    Register {
        #[clap(long)]
        name: String,

        #[clap(long)]
        email: String,

        #[clap(long, env = "INNKEEPER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    Login {
        #[clap(long)]
        email: String,

        #[clap(long, env = "INNKEEPER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Complete an external login with the token from its redirect.
    Token { token: String },

    Logout,

    /// Show the logged-in user.
    Whoami,
}

impl AuthArgs {
    pub async fn run(self, connection: &ConnectionArgs) -> Result {
        let mut session = connection.session();
        match self.command {
            AuthCommand::Register { name, email, password } => {
                let api = &connection.api(&session)?;
                let (name, email, password) = (&name, &email, &password);
                let response = fetch(move |()| api.register(name, email, password)).await?;
                session.login(response)?;
            }
            AuthCommand::Login { email, password } => {
                let api = &connection.api(&session)?;
                let (email, password) = (&email, &password);
                let response = fetch(move |()| api.login(email, password)).await?;
                session.login(response)?;
            }
            AuthCommand::Token { token } => {
                session.login_with_token(&token)?;
            }
            AuthCommand::Logout => {
                session.logout()?;
                return Ok(());
            }
            AuthCommand::Whoami => {}
        }

        let user = session.user().context("not logged in")?;
        println!(
            "{}",
            build_fields_table([
                ("ID", user.id.clone()),
                ("Name", user.name.clone()),
                ("E-mail", user.email.clone()),
                ("Role", user.role.to_string()),
            ])
        );
        Ok(())
    }
}
