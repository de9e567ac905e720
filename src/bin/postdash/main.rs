//! postdash: headless posts dashboard on the command line.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;

use clap::Parser;
use postdash::infra::telemetry;

use args::{Cli, Commands};
use client::{CliError, Ctx, load_settings};
use handlers::{comments, posts, tags, users};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    telemetry::init(&settings.logging)?;

    let mut ctx = Ctx::new(&settings, &cli.location, cli.json)?;

    match cli.command {
        Commands::Posts(cmd) => posts::handle(&mut ctx, cmd.action).await?,
        Commands::Comments(cmd) => comments::handle(&mut ctx, cmd.action).await?,
        Commands::Users(cmd) => users::handle(&mut ctx, cmd.action).await?,
        Commands::Tags(cmd) => tags::handle(&mut ctx, cmd.action).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
