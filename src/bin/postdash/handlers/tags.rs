#![deny(clippy::all, clippy::pedantic)]

use std::fmt::Write as _;

use crate::args::TagsCmd;
use crate::client::{CliError, Ctx};
use crate::print::emit;

pub async fn handle(ctx: &mut Ctx, cmd: TagsCmd) -> Result<(), CliError> {
    match cmd {
        TagsCmd::List => {
            let tags = ctx.dashboard.queries().tags().await?;
            let mut text = String::new();
            for tag in &tags {
                let _ = match &tag.name {
                    Some(name) => writeln!(text, "{} ({name})", tag.slug),
                    None => writeln!(text, "{}", tag.slug),
                };
            }
            emit(ctx, text, &tags)
        }
    }
}
