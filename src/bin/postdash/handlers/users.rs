#![deny(clippy::all, clippy::pedantic)]

use crate::args::UsersCmd;
use crate::client::{CliError, Ctx};
use crate::print::emit;

pub async fn handle(ctx: &mut Ctx, cmd: UsersCmd) -> Result<(), CliError> {
    match cmd {
        UsersCmd::Show { id } => {
            let view = ctx.dashboard.user_detail(id).await?;
            let user = ctx.dashboard.queries().user_detail(id).await?;
            emit(ctx, view, &user)
        }
    }
}
