#![deny(clippy::all, clippy::pedantic)]

use postdash::mutations::MutationError;

use crate::client::CliError;

pub mod comments;
pub mod posts;
pub mod tags;
pub mod users;

/// Unwrap a dialog submission; `None` means the dialog was never open.
pub(crate) fn submitted<T>(result: Option<Result<T, MutationError>>) -> Result<T, CliError> {
    match result {
        Some(result) => Ok(result?),
        None => Err(CliError::InvalidInput("dialog is not open".into())),
    }
}
