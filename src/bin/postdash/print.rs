#![deny(clippy::all, clippy::pedantic)]

use std::fmt::Display;

use serde::Serialize;

use crate::client::{CliError, Ctx};

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

/// Print `text` or, with `--json`, the serialized `value`.
pub fn emit<T: Serialize>(ctx: &Ctx, text: impl Display, value: &T) -> Result<(), CliError> {
    if ctx.json {
        print_json(value)
    } else {
        print!("{text}");
        Ok(())
    }
}
