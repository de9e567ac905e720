#![deny(clippy::all, clippy::pedantic)]

use postdash::config::{self, LoadError, Settings};
use postdash::dashboard::Dashboard;
use postdash::infra::error::InfraError;
use postdash::mutations::MutationError;
use postdash::queries::QueryError;
use thiserror::Error;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Mutation(#[from] MutationError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

pub struct Ctx {
    pub dashboard: Dashboard,
    pub json: bool,
}

impl Ctx {
    pub fn new(settings: &Settings, location: &str, json: bool) -> Result<Self, CliError> {
        Ok(Self {
            dashboard: Dashboard::connect(settings, location)?,
            json,
        })
    }
}

pub fn load_settings(cli: &Cli) -> Result<Settings, CliError> {
    Ok(config::load(&cli.settings)?)
}
