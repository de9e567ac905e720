use std::path::PathBuf;

use clap::{Args, builder::BoolishValueParser};

/// Global options shared by every `postdash` command; each one overrides the
/// matching file/environment setting.
#[derive(Debug, Args, Default, Clone)]
pub struct SettingsOverrides {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "POSTDASH_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    /// Override the API origin; requests go to `{origin}/api/...`.
    #[arg(
        long = "api-origin",
        env = "POSTDASH_API_ORIGIN",
        value_name = "URL",
        global = true
    )]
    pub api_origin: Option<String>,

    /// Override the request timeout.
    #[arg(long = "api-timeout-seconds", value_name = "SECONDS", global = true)]
    pub api_timeout_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Override the default list page size.
    #[arg(long = "page-size", value_name = "COUNT", global = true)]
    pub page_size: Option<u32>,
}
