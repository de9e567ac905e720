use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

pub const QUERY_FETCH_TOTAL: &str = "postdash_query_fetch_total";
pub const QUERY_CACHE_HIT_TOTAL: &str = "postdash_query_cache_hit_total";
pub const QUERY_SUPERSEDED_TOTAL: &str = "postdash_query_superseded_total";
pub const MUTATION_TOTAL: &str = "postdash_mutation_total";
pub const MUTATION_FAILURE_TOTAL: &str = "postdash_mutation_failure_total";

/// Install a global tracing subscriber using the provided logging settings.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            QUERY_FETCH_TOTAL,
            Unit::Count,
            "Total number of query fetches that reached the network."
        );
        describe_counter!(
            QUERY_CACHE_HIT_TOTAL,
            Unit::Count,
            "Total number of queries answered from a fresh cache entry."
        );
        describe_counter!(
            QUERY_SUPERSEDED_TOTAL,
            Unit::Count,
            "Total number of list responses discarded because a newer request was issued."
        );
        describe_counter!(
            MUTATION_TOTAL,
            Unit::Count,
            "Total number of mutations submitted."
        );
        describe_counter!(
            MUTATION_FAILURE_TOTAL,
            Unit::Count,
            "Total number of mutations that failed validation or the request."
        );
    });
}
