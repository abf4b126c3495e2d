use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
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
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
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

/// Register descriptions for every metric the service emits.
pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "recipes_cache_hit_total",
            Unit::Count,
            "Recipe list reads answered from the cache."
        );
        describe_counter!(
            "recipes_cache_miss_total",
            Unit::Count,
            "Recipe list reads that found no cached entry."
        );
        describe_counter!(
            "recipes_cache_degraded_total",
            Unit::Count,
            "Cache operations that failed and were bypassed, labelled by op."
        );
        describe_counter!(
            "recipes_cache_invalidation_failed_total",
            Unit::Count,
            "Recipe list invalidations the cache rejected after a successful write."
        );
        describe_histogram!(
            "recipes_store_fetch_ms",
            Unit::Milliseconds,
            "Latency of full recipe list reads from the primary store."
        );
    });
}
