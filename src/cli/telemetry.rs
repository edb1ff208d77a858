//! Log output and optional OTLP span export.
//!
//! Logs are written to stderr so `usersearch search` keeps stdout for the
//! JSON page. Spans are exported over gRPC only when
//! `OTEL_EXPORTER_OTLP_ENDPOINT` is set; the exporter also honours
//! `OTEL_EXPORTER_OTLP_HEADERS`.

use crate::GIT_COMMIT_HASH;
use anyhow::Result;
use once_cell::sync::OnceCell;
use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::{
    propagation::TraceContextPropagator,
    trace::{SdkTracerProvider, Tracer},
    Resource,
};
use std::{env::var, io, time::Duration};
use tonic::transport::ClientTlsConfig;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};
use ulid::Ulid;

static TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::new();

const EXPORT_TIMEOUT: Duration = Duration::from_secs(3);

fn otlp_endpoint() -> Option<String> {
    var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .ok()
        .map(|endpoint| endpoint.trim().to_string())
        .filter(|endpoint| !endpoint.is_empty())
}

/// Identifies this process in exported spans. `command` is the subcommand
/// being run, so server and client spans can be told apart.
fn resource(command: &str) -> Resource {
    let instance_id = var("OTEL_SERVICE_INSTANCE_ID").unwrap_or_else(|_| Ulid::new().to_string());

    Resource::builder_empty()
        .with_attributes([
            KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("service.instance.id", instance_id),
            KeyValue::new("vcs.revision", GIT_COMMIT_HASH),
            KeyValue::new("usersearch.command", command.to_string()),
        ])
        .build()
}

fn filter(level: Level) -> Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("hyper_util=error".parse()?)
        .add_directive("tokio=error".parse()?)
        .add_directive("opentelemetry_sdk=warn".parse()?))
}

fn init_tracer(endpoint: &str, command: &str) -> Result<Tracer> {
    let mut builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .with_timeout(EXPORT_TIMEOUT);

    if endpoint.starts_with("https://") {
        builder = builder.with_tls_config(ClientTlsConfig::new().with_native_roots());
    }

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(builder.build()?)
        .with_resource(resource(command))
        .build();

    let _ = TRACER_PROVIDER.set(provider.clone());

    global::set_tracer_provider(provider.clone());
    global::set_text_map_propagator(TraceContextPropagator::new());

    Ok(provider.tracer(env!("CARGO_PKG_NAME")))
}

/// Install the global subscriber for `command`.
///
/// # Errors
///
/// Returns an error if the exporter cannot be built or a subscriber is
/// already installed.
pub fn init(verbosity_level: Option<Level>, command: &str) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    let filter = filter(verbosity_level.unwrap_or(Level::ERROR))?;

    if let Some(endpoint) = otlp_endpoint() {
        let tracer = init_tracer(&endpoint, command)?;
        let subscriber = Registry::default()
            .with(fmt_layer)
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .with(filter);
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = Registry::default().with(fmt_layer).with(filter);
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

/// Flush pending spans. Does nothing when export was never enabled.
pub fn shutdown_tracer() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        debug!("shutting down tracer provider");
        let _ = provider.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::Key;

    fn attribute(resource: &Resource, key: &'static str) -> Option<String> {
        resource
            .get(&Key::from_static_str(key))
            .map(|value| value.to_string())
    }

    #[test]
    fn test_otlp_endpoint() {
        temp_env::with_var("OTEL_EXPORTER_OTLP_ENDPOINT", None::<&str>, || {
            assert_eq!(otlp_endpoint(), None);
        });
        temp_env::with_var("OTEL_EXPORTER_OTLP_ENDPOINT", Some("  "), || {
            assert_eq!(otlp_endpoint(), None);
        });
        temp_env::with_var(
            "OTEL_EXPORTER_OTLP_ENDPOINT",
            Some(" http://collector:4317 "),
            || {
                assert_eq!(otlp_endpoint().as_deref(), Some("http://collector:4317"));
            },
        );
    }

    #[test]
    fn test_resource_identifies_command() {
        temp_env::with_var("OTEL_SERVICE_INSTANCE_ID", Some("search-7"), || {
            let resource = resource("search");

            assert_eq!(
                attribute(&resource, "service.name").as_deref(),
                Some("usersearch")
            );
            assert_eq!(
                attribute(&resource, "service.version").as_deref(),
                Some(env!("CARGO_PKG_VERSION"))
            );
            assert_eq!(
                attribute(&resource, "service.instance.id").as_deref(),
                Some("search-7")
            );
            assert_eq!(
                attribute(&resource, "usersearch.command").as_deref(),
                Some("search")
            );
            assert_eq!(
                attribute(&resource, "vcs.revision").as_deref(),
                Some(GIT_COMMIT_HASH)
            );
        });
    }

    #[test]
    fn test_resource_generates_instance_id() {
        temp_env::with_var("OTEL_SERVICE_INSTANCE_ID", None::<&str>, || {
            let id = attribute(&resource("server"), "service.instance.id");
            assert!(id.is_some_and(|id| Ulid::from_string(&id).is_ok()));
        });
    }

    #[test]
    fn test_filter_builds_for_every_level() {
        temp_env::with_var("RUST_LOG", None::<&str>, || {
            for level in [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE] {
                let filter = filter(level);
                assert!(filter.is_ok(), "{level}: {filter:?}");
            }
        });
    }

    #[test]
    fn test_shutdown_tracer_without_export() {
        shutdown_tracer();
    }
}
