//! Logging and optional `OpenTelemetry` trace export.
//!
//! [`Telemetry`] installs a `tracing` subscriber that writes to stderr, so
//! command results on stdout stay machine-readable. With the `telemetry`
//! feature, spans are additionally exported over OTLP when the standard
//! `OTEL_EXPORTER_OTLP_*` environment variables are present.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "telemetry")]
use std::env;

#[cfg(feature = "telemetry")]
use opentelemetry::trace::TracerProvider;
#[cfg(feature = "telemetry")]
use opentelemetry::{KeyValue, Value};
#[cfg(feature = "telemetry")]
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};
#[cfg(feature = "telemetry")]
use opentelemetry_semantic_conventions::{SCHEMA_URL, attribute::SERVICE_VERSION};
#[cfg(feature = "telemetry")]
use tracing_opentelemetry::OpenTelemetryLayer;

/// Resolve an env var with a programmatic fallback.
#[cfg(feature = "telemetry")]
fn resolve_env(env_key: &str, fallback: Option<&Value>) -> Option<Value> {
    env::var(env_key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(Value::from)
        .or_else(|| fallback.cloned())
}

/// Detects OTLP protocol from environment. Returns `None` if OTEL is not configured.
#[cfg(feature = "telemetry")]
fn detect_protocol() -> Option<OtlpProtocol> {
    let is_enabled = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok()
        || env::var("OTEL_EXPORTER_OTLP_HEADERS").is_ok()
        || env::var("OTEL_EXPORTER_OTLP_PROTOCOL").is_ok();
    is_enabled.then(|| {
        env::var("OTEL_EXPORTER_OTLP_PROTOCOL")
            .ok()
            .map_or(OtlpProtocol::Http, |s| match s.as_str() {
                "grpc" => OtlpProtocol::Grpc,
                _ => OtlpProtocol::Http,
            })
    })
}

/// Supported OTLP transport protocols.
#[cfg(feature = "telemetry")]
#[derive(Debug, Clone, Copy)]
enum OtlpProtocol {
    Http,
    Grpc,
}

/// Subscriber configuration.
///
/// Service identity can be overridden with `OTEL_SERVICE_NAME` and
/// `OTEL_SERVICE_VERSION`.
#[derive(Debug, Default)]
pub struct Telemetry {
    #[cfg(feature = "telemetry")]
    name: Option<Value>,
    #[cfg(feature = "telemetry")]
    version: Option<Value>,
    log_level: Option<String>,
}

impl Telemetry {
    /// Creates a new, empty [`Telemetry`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service name.
    #[must_use]
    #[cfg_attr(not(feature = "telemetry"), allow(unused_variables, unused_mut))]
    pub fn with_name(mut self, name: &'static str) -> Self {
        #[cfg(feature = "telemetry")]
        {
            self.name = Some(name.into());
        }
        self
    }

    /// Sets the service version.
    #[must_use]
    #[cfg_attr(not(feature = "telemetry"), allow(unused_variables, unused_mut))]
    pub fn with_version(mut self, version: &'static str) -> Self {
        #[cfg(feature = "telemetry")]
        {
            self.version = Some(version.into());
        }
        self
    }

    /// Sets the log level filter used when `RUST_LOG` is not set.
    ///
    /// Accepts any valid [`EnvFilter`] directive string (e.g. `"debug"`,
    /// `"binder=debug,alloy_transport=trace"`).
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Builds an `OpenTelemetry` [`Resource`] from the resolved service identity.
    #[cfg(feature = "telemetry")]
    fn resource(&self) -> Resource {
        let name = resolve_env("OTEL_SERVICE_NAME", self.name.as_ref());
        let version = resolve_env("OTEL_SERVICE_VERSION", self.version.as_ref());

        let mut builder = Resource::builder();
        if let Some(name) = name {
            builder = builder.with_service_name(name);
        }
        if let Some(version) = version {
            builder = builder.with_schema_url([KeyValue::new(SERVICE_VERSION, version)], SCHEMA_URL);
        }
        builder.build()
    }

    /// Initializes the tracer provider.
    #[cfg(feature = "telemetry")]
    fn init_tracer(&self, protocol: OtlpProtocol) -> Option<SdkTracerProvider> {
        let exporter = match protocol {
            OtlpProtocol::Http => opentelemetry_otlp::SpanExporter::builder()
                .with_http()
                .build(),
            OtlpProtocol::Grpc => opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .build(),
        };
        let exporter = exporter.ok()?;

        Some(
            SdkTracerProvider::builder()
                .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
                    1.0,
                ))))
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(self.resource())
                .with_batch_exporter(exporter)
                .build(),
        )
    }

    /// Installs the global subscriber.
    ///
    /// Returns [`TelemetryGuard`] that flushes exporters on drop.
    pub fn register(self) -> TelemetryGuard {
        let fallback = self.log_level.as_deref().unwrap_or("info");
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into());
        let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

        #[cfg(feature = "telemetry")]
        {
            let protocol = detect_protocol();
            let tracer_provider = protocol.and_then(|p| self.init_tracer(p));
            let otel_layer = tracer_provider
                .as_ref()
                .map(|tp| OpenTelemetryLayer::new(tp.tracer("binder")));

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .with(otel_layer)
                .init();

            if tracer_provider.is_some() {
                tracing::debug!("OpenTelemetry exporter registered");
            }

            TelemetryGuard { tracer_provider }
        }

        #[cfg(not(feature = "telemetry"))]
        {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .init();
            TelemetryGuard {}
        }
    }
}

/// Owns the tracer provider; performs graceful shutdown on drop.
#[derive(Debug)]
pub struct TelemetryGuard {
    #[cfg(feature = "telemetry")]
    tracer_provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        #[cfg(feature = "telemetry")]
        if let Some(ref tp) = self.tracer_provider
            && let Err(err) = tp.shutdown()
        {
            tracing::error!(?err, "tracer provider shutdown error");
        }
    }
}
