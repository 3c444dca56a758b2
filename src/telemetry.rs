use anyhow::Result;
use tracing::Level;

use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::{MetricExporter, Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{metrics::SdkMeterProvider, resource::Resource, trace::SdkTracerProvider};
use tracing_subscriber::{layer::SubscriberExt, Registry};

use crate::config::TelemetryConfig;
use crate::obs::tracingx::filter_from_env;

/// Providers OTLP ativos. `None` quando o export está desligado.
pub struct Telemetry {
    providers: Option<(SdkTracerProvider, SdkMeterProvider)>,
}

impl Telemetry {
    pub fn exporting(&self) -> bool {
        self.providers.is_some()
    }

    /// Faz flush e encerra os exporters.
    pub fn shutdown(self) -> Result<()> {
        if let Some((tracer_provider, meter_provider)) = self.providers {
            meter_provider.force_flush()?;
            tracer_provider.shutdown()?;
            meter_provider.shutdown()?;
        }
        Ok(())
    }
}

/// Instala o subscriber global (fmt + OpenTelemetry quando `cfg.export`).
/// Chamar uma vez por processo; segunda chamada falha no `set_global_default`.
pub fn init(cfg: &TelemetryConfig) -> Result<Telemetry> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter = filter_from_env(&cfg.log_filter);

    if !cfg.export {
        let subscriber = Registry::default().with(filter).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)?;
        return Ok(Telemetry { providers: None });
    }

    let resource = Resource::builder()
        .with_service_name(cfg.service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("git.commit.sha", cfg.commit_sha.clone()),
        ])
        .build();

    let base = cfg.otlp_endpoint.trim_end_matches('/');

    // ---- Traces (OTLP/HTTP) ----
    let span_exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(format!("{base}/v1/traces"))
        .build()?;
    let tracer_provider = SdkTracerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(span_exporter)
        .build();

    // ---- Métricas (OTLP/HTTP) ----
    let metric_exporter = MetricExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(format!("{base}/v1/metrics"))
        .build()?;
    let meter_provider = SdkMeterProvider::builder()
        .with_resource(resource)
        .with_periodic_exporter(metric_exporter)
        .build();

    // Globais: obs::wrap usa global::meter
    global::set_tracer_provider(tracer_provider.clone());
    global::set_meter_provider(meter_provider.clone());

    let tracer = tracer_provider.tracer(cfg.service_name.clone());
    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    let subscriber = Registry::default().with(filter).with(fmt_layer).with(otel_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(Telemetry { providers: Some((tracer_provider, meter_provider)) })
}

/// Span INFO com nome **estático** (exigência do tracing); o nome dinâmico vai em `span_name`.
pub fn make_info_span(name: &str, round: u32, component: &str, commit_sha: &str) -> tracing::Span {
    tracing::span!(
        target: "exchange",
        Level::INFO,
        "op",
        git_commit_sha = %commit_sha,
        span_name = %name,
        round = round,
        component = component
    )
}
