pub mod meter;

use std::error::Error;
use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::{ExporterBuildError, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::prelude::*;

//KNOWN ISSUES:
// - OpenTelemetry log appender doesn't contain trace-id and attributes from the span

#[derive(Debug, Clone, serde::Deserialize)]
pub struct MonitoringConfig {
    pub service_name: String,
    pub app_name: String,
    #[serde(default)]
    pub log_format: LogFormat,
    pub logs: EnvFilterConfig,
    pub traces: EnvFilterConfig,
    pub otlp: Option<OtlpConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct EnvFilterConfig {
    pub default_level: String,
    #[serde(default)]
    pub filters: Vec<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct OtlpConfig {
    pub url: Option<String>,
    #[serde(default = "default_metrics_interval_secs")]
    pub metrics_interval_secs: u64,
}

fn default_metrics_interval_secs() -> u64 {
    15
}

impl TryInto<EnvFilter> for EnvFilterConfig {
    type Error = tracing_subscriber::filter::ParseError;

    fn try_into(self) -> Result<EnvFilter, Self::Error> {
        EnvFilter::builder()
            .with_default_directive(self.default_level.parse()?)
            .parse(self.filters.join(","))
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

impl MonitoringConfig {
    pub fn init(&self) -> Result<(), Box<dyn Error>> {
        let mut layers: Vec<BoxedLayer> = vec![self.console_layer()?];

        if let Some(otlp) = &self.otlp {
            opentelemetry::global::set_text_map_propagator(TraceContextPropagator::default());
            let resource = self.resource();

            let logger_provider = init_logs(resource.clone(), otlp)?;
            let logs_filter: EnvFilter = self.logs.clone().try_into()?;
            layers.push(
                OpenTelemetryTracingBridge::new(&logger_provider)
                    .with_filter(logs_filter)
                    .boxed(),
            );

            let tracer = init_traces(resource.clone(), otlp)?.tracer(self.app_name.to_owned());
            let traces_filter: EnvFilter = self.traces.clone().try_into()?;
            layers.push(OpenTelemetryLayer::new(tracer).with_filter(traces_filter).boxed());

            opentelemetry::global::set_meter_provider(init_metrics(resource, otlp)?);
        }

        tracing_subscriber::registry().with(layers).try_init()?;

        tracing::info!(
            "Monitoring initialized for {} (otlp export {})",
            self.service_name,
            if self.otlp.is_some() { "enabled" } else { "disabled" }
        );

        Ok(())
    }

    fn console_layer(&self) -> Result<BoxedLayer, Box<dyn Error>> {
        let filter: EnvFilter = self.logs.clone().try_into()?;

        let layer = match self.log_format {
            LogFormat::Text => tracing_subscriber::fmt::layer().with_filter(filter).boxed(),
            LogFormat::Json => tracing_subscriber::fmt::layer().json().with_filter(filter).boxed(),
        };

        Ok(layer)
    }

    fn resource(&self) -> Resource {
        Resource::builder()
            .with_attribute(KeyValue::new("service.name", self.service_name.clone()))
            .with_attribute(KeyValue::new("app.name", self.app_name.clone()))
            .build()
    }
}

fn init_traces(resource: Resource, otlp: &OtlpConfig) -> Result<SdkTracerProvider, ExporterBuildError> {
    let builder = SdkTracerProvider::builder().with_resource(resource);

    let provider = match &otlp.url {
        Some(url) => {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(url)
                .build()?;
            builder.with_batch_exporter(exporter).build()
        }
        None => builder
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build(),
    };

    Ok(provider)
}

fn init_metrics(resource: Resource, otlp: &OtlpConfig) -> Result<SdkMeterProvider, ExporterBuildError> {
    let interval = Duration::from_secs(otlp.metrics_interval_secs);
    let builder = SdkMeterProvider::builder().with_resource(resource);

    //reader type depends on the exporter
    let provider = match &otlp.url {
        Some(url) => {
            let exporter = opentelemetry_otlp::MetricExporter::builder()
                .with_tonic()
                .with_endpoint(url)
                .build()?;
            builder
                .with_reader(PeriodicReader::builder(exporter).with_interval(interval).build())
                .build()
        }
        None => builder
            .with_reader(
                PeriodicReader::builder(opentelemetry_stdout::MetricExporter::default())
                    .with_interval(interval)
                    .build(),
            )
            .build(),
    };

    Ok(provider)
}

fn init_logs(resource: Resource, otlp: &OtlpConfig) -> Result<SdkLoggerProvider, ExporterBuildError> {
    let builder = SdkLoggerProvider::builder().with_resource(resource);

    let provider = match &otlp.url {
        Some(url) => {
            let exporter = opentelemetry_otlp::LogExporter::builder()
                .with_tonic()
                .with_endpoint(url)
                .build()?;
            builder.with_batch_exporter(exporter).build()
        }
        None => builder
            .with_simple_exporter(opentelemetry_stdout::LogExporter::default())
            .build(),
    };

    Ok(provider)
}
