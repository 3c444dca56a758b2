//! Configuração por variáveis de ambiente.

use anyhow::{Context, Result};

pub const DEFAULT_SERVICE_NAME: &str = "exchange-core";
pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4318";

/// Telemetria: nome do serviço, coletor OTLP e commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub otlp_endpoint: String,
    pub commit_sha: String,
    /// Sem export, só o layer `fmt` é instalado.
    pub export: bool,
    pub log_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            otlp_endpoint: DEFAULT_OTLP_ENDPOINT.to_string(),
            commit_sha: "unknown".to_string(),
            export: false,
            log_filter: "info".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// `OTEL_SERVICE_NAME`, `OTEL_EXPORTER_OTLP_ENDPOINT`, `EXCHANGE_COMMIT_SHA`,
    /// `EXCHANGE_OTLP_EXPORT` e `EXCHANGE_LOG` (usado quando `RUST_LOG` não está definido).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let export = match lookup("EXCHANGE_OTLP_EXPORT") {
            Some(raw) => parse_bool(&raw).with_context(|| format!("EXCHANGE_OTLP_EXPORT inválido: {raw:?}"))?,
            None => defaults.export,
        };
        Ok(Self {
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or(defaults.otlp_endpoint),
            commit_sha: lookup("EXCHANGE_COMMIT_SHA").unwrap_or(defaults.commit_sha),
            export,
            log_filter: lookup("EXCHANGE_LOG").unwrap_or(defaults.log_filter),
        })
    }
}

/// Parâmetros do binário de demonstração.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoConfig {
    pub traders: usize,
    pub rounds: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { traders: 4, rounds: 5 }
    }
}

impl DemoConfig {
    /// `EXCHANGE_DEMO_TRADERS`, `EXCHANGE_DEMO_ROUNDS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parse = |key: &str, default: usize| -> Result<usize> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{key} inválido: {raw:?}")),
                None => Ok(default),
            }
        };
        Ok(Self {
            traders: parse("EXCHANGE_DEMO_TRADERS", defaults.traders)?,
            rounds: parse("EXCHANGE_DEMO_ROUNDS", defaults.rounds)?,
        })
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("esperado booleano, veio {other:?}"),
    }
}
