use tracing_subscriber::EnvFilter;

/// Filtro de `RUST_LOG`, com fallback para `default_directive`.
pub fn filter_from_env(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}
