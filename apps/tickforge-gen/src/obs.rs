use clap::ValueEnum;
use std::net::SocketAddr;

/// Env var holding an `EnvFilter` directive; wins over [`DEFAULT_LOG_FILTER`].
pub const LOG_FILTER_ENV: &str = "TICKFORGE_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Shape of the log lines on stderr.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn log_filter(from_env: Option<String>) -> String {
    from_env
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Logs go to stderr; stdout only carries the run summary line.
pub fn init_tracing(log_format: LogFormat) -> Result<(), String> {
    let filter = log_filter(std::env::var(LOG_FILTER_ENV).ok());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&filter)
        .map_err(|err| format!("invalid {LOG_FILTER_ENV} filter {filter:?}: {err}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    let installed = match log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.map_err(|err| format!("failed to install log subscriber: {err}"))
}

#[cfg(feature = "prometheus")]
pub fn init_metrics(metrics_addr: Option<&str>) -> Result<Option<SocketAddr>, String> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let Some(raw) = metrics_addr else {
        return Ok(None);
    };
    let addr = parse_metrics_addr(raw)?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|err| format!("failed to install prometheus exporter: {err}"))?;

    tracing::info!(metrics_addr = %addr, "serving tick generator metrics");
    Ok(Some(addr))
}

#[cfg(not(feature = "prometheus"))]
pub fn init_metrics(metrics_addr: Option<&str>) -> Result<Option<SocketAddr>, String> {
    match metrics_addr {
        Some(raw) => {
            parse_metrics_addr(raw)?;
            Err("--metrics-addr needs tickforge-gen built with feature `prometheus`".to_string())
        }
        None => Ok(None),
    }
}

fn parse_metrics_addr(raw: &str) -> Result<SocketAddr, String> {
    raw.trim()
        .parse()
        .map_err(|err| format!("invalid --metrics-addr {raw:?} (expected host:port): {err}"))
}
