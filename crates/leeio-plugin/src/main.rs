// # leeio-plugin
//
// This is a THIN integration layer: all read logic lives in the library
// crates. The binary is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing tracing and the runtime
// 3. Building the shared HTTP client and registering data sources
// 4. Serving one read envelope: JSON request on stdin, JSON response on stdout
//
// ## Configuration
//
// - `LEEIO_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
// - `LEEIO_HTTP_TIMEOUT_SECS`: Per-request timeout (default: 30)
// - `LEEIO_ENDPOINT_ADDRESS`: Dual-stack endpoint (default: https://ip.lee.io)
// - `LEEIO_ENDPOINT_IPV4`: IPv4-only endpoint (default: https://ipv4.lee.io)
// - `LEEIO_ENDPOINT_IPV6`: IPv6-only endpoint (default: https://ipv6.lee.io)
//
// Logs go to stderr so stdout carries only the response.
//
// ## Example
//
// ```bash
// echo '{"type_name":"leeio_ip","config":{}}' | LEEIO_LOG_LEVEL=debug leeio-plugin
// ```

use anyhow::{Context, Result};
use leeio_core::{
    CancellationToken, DataSourceRegistry, Plugin, PluginConfig, PluginMetadata, ReadRequest,
};
use leeio_http::ReqwestClient;
use std::env;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PluginExitCode {
    /// Read served (the response may still carry error diagnostics)
    Served = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<PluginExitCode> for ExitCode {
    fn from(code: PluginExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Debug)]
struct Config {
    log_level: String,
    plugin: PluginConfig,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut plugin = PluginConfig::default();

        if let Some(timeout) = lookup("LEEIO_HTTP_TIMEOUT_SECS") {
            plugin.http.timeout_secs = timeout.trim().parse().with_context(|| {
                format!("LEEIO_HTTP_TIMEOUT_SECS must be a number of seconds. Got: {}", timeout)
            })?;
        }
        if let Some(url) = lookup("LEEIO_ENDPOINT_ADDRESS") {
            plugin.endpoints.address = url;
        }
        if let Some(url) = lookup("LEEIO_ENDPOINT_IPV4") {
            plugin.endpoints.address_ipv4 = url;
        }
        if let Some(url) = lookup("LEEIO_ENDPOINT_IPV6") {
            plugin.endpoints.address_ipv6 = url;
        }

        Ok(Self {
            log_level: lookup("LEEIO_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            plugin,
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.plugin.validate()?;
        self.level()?;
        Ok(())
    }

    fn level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "LEEIO_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return PluginExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return PluginExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = config.level().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return PluginExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return PluginExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match serve(config).await {
            Ok(()) => PluginExitCode::Served,
            Err(e) => {
                error!("Plugin error: {:#}", e);
                PluginExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Configure the plugin and serve one read from stdin
async fn serve(config: Config) -> Result<()> {
    let metadata = PluginMetadata {
        version: env!("CARGO_PKG_VERSION").to_string(),
        ..PluginMetadata::default()
    };
    info!("Starting {} plugin {}", metadata.type_name, metadata.version);

    let registry = DataSourceRegistry::new();
    leeio_datasource_ip::register(&registry);

    let client = ReqwestClient::new(&config.plugin.http)?;
    let plugin = Plugin::configure(metadata, &config.plugin, &registry, Arc::new(client))?;

    // Ctrl-C stops the wait for input, or abandons the in-flight lookup
    // through the normal failure path
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling read");
            on_signal.cancel();
        }
    });

    let request = match read_request(tokio::io::stdin(), &cancel).await {
        Ok(request) => request,
        Err(e) => {
            signal_task.abort();
            return Err(e);
        }
    };
    debug!("Received read request for {}", request.type_name);

    let response = plugin.read(&request, &cancel).await;
    signal_task.abort();

    for diagnostic in response.diagnostics.iter() {
        if diagnostic.is_error() {
            error!("{}", diagnostic);
        } else {
            warn!("{}", diagnostic);
        }
    }

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, &response).context("Failed to write response")?;
    writeln!(stdout).context("Failed to write response")?;

    Ok(())
}

/// Read a request envelope until EOF; empty input means "leeio_ip, no config"
async fn read_request<R>(mut source: R, cancel: &CancellationToken) -> Result<ReadRequest>
where
    R: AsyncRead + Unpin,
{
    let mut input = String::new();
    tokio::select! {
        biased;
        _ = cancel.cancelled() => anyhow::bail!("Interrupted before a request was received"),
        read = source.read_to_string(&mut input) => {
            read.context("Failed to read request from stdin")?;
        }
    }

    parse_request(&input)
}

fn parse_request(input: &str) -> Result<ReadRequest> {
    if input.trim().is_empty() {
        return Ok(ReadRequest::new(format!(
            "{}_{}",
            leeio_core::plugin::PROVIDER_TYPE_NAME,
            leeio_datasource_ip::TYPE_SUFFIX
        )));
    }

    serde_json::from_str(input).context("Request is not a valid read envelope")
}
