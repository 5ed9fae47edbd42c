use anyhow::Result;
use clap::{Parser, Subcommand};
use codegram_web::{backend::Backend, config::WebConfig, routes, AppContext};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "codegram-web",
    about = "CodeGram web — server-rendered frontend for the CodeGram API",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP port for the web server
    #[arg(long, env = "CODEGRAM_PORT")]
    port: Option<u16>,

    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "CODEGRAM_BIND")]
    bind_address: Option<String>,

    /// Base URL of the CodeGram backend API
    #[arg(long, env = "CODEGRAM_API_URL")]
    backend_url: Option<String>,

    /// Path to a TOML config file (default: ./codegram.toml when present)
    #[arg(long, env = "CODEGRAM_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CODEGRAM_LOG")]
    log: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "CODEGRAM_LOG_FILE")]
    log_file: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the web server (default when no subcommand given).
    ///
    /// Runs in the foreground and serves the UI on the configured port.
    ///
    /// Examples:
    ///   codegram-web serve
    ///   codegram-web
    Serve,
    /// Check that the backend API is reachable.
    ///
    /// Probes the backend's health endpoint with the configured URL.
    /// Exit code 0 if the backend answers, 1 otherwise.
    ///
    /// Examples:
    ///   codegram-web check
    ///   codegram-web check --backend-url http://10.0.0.5:8080
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // ── Logging setup ────────────────────────────────────────────────────────
    // Init once — must happen before any tracing calls.
    let log_level = args.log.as_deref().unwrap_or("info").to_owned();
    let log_format =
        std::env::var("CODEGRAM_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let _file_guard = setup_logging(&log_level, args.log_file.as_deref(), &log_format);

    match args.command {
        Some(Command::Check) => {
            let config = WebConfig::new(
                args.port,
                args.bind_address,
                args.backend_url,
                args.log,
                args.config,
            );
            std::process::exit(run_check(&config).await);
        }
        None | Some(Command::Serve) => {
            run_server(
                args.port,
                args.bind_address,
                args.backend_url,
                args.log,
                args.config,
            )
            .await?;
        }
    }

    Ok(())
}

async fn run_server(
    port: Option<u16>,
    bind_address: Option<String>,
    backend_url: Option<String>,
    log: Option<String>,
    config_path: Option<std::path::PathBuf>,
) -> Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "codegram-web starting");

    let config = WebConfig::new(port, bind_address, backend_url, log, config_path);
    info!(
        port = config.port,
        backend_url = %config.backend_url,
        static_dir = %config.static_dir.display(),
        "config loaded"
    );

    let ctx = Arc::new(AppContext::new(config)?);
    routes::serve(ctx).await
}

/// `codegram-web check` — probe the backend and report.
async fn run_check(config: &WebConfig) -> i32 {
    let backend = match Backend::new(config) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("error: {e:#}");
            return 1;
        }
    };
    match backend.health().await {
        Ok(()) => {
            println!("backend ok: {}", config.backend_url);
            0
        }
        Err(e) => {
            eprintln!("backend unreachable: {e}");
            eprintln!("  url: {}", config.backend_url);
            1
        }
    }
}

/// Initialize the tracing subscriber.
/// If `log_file` is set, logs go to both stdout and a daily-rolling file.
/// Returns a `WorkerGuard` that must stay alive for the process lifetime.
///
/// `log_format` may be `"pretty"` (default, human-readable compact format) or
/// `"json"` (structured JSON for log aggregators like Loki/Elasticsearch).
///
/// If the log directory cannot be created, falls back to stdout-only logging
/// with a warning — never panics.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("codegram-web.log"));

        // Ensure the directory exists before tracing-appender tries to open it.
        if let Err(e) = std::fs::create_dir_all(dir) {
            // Fall back to stdout-only — don't panic on a bad log path.
            eprintln!(
                "warn: could not create log directory '{}': {e} — falling back to stdout",
                dir.display()
            );
            if use_json {
                tracing_subscriber::fmt().json().with_env_filter(log_level).init();
            } else {
                tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
            }
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if use_json {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().json())
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().compact())
                .with(fmt::layer().with_writer(non_blocking))
                .init();
        }

        Some(guard)
    } else if use_json {
        tracing_subscriber::fmt().json().with_env_filter(log_level).init();
        None
    } else {
        tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
        None
    }
}
