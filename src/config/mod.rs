use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_SESSION_COOKIE: &str = "cg_session";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_ASSETS_MAX_AGE: u64 = 3600;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CONFIG_FILE: &str = "codegram.toml";

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

// ─── TOML config file ─────────────────────────────────────────────────────────

/// `codegram.toml` — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP server port (default: 3000).
    port: Option<u16>,
    /// Bind address (default: "127.0.0.1"; use "0.0.0.0" for LAN access).
    bind_address: Option<String>,
    /// Base URL of the CodeGram backend API (default: http://127.0.0.1:8080).
    backend_url: Option<String>,
    /// Name of the backend session cookie (default: "cg_session").
    session_cookie: Option<String>,
    /// Directory served under /static (default: "static").
    static_dir: Option<PathBuf>,
    /// Cache-Control max-age for static assets, in seconds (default: 3600).
    assets_max_age: Option<u64>,
    /// Timeout for outbound backend calls, in seconds (default: 10).
    request_timeout_secs: Option<u64>,
    /// Log level filter string, e.g. "debug", "info,codegram_web=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default, human-readable) | "json" (structured for log aggregators).
    log_format: Option<String>,
    /// Override for the OAuth start URL when the provider is fronted elsewhere.
    /// Default: derived from `backend_url` (`{backend_url}/api/auth/github`).
    external_login: Option<String>,
}

fn load_toml(path: &Path) -> Option<TomlConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), err = %e, "could not read config file — using defaults");
            return None;
        }
    };
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!(path = %path.display(), err = %e, "failed to parse config file — using defaults");
            None
        }
    }
}

// ─── WebConfig ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub port: u16,
    /// Bind address for the HTTP server (CODEGRAM_BIND env var, default: "127.0.0.1").
    pub bind_address: String,
    /// Backend API base URL (CODEGRAM_API_URL env var), trailing slash stripped.
    pub backend_url: String,
    /// Name of the session cookie issued by the backend. The gate only checks
    /// that a cookie with this name is present before asking the backend —
    /// validation is entirely backend-owned.
    pub session_cookie: String,
    /// Directory served under /static.
    pub static_dir: PathBuf,
    /// Cache-Control max-age for static assets, in seconds.
    pub assets_max_age: u64,
    /// Timeout for outbound backend calls, in seconds.
    pub request_timeout_secs: u64,
    pub log: String,
    /// Log output format: "pretty" (default) | "json" (structured for Loki/Elasticsearch).
    pub log_format: String,
    /// Override for the OAuth start URL. None = derive from `backend_url`.
    pub external_login: Option<String>,
}

impl WebConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file (`--config` path, or `./codegram.toml` when present)
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        bind_address: Option<String>,
        backend_url: Option<String>,
        log: Option<String>,
        config_path: Option<PathBuf>,
    ) -> Self {
        // Load TOML as the lowest-priority override layer. The default path is
        // only probed when it exists so a bare `codegram-web` run stays quiet.
        let toml = config_path
            .or_else(|| {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                p.exists().then_some(p)
            })
            .and_then(|p| load_toml(&p))
            .unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let bind_address = bind_address
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);

        let backend_url = backend_url
            .or(toml.backend_url)
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = backend_url.trim_end_matches('/').to_string();

        let session_cookie = toml
            .session_cookie
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string());

        let static_dir = toml
            .static_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let assets_max_age = toml.assets_max_age.unwrap_or(DEFAULT_ASSETS_MAX_AGE);
        let request_timeout_secs = toml
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());

        let log_format = std::env::var("CODEGRAM_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let external_login = toml.external_login.filter(|s| !s.is_empty());

        Self {
            port,
            bind_address,
            backend_url,
            session_cookie,
            static_dir,
            assets_max_age,
            request_timeout_secs,
            log,
            log_format,
            external_login,
        }
    }

    /// The URL the browser is sent to when starting the OAuth flow.
    pub fn login_start_url(&self) -> String {
        self.external_login
            .clone()
            .unwrap_or_else(|| format!("{}/api/auth/github", self.backend_url))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
