use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".coursefind";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Path to the JSON course catalog (relative to the project root)
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
        }
    }
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("courses.json")
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_http_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_http_host(),
            port: default_http_port(),
        }
    }
}

fn default_http_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    3000
}

/// Ranking and response configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of records returned per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Shared-cache freshness window advertised on successful responses
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_secs: u64,

    /// Window during which caches may serve stale content while revalidating
    #[serde(default = "default_stale_while_revalidate")]
    pub stale_while_revalidate_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            cache_max_age_secs: default_cache_max_age(),
            stale_while_revalidate_secs: default_stale_while_revalidate(),
        }
    }
}

impl SearchConfig {
    /// Value for the `Cache-Control` header on successful search responses
    pub fn cache_control(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate={}",
            self.cache_max_age_secs, self.stale_while_revalidate_secs
        )
    }
}

fn default_max_results() -> usize {
    50
}

fn default_cache_max_age() -> u64 {
    60
}

fn default_stale_while_revalidate() -> u64 {
    30
}

/// Interactive client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the search server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Quiet period before a typed query is sent
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Timeout for a single search request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            debounce_ms: default_debounce_ms(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_server_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_request_timeout() -> u64 {
    10
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to rolling files
    #[serde(default)]
    pub enabled: bool,

    /// Write logs to stderr
    #[serde(default = "default_true")]
    pub stderr: bool,

    /// Level for the file log: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log directory (relative paths resolve against the project root)
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    /// File name prefix for rolled files
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Rotation: minutely, hourly, daily or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: default_true(),
            level: default_log_level(),
            directory: default_log_directory(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(CONFIG_DIR).join("logs")
}

fn default_file_prefix() -> String {
    "coursefind.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Config {
    /// Load configuration from the .coursefind directory
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to the .coursefind directory
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_dir = root.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the .coursefind directory
    pub fn config_dir(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR)
    }

    /// Resolve the corpus file against the project root
    pub fn corpus_path(&self, root: &Path) -> PathBuf {
        if self.corpus.path.is_absolute() {
            self.corpus.path.clone()
        } else {
            root.join(&self.corpus.path)
        }
    }

    /// Check if a config directory exists in the given directory
    pub fn is_initialized(root: &Path) -> bool {
        Self::config_dir(root).exists()
    }
}
