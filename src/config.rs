use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub range: RangeConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub assembly: AssemblyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Inclusive bounds of the dashboard's date range (`YYYY-MM-DD`).
#[derive(Debug, Clone, Deserialize)]
pub struct RangeConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Http,
    Directory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Origin serving the snapshots (http), or the root directory (directory).
    pub base_url: String,
    /// Path under `base_url` holding the `health-check-*.json` files.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Upper bound for a single snapshot fetch.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_base_path() -> String {
    "src/".into()
}

fn default_request_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssemblyConfig {
    /// Max fetches in flight; 1 fetches day by day.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Optional bound on a whole assembly run.
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            deadline_secs: None,
        }
    }
}

fn default_concurrency() -> usize {
    1
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.range.start <= self.range.end,
            "range.start ({}) must not be after range.end ({})",
            self.range.start,
            self.range.end
        );
        anyhow::ensure!(
            !self.source.base_url.is_empty(),
            "source.base_url must be non-empty"
        );
        if self.source.kind == SourceKind::Http {
            anyhow::ensure!(
                self.source.base_url.starts_with("http://")
                    || self.source.base_url.starts_with("https://"),
                "source.base_url must be an http(s) URL for kind = \"http\", got {}",
                self.source.base_url
            );
        }
        anyhow::ensure!(
            self.source.request_timeout_ms > 0,
            "source.request_timeout_ms must be > 0, got {}",
            self.source.request_timeout_ms
        );
        anyhow::ensure!(
            self.assembly.concurrency > 0,
            "assembly.concurrency must be > 0, got {}",
            self.assembly.concurrency
        );
        if let Some(secs) = self.assembly.deadline_secs {
            anyhow::ensure!(
                secs > 0,
                "assembly.deadline_secs must be > 0 when set, got {}",
                secs
            );
        }
        Ok(())
    }
}
