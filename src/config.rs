use clap::{Parser, ValueEnum};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

/// Config file picked up from the working directory when none is given.
const CWD_CONFIG: &str = "config.yaml";

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Terminal client for the health assistant chat backend", long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Backend base URL
    #[arg(long, env = "BACKEND_URL")]
    pub base_url: Option<String>,

    /// Chat endpoint path (some backends serve `/chat`)
    #[arg(long, env = "BACKEND_CHAT_PATH")]
    pub chat_path: Option<String>,

    /// User identifier sent with every request
    #[arg(long, env = "CHAT_USER_ID")]
    pub user_id: Option<u64>,

    /// Request timeout in seconds (default: none)
    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,

    /// Skip the backend health check at startup
    #[arg(long)]
    pub skip_status_check: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    pub backend: BackendConfig,
    pub user: UserConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub chat_path: String,
    pub reminders_path: String,
    pub set_reminder_path: String,
    pub status_path: String,
    /// Query `status_path` once at startup.
    pub check_status: bool,
    /// Unset means no client-side timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UserConfig {
    pub id: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl WidgetConfig {
    pub fn load() -> Result<Self> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    /// Layer defaults, config file, `CHAT_` env vars and CLI flags, in that order.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("backend.base_url", "http://127.0.0.1:5000")?
            .set_default("backend.chat_path", "/api/chat")?
            .set_default("backend.reminders_path", "/api/reminders")?
            .set_default("backend.set_reminder_path", "/api/set_reminder")?
            .set_default("backend.status_path", "/api/status")?
            .set_default("backend.check_status", true)?
            .set_default("user.id", 1_u64)?
            .set_default("logging.level", "warn")?
            .set_default("logging.format", "text")?;

        // 2. Config file: explicit path, else ./config.yaml when present
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::new(path, FileFormat::Yaml).required(true));
        } else if Path::new(CWD_CONFIG).exists() {
            builder = builder.add_source(File::new(CWD_CONFIG, FileFormat::Yaml));
        }

        // 3. Environment, e.g. CHAT_BACKEND__BASE_URL or CHAT_USER__ID
        builder = builder.add_source(
            Environment::with_prefix("CHAT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI flags (clap also fills these from their own env vars)
        if let Some(url) = &cli.base_url {
            builder = builder.set_override("backend.base_url", url.as_str())?;
        }
        if let Some(path) = &cli.chat_path {
            builder = builder.set_override("backend.chat_path", path.as_str())?;
        }
        if let Some(id) = cli.user_id {
            builder = builder.set_override("user.id", id)?;
        }
        if let Some(secs) = cli.timeout {
            builder = builder.set_override("backend.request_timeout_secs", secs)?;
        }
        if let Some(format) = cli.log_format {
            builder = builder.set_override("logging.format", format.as_str())?;
        }
        if cli.skip_status_check {
            builder = builder.set_override("backend.check_status", false)?;
        }

        let cfg = builder.build()?;
        Ok(cfg.try_deserialize()?)
    }
}
