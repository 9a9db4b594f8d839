use std::path::Path;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing::Level;

use crate::error::Result;

/// Prefix of environment variables overriding the config file, e.g.
/// `TASKBOARD__SERVER__HOST`.
pub const ENV_PREFIX: &str = "TASKBOARD";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Server {
    pub host: String,
    pub max_request_body_bytes: usize,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Data {
    pub path: PathBuf,
    #[serde(default)]
    pub ui_path: Option<PathBuf>,
    #[serde(default)]
    pub serialize_writes: bool,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Log {
    pub level: LogLevel,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Default)]
pub struct Metrics {
    #[serde(default)]
    pub listen: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub server: Server,
    pub data: Data,
    pub log: Log,
    #[serde(default)]
    pub metrics: Metrics,
}

/// Command line flags, applied on top of the file and the environment.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Address to listen on
    #[arg(long)]
    pub host: Option<String>,
    /// Directory holding projects.json and tasks.json
    #[arg(long)]
    pub data_path: Option<PathBuf>,
    /// Directory with a prebuilt UI to serve
    #[arg(long)]
    pub ui_path: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

impl Config {
    /// Layers defaults, the optional config file, `TASKBOARD__*` environment
    /// variables and command line flags, last one wins.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0:8080")?
            .set_default(
                "server.max_request_body_bytes",
                common::DEFAULT_MAX_REQUEST_BODY_BYTES as u64,
            )?
            .set_default("data.path", common::DEFAULT_DATA_PATH)?
            .set_default("data.serialize_writes", false)?
            .set_default("log.level", "info")?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .set_override_option("server.host", overrides.host.clone())?
            .set_override_option(
                "data.path",
                overrides
                    .data_path
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
            )?
            .set_override_option(
                "data.ui_path",
                overrides
                    .ui_path
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
            )?
            .set_override_option("log.level", overrides.log_level.map(LogLevel::as_str))?
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl TryInto<common::config::Config> for Config {
    type Error = crate::error::Error;

    fn try_into(self) -> std::result::Result<common::config::Config, Self::Error> {
        Ok(common::config::Config {
            server: common::config::Server {
                host: self.server.host.parse()?,
                max_request_body_bytes: self.server.max_request_body_bytes,
            },
            data: common::config::Data {
                path: self.data.path,
                ui_path: self.data.ui_path,
                serialize_writes: self.data.serialize_writes,
            },
            log: common::config::Log {
                level: self.log.level.into(),
            },
            metrics: common::config::Metrics {
                listen: self.metrics.listen.map(|v| v.parse()).transpose()?,
            },
        })
    }
}

#[derive(Deserialize, Copy, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    #[serde(rename = "trace")]
    Trace,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
        .into()
    }
}
