use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::level_filters::LevelFilter;

use crate::DEFAULT_DATA_PATH;
use crate::DEFAULT_MAX_REQUEST_BODY_BYTES;

#[derive(Debug, Clone)]
pub struct Server {
    pub host: SocketAddr,
    /// Requests with a larger body are answered with 413.
    pub max_request_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct Data {
    /// Directory holding the collection files.
    pub path: PathBuf,
    pub ui_path: Option<PathBuf>,
    /// Serialize read-modify-write cycles per file inside this process.
    pub serialize_writes: bool,
}

#[derive(Debug, Clone)]
pub struct Log {
    pub level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct Metrics {
    pub listen: Option<SocketAddr>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: Server,
    pub data: Data,
    pub log: Log,
    pub metrics: Metrics,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: Server {
                host: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 8080),
                max_request_body_bytes: DEFAULT_MAX_REQUEST_BODY_BYTES,
            },
            data: Data {
                path: PathBuf::from(DEFAULT_DATA_PATH),
                ui_path: None,
                serialize_writes: false,
            },
            log: Log {
                level: LevelFilter::INFO,
            },
            metrics: Metrics { listen: None },
        }
    }
}
