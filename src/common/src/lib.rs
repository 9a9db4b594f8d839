pub mod config;
pub mod entities;
pub mod http;
pub mod types;

pub const DATA_FILE_PROJECTS: &str = "projects.json";
pub const DATA_FILE_TASKS: &str = "tasks.json";
pub const DEFAULT_DATA_PATH: &str = "data";
pub const DEFAULT_MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;
