pub mod error;
pub mod http;
pub mod projects;
pub mod provider;
pub mod tasks;

pub use error::PlatformError;
pub use error::Result;
pub use provider::PlatformProvider;
