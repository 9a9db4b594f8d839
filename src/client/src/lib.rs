pub mod error;
pub mod store;

pub use error::ClientError;
pub use error::Result;
pub use store::ProjectStore;
pub use store::State;
