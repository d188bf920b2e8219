// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod observability;
pub mod transport;
pub mod types;
pub mod utils;

// Re-exports
pub use client::ChatClient;
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use transport::ChatTransport;
pub use types::*;
