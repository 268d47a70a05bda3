pub mod config;
pub mod error;
pub mod response;

pub use config::{RelayConfig, PRESIGN_EXPIRES_SECS};
pub use error::*;
pub use response::{HandlerResponse, Outcome};
