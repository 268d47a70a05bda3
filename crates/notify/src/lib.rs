//! Result delivery over API Gateway WebSocket connections.
//!
//! This crate provides:
//! - `ConnectionGateway` trait for pushing to and closing client connections
//! - `SessionStore` trait for evicting stale session records
//! - API Gateway Management and DynamoDB implementations
//! - `Delivery`, which pushes a message, closes the connection and evicts
//!   the session when the connection turns out to be gone

pub mod delivery;
pub mod gateway;
pub mod session_store;
pub mod traits;

pub use delivery::{Delivery, PresignedUrlMessage};
pub use gateway::ApiGatewayConnections;
pub use session_store::DynamoSessionStore;
pub use traits::{ConnectionGateway, NotifyError, SessionStore};
