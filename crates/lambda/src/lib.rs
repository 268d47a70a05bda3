//! Lambda handlers relaying Athena query results to WebSocket clients.
//!
//! - [`Dispatcher`] submits a client's query and either answers at once or
//!   hands the query to the tracking state machine.
//! - [`Responder`] is invoked by that state machine and pushes a pre-signed
//!   result URL back to the client.

pub mod dispatcher;
pub mod error;
pub mod events;
pub mod responder;

pub use dispatcher::Dispatcher;
pub use error::HandlerError;
pub use events::{RequestContext, ResponderEvent, WebSocketEvent};
pub use responder::Responder;
