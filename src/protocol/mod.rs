//! Line-oriented protocol between players and the authority.
//!
//! - `message`: typed messages, parsing and encoding
//! - `router`: dispatch of parsed messages to the authority and console

pub mod message;
pub mod router;

pub use message::{GameMessage, Message, DELIMITER, MAX_FIELDS};
pub use router::{ProtocolRouter, RouteError, Routed};
