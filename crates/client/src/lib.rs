//! WebSocket event channel and HTTP triggers for the game server. No
//! reconnection or backoff; a dropped connection surfaces as an error.

pub mod api;
pub mod error;
pub mod socket;

pub use api::*;
pub use error::*;
pub use socket::*;
