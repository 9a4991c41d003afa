//! Client-side game state and turn coordination. Keep this crate free of IO
//! and platform concerns; the server owns the rules, this crate only mirrors
//! its snapshots and gates local input.

pub mod cards;
pub mod controller;
pub mod gate;
pub mod hint;
pub mod protocol;
pub mod seats;
pub mod selection;
pub mod snapshot;

pub use cards::*;
pub use controller::*;
pub use gate::*;
pub use hint::*;
pub use protocol::*;
pub use seats::*;
pub use selection::*;
pub use snapshot::*;
