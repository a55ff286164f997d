//! Configuration for fstation.
//!
//! - [load]: locating, reading and generating `station.toml` ([Config]).
//! - [general]: default sort order for a freshly loaded listing.
//! - [network]: request timeout, user agent and the default base URL.

pub mod general;
pub mod load;
pub mod network;

pub use general::General;
pub use load::Config;
pub use network::{InternalNetwork, Network};
