//! Network layer - typed catalog API client and the actor that drives it
//!
//! The Network actor receives fetch commands and sends back decoded pages,
//! games, or classified errors.

pub mod actor;
pub mod client;
pub mod error;

pub use actor::NetworkActor;
pub use client::GameService;
pub use error::ApiError;
