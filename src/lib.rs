//! Wayfarer - voice travel assistant backend
//!
//! Answers destination questions during a realtime conversation by
//! correlating a relational flight store with a hybrid lexical/vector
//! knowledge-base index, returning citation-tagged results the session
//! can ground.

pub mod error;
pub mod flights;
pub mod relay;
pub mod retrieval;
pub mod tools;
pub mod types;

pub use error::{Result, WayfarerError};
pub use flights::FlightStore;
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
