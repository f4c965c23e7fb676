//! Realtime relay surface
//!
//! The WebSocket boundary between the conversation session and the tool
//! layer: tool-call events come in, direction-tagged results go back.
//! The model session itself (audio, credentials, transport) lives outside
//! this crate.

mod events;
mod server;

pub use events::RelayEvent;
pub use server::{relay_router, RelayState};
