//! Relay engine: `/start`, the content filter gate, guest → admin forwarding with mapping
//! writes, and dispatch of admin messages.

mod engine;
mod locks;
pub mod notices;
mod split;
mod start;

pub use engine::{RelayEngine, RelayOutcome};
pub use locks::{ChatGuard, ChatLocks};
pub use split::split_message;
pub use start::StartFlow;
