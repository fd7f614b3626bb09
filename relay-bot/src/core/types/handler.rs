//! Handler trait and transport conversion traits.

use async_trait::async_trait;

use super::{message::Message, message::User, response::HandlerResponse};
use crate::core::error::Result;

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// One stage of update processing. The chain runs every `before` in order, then `handle`
/// until one returns Stop or Reply, then every `after` in reverse with the final response.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Return false to drop the update before any handler processes it.
    async fn before(&self, _message: &Message) -> Result<bool> {
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }

    /// Observes the final response; errors here are reported but the update is already handled.
    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
