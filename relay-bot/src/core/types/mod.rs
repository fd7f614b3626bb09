//! Core types: inbound message (with sender and chat identity), handler response, Handler trait.

mod handler;
mod message;
mod response;

pub use handler::{Handler, ToCoreMessage, ToCoreUser};
pub use message::{Chat, Message, User};
pub use response::HandlerResponse;
