//! Chain handlers that sit around the relay engine.

mod logging_handler;

pub use logging_handler::LoggingHandler;
