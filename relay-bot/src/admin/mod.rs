//! Admin command interpreter: grammar and execution.

mod command;
mod interpreter;

pub use command::{parse, AdminCommand, ParsedCommand, ReplyContext};
pub use interpreter::{AdminInterpreter, AdminOutcome};
