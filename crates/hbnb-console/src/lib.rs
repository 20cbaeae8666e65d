//! Interactive console for the HBnB object store.
//!
//! Lines are parsed into a verb and arguments ([`parse`]), dispatched to a
//! handler ([`commands`]) that works against a [`hbnb_store::Storage`], and
//! the result or a [`Diagnostic`] is printed by the [`Interpreter`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod diagnostic;
pub mod interpreter;
pub mod parse;

pub use config::{ConfigError, ConsoleConfig};
pub use diagnostic::Diagnostic;
pub use interpreter::{Flow, Interpreter, DEFAULT_PROMPT};
