#![forbid(unsafe_code)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

//! # keel-core
//!
//! The Elm Architecture primitives every keel component is built on.
//!
//! - [`Message`] - a type-erased value delivered to `update`
//! - [`Cmd`] - a deferred side effect that yields a message
//! - [`KeyMsg`] - keyboard input with a canonical string form
//! - [`Model`] - init / update / view
//! - [`simulator::ProgramSimulator`] - drive a model without a terminal
//!
//! Components report events to their owner by returning commands that yield
//! event messages; they never call back into owner state.

pub mod command;
pub mod key;
pub mod message;
pub mod simulator;

pub use command::{Cmd, batch, drain, drain_ready, sequence, tick};
pub use key::{KeyMsg, KeyType};
pub use message::{BatchMsg, BlurMsg, FocusMsg, Message, SequenceMsg};

/// A component in the Elm Architecture.
pub trait Model {
    /// Initialize the model and return an optional startup command.
    fn init(&self) -> Option<Cmd>;

    /// Process a message and return a follow-up command.
    fn update(&mut self, msg: Message) -> Option<Cmd>;

    /// Render the model.
    fn view(&self) -> String;
}

/// Commonly used items.
pub mod prelude {
    pub use crate::simulator::ProgramSimulator;
    pub use crate::{BlurMsg, Cmd, FocusMsg, KeyMsg, KeyType, Message, Model, batch, drain, tick};
}
