//! Message types for the Elm Architecture.
//!
//! Messages are the only way to update a component. User input, debounce
//! ticks and the events components report to their owners are all messages.

use std::any::Any;
use std::fmt;

use crate::command::Cmd;

/// A type-erased message container.
///
/// Messages can be any type that is `Send + 'static`. Use [`Message::new`] to create
/// a message and [`Message::downcast`] to retrieve the original type.
///
/// # Example
///
/// ```rust
/// use keel_core::Message;
///
/// struct Selected(usize);
///
/// let msg = Message::new(Selected(3));
/// assert_eq!(msg.downcast_ref::<Selected>().map(|s| s.0), Some(3));
/// ```
pub struct Message(Box<dyn Any + Send>);

impl Message {
    /// Create a new message from any sendable type.
    pub fn new<M: Any + Send + 'static>(msg: M) -> Self {
        Self(Box::new(msg))
    }

    /// Try to downcast to a specific message type.
    pub fn downcast<M: Any + Send + 'static>(self) -> Option<M> {
        self.0.downcast::<M>().ok().map(|b| *b)
    }

    /// Try to get a reference to the message as a specific type.
    pub fn downcast_ref<M: Any + Send + 'static>(&self) -> Option<&M> {
        self.0.downcast_ref::<M>()
    }

    /// Check if the message is of a specific type.
    pub fn is<M: Any + Send + 'static>(&self) -> bool {
        self.0.is::<M>()
    }

    /// Unpack a [`BatchMsg`] or [`SequenceMsg`] into its commands, or hand
    /// the message back untouched.
    pub(crate) fn downcast_batch(self) -> Result<Vec<Cmd>, Self> {
        match self.0.downcast::<BatchMsg>() {
            Ok(batch) => Ok(batch.0),
            Err(other) => match other.downcast::<SequenceMsg>() {
                Ok(seq) => Ok(seq.0),
                Err(other) => Err(Self(other)),
            },
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message").finish_non_exhaustive()
    }
}

/// Sent to a component when it gains input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMsg;

/// Sent to a component when it loses input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurMsg;

/// Several commands to run with no ordering guarantee.
///
/// Produced by [`crate::batch`]. Drivers unpack it and execute every command.
pub struct BatchMsg(pub Vec<Cmd>);

/// Several commands to run one after another.
///
/// Produced by [`crate::sequence`].
pub struct SequenceMsg(pub Vec<Cmd>);
