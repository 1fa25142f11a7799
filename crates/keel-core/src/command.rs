//! Commands for side effects.
//!
//! A component's `update` never performs work directly. It returns a [`Cmd`]
//! that the driver executes, and whatever message the command produces is fed
//! back into the component tree. Components also use commands to report
//! events to their owner (a row was selected, a page of data is wanted).

use std::time::{Duration, Instant};

use crate::message::{BatchMsg, Message, SequenceMsg};

/// A command that produces a message when executed.
///
/// Commands are lazy: nothing happens until the driver runs them.
///
/// # Example
///
/// ```rust
/// use keel_core::{Cmd, Message};
///
/// struct Saved;
///
/// let cmd = Cmd::new(|| Message::new(Saved));
/// assert!(cmd.execute().unwrap().is::<Saved>());
/// ```
pub struct Cmd {
    run: Box<dyn FnOnce() -> Option<Message> + Send + 'static>,
    due: Option<Instant>,
}

impl Cmd {
    /// Create a new command from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Message + Send + 'static,
    {
        Self::new_optional(move || Some(f()))
    }

    /// Create a command that may not produce a message.
    pub fn new_optional<F>(f: F) -> Self
    where
        F: FnOnce() -> Option<Message> + Send + 'static,
    {
        Self {
            run: Box::new(f),
            due: None,
        }
    }

    /// Create a command that immediately yields an already-built message.
    pub fn message<M: Send + 'static>(msg: M) -> Self {
        Self::new(move || Message::new(msg))
    }

    /// Create an empty command that does nothing.
    pub fn none() -> Option<Self> {
        None
    }

    /// When the command may run; `None` for commands that run at once.
    pub const fn due(&self) -> Option<Instant> {
        self.due
    }

    /// Whether the command may run at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.due.is_none_or(|due| due <= now)
    }

    /// Execute the command and return the resulting message.
    ///
    /// Execution never waits: drivers hold timed commands until they are
    /// [due](Self::is_due).
    pub fn execute(self) -> Option<Message> {
        (self.run)()
    }
}

impl std::fmt::Debug for Cmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cmd").finish_non_exhaustive()
    }
}

/// Batch multiple commands to run concurrently.
///
/// `None` entries are dropped. A batch of one is returned unwrapped.
///
/// ```rust
/// use keel_core::{Cmd, Message, batch};
///
/// let cmd = batch(vec![
///     Some(Cmd::new(|| Message::new("first"))),
///     None,
///     Some(Cmd::new(|| Message::new("second"))),
/// ]);
/// assert!(cmd.is_some());
/// ```
pub fn batch(cmds: Vec<Option<Cmd>>) -> Option<Cmd> {
    let valid: Vec<Cmd> = cmds.into_iter().flatten().collect();

    match valid.len() {
        0 => None,
        1 => valid.into_iter().next(),
        _ => Some(Cmd::new(move || Message::new(BatchMsg(valid)))),
    }
}

/// Sequence commands to run one at a time, in order.
pub fn sequence(cmds: Vec<Option<Cmd>>) -> Option<Cmd> {
    let valid: Vec<Cmd> = cmds.into_iter().flatten().collect();

    match valid.len() {
        0 => None,
        1 => valid.into_iter().next(),
        _ => Some(Cmd::new(move || Message::new(SequenceMsg(valid)))),
    }
}

/// Command that fires once after `duration`.
///
/// The command does not block. It is due `duration` after it was created,
/// and drivers keep it aside until then, so further messages are processed
/// in the meantime. Used for debouncing: the component tags each tick and
/// ignores ticks whose tag is no longer current.
pub fn tick<F>(duration: Duration, f: F) -> Cmd
where
    F: FnOnce(Instant) -> Message + Send + 'static,
{
    Cmd {
        run: Box::new(move || Some(f(Instant::now()))),
        due: Some(Instant::now() + duration),
    }
}

/// Execute a command and every command it fans out into, collecting the
/// resulting leaf messages in order.
///
/// This is what a driver does with [`BatchMsg`] and [`SequenceMsg`]; owners
/// that embed components without a full program loop use it directly.
/// Timed commands are waited for in place.
pub fn drain(cmd: Option<Cmd>) -> Vec<Message> {
    let mut out = Vec::new();
    let mut pending: Vec<Cmd> = cmd.into_iter().collect();
    pending.reverse();

    while let Some(cmd) = pending.pop() {
        if let Some(due) = cmd.due() {
            let wait = due.saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
        }
        expand(cmd, &mut pending, &mut out);
    }

    out
}

/// Like [`drain`], but commands that are not due at `now` are handed back
/// instead of waited for, in the order they were met.
pub fn drain_ready(cmd: Option<Cmd>, now: Instant) -> (Vec<Message>, Vec<Cmd>) {
    let mut out = Vec::new();
    let mut deferred = Vec::new();
    let mut pending: Vec<Cmd> = cmd.into_iter().collect();

    while let Some(cmd) = pending.pop() {
        if cmd.is_due(now) {
            expand(cmd, &mut pending, &mut out);
        } else {
            deferred.push(cmd);
        }
    }

    (out, deferred)
}

fn expand(cmd: Cmd, pending: &mut Vec<Cmd>, out: &mut Vec<Message>) {
    let Some(msg) = cmd.execute() else {
        return;
    };
    match msg.downcast_batch() {
        Ok(cmds) => pending.extend(cmds.into_iter().rev()),
        Err(msg) => out.push(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_new() {
        let cmd = Cmd::new(|| Message::new(42i32));
        let msg = cmd.execute().unwrap();
        assert_eq!(msg.downcast::<i32>().unwrap(), 42);
    }

    #[test]
    fn test_cmd_message() {
        let cmd = Cmd::message("ready");
        assert_eq!(cmd.execute().unwrap().downcast::<&str>(), Some("ready"));
    }

    #[test]
    fn test_cmd_none() {
        assert!(Cmd::none().is_none());
    }

    #[test]
    fn test_batch_empty() {
        assert!(batch(vec![None, None]).is_none());
    }

    #[test]
    fn test_batch_single_is_unwrapped() {
        let cmd = batch(vec![Some(Cmd::message(1i32))]).unwrap();
        assert!(cmd.execute().unwrap().is::<i32>());
    }

    #[test]
    fn test_sequence_empty() {
        assert!(sequence(vec![]).is_none());
    }

    #[test]
    fn test_tick_zero_duration() {
        struct Tock;
        let cmd = tick(Duration::ZERO, |_| Message::new(Tock));
        assert!(cmd.is_due(Instant::now()));
        assert!(cmd.execute().unwrap().is::<Tock>());
    }

    #[test]
    fn test_tick_does_not_block() {
        struct Tock;
        let started = Instant::now();
        let cmd = tick(Duration::from_secs(60), |_| Message::new(Tock));
        assert!(!cmd.is_due(started));
        assert!(cmd.due().is_some_and(|due| due >= started + Duration::from_secs(60)));

        let (ready, deferred) = drain_ready(
            batch(vec![Some(Cmd::message(1i32)), Some(cmd)]),
            Instant::now(),
        );
        assert_eq!(ready.len(), 1);
        assert_eq!(deferred.len(), 1);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_drain_waits_for_short_ticks() {
        struct Tock;
        let started = Instant::now();
        let msgs = drain(Some(tick(Duration::from_millis(5), |_| Message::new(Tock))));
        assert!(msgs[0].is::<Tock>());
        assert!(started.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_drain_flattens_nested_batches() {
        let inner = batch(vec![Some(Cmd::message(2i32)), Some(Cmd::message(3i32))]);
        let outer = batch(vec![Some(Cmd::message(1i32)), inner]);
        let values: Vec<i32> = drain(outer)
            .into_iter()
            .filter_map(|m| m.downcast::<i32>())
            .collect();
        assert_eq!(values, vec![1, 2, 3]);
    }
}
