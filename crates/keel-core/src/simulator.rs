//! Program simulator for driving models without a terminal.
//!
//! The simulator runs the init → update → view cycle, executes returned
//! commands, routes messages the model produced back into it, and keeps the
//! messages the model reported outward (events that no one inside the model
//! consumed) for the test or owner to inspect.
//!
//! Timed commands ([`tick`](crate::tick)) are held aside until they are due,
//! so messages sent in the meantime are processed first, as they would be by
//! a program whose ticks run on their own threads.

use std::collections::VecDeque;
use std::time::Instant;

use crate::Model;
use crate::command::{Cmd, drain_ready};
use crate::message::Message;

/// Statistics tracked during simulation.
#[derive(Debug, Clone, Default)]
pub struct SimulationStats {
    /// Number of times `init()` was called.
    pub init_calls: usize,
    /// Number of times `update()` was called.
    pub update_calls: usize,
    /// Number of times `view()` was called.
    pub view_calls: usize,
    /// Commands that were returned from init/update.
    pub commands_returned: usize,
    /// Timed commands that fired.
    pub timers_fired: usize,
}

/// A simulator for testing [`Model`] implementations.
///
/// Messages produced by commands are offered to `route`: returning `true`
/// feeds the message back into the model (debounce ticks, internal
/// follow-ups); returning `false` records it as an outward event.
///
/// # Example
///
/// ```rust
/// use keel_core::{Cmd, Message, Model, simulator::ProgramSimulator};
///
/// struct Counter { count: i32 }
///
/// impl Model for Counter {
///     fn init(&self) -> Option<Cmd> { None }
///     fn update(&mut self, msg: Message) -> Option<Cmd> {
///         if let Some(n) = msg.downcast::<i32>() {
///             self.count += n;
///         }
///         None
///     }
///     fn view(&self) -> String {
///         format!("Count: {}", self.count)
///     }
/// }
///
/// let mut sim = ProgramSimulator::new(Counter { count: 0 });
/// sim.send(Message::new(5));
/// sim.send(Message::new(3));
/// sim.run_until_empty();
///
/// assert_eq!(sim.model().count, 8);
/// ```
pub struct ProgramSimulator<M: Model> {
    model: M,
    input_queue: VecDeque<Message>,
    output_views: Vec<String>,
    events: Vec<Message>,
    timers: Vec<Cmd>,
    route: Box<dyn Fn(&Message) -> bool>,
    stats: SimulationStats,
    initialized: bool,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a new simulator. Nothing produced by commands is routed back.
    pub fn new(model: M) -> Self {
        Self {
            model,
            input_queue: VecDeque::new(),
            output_views: Vec::new(),
            events: Vec::new(),
            timers: Vec::new(),
            route: Box::new(|_| false),
            stats: SimulationStats::default(),
            initialized: false,
        }
    }

    /// Decide which command results are fed back into the model.
    #[must_use]
    pub fn with_route(mut self, route: impl Fn(&Message) -> bool + 'static) -> Self {
        self.route = Box::new(route);
        self
    }

    /// Initialize the model, executing its startup command.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.stats.init_calls += 1;

        let cmd = self.model.init();
        self.absorb(cmd);

        self.stats.view_calls += 1;
        self.output_views.push(self.model.view());
    }

    /// Queue a message for processing.
    pub fn send(&mut self, msg: Message) {
        self.input_queue.push_back(msg);
    }

    /// Process one queued message. Returns `false` when the queue was empty.
    pub fn step(&mut self) -> bool {
        if !self.initialized {
            self.init();
        }

        let Some(msg) = self.input_queue.pop_front() else {
            return false;
        };

        self.stats.update_calls += 1;
        let cmd = self.model.update(msg);
        self.absorb(cmd);

        self.stats.view_calls += 1;
        self.output_views.push(self.model.view());
        true
    }

    /// Process messages until the queue is empty, with a safety cap. Timed
    /// commands that are already due fire along the way; the rest stay
    /// pending.
    ///
    /// Returns the number of messages processed.
    pub fn run_until_empty(&mut self) -> usize {
        const MAX_STEPS: usize = 10_000;
        let mut steps = 0;
        while steps < MAX_STEPS {
            if self.step() {
                steps += 1;
            } else if self.fire_due_timers() == 0 {
                break;
            }
        }
        steps
    }

    /// Like [`run_until_empty`](Self::run_until_empty), but also waits for
    /// every pending timed command, including ones scheduled while waiting.
    ///
    /// Returns the number of messages processed.
    pub fn settle(&mut self) -> usize {
        const MAX_ROUNDS: usize = 10_000;
        let mut steps = self.run_until_empty();
        let mut rounds = 0;
        while let Some(due) = self.timers.iter().filter_map(Cmd::due).min() {
            rounds += 1;
            if rounds > MAX_ROUNDS {
                tracing::warn!(pending = self.timers.len(), "simulator gave up waiting for timers");
                break;
            }
            let wait = due.saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                tracing::trace!(?wait, "simulator waiting for timer");
                std::thread::sleep(wait);
            }
            steps += self.run_until_empty();
        }
        steps
    }

    /// Timed commands not yet fired.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn fire_due_timers(&mut self) -> usize {
        let now = Instant::now();
        let (mut due, waiting): (Vec<Cmd>, Vec<Cmd>) =
            std::mem::take(&mut self.timers).into_iter().partition(|c| c.is_due(now));
        self.timers = waiting;
        due.sort_by_key(Cmd::due);
        let fired = due.len();
        for cmd in due {
            self.stats.timers_fired += 1;
            self.collect(Some(cmd));
        }
        fired
    }

    fn absorb(&mut self, cmd: Option<Cmd>) {
        if cmd.is_none() {
            return;
        }
        self.stats.commands_returned += 1;
        self.collect(cmd);
    }

    fn collect(&mut self, cmd: Option<Cmd>) {
        let (ready, deferred) = drain_ready(cmd, Instant::now());
        self.timers.extend(deferred);
        for msg in ready {
            let routed = (self.route)(&msg);
            tracing::trace!(routed, "simulator received command result");
            if routed {
                self.input_queue.push_back(msg);
            } else {
                self.events.push(msg);
            }
        }
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Consume the simulator and return the model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Outward events recorded so far.
    pub fn events(&self) -> &[Message] {
        &self.events
    }

    /// Take the recorded outward events, leaving none behind.
    pub fn take_events(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.events)
    }

    /// Outward events of one type, in order.
    pub fn events_of<E: Send + 'static>(&self) -> Vec<&E> {
        self.events.iter().filter_map(Message::downcast_ref::<E>).collect()
    }

    /// All rendered views.
    pub fn views(&self) -> &[String] {
        &self.output_views
    }

    /// The most recent view.
    pub fn last_view(&self) -> Option<&str> {
        self.output_views.last().map(String::as_str)
    }

    /// Simulation statistics.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }
}
