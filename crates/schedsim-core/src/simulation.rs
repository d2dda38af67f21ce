//! Simulation configuration and execution.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::Level::Trace;
use log::{debug, log_enabled, trace};
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::prelude::Distribution;
use serde_json::json;

use crate::actor::{Actor, ActorId, Suspend};
use crate::context::ActorContext;
use crate::queue::{QueueRef, RequestQueue};
use crate::state::{ActorStatus, SimulationState};
use crate::wakeup::WakeCause;

/// Represents a simulation run, provides methods for its configuration and
/// execution.
///
/// The virtual clock, the pending-wakeup queue and the random number
/// generator are all owned by this handle, so several simulations can run in
/// one process without interfering.
pub struct Simulation {
    sim_state: Rc<RefCell<SimulationState>>,
    name_to_id: HashMap<String, ActorId>,
    names: Vec<String>,
    actors: Vec<Option<Rc<RefCell<dyn Actor>>>>,
}

impl Simulation {
    /// Creates a new simulation with the specified random seed.
    pub fn new(seed: u64) -> Self {
        Self {
            sim_state: Rc::new(RefCell::new(SimulationState::new(seed))),
            name_to_id: HashMap::new(),
            names: Vec::new(),
            actors: Vec::new(),
        }
    }

    fn register(&mut self, name: &str) -> ActorId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = self.sim_state.borrow_mut().register_actor();
        self.name_to_id.insert(name.to_owned(), id);
        self.names.push(name.to_owned());
        self.actors.push(None);
        id
    }

    /// Creates a new context with the specified component name.
    ///
    /// Registering an actor under the same name later reuses the identifier
    /// assigned here.
    pub fn create_context<S>(&mut self, name: S) -> ActorContext
    where
        S: AsRef<str>,
    {
        let id = self.register(name.as_ref());
        ActorContext::new(id, name.as_ref(), self.sim_state.clone())
    }

    /// Registers an actor under the specified name and enqueues its initial
    /// wakeup at the current virtual time, in registration order.
    pub fn add_actor<S>(&mut self, name: S, actor: Rc<RefCell<dyn Actor>>) -> ActorId
    where
        S: AsRef<str>,
    {
        let id = self.register(name.as_ref());
        self.actors[id as usize] = Some(actor);
        let mut state = self.sim_state.borrow_mut();
        let wakeup_id = state.schedule(id, WakeCause::Start, 0.);
        state.set_status(id, ActorStatus::Pending(wakeup_id));
        drop(state);
        debug!(
            target: "simulation",
            "[{:.3} {} simulation] Registered actor: {}",
            self.time(),
            crate::log::get_colored("DEBUG", colored::Color::Blue),
            json!({"name": name.as_ref(), "id": id})
        );
        id
    }

    /// Registers a queue and returns the shared handle actors read from and
    /// write to.
    pub fn add_queue<Q>(&mut self, queue: Q) -> QueueRef
    where
        Q: RequestQueue + 'static,
    {
        let id = self.sim_state.borrow_mut().register_queue();
        QueueRef::new(id, Rc::new(RefCell::new(queue)), self.sim_state.clone())
    }

    /// Returns the current virtual time.
    pub fn time(&self) -> f64 {
        self.sim_state.borrow().time()
    }

    /// Returns a random float in the range _[0, 1)_ using the
    /// simulation-wide random number generator.
    pub fn rand(&mut self) -> f64 {
        self.sim_state.borrow_mut().rand()
    }

    /// Returns a random number in the specified range using the
    /// simulation-wide random number generator.
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.sim_state.borrow_mut().gen_range(range)
    }

    /// Returns a random value from the specified distribution using the
    /// simulation-wide random number generator.
    pub fn sample_from_distribution<T, Dist: Distribution<T>>(&mut self, dist: &Dist) -> T {
        self.sim_state.borrow_mut().sample_from_distribution(dist)
    }

    /// Returns the total number of scheduled wakeups, cancelled ones included.
    pub fn wakeup_count(&self) -> u64 {
        self.sim_state.borrow().wakeup_count()
    }

    /// Performs a single step through the simulation: pops the earliest
    /// pending wakeup, advances the virtual clock to it and resumes the
    /// associated actor until its next suspension.
    ///
    /// Returns `false` when no wakeup is pending, i.e. no actor can make
    /// progress.
    pub fn step(&mut self) -> bool {
        let next = self.sim_state.borrow_mut().next_wakeup();
        let Some(wakeup) = next else {
            return false;
        };
        self.sim_state.borrow_mut().begin_resume(&wakeup);
        if log_enabled!(Trace) {
            let name = &self.names[wakeup.actor as usize];
            trace!(
                target: name,
                "[{:.3} {} {}] {}",
                wakeup.time,
                crate::log::get_colored("WAKE", colored::Color::BrightBlack),
                name,
                json!({"cause": wakeup.cause})
            );
        }
        let actor = self.actors[wakeup.actor as usize]
            .clone()
            .unwrap_or_else(|| panic!("no actor registered under id {}", wakeup.actor));
        let suspend = actor.borrow_mut().resume(wakeup.cause);
        self.apply_suspend(wakeup.actor, suspend);
        true
    }

    fn apply_suspend(&mut self, actor: ActorId, suspend: Suspend) {
        let mut state = self.sim_state.borrow_mut();
        match suspend {
            Suspend::Timer(d) => {
                let wakeup_id = state.schedule(actor, WakeCause::Timer, d);
                state.set_status(actor, ActorStatus::Pending(wakeup_id));
            }
            Suspend::Read(queue) => {
                if queue.is_empty() {
                    state.park_reader(queue.id(), actor);
                    state.set_status(actor, ActorStatus::ReadBlocked(queue.id()));
                } else {
                    // The element is already there: complete the read at the
                    // current instant without parking.
                    let wakeup_id = state.schedule(actor, WakeCause::QueueReady, 0.);
                    state.set_status(actor, ActorStatus::Pending(wakeup_id));
                }
            }
            Suspend::TimedRead(queue, d) => {
                if !queue.is_empty() {
                    let wakeup_id = state.schedule(actor, WakeCause::QueueReady, 0.);
                    state.set_status(actor, ActorStatus::Pending(wakeup_id));
                } else {
                    let timer = if d >= 0. {
                        Some(state.schedule(actor, WakeCause::Timer, d))
                    } else {
                        None
                    };
                    state.park_reader(queue.id(), actor);
                    state.set_status(actor, ActorStatus::TimedReadBlocked { queue: queue.id(), timer });
                }
            }
            Suspend::Halt => state.set_status(actor, ActorStatus::Halted),
        }
    }

    /// Steps through the simulation until the next wakeup lies beyond the
    /// given virtual-time budget or no actor can make progress, then
    /// advances the clock to exactly `current time + duration`.
    pub fn run(&mut self, duration: f64) {
        let end = self.time() + duration;
        loop {
            let next = self.sim_state.borrow_mut().peek_time();
            match next {
                Some(t) if t <= end => {
                    self.step();
                }
                _ => break,
            }
        }
        self.sim_state.borrow_mut().advance_to(end);
    }

    /// Steps through the simulation until there are no pending wakeups left.
    pub fn step_until_no_events(&mut self) {
        while self.step() {}
    }
}
