//! Accessing the engine from components.

use std::cell::RefCell;
use std::rc::Rc;

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::prelude::Distribution;

use crate::actor::ActorId;
use crate::state::SimulationState;

/// A facade giving a component access to the virtual clock and the
/// simulation-wide random number generator.
#[derive(Clone)]
pub struct ActorContext {
    id: ActorId,
    name: String,
    sim_state: Rc<RefCell<SimulationState>>,
}

impl ActorContext {
    pub(crate) fn new(id: ActorId, name: &str, sim_state: Rc<RefCell<SimulationState>>) -> Self {
        Self {
            id,
            name: name.to_owned(),
            sim_state,
        }
    }

    /// Identifier of the component associated with this context.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Name of the component associated with this context.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current virtual time. Constant throughout one execution slice.
    pub fn time(&self) -> f64 {
        self.sim_state.borrow().time()
    }

    /// Random float in the range _[0, 1)_ from the simulation-wide generator.
    pub fn rand(&self) -> f64 {
        self.sim_state.borrow_mut().rand()
    }

    /// Random number in the specified range from the simulation-wide generator.
    pub fn gen_range<T, R>(&self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.sim_state.borrow_mut().gen_range(range)
    }

    /// Random value from the specified distribution drawn through the
    /// simulation-wide generator.
    pub fn sample_from_distribution<T, Dist: Distribution<T>>(&self, dist: &Dist) -> T {
        self.sim_state.borrow_mut().sample_from_distribution(dist)
    }
}
