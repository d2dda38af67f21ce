//! Pending wakeups driving actor progression.

use std::cmp::Ordering;

use serde::Serialize;

use crate::actor::ActorId;

/// Wakeup identifier. Wakeups are numbered sequentially starting from 0.
pub type WakeupId = u64;

/// Why an actor is being resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WakeCause {
    /// The initial time-zero resumption right after registration.
    Start,
    /// A timer armed by `wait` or an interruptible wait has expired.
    Timer,
    /// A queue the actor was parked on received an element.
    QueueReady,
}

/// A scheduled resumption of an actor at a point in virtual time.
#[derive(Debug, Clone)]
pub struct Wakeup {
    /// Unique wakeup identifier, assigned in registration order.
    pub id: WakeupId,
    /// Virtual time of the resumption.
    pub time: f64,
    /// The actor to resume.
    pub actor: ActorId,
    /// Why the actor is resumed.
    pub cause: WakeCause,
}

impl Eq for Wakeup {}

impl PartialEq for Wakeup {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

// Earliest time first; ties broken by registration order so that same-instant
// wakeups resume in FIFO order.
impl Ord for Wakeup {
    fn cmp(&self, other: &Self) -> Ordering {
        other.time.total_cmp(&self.time).then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Wakeup {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
