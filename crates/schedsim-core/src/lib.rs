#![warn(missing_docs)]
#![doc = include_str!("../readme.md")]

pub mod actor;
pub mod context;
pub mod log;
pub mod queue;
pub mod request;
pub mod simulation;
mod state;
pub mod wakeup;

pub use colored;

pub use actor::{Actor, ActorId, Suspend};
pub use context::ActorContext;
pub use queue::{FifoQueue, PriorityQueue, QueueId, QueueRef, RequestQueue};
pub use request::{Request, RequestKind};
pub use simulation::Simulation;
pub use wakeup::{WakeCause, Wakeup, WakeupId};
