//! Actors and their cooperative suspension primitives.

use crate::queue::QueueRef;
use crate::wakeup::WakeCause;

/// Actor identifier.
pub type ActorId = u32;

/// The suspension an actor returns control to the event loop with.
///
/// These are the only points at which an actor yields; between resumptions it
/// holds the virtual CPU and observes a constant clock.
#[derive(Clone)]
pub enum Suspend {
    /// Suspend for exactly the given duration of virtual time (`wait(d)`).
    /// A zero duration yields behind wakeups already scheduled at the
    /// current instant.
    Timer(f64),
    /// Park until the queue receives an element (`read_in_queue` on an
    /// empty queue). If the queue is already non-empty the actor is resumed
    /// at the current instant instead of parking.
    Read(QueueRef),
    /// Interruptible wait (`wait_interruptible(d)`): resume with
    /// [`WakeCause::Timer`] after the given duration, or earlier with
    /// [`WakeCause::QueueReady`] if the queue receives an element first, in
    /// which case the timer is cancelled. A negative duration is the
    /// sentinel for "no timer, wait indefinitely".
    TimedRead(QueueRef, f64),
    /// The actor is finished and will never be resumed again.
    Halt,
}

impl Suspend {
    /// Shorthand for [`Suspend::Read`] on a borrowed queue handle.
    pub fn read(queue: &QueueRef) -> Self {
        Suspend::Read(queue.clone())
    }

    /// Shorthand for [`Suspend::TimedRead`] on a borrowed queue handle.
    pub fn timed_read(queue: &QueueRef, d: f64) -> Self {
        Suspend::TimedRead(queue.clone(), d)
    }
}

/// A long-running producer or consumer driven by the event loop.
///
/// The body of an actor is written as an explicit state machine: every call
/// to [`resume`](Actor::resume) makes as much progress as possible at the
/// current virtual time and returns the next suspension.
pub trait Actor {
    /// Resumes the actor, telling it why it was woken.
    fn resume(&mut self, cause: WakeCause) -> Suspend;
}
