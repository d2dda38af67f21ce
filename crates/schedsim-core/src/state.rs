use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::mem;

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::prelude::*;
use rand_pcg::Pcg64;

use crate::actor::ActorId;
use crate::queue::QueueId;
use crate::wakeup::{WakeCause, Wakeup, WakeupId};

// Where a registered actor stands between resumptions. At any moment an
// actor is either executing, holds exactly one pending wakeup, or is parked
// on an empty inbound queue.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ActorStatus {
    Pending(WakeupId),
    ReadBlocked(QueueId),
    TimedReadBlocked { queue: QueueId, timer: Option<WakeupId> },
    Running,
    Halted,
}

pub(crate) struct SimulationState {
    clock: f64,
    rand: Pcg64,
    wakeups: BinaryHeap<Wakeup>,
    canceled: HashSet<WakeupId>,
    wakeup_count: u64,
    statuses: Vec<ActorStatus>,
    waiters: Vec<VecDeque<ActorId>>,
}

impl SimulationState {
    pub fn new(seed: u64) -> Self {
        Self {
            clock: 0.,
            rand: Pcg64::seed_from_u64(seed),
            wakeups: BinaryHeap::new(),
            canceled: HashSet::new(),
            wakeup_count: 0,
            statuses: Vec::new(),
            waiters: Vec::new(),
        }
    }

    pub fn time(&self) -> f64 {
        self.clock
    }

    pub fn advance_to(&mut self, time: f64) {
        assert!(
            time >= self.clock,
            "virtual time went backwards: {} -> {}",
            self.clock,
            time
        );
        self.clock = time;
    }

    pub fn rand(&mut self) -> f64 {
        self.rand.gen_range(0.0..1.0)
    }

    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rand.gen_range(range)
    }

    pub fn sample_from_distribution<T, Dist: Distribution<T>>(&mut self, dist: &Dist) -> T {
        dist.sample(&mut self.rand)
    }

    pub fn wakeup_count(&self) -> u64 {
        self.wakeup_count
    }

    pub fn register_actor(&mut self) -> ActorId {
        let id = self.statuses.len() as ActorId;
        self.statuses.push(ActorStatus::Halted);
        id
    }

    pub fn register_queue(&mut self) -> QueueId {
        let id = self.waiters.len() as QueueId;
        self.waiters.push(VecDeque::new());
        id
    }

    pub fn set_status(&mut self, actor: ActorId, status: ActorStatus) {
        self.statuses[actor as usize] = status;
    }

    pub fn park_reader(&mut self, queue: QueueId, actor: ActorId) {
        self.waiters[queue as usize].push_back(actor);
    }

    pub fn schedule(&mut self, actor: ActorId, cause: WakeCause, delay: f64) -> WakeupId {
        assert!(delay >= 0., "negative wait duration: {}", delay);
        let id = self.wakeup_count;
        self.wakeup_count += 1;
        self.wakeups.push(Wakeup {
            id,
            time: self.clock + delay,
            actor,
            cause,
        });
        id
    }

    pub fn cancel(&mut self, id: WakeupId) {
        self.canceled.insert(id);
    }

    // Pops the earliest live wakeup and advances the clock to it.
    pub fn next_wakeup(&mut self) -> Option<Wakeup> {
        while let Some(wakeup) = self.wakeups.pop() {
            if self.canceled.remove(&wakeup.id) {
                continue;
            }
            self.advance_to(wakeup.time);
            return Some(wakeup);
        }
        None
    }

    pub fn peek_time(&mut self) -> Option<f64> {
        loop {
            let (id, time) = match self.wakeups.peek() {
                Some(wakeup) => (wakeup.id, wakeup.time),
                None => return None,
            };
            if self.canceled.remove(&id) {
                self.wakeups.pop();
            } else {
                return Some(time);
            }
        }
    }

    // Clears the suspension bookkeeping behind a popped wakeup. Resuming an
    // actor that holds no matching suspension is a programming error.
    pub fn begin_resume(&mut self, wakeup: &Wakeup) {
        let status = mem::replace(&mut self.statuses[wakeup.actor as usize], ActorStatus::Running);
        match status {
            ActorStatus::Pending(id) if id == wakeup.id => {}
            ActorStatus::TimedReadBlocked { queue, timer: Some(id) } if id == wakeup.id => {
                // The timer fired first: leave the queue's waiter list.
                let waiters = &mut self.waiters[queue as usize];
                if let Some(pos) = waiters.iter().position(|&a| a == wakeup.actor) {
                    waiters.remove(pos);
                }
            }
            other => panic!(
                "actor {} resumed without a pending wakeup (status {:?}, wakeup {:?})",
                wakeup.actor, other, wakeup
            ),
        }
    }

    // Wakes the first parked reader at the current virtual time. Readers
    // re-check the queue on resumption, so a same-instant competitor taking
    // the element is harmless.
    pub fn notify_queue(&mut self, queue: QueueId) {
        let Some(actor) = self.waiters[queue as usize].pop_front() else {
            return;
        };
        match self.statuses[actor as usize].clone() {
            ActorStatus::ReadBlocked(q) => debug_assert_eq!(q, queue),
            ActorStatus::TimedReadBlocked { queue: q, timer } => {
                debug_assert_eq!(q, queue);
                if let Some(timer) = timer {
                    self.cancel(timer);
                }
            }
            other => panic!(
                "queue {} waiter {} is not blocked on it (status {:?})",
                queue, actor, other
            ),
        }
        let id = self.schedule(actor, WakeCause::QueueReady, 0.);
        self.statuses[actor as usize] = ActorStatus::Pending(id);
    }
}
