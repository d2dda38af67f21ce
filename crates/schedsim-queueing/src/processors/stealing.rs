use std::cell::RefCell;
use std::rc::Rc;

use schedsim_core::{log_trace, Actor, ActorContext, QueueRef, Request, Suspend, WakeCause};

use crate::stats::RequestDrain;

/// Run-to-completion worker over a per-core queue that steals from sibling
/// queues when its own runs dry.
///
/// Stolen requests get their `stolen` flag set so drains can tally steals.
/// The worker parks on its own queue only; sibling arrivals are picked up
/// the next time it goes idle.
pub struct StealingProcessor {
    ctx: ActorContext,
    own_queue: QueueRef,
    siblings: Vec<QueueRef>,
    drain: Rc<RefCell<dyn RequestDrain>>,
    ctx_cost: f64,
    serving: Option<Request>,
}

impl StealingProcessor {
    /// Creates a worker bound to `own_queue`.
    pub fn new(
        ctx: ActorContext,
        own_queue: &QueueRef,
        drain: Rc<RefCell<dyn RequestDrain>>,
        ctx_cost: f64,
    ) -> Self {
        Self {
            ctx,
            own_queue: own_queue.clone(),
            siblings: Vec::new(),
            drain,
            ctx_cost,
            serving: None,
        }
    }

    /// Adds a sibling queue to steal from.
    pub fn add_sibling(&mut self, queue: &QueueRef) {
        self.siblings.push(queue.clone());
    }

    fn take_next(&mut self) -> Option<Request> {
        if let Some(req) = self.own_queue.try_take() {
            return Some(req);
        }
        for queue in &self.siblings {
            if let Some(mut req) = queue.try_take() {
                req.mark_stolen();
                log_trace!(self.ctx, "stole request from queue {}", queue.id());
                return Some(req);
            }
        }
        None
    }
}

impl Actor for StealingProcessor {
    fn resume(&mut self, _cause: WakeCause) -> Suspend {
        if let Some(req) = self.serving.take() {
            self.drain.borrow_mut().terminate(req);
        }
        match self.take_next() {
            Some(req) => {
                let busy = req.service_time() + self.ctx_cost;
                self.serving = Some(req);
                Suspend::Timer(busy)
            }
            None => Suspend::read(&self.own_queue),
        }
    }
}
