use std::cell::RefCell;
use std::rc::Rc;

use schedsim_core::{log_trace, Actor, ActorContext, QueueRef, Request, Suspend, WakeCause};

use crate::stats::RequestDrain;

/// Time-sharing processor: serves each request for at most one quantum and
/// re-enqueues it at the tail of its own input queue when unfinished. The
/// context-switch cost is charged on every dispatch, not just completions.
///
/// Fed from a priority queue ordered by remaining service time this becomes
/// quantum-bounded SRPT: the re-enqueued request sorts ahead of requests
/// with more remaining work, so no separate state machine is needed.
pub struct TsProcessor {
    ctx: ActorContext,
    in_queue: QueueRef,
    drain: Rc<RefCell<dyn RequestDrain>>,
    quantum: f64,
    ctx_cost: f64,
    serving: Option<Request>,
}

impl TsProcessor {
    /// Creates a processor granting slices of the given quantum.
    pub fn new(
        ctx: ActorContext,
        in_queue: &QueueRef,
        drain: Rc<RefCell<dyn RequestDrain>>,
        quantum: f64,
        ctx_cost: f64,
    ) -> Self {
        assert!(quantum > 0., "quantum must be positive: {}", quantum);
        Self {
            ctx,
            in_queue: in_queue.clone(),
            drain,
            quantum,
            ctx_cost,
            serving: None,
        }
    }
}

impl Actor for TsProcessor {
    fn resume(&mut self, _cause: WakeCause) -> Suspend {
        if let Some(mut req) = self.serving.take() {
            // The dispatch decision is reproducible here: remaining service
            // time does not change while the slice runs.
            if req.service_time() <= self.quantum {
                log_trace!(self.ctx, "completed request after {:.3}", req.delay(self.ctx.time()));
                self.drain.borrow_mut().terminate(req);
            } else {
                req.sub_service_time(self.quantum);
                self.in_queue.push(req);
            }
        }
        match self.in_queue.try_take() {
            Some(req) => {
                let slice = req.service_time().min(self.quantum) + self.ctx_cost;
                self.serving = Some(req);
                Suspend::Timer(slice)
            }
            None => Suspend::read(&self.in_queue),
        }
    }
}
