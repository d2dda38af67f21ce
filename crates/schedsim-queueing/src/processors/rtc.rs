use std::cell::RefCell;
use std::rc::Rc;

use schedsim_core::{
    log_trace, Actor, ActorContext, QueueRef, Request, RequestKind, Suspend, WakeCause,
};

use crate::stats::RequestDrain;

/// Run-to-completion processor: serves requests strictly in arrival order,
/// without preemption.
pub struct RtcProcessor {
    ctx: ActorContext,
    in_queue: QueueRef,
    drain: Rc<RefCell<dyn RequestDrain>>,
    ctx_cost: f64,
    serving: Option<Request>,
}

impl RtcProcessor {
    /// Creates a processor reading from `in_queue`.
    pub fn new(
        ctx: ActorContext,
        in_queue: &QueueRef,
        drain: Rc<RefCell<dyn RequestDrain>>,
        ctx_cost: f64,
    ) -> Self {
        Self {
            ctx,
            in_queue: in_queue.clone(),
            drain,
            ctx_cost,
            serving: None,
        }
    }
}

impl Actor for RtcProcessor {
    fn resume(&mut self, _cause: WakeCause) -> Suspend {
        if let Some(mut req) = self.serving.take() {
            if let RequestKind::Monitor { completion_len, .. } = req.kind_mut() {
                *completion_len = self.in_queue.len();
            }
            log_trace!(self.ctx, "completed request after {:.3}", req.delay(self.ctx.time()));
            self.drain.borrow_mut().terminate(req);
        }
        match self.in_queue.try_take() {
            Some(mut req) => {
                if let RequestKind::Monitor { dispatch_len, .. } = req.kind_mut() {
                    *dispatch_len = self.in_queue.len();
                }
                let busy = req.service_time() + self.ctx_cost;
                self.serving = Some(req);
                Suspend::Timer(busy)
            }
            None => Suspend::read(&self.in_queue),
        }
    }
}
