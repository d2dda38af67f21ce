use std::cell::RefCell;
use std::rc::Rc;

use schedsim_core::{log_trace, Actor, ActorContext, QueueRef, Request, Suspend, WakeCause};

use crate::stats::RequestDrain;

fn color_factor(req: &Request, slow_color: u8) -> f64 {
    match req.color() {
        Some(color) if color == slow_color => 2.,
        _ => 1.,
    }
}

/// First stage of the bounded pipeline: serves requests and forwards them
/// downstream while the output queue has room, terminating them otherwise.
///
/// Color 1 requests are served at twice their service time.
pub struct BoundedForwardProcessor {
    ctx: ActorContext,
    in_queue: QueueRef,
    out_queue: QueueRef,
    drain: Rc<RefCell<dyn RequestDrain>>,
    bound: usize,
    serving: Option<Request>,
}

impl BoundedForwardProcessor {
    /// Creates a stage forwarding into `out_queue` while it holds fewer than
    /// `bound` requests.
    pub fn new(
        ctx: ActorContext,
        in_queue: &QueueRef,
        out_queue: &QueueRef,
        drain: Rc<RefCell<dyn RequestDrain>>,
        bound: usize,
    ) -> Self {
        Self {
            ctx,
            in_queue: in_queue.clone(),
            out_queue: out_queue.clone(),
            drain,
            bound,
            serving: None,
        }
    }
}

impl Actor for BoundedForwardProcessor {
    fn resume(&mut self, _cause: WakeCause) -> Suspend {
        if let Some(req) = self.serving.take() {
            if self.out_queue.len() < self.bound {
                self.out_queue.push(req);
            } else {
                log_trace!(self.ctx, "downstream queue full, terminating request");
                self.drain.borrow_mut().terminate(req);
            }
        }
        match self.in_queue.try_take() {
            Some(req) => {
                let busy = color_factor(&req, 1) * req.service_time();
                self.serving = Some(req);
                Suspend::Timer(busy)
            }
            None => Suspend::read(&self.in_queue),
        }
    }
}

/// Terminal stage of the bounded pipeline: serves requests and always hands
/// them to the drain.
///
/// Color 0 requests are served at twice their service time.
pub struct BoundedSinkProcessor {
    ctx: ActorContext,
    in_queue: QueueRef,
    drain: Rc<RefCell<dyn RequestDrain>>,
    serving: Option<Request>,
}

impl BoundedSinkProcessor {
    /// Creates a terminal stage reading from `in_queue`.
    pub fn new(ctx: ActorContext, in_queue: &QueueRef, drain: Rc<RefCell<dyn RequestDrain>>) -> Self {
        Self {
            ctx,
            in_queue: in_queue.clone(),
            drain,
            serving: None,
        }
    }
}

impl Actor for BoundedSinkProcessor {
    fn resume(&mut self, _cause: WakeCause) -> Suspend {
        if let Some(req) = self.serving.take() {
            log_trace!(self.ctx, "completed request after {:.3}", req.delay(self.ctx.time()));
            self.drain.borrow_mut().terminate(req);
        }
        match self.in_queue.try_take() {
            Some(req) => {
                let busy = color_factor(&req, 0) * req.service_time();
                self.serving = Some(req);
                Suspend::Timer(busy)
            }
            None => Suspend::read(&self.in_queue),
        }
    }
}
