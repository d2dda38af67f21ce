use std::cell::RefCell;
use std::rc::Rc;

use schedsim_core::{log_trace, Actor, ActorContext, QueueRef, Request, Suspend, WakeCause};

use crate::stats::RequestDrain;

/// Processor-sharing processor: `workers` workers spread over the
/// in-progress request population.
///
/// Every in-progress request advances at the sharing factor
/// `min(1, workers / concurrent)` per unit of virtual time. The run loop is
/// built on the interruptible wait: the timer is armed for the predicted
/// completion of the request with the least remaining work, and an earlier
/// arrival reshapes the factor and therefore the next timer.
pub struct PsProcessor {
    ctx: ActorContext,
    in_queue: QueueRef,
    drain: Rc<RefCell<dyn RequestDrain>>,
    workers: usize,
    active: Vec<Request>,
    curr: usize,
    prev_time: f64,
}

impl PsProcessor {
    /// Creates a processor sharing `workers` workers.
    pub fn new(
        ctx: ActorContext,
        in_queue: &QueueRef,
        drain: Rc<RefCell<dyn RequestDrain>>,
        workers: usize,
    ) -> Self {
        assert!(workers >= 1, "processor sharing needs at least one worker");
        Self {
            ctx,
            in_queue: in_queue.clone(),
            drain,
            workers,
            active: Vec::new(),
            curr: 0,
            prev_time: 0.,
        }
    }

    fn sharing_factor(&self) -> f64 {
        if self.workers >= self.active.len() {
            1.
        } else {
            self.workers as f64 / self.active.len() as f64
        }
    }

    // Charges the virtual time elapsed since the previous update against
    // every in-progress request, at the factor that was in effect over that
    // interval. Calling this again at an unchanged clock subtracts zero.
    fn update_service_times(&mut self) {
        let now = self.ctx.time();
        let delta = (now - self.prev_time) * self.sharing_factor();
        debug_assert!(delta >= 0.);
        self.prev_time = now;
        for req in &mut self.active {
            req.sub_service_time(delta);
        }
    }

    // Index of the request with the least remaining work; ties go to the
    // first encountered.
    fn min_remaining(&self) -> usize {
        let mut min = 0;
        for (i, req) in self.active.iter().enumerate().skip(1) {
            if req.service_time() < self.active[min].service_time() {
                min = i;
            }
        }
        min
    }
}

impl Actor for PsProcessor {
    fn resume(&mut self, cause: WakeCause) -> Suspend {
        self.update_service_times();
        match cause {
            WakeCause::Timer => {
                // The predicted completion: the current minimum has run dry.
                let req = self.active.remove(self.curr);
                log_trace!(self.ctx, "completed request after {:.3}", req.delay(self.ctx.time()));
                self.drain.borrow_mut().terminate(req);
            }
            WakeCause::QueueReady => {
                if let Some(req) = self.in_queue.try_take() {
                    self.active.push(req);
                }
            }
            WakeCause::Start => {}
        }
        if self.active.is_empty() {
            return Suspend::timed_read(&self.in_queue, -1.);
        }
        self.curr = self.min_remaining();
        let next_completion = self.active[self.curr].service_time() / self.sharing_factor();
        Suspend::timed_read(&self.in_queue, next_completion)
    }
}
