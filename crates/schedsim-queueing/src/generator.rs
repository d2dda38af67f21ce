//! Request sources.

use rand_distr::Exp;
use schedsim_core::{log_trace, Actor, ActorContext, QueueRef, Request, RequestKind, Suspend, WakeCause};

use crate::distribution::ServiceDistribution;

/// Chooses the request variant a generator produces.
pub trait RequestCreator {
    /// Builds a request created at the current virtual time.
    fn new_request(&self, service_time: f64, ctx: &ActorContext) -> Request;
}

/// Creates plain requests.
pub struct PlainRequestCreator;

impl RequestCreator for PlainRequestCreator {
    fn new_request(&self, service_time: f64, ctx: &ActorContext) -> Request {
        Request::new(ctx.time(), service_time)
    }
}

/// Creates requests that account for work stealing.
pub struct StealableRequestCreator;

impl RequestCreator for StealableRequestCreator {
    fn new_request(&self, service_time: f64, ctx: &ActorContext) -> Request {
        Request::with_kind(ctx.time(), service_time, RequestKind::Stealable { stolen: false })
    }
}

/// Creates requests that carry queue-length observations.
pub struct MonitorRequestCreator;

impl RequestCreator for MonitorRequestCreator {
    fn new_request(&self, service_time: f64, ctx: &ActorContext) -> Request {
        Request::with_kind(
            ctx.time(),
            service_time,
            RequestKind::Monitor {
                dispatch_len: 0,
                completion_len: 0,
            },
        )
    }
}

/// Creates requests with a random color in {0, 1}.
pub struct ColoredRequestCreator;

impl RequestCreator for ColoredRequestCreator {
    fn new_request(&self, service_time: f64, ctx: &ActorContext) -> Request {
        let color = ctx.gen_range(0..2u8);
        Request::with_kind(ctx.time(), service_time, RequestKind::Colored { color })
    }
}

/// An actor producing requests with service times drawn from the configured
/// distribution, at exponential interarrival times.
///
/// With several outbound queues the target is picked uniformly at random per
/// request.
pub struct Generator {
    ctx: ActorContext,
    out_queues: Vec<QueueRef>,
    creator: Box<dyn RequestCreator>,
    service: ServiceDistribution,
    interarrival: Exp<f64>,
}

impl Generator {
    /// Creates a generator with the given interarrival rate and service-time
    /// distribution.
    pub fn new(
        ctx: ActorContext,
        lambda: f64,
        service: ServiceDistribution,
        creator: Box<dyn RequestCreator>,
    ) -> Self {
        let interarrival =
            Exp::new(lambda).unwrap_or_else(|e| panic!("invalid interarrival rate {}: {:?}", lambda, e));
        Self {
            ctx,
            out_queues: Vec::new(),
            creator,
            service,
            interarrival,
        }
    }

    /// Attaches an outbound queue.
    pub fn add_out_queue(&mut self, queue: &QueueRef) {
        self.out_queues.push(queue.clone());
    }
}

impl Actor for Generator {
    fn resume(&mut self, _cause: WakeCause) -> Suspend {
        assert!(
            !self.out_queues.is_empty(),
            "generator {} has no outbound queue",
            self.ctx.name()
        );
        let service_time = self.ctx.sample_from_distribution(&self.service);
        let req = self.creator.new_request(service_time, &self.ctx);
        let target = if self.out_queues.len() > 1 {
            self.ctx.gen_range(0..self.out_queues.len())
        } else {
            0
        };
        log_trace!(self.ctx, "produced request with service time {:.3}", service_time);
        self.out_queues[target].push(req);
        Suspend::Timer(self.ctx.sample_from_distribution(&self.interarrival))
    }
}
