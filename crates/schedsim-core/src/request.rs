//! Request lifetime data.

/// Capability tag distinguishing the request variants produced by generators.
///
/// Processors that care about a variant dispatch on the tag; everyone else
/// treats the request as the base case.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    /// No extra state.
    Plain,
    /// Tracks whether the request was moved between worker queues.
    Stealable {
        /// Set when a work-stealing processor takes the request from a
        /// sibling queue.
        stolen: bool,
    },
    /// Carries queue-length observations taken at dispatch and completion.
    Monitor {
        /// Inbound queue length observed when service starts.
        dispatch_len: usize,
        /// Inbound queue length observed when service completes.
        completion_len: usize,
    },
    /// Carries a small color tag read by bounded-buffer policies.
    Colored {
        /// The color tag.
        color: u8,
    },
}

/// A unit of work flowing from a generator through a processor to a drain.
#[derive(Debug, Clone)]
pub struct Request {
    init_time: f64,
    service_time: f64,
    original_service_time: f64,
    kind: RequestKind,
}

impl Request {
    /// Creates a plain request with the given creation time and service demand.
    pub fn new(init_time: f64, service_time: f64) -> Self {
        Self::with_kind(init_time, service_time, RequestKind::Plain)
    }

    /// Creates a request of the given variant.
    pub fn with_kind(init_time: f64, service_time: f64, kind: RequestKind) -> Self {
        assert!(service_time >= 0., "negative service time: {}", service_time);
        Self {
            init_time,
            service_time,
            original_service_time: service_time,
            kind,
        }
    }

    /// Virtual time at which the request was created.
    pub fn init_time(&self) -> f64 {
        self.init_time
    }

    /// Remaining service demand. Never negative.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    /// Service demand the request was created with.
    pub fn original_service_time(&self) -> f64 {
        self.original_service_time
    }

    /// Consumes `d` units of service, saturating at zero.
    pub fn sub_service_time(&mut self, d: f64) {
        self.service_time = (self.service_time - d).max(0.);
    }

    /// Time the request has spent in the system as of `now`.
    pub fn delay(&self, now: f64) -> f64 {
        now - self.init_time
    }

    /// The variant tag.
    pub fn kind(&self) -> &RequestKind {
        &self.kind
    }

    /// Mutable access to the variant tag.
    pub fn kind_mut(&mut self) -> &mut RequestKind {
        &mut self.kind
    }

    /// Flags a stealable request as stolen. No-op for other variants.
    pub fn mark_stolen(&mut self) {
        if let RequestKind::Stealable { stolen } = &mut self.kind {
            *stolen = true;
        }
    }

    /// Whether the request was moved between worker queues.
    pub fn stolen(&self) -> bool {
        matches!(self.kind, RequestKind::Stealable { stolen: true })
    }

    /// Color tag of a colored request.
    pub fn color(&self) -> Option<u8> {
        match self.kind {
            RequestKind::Colored { color } => Some(color),
            _ => None,
        }
    }
}
