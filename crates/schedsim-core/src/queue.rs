//! FIFO and priority queue primitives shared between actors.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::rc::Rc;

use crate::request::Request;
use crate::state::SimulationState;

/// Queue identifier.
pub type QueueId = u32;

/// The two-method contract every request queue satisfies.
pub trait RequestQueue {
    /// Adds a request to the queue.
    fn enqueue(&mut self, req: Request);
    /// Removes and returns the next request.
    ///
    /// Dequeueing from an empty queue is a programming error and panics;
    /// callers either check [`len`](RequestQueue::len) or suspend through
    /// the engine.
    fn dequeue(&mut self) -> Request;
    /// Number of queued requests.
    fn len(&self) -> usize;
    /// Whether the queue holds no requests.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Strict insertion-order queue with O(1) head removal and tail insertion.
#[derive(Default)]
pub struct FifoQueue {
    items: VecDeque<Request>,
}

impl FifoQueue {
    /// Creates an empty FIFO queue.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RequestQueue for FifoQueue {
    fn enqueue(&mut self, req: Request) {
        self.items.push_back(req);
    }

    fn dequeue(&mut self) -> Request {
        self.items.pop_front().expect("dequeue from empty FIFO queue")
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

struct HeapEntry {
    req: Request,
    seq: u64,
}

// Min-heap on remaining service time; ties broken by earlier creation time
// (arrival order), then by insertion sequence.
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .req
            .service_time()
            .total_cmp(&self.req.service_time())
            .then(other.req.init_time().total_cmp(&self.req.init_time()))
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for HeapEntry {}

/// Min-heap queue ordered by the remaining service time exposed by each
/// request, with ties broken by earlier creation time.
#[derive(Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<HeapEntry>,
    seq: u64,
}

impl PriorityQueue {
    /// Creates an empty priority queue.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RequestQueue for PriorityQueue {
    fn enqueue(&mut self, req: Request) {
        self.heap.push(HeapEntry { req, seq: self.seq });
        self.seq += 1;
    }

    fn dequeue(&mut self) -> Request {
        self.heap.pop().expect("dequeue from empty priority queue").req
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Shared handle to a queue registered with a simulation.
///
/// Queues are shared by one producer and one or more consumers; a write
/// wakes the first consumer parked on the queue at the instant of the write.
#[derive(Clone)]
pub struct QueueRef {
    id: QueueId,
    inner: Rc<RefCell<dyn RequestQueue>>,
    state: Rc<RefCell<SimulationState>>,
}

impl QueueRef {
    pub(crate) fn new(
        id: QueueId,
        inner: Rc<RefCell<dyn RequestQueue>>,
        state: Rc<RefCell<SimulationState>>,
    ) -> Self {
        Self { id, inner, state }
    }

    /// The queue identifier assigned at registration.
    pub fn id(&self) -> QueueId {
        self.id
    }

    /// Number of queued requests.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether the queue holds no requests.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Enqueues a request and wakes the first parked reader, if any, at the
    /// current virtual time. Never suspends the writer.
    pub fn push(&self, req: Request) {
        self.inner.borrow_mut().enqueue(req);
        self.state.borrow_mut().notify_queue(self.id);
    }

    /// Removes and returns the next request without suspending, or `None`
    /// if the queue is empty.
    pub fn try_take(&self) -> Option<Request> {
        let mut queue = self.inner.borrow_mut();
        if queue.is_empty() {
            None
        } else {
            Some(queue.dequeue())
        }
    }
}
