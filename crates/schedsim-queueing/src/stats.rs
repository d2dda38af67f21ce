//! Statistics drains terminating requests.

use schedsim_core::{ActorContext, Request, RequestKind};

const PERCENTILES: [f64; 4] = [0.5, 0.9, 0.95, 0.99];

const BUCKET_COUNT: usize = 100_000;
const GRANULARITY: f64 = 0.01;

/// The terminal sink processors hand completed requests to.
pub trait RequestDrain {
    /// Records the request's terminal statistics. The request is consumed;
    /// records are append-only until the run ends.
    fn terminate(&mut self, req: Request);
}

/// Per-terminated-request record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestRecord {
    /// Service time the request was created with.
    pub service_time: f64,
    /// Time spent in the system.
    pub delay: f64,
}

/// Keeps every record and computes exact statistics over the full set.
pub struct AllKeeper {
    name: String,
    ctx: ActorContext,
    records: Vec<RequestRecord>,
    stolen_count: usize,
}

impl AllKeeper {
    /// Creates a named keeper.
    pub fn new<S: Into<String>>(name: S, ctx: ActorContext) -> Self {
        Self {
            name: name.into(),
            ctx,
            records: Vec::new(),
            stolen_count: 0,
        }
    }

    /// Number of terminated requests.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Number of terminated requests that were moved between worker queues.
    pub fn stolen_count(&self) -> usize {
        self.stolen_count
    }

    /// All records in termination order.
    pub fn records(&self) -> &[RequestRecord] {
        &self.records
    }

    /// Mean delay over all records.
    pub fn mean_delay(&self) -> f64 {
        let sum: f64 = self.records.iter().map(|r| r.delay).sum();
        sum / self.records.len() as f64
    }

    /// Standard deviation of delay.
    pub fn delay_stddev(&self) -> f64 {
        let mean = self.mean_delay();
        let square_sum: f64 = self.records.iter().map(|r| r.delay * r.delay).sum();
        (square_sum / self.records.len() as f64 - mean * mean).sqrt()
    }

    /// Delay percentiles {50, 90, 95, 99}.
    pub fn delay_percentiles(&self) -> [f64; 4] {
        Self::percentiles_of(self.records.iter().map(|r| r.delay).collect())
    }

    /// Mean slowdown (delay over original service time).
    pub fn mean_slowdown(&self) -> f64 {
        let sum: f64 = self.records.iter().map(|r| r.delay / r.service_time).sum();
        sum / self.records.len() as f64
    }

    /// Standard deviation of slowdown.
    pub fn slowdown_stddev(&self) -> f64 {
        let mean = self.mean_slowdown();
        let square_sum: f64 = self
            .records
            .iter()
            .map(|r| {
                let s = r.delay / r.service_time;
                s * s
            })
            .sum();
        (square_sum / self.records.len() as f64 - mean * mean).sqrt()
    }

    /// Slowdown percentiles {50, 90, 95, 99}.
    pub fn slowdown_percentiles(&self) -> [f64; 4] {
        Self::percentiles_of(self.records.iter().map(|r| r.delay / r.service_time).collect())
    }

    /// Terminated requests per unit of virtual time.
    pub fn throughput(&self) -> f64 {
        self.records.len() as f64 / self.ctx.time()
    }

    fn percentiles_of(mut values: Vec<f64>) -> [f64; 4] {
        values.sort_by(|a, b| a.total_cmp(b));
        PERCENTILES.map(|p| {
            let index = ((values.len() as f64 * p) as usize).min(values.len() - 1);
            values[index]
        })
    }

    /// Prints the end-of-run statistics block to standard output: the
    /// delay and slowdown rows followed by the per-request CSV section.
    pub fn print_stats(&self) {
        println!("Stats collector: {}", self.name);
        println!("Count\tStolen\tAVG\tSTDDev\t50th\t90th\t95th\t99th\tReqs/time_unit");
        print!(
            "{}\t{}\t{}\t{}\t",
            self.count(),
            self.stolen_count,
            self.mean_delay(),
            self.delay_stddev()
        );
        if !self.records.is_empty() {
            for p in self.delay_percentiles() {
                print!("{}\t", p);
            }
        }
        println!("{}", self.throughput());

        print!("Slowdown\t\t{}\t{}\t", self.mean_slowdown(), self.slowdown_stddev());
        if !self.records.is_empty() {
            for p in self.slowdown_percentiles() {
                print!("{}\t", p);
            }
        }
        println!();

        println!("---DETAILED_LATENCY_VS_SERVICE_TIME_DATA_START---");
        println!("ServiceTime,Delay");
        for record in &self.records {
            println!("{},{}", record.service_time, record.delay);
        }
        println!("---DETAILED_LATENCY_VS_SERVICE_TIME_DATA_END---");
    }
}

impl RequestDrain for AllKeeper {
    fn terminate(&mut self, req: Request) {
        let delay = req.delay(self.ctx.time());
        self.records.push(RequestRecord {
            service_time: req.original_service_time(),
            delay,
        });
        if req.stolen() {
            self.stolen_count += 1;
        }
    }
}

// Fixed-granularity delay histogram; O(1) memory per sample.
struct Histogram {
    granularity: f64,
    buckets: Vec<u64>,
    count: u64,
    min_bucket: usize,
    max_bucket: usize,
    sum: f64,
    square_sum: f64,
}

impl Histogram {
    fn new() -> Self {
        Self {
            granularity: GRANULARITY,
            buckets: vec![0; BUCKET_COUNT],
            count: 0,
            min_bucket: BUCKET_COUNT - 1,
            max_bucket: 0,
            sum: 0.,
            square_sum: 0.,
        }
    }

    fn add_sample(&mut self, sample: f64) {
        assert!(sample >= 0., "negative delay sample: {}", sample);
        let index = ((sample / self.granularity) as usize).min(BUCKET_COUNT - 1);
        self.buckets[index] += 1;
        self.min_bucket = self.min_bucket.min(index);
        self.max_bucket = self.max_bucket.max(index);
        self.count += 1;
        self.sum += sample;
        self.square_sum += sample * sample;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    fn stddev(&self) -> f64 {
        let mean = self.mean();
        (self.square_sum / self.count as f64 - mean * mean).sqrt()
    }

    // Percentiles by linear interpolation within the bucket containing the
    // target rank.
    fn percentiles(&self) -> [f64; 4] {
        let mut result = [0.; 4];
        let mut current = 0;
        let mut seen = 0u64;
        for bucket in self.min_bucket..=self.max_bucket {
            let in_bucket = self.buckets[bucket];
            if in_bucket == 0 {
                continue;
            }
            while current < PERCENTILES.len() {
                let target = PERCENTILES[current] * self.count as f64;
                if (seen + in_bucket) as f64 <= target {
                    break;
                }
                let lower = self.granularity * bucket as f64;
                result[current] = lower + self.granularity * (target - seen as f64) / in_bucket as f64;
                current += 1;
            }
            if current >= PERCENTILES.len() {
                break;
            }
            seen += in_bucket;
        }
        result
    }
}

/// Histogram-backed drain: trades exact percentiles for constant memory per
/// sample on very long runs.
pub struct BookKeeper {
    name: String,
    ctx: ActorContext,
    histogram: Histogram,
}

impl BookKeeper {
    /// Creates a named keeper.
    pub fn new<S: Into<String>>(name: S, ctx: ActorContext) -> Self {
        Self {
            name: name.into(),
            ctx,
            histogram: Histogram::new(),
        }
    }

    /// Number of terminated requests.
    pub fn count(&self) -> u64 {
        self.histogram.count
    }

    /// Mean delay.
    pub fn mean_delay(&self) -> f64 {
        self.histogram.mean()
    }

    /// Standard deviation of delay.
    pub fn delay_stddev(&self) -> f64 {
        self.histogram.stddev()
    }

    /// Approximate delay percentiles {50, 90, 95, 99}.
    pub fn delay_percentiles(&self) -> [f64; 4] {
        self.histogram.percentiles()
    }

    /// Prints the end-of-run statistics row to standard output.
    pub fn print_stats(&self) {
        println!("Stats collector: {}", self.name);
        println!("Count\tAVG\tSTDDev\t50th\t90th\t95th\t99th\tReqs/time_unit");
        print!("{}\t{}\t{}\t", self.count(), self.mean_delay(), self.delay_stddev());
        for p in self.delay_percentiles() {
            print!("{}\t", p);
        }
        println!("{}", self.count() as f64 / self.ctx.time());
    }
}

impl RequestDrain for BookKeeper {
    fn terminate(&mut self, req: Request) {
        self.histogram.add_sample(req.delay(self.ctx.time()));
    }
}

/// Drain recording per-request delays together with the queue-length
/// observations carried by monitor requests.
pub struct MonitorKeeper {
    ctx: ActorContext,
    delays: Vec<f64>,
    dispatch_lens: Vec<usize>,
    completion_lens: Vec<usize>,
}

impl MonitorKeeper {
    /// Creates a keeper.
    pub fn new(ctx: ActorContext) -> Self {
        Self {
            ctx,
            delays: Vec::new(),
            dispatch_lens: Vec::new(),
            completion_lens: Vec::new(),
        }
    }

    /// Recorded delays in termination order.
    pub fn delays(&self) -> &[f64] {
        &self.delays
    }

    /// Queue lengths observed at dispatch.
    pub fn dispatch_lens(&self) -> &[usize] {
        &self.dispatch_lens
    }

    /// Queue lengths observed at completion.
    pub fn completion_lens(&self) -> &[usize] {
        &self.completion_lens
    }

    /// Prints the per-request latency and queue-length table.
    pub fn print_stats(&self) {
        println!("#Latency\tEntrace Queue\tExit Queue");
        let lens = self.dispatch_lens.iter().zip(&self.completion_lens);
        for (delay, (dispatch, completion)) in self.delays.iter().zip(lens) {
            println!("{}\t{}\t{}", delay, dispatch, completion);
        }
    }
}

impl RequestDrain for MonitorKeeper {
    fn terminate(&mut self, req: Request) {
        self.delays.push(req.delay(self.ctx.time()));
        if let RequestKind::Monitor {
            dispatch_len,
            completion_len,
        } = req.kind()
        {
            self.dispatch_lens.push(*dispatch_len);
            self.completion_lens.push(*completion_len);
        }
    }
}
