//! Topology assembly and workload resolution for the schedsim CLI.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use sugars::{rc, refcell};

use schedsim_core::{FifoQueue, PriorityQueue, QueueRef, Simulation};
use schedsim_queueing::{
    AllKeeper, BoundedForwardProcessor, BoundedSinkProcessor, ColoredRequestCreator, Generator,
    PlainRequestCreator, PsProcessor, RequestDrain, RtcProcessor, ServiceDistribution,
    StealableRequestCreator, StealingProcessor, TsProcessor,
};

/// Simulation parameters shared by all topologies.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Poisson interarrival rate, requests per microsecond.
    pub lambda: f64,
    /// Service rate, requests per microsecond.
    pub mu: f64,
    /// Virtual-time budget in microseconds.
    pub duration: f64,
    /// Service-time distribution selector.
    pub gen_type: u32,
    /// Processor policy selector.
    pub proc_type: u32,
    /// Time-sharing quantum in microseconds.
    pub quantum: f64,
    /// Number of processor cores.
    pub cores: usize,
    /// Context-switch cost charged per dispatch, in microseconds.
    pub ctx_cost: f64,
    /// Bound of the bounded-queue topology's downstream buffer.
    pub buffer_size: usize,
    /// Path to the CDF workload file, when the CDF generator is selected.
    pub cdf_path: Option<String>,
    /// Seed of the simulation-wide random number generator.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            lambda: 0.005,
            mu: 0.02,
            duration: 10_000_000.,
            gen_type: 0,
            proc_type: 0,
            quantum: 10.,
            cores: 1,
            ctx_cost: 0.,
            buffer_size: 1,
            cdf_path: None,
            seed: 123,
        }
    }
}

/// Resolves a symbolic workload name to the CDF file shipped for it.
/// Unknown names are fatal; the empty name selects no workload.
pub fn workload_path(name: &str) -> Option<String> {
    let path = match name {
        "" => return None,
        "w3" => "homa-size-distributions/Google_AllRPC.txt",
        "w4" => "homa-size-distributions/Facebook_HadoopDist_All.txt",
        "w5" => "homa-size-distributions/DCTCP_MsgSizeDistBytes.txt",
        "GPT3B" => "homa-size-distributions/GPT3B.txt",
        "GPT3_adel" => "homa-size-distributions/GPT3_Adel.txt",
        other => panic!("unknown workload: {}", other),
    };
    Some(path.to_string())
}

fn service_distribution(cfg: &SimConfig) -> ServiceDistribution {
    let mean = 1. / cfg.mu;
    match cfg.gen_type {
        0 => ServiceDistribution::exponential(cfg.mu),
        1 => ServiceDistribution::deterministic(mean),
        2 => ServiceDistribution::bimodal(1., 10. * (mean - 0.9), 0.9),
        3 => ServiceDistribution::bimodal(1., 1000. * (mean - 0.999), 0.999),
        4 => {
            // Bimodal around the mean service time: 90% of jobs are small
            // (a tenth of the mean), the large peak preserves the mean.
            let peak1 = mean / 10.;
            let peak2 = (mean - 0.9 * peak1) / 0.1;
            info!("derived bimodal peaks: {} / {}", peak1, peak2);
            ServiceDistribution::bimodal(peak1, peak2, 0.9)
        }
        5 => {
            let path = cfg
                .cdf_path
                .as_deref()
                .unwrap_or_else(|| panic!("generator type 5 requires a CDF workload"));
            ServiceDistribution::cdf_from_file(path)
        }
        other => panic!("unknown generator type: {}", other),
    }
}

fn new_queue(sim: &mut Simulation, cfg: &SimConfig) -> QueueRef {
    // SRPT relies on a queue ordered by remaining service time.
    if cfg.proc_type == 3 {
        sim.add_queue(PriorityQueue::new())
    } else {
        sim.add_queue(FifoQueue::new())
    }
}

/// Single-generator, multi-processor topology over one shared queue.
pub fn single_queue(cfg: &SimConfig) -> Rc<RefCell<AllKeeper>> {
    let mut sim = Simulation::new(cfg.seed);
    let stats = rc!(refcell!(AllKeeper::new("Main Stats", sim.create_context("stats"))));
    let queue = new_queue(&mut sim, cfg);

    match cfg.proc_type {
        0 => {
            for i in 0..cfg.cores {
                let name = format!("rtc-{}", i);
                let proc = RtcProcessor::new(
                    sim.create_context(&name),
                    &queue,
                    stats.clone() as Rc<RefCell<dyn RequestDrain>>,
                    cfg.ctx_cost,
                );
                sim.add_actor(&name, rc!(refcell!(proc)));
            }
        }
        1 => {
            let proc = PsProcessor::new(
                sim.create_context("ps"),
                &queue,
                stats.clone() as Rc<RefCell<dyn RequestDrain>>,
                cfg.cores,
            );
            sim.add_actor("ps", rc!(refcell!(proc)));
        }
        2 | 3 => {
            for i in 0..cfg.cores {
                let name = format!("ts-{}", i);
                let proc = TsProcessor::new(
                    sim.create_context(&name),
                    &queue,
                    stats.clone() as Rc<RefCell<dyn RequestDrain>>,
                    cfg.quantum,
                    cfg.ctx_cost,
                );
                sim.add_actor(&name, rc!(refcell!(proc)));
            }
        }
        other => panic!("unknown processor type: {}", other),
    }

    let mut generator = Generator::new(
        sim.create_context("generator"),
        cfg.lambda,
        service_distribution(cfg),
        Box::new(PlainRequestCreator),
    );
    generator.add_out_queue(&queue);
    sim.add_actor("generator", rc!(refcell!(generator)));

    info!(
        "cores: {}, service rate: {}, interarrival rate: {}",
        cfg.cores, cfg.mu, cfg.lambda
    );
    sim.run(cfg.duration);
    stats
}

/// Per-core queues with a single generator spraying arrivals uniformly;
/// run-to-completion cores steal from their siblings when idle.
pub fn multi_queue(cfg: &SimConfig) -> Rc<RefCell<AllKeeper>> {
    let mut sim = Simulation::new(cfg.seed);
    let stats = rc!(refcell!(AllKeeper::new("Main Stats", sim.create_context("stats"))));
    let queues: Vec<QueueRef> = (0..cfg.cores).map(|_| new_queue(&mut sim, cfg)).collect();

    match cfg.proc_type {
        0 => {
            for i in 0..cfg.cores {
                let name = format!("worker-{}", i);
                let mut proc = StealingProcessor::new(
                    sim.create_context(&name),
                    &queues[i],
                    stats.clone() as Rc<RefCell<dyn RequestDrain>>,
                    cfg.ctx_cost,
                );
                for (j, queue) in queues.iter().enumerate() {
                    if j != i {
                        proc.add_sibling(queue);
                    }
                }
                sim.add_actor(&name, rc!(refcell!(proc)));
            }
        }
        2 | 3 => {
            for i in 0..cfg.cores {
                let name = format!("ts-{}", i);
                let proc = TsProcessor::new(
                    sim.create_context(&name),
                    &queues[i],
                    stats.clone() as Rc<RefCell<dyn RequestDrain>>,
                    cfg.quantum,
                    cfg.ctx_cost,
                );
                sim.add_actor(&name, rc!(refcell!(proc)));
            }
        }
        1 => panic!("processor sharing is not supported in the multi-queue topology"),
        other => panic!("unknown processor type: {}", other),
    }

    let mut generator = Generator::new(
        sim.create_context("generator"),
        cfg.lambda,
        service_distribution(cfg),
        Box::new(StealableRequestCreator),
    );
    for queue in &queues {
        generator.add_out_queue(queue);
    }
    sim.add_actor("generator", rc!(refcell!(generator)));

    sim.run(cfg.duration);
    stats
}

/// Two-stage pipeline with a bounded intermediate buffer and colored
/// requests: the first stage forwards while the buffer has room, the second
/// always terminates.
pub fn bounded_queue(cfg: &SimConfig) -> Rc<RefCell<AllKeeper>> {
    let mut sim = Simulation::new(cfg.seed);
    let stats = rc!(refcell!(AllKeeper::new("Main Stats", sim.create_context("stats"))));
    let stage1 = sim.add_queue(FifoQueue::new());
    let stage2 = sim.add_queue(FifoQueue::new());

    for i in 0..cfg.cores {
        let name = format!("bounded-{}", i);
        let proc = BoundedForwardProcessor::new(
            sim.create_context(&name),
            &stage1,
            &stage2,
            stats.clone() as Rc<RefCell<dyn RequestDrain>>,
            cfg.buffer_size,
        );
        sim.add_actor(&name, rc!(refcell!(proc)));
    }
    let sink = BoundedSinkProcessor::new(
        sim.create_context("sink"),
        &stage2,
        stats.clone() as Rc<RefCell<dyn RequestDrain>>,
    );
    sim.add_actor("sink", rc!(refcell!(sink)));

    let mut generator = Generator::new(
        sim.create_context("generator"),
        cfg.lambda,
        ServiceDistribution::exponential(cfg.mu),
        Box::new(ColoredRequestCreator),
    );
    generator.add_out_queue(&stage1);
    sim.add_actor("generator", rc!(refcell!(generator)));

    sim.run(cfg.duration);
    stats
}
