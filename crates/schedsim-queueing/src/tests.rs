use std::cell::RefCell;
use std::rc::Rc;

use sugars::{rc, refcell};

use schedsim_core::{
    Actor, ActorContext, FifoQueue, PriorityQueue, QueueRef, Request, RequestKind, Simulation,
    Suspend, WakeCause,
};

use crate::distribution::{CdfTable, Playback, ServiceDistribution};
use crate::processors::{
    BoundedForwardProcessor, BoundedSinkProcessor, PsProcessor, RtcProcessor, StealingProcessor,
    TsProcessor,
};
use crate::stats::{AllKeeper, BookKeeper, MonitorKeeper, RequestDrain};

fn assert_float_eq(x: f64, y: f64, eps: f64) {
    assert!(
        (x - y).abs() < eps || (x.max(y) - x.min(y)) / x.min(y) < eps,
        "Values do not match: {:.15} vs {:.15}",
        x,
        y
    );
}

/// One scripted arrival: (time, service time, variant, target queue index).
type ScriptEntry = (f64, f64, RequestKind, usize);

/// Pushes prepared requests at fixed instants, then goes quiet.
struct ScriptedSource {
    ctx: ActorContext,
    queues: Vec<QueueRef>,
    script: Vec<ScriptEntry>,
    pos: usize,
}

impl ScriptedSource {
    fn register(sim: &mut Simulation, queues: Vec<QueueRef>, script: Vec<ScriptEntry>) {
        let source = ScriptedSource {
            ctx: sim.create_context("source"),
            queues,
            script,
            pos: 0,
        };
        sim.add_actor("source", rc!(refcell!(source)));
    }
}

impl Actor for ScriptedSource {
    fn resume(&mut self, _cause: WakeCause) -> Suspend {
        let now = self.ctx.time();
        while self.pos < self.script.len() && self.script[self.pos].0 <= now {
            let (_, service_time, kind, target) = self.script[self.pos].clone();
            self.queues[target].push(Request::with_kind(now, service_time, kind));
            self.pos += 1;
        }
        if self.pos < self.script.len() {
            Suspend::Timer(self.script[self.pos].0 - now)
        } else {
            Suspend::Halt
        }
    }
}

fn plain(at: f64, service_time: f64) -> ScriptEntry {
    (at, service_time, RequestKind::Plain, 0)
}

fn setup(priority: bool) -> (Simulation, Rc<RefCell<AllKeeper>>, QueueRef) {
    let mut sim = Simulation::new(123);
    let stats = rc!(refcell!(AllKeeper::new("test", sim.create_context("stats"))));
    let queue = if priority {
        sim.add_queue(PriorityQueue::new())
    } else {
        sim.add_queue(FifoQueue::new())
    };
    (sim, stats, queue)
}

// RTC /////////////////////////////////////////////////////////////////////

#[test]
fn rtc_serves_in_arrival_order() {
    let (mut sim, stats, queue) = setup(false);
    let proc = RtcProcessor::new(sim.create_context("rtc"), &queue, stats.clone(), 0.);
    sim.add_actor("rtc", rc!(refcell!(proc)));
    ScriptedSource::register(&mut sim, vec![queue], vec![plain(0., 10.), plain(0., 5.)]);
    sim.step_until_no_events();

    let stats = stats.borrow();
    assert_eq!(stats.count(), 2);
    assert_eq!(stats.records()[0].service_time, 10.);
    assert_eq!(stats.records()[0].delay, 10.);
    assert_eq!(stats.records()[1].service_time, 5.);
    assert_eq!(stats.records()[1].delay, 15.);
}

#[test]
fn rtc_charges_context_switch_cost() {
    let (mut sim, stats, queue) = setup(false);
    let proc = RtcProcessor::new(sim.create_context("rtc"), &queue, stats.clone(), 1.);
    sim.add_actor("rtc", rc!(refcell!(proc)));
    ScriptedSource::register(&mut sim, vec![queue], vec![plain(0., 10.)]);
    sim.step_until_no_events();

    assert_eq!(stats.borrow().records()[0].delay, 11.);
}

#[test]
fn rtc_records_monitor_queue_lengths() {
    let mut sim = Simulation::new(123);
    let keeper = rc!(refcell!(MonitorKeeper::new(sim.create_context("stats"))));
    let queue = sim.add_queue(FifoQueue::new());
    let proc = RtcProcessor::new(sim.create_context("rtc"), &queue, keeper.clone(), 0.);
    sim.add_actor("rtc", rc!(refcell!(proc)));
    let monitor = |at, service_time| {
        (
            at,
            service_time,
            RequestKind::Monitor {
                dispatch_len: 0,
                completion_len: 0,
            },
            0,
        )
    };
    ScriptedSource::register(
        &mut sim,
        vec![queue],
        vec![monitor(0., 10.), monitor(0., 5.), monitor(0., 5.)],
    );
    sim.step_until_no_events();

    let keeper = keeper.borrow();
    assert_eq!(keeper.delays(), &[10., 15., 20.]);
    assert_eq!(keeper.dispatch_lens(), &[2, 1, 0]);
    assert_eq!(keeper.completion_lens(), &[2, 1, 0]);
}

// Time sharing ////////////////////////////////////////////////////////////

#[test]
fn ts_quantum_requeue_and_completion() {
    // One request of 25 with quantum 10 and context cost 1: three dispatches,
    // two re-enqueues, completion at 10+1+10+1+5+1 = 28.
    let (mut sim, stats, queue) = setup(false);
    let proc = TsProcessor::new(sim.create_context("ts"), &queue, stats.clone(), 10., 1.);
    sim.add_actor("ts", rc!(refcell!(proc)));
    ScriptedSource::register(&mut sim, vec![queue], vec![plain(0., 25.)]);
    sim.step_until_no_events();

    let stats = stats.borrow();
    assert_eq!(stats.count(), 1);
    assert_eq!(stats.records()[0].delay, 28.);
    assert_eq!(sim.time(), 28.);
}

#[test]
fn ts_round_robin_conserves_service_time() {
    let (mut sim, stats, queue) = setup(false);
    let proc = TsProcessor::new(sim.create_context("ts"), &queue, stats.clone(), 10., 0.);
    sim.add_actor("ts", rc!(refcell!(proc)));
    ScriptedSource::register(&mut sim, vec![queue], vec![plain(0., 25.), plain(0., 15.)]);
    sim.step_until_no_events();

    // Alternating quanta: the 15-unit request finishes at 35, the 25-unit
    // one at 40; the processor is never idle, so the last completion equals
    // the total service demand.
    let stats = stats.borrow();
    assert_eq!(stats.records()[0].service_time, 15.);
    assert_eq!(stats.records()[0].delay, 35.);
    assert_eq!(stats.records()[1].service_time, 25.);
    assert_eq!(stats.records()[1].delay, 40.);
    assert_eq!(sim.time(), 25. + 15.);
}

// SRPT time sharing ///////////////////////////////////////////////////////

#[test]
fn srpt_serves_shortest_job_first() {
    let (mut sim, stats, queue) = setup(true);
    let proc = TsProcessor::new(sim.create_context("srpt"), &queue, stats.clone(), 10., 0.);
    sim.add_actor("srpt", rc!(refcell!(proc)));
    ScriptedSource::register(&mut sim, vec![queue], vec![plain(0., 100.), plain(0., 1.)]);
    sim.step_until_no_events();

    let stats = stats.borrow();
    assert_eq!(stats.records()[0].service_time, 1.);
    assert!(stats.records()[0].delay <= 11.);
    assert_eq!(stats.records()[1].service_time, 100.);
    assert_eq!(stats.records()[1].delay, 101.);
}

#[test]
fn srpt_requeued_request_sorts_ahead_of_longer_work() {
    let (mut sim, stats, queue) = setup(true);
    let proc = TsProcessor::new(sim.create_context("srpt"), &queue, stats.clone(), 10., 0.);
    sim.add_actor("srpt", rc!(refcell!(proc)));
    ScriptedSource::register(&mut sim, vec![queue], vec![plain(0., 25.), plain(0., 12.)]);
    sim.step_until_no_events();

    // After its first quantum the 12-unit request has 2 units left and is
    // dispatched again ahead of the untouched 25-unit request.
    let stats = stats.borrow();
    assert_eq!(stats.records()[0].service_time, 12.);
    assert_eq!(stats.records()[0].delay, 12.);
    assert_eq!(stats.records()[1].service_time, 25.);
    assert_eq!(stats.records()[1].delay, 37.);
}

// Processor sharing ///////////////////////////////////////////////////////

#[test]
fn ps_with_enough_workers_adds_no_sharing_penalty() {
    let (mut sim, stats, queue) = setup(false);
    let proc = PsProcessor::new(sim.create_context("ps"), &queue, stats.clone(), 4);
    sim.add_actor("ps", rc!(refcell!(proc)));
    ScriptedSource::register(
        &mut sim,
        vec![queue],
        vec![plain(0., 10.), plain(2., 10.), plain(3., 5.)],
    );
    sim.step_until_no_events();

    // At most three concurrent requests against four workers: every request
    // terminates at exactly its creation time plus its service demand.
    let stats = stats.borrow();
    assert_eq!(stats.count(), 3);
    for record in stats.records() {
        assert_float_eq(record.delay, record.service_time, 1e-9);
    }
}

#[test]
fn ps_two_jobs_share_a_single_worker() {
    let (mut sim, stats, queue) = setup(false);
    let proc = PsProcessor::new(sim.create_context("ps"), &queue, stats.clone(), 1);
    sim.add_actor("ps", rc!(refcell!(proc)));
    ScriptedSource::register(&mut sim, vec![queue], vec![plain(0., 10.), plain(0., 10.)]);
    sim.step_until_no_events();

    let stats = stats.borrow();
    assert_eq!(stats.count(), 2);
    assert_float_eq(stats.records()[0].delay, 20., 1e-9);
    assert_float_eq(stats.records()[1].delay, 20., 1e-9);
}

#[test]
fn ps_eight_concurrent_over_four_workers_run_at_half_rate() {
    let (mut sim, stats, queue) = setup(false);
    let proc = PsProcessor::new(sim.create_context("ps"), &queue, stats.clone(), 4);
    sim.add_actor("ps", rc!(refcell!(proc)));
    let script: Vec<ScriptEntry> = (0..8).map(|_| plain(0., 10.)).collect();
    ScriptedSource::register(&mut sim, vec![queue], script);
    sim.step_until_no_events();

    // Sharing factor 4/8 = 0.5: every request takes twice its service time.
    let stats = stats.borrow();
    assert_eq!(stats.count(), 8);
    for record in stats.records() {
        assert_float_eq(record.delay, 20., 1e-9);
    }
}

#[test]
fn ps_same_instant_arrivals_subtract_zero() {
    // Three arrivals at the same instant force two service-time updates at
    // an unchanged clock; if those subtracted anything the equal split
    // below would come out short of 30.
    let (mut sim, stats, queue) = setup(false);
    let proc = PsProcessor::new(sim.create_context("ps"), &queue, stats.clone(), 1);
    sim.add_actor("ps", rc!(refcell!(proc)));
    ScriptedSource::register(
        &mut sim,
        vec![queue],
        vec![plain(0., 10.), plain(0., 10.), plain(0., 10.)],
    );
    sim.step_until_no_events();

    let stats = stats.borrow();
    assert_eq!(stats.count(), 3);
    for record in stats.records() {
        assert_float_eq(record.delay, 30., 1e-9);
    }
}

#[test]
fn ps_arrival_reshapes_the_next_completion_timer() {
    let (mut sim, stats, queue) = setup(false);
    let proc = PsProcessor::new(sim.create_context("ps"), &queue, stats.clone(), 1);
    sim.add_actor("ps", rc!(refcell!(proc)));
    ScriptedSource::register(&mut sim, vec![queue], vec![plain(0., 10.), plain(5., 10.)]);
    sim.step_until_no_events();

    // The first request runs alone for 5 units, then shares: it completes at
    // 15 instead of the originally predicted 10. The second one runs shared
    // for 10 units and alone for 5, completing at 20.
    let stats = stats.borrow();
    assert_float_eq(stats.records()[0].delay, 15., 1e-9);
    assert_float_eq(stats.records()[1].delay, 15., 1e-9);
    assert_float_eq(sim.time(), 20., 1e-9);
}

// Work stealing ///////////////////////////////////////////////////////////

#[test]
fn stealing_processor_steals_from_sibling_and_tallies() {
    let mut sim = Simulation::new(123);
    let stats = rc!(refcell!(AllKeeper::new("test", sim.create_context("stats"))));
    let own = sim.add_queue(FifoQueue::new());
    let sibling = sim.add_queue(FifoQueue::new());
    let mut proc = StealingProcessor::new(sim.create_context("worker"), &own, stats.clone(), 0.);
    proc.add_sibling(&sibling);
    sim.add_actor("worker", rc!(refcell!(proc)));
    let stealable = |at, service_time, target| {
        (at, service_time, RequestKind::Stealable { stolen: false }, target)
    };
    ScriptedSource::register(
        &mut sim,
        vec![own, sibling],
        vec![stealable(0., 10., 0), stealable(1., 5., 1)],
    );
    sim.step_until_no_events();

    // The sibling arrival lands while the worker is busy and is stolen once
    // its own queue runs dry.
    let stats = stats.borrow();
    assert_eq!(stats.count(), 2);
    assert_eq!(stats.stolen_count(), 1);
    assert_eq!(stats.records()[0].delay, 10.);
    assert_eq!(stats.records()[1].delay, 14.);
}

// Bounded pipeline ////////////////////////////////////////////////////////

#[test]
fn bounded_forward_terminates_when_downstream_is_full() {
    let mut sim = Simulation::new(123);
    let stats = rc!(refcell!(AllKeeper::new("test", sim.create_context("stats"))));
    let in_queue = sim.add_queue(FifoQueue::new());
    let out_queue = sim.add_queue(FifoQueue::new());
    let proc = BoundedForwardProcessor::new(
        sim.create_context("bounded"),
        &in_queue,
        &out_queue,
        stats.clone(),
        1,
    );
    sim.add_actor("bounded", rc!(refcell!(proc)));
    let colored = |at, service_time| (at, service_time, RequestKind::Colored { color: 0 }, 0);
    ScriptedSource::register(
        &mut sim,
        vec![in_queue],
        vec![colored(0., 1.), colored(0., 1.), colored(0., 1.)],
    );
    sim.step_until_no_events();

    // The first completion is forwarded; with the bound of one reached, the
    // remaining two are terminated instead.
    assert_eq!(out_queue.len(), 1);
    let stats = stats.borrow();
    assert_eq!(stats.count(), 2);
    assert_eq!(stats.records()[0].delay, 2.);
    assert_eq!(stats.records()[1].delay, 3.);
}

#[test]
fn bounded_forward_doubles_service_of_color_one() {
    let mut sim = Simulation::new(123);
    let stats = rc!(refcell!(AllKeeper::new("test", sim.create_context("stats"))));
    let in_queue = sim.add_queue(FifoQueue::new());
    let out_queue = sim.add_queue(FifoQueue::new());
    let proc = BoundedForwardProcessor::new(
        sim.create_context("bounded"),
        &in_queue,
        &out_queue,
        stats.clone(),
        0,
    );
    sim.add_actor("bounded", rc!(refcell!(proc)));
    ScriptedSource::register(
        &mut sim,
        vec![in_queue],
        vec![(0., 3., RequestKind::Colored { color: 1 }, 0)],
    );
    sim.step_until_no_events();

    assert_eq!(stats.borrow().records()[0].delay, 6.);
}

#[test]
fn bounded_sink_doubles_service_of_color_zero() {
    let mut sim = Simulation::new(123);
    let stats = rc!(refcell!(AllKeeper::new("test", sim.create_context("stats"))));
    let in_queue = sim.add_queue(FifoQueue::new());
    let proc = BoundedSinkProcessor::new(sim.create_context("sink"), &in_queue, stats.clone());
    sim.add_actor("sink", rc!(refcell!(proc)));
    ScriptedSource::register(
        &mut sim,
        vec![in_queue],
        vec![
            (0., 4., RequestKind::Colored { color: 0 }, 0),
            (0., 3., RequestKind::Colored { color: 1 }, 0),
        ],
    );
    sim.step_until_no_events();

    let stats = stats.borrow();
    assert_eq!(stats.records()[0].delay, 8.);
    assert_eq!(stats.records()[1].delay, 11.);
}

// Distributions ///////////////////////////////////////////////////////////

#[test]
fn deterministic_distribution_is_constant() {
    let mut sim = Simulation::new(123);
    let dist = ServiceDistribution::deterministic(42.);
    for _ in 0..10 {
        assert_eq!(sim.sample_from_distribution(&dist), 42.);
    }
}

#[test]
fn bimodal_distribution_respects_ratio() {
    let mut sim = Simulation::new(123);
    let dist = ServiceDistribution::bimodal(1., 5., 0.9);
    let mut low = 0;
    for _ in 0..1000 {
        let sample = sim.sample_from_distribution(&dist);
        assert!(sample == 1. || sample == 5.);
        if sample == 1. {
            low += 1;
        }
    }
    assert!((850..=950).contains(&low), "unexpected low-peak count: {}", low);
}

#[test]
fn exponential_distribution_has_the_right_mean() {
    let mut sim = Simulation::new(123);
    let dist = ServiceDistribution::exponential(0.1);
    let sum: f64 = (0..10_000).map(|_| sim.sample_from_distribution(&dist)).sum();
    let mean = sum / 10_000.;
    assert!((9. ..11.).contains(&mean), "unexpected mean: {}", mean);
}

#[test]
fn cdf_table_interpolates_between_points() {
    let table = CdfTable::parse("100\n100 0.5\n200 1.0\n", "test");
    // Sizes are scaled into simulation units at load.
    assert_float_eq(table.value_at(0.25), 1., 1e-12);
    assert_float_eq(table.value_at(0.5), 1., 1e-12);
    assert_float_eq(table.value_at(0.75), 1.5, 1e-12);
    assert_float_eq(table.value_at(1.), 2., 1e-12);
}

#[test]
fn cdf_table_falls_back_to_the_last_size() {
    let table = CdfTable::parse("mean\n100 0.9\n", "test");
    assert_float_eq(table.value_at(0.95), 1., 1e-12);
}

#[test]
#[should_panic(expected = "invalid CDF line")]
fn cdf_table_rejects_malformed_lines() {
    CdfTable::parse("mean\n1 2 3\n", "test");
}

#[test]
#[should_panic(expected = "non-decreasing")]
fn cdf_table_rejects_decreasing_probabilities() {
    CdfTable::parse("mean\n100 0.9\n200 0.5\n", "test");
}

#[test]
#[should_panic(expected = "no CDF data")]
fn cdf_table_rejects_header_only_input() {
    CdfTable::parse("mean\n", "test");
}

#[test]
fn cdf_sampling_reproduces_the_input_distribution() {
    // Inverse-CDF sampling over two points: mass below 1.5 must converge to
    // the corresponding cumulative probability 0.75.
    let dist = ServiceDistribution::Cdf(CdfTable::parse("100\n100 0.5\n200 1.0\n", "test"));
    let mut sim = Simulation::new(123);
    let below: usize = (0..10_000)
        .filter(|_| sim.sample_from_distribution(&dist) <= 1.5)
        .count();
    let fraction = below as f64 / 10_000.;
    assert!((fraction - 0.75).abs() < 0.02, "unexpected fraction: {}", fraction);
}

#[test]
fn cdf_file_loading_is_deterministic_under_a_fixed_seed() {
    let path = std::env::temp_dir().join(format!("schedsim-cdf-{}.txt", std::process::id()));
    std::fs::write(&path, "100\n100 0.2\n500 0.8\n1000 1.0\n").unwrap();
    let dist = ServiceDistribution::cdf_from_file(path.to_str().unwrap());

    let mut first = Simulation::new(7);
    let a: Vec<f64> = (0..100).map(|_| first.sample_from_distribution(&dist)).collect();
    let mut second = Simulation::new(7);
    let b: Vec<f64> = (0..100).map(|_| second.sample_from_distribution(&dist)).collect();
    assert_eq!(a, b);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn playback_samples_from_the_loaded_array() {
    let playback = ServiceDistribution::Playback(Playback::parse("5\n7\n9\n", "test"));
    let mut sim = Simulation::new(123);
    for _ in 0..100 {
        let sample = sim.sample_from_distribution(&playback);
        assert!(sample == 5. || sample == 7. || sample == 9.);
    }
}

#[test]
#[should_panic(expected = "invalid playback line")]
fn playback_rejects_malformed_lines() {
    Playback::parse("5\nabc\n", "test");
}

// Statistics //////////////////////////////////////////////////////////////

#[test]
fn all_keeper_computes_exact_aggregates() {
    let mut sim = Simulation::new(123);
    let mut keeper = AllKeeper::new("test", sim.create_context("stats"));
    // Requests created in the past so delays are observable at time zero.
    for i in 1..=100 {
        keeper.terminate(Request::new(-(i as f64), 50.));
    }

    assert_eq!(keeper.count(), 100);
    assert_float_eq(keeper.mean_delay(), 50.5, 1e-9);
    assert_float_eq(keeper.delay_stddev(), 833.25f64.sqrt(), 1e-9);
    assert_eq!(keeper.delay_percentiles(), [51., 91., 96., 100.]);
}

#[test]
fn all_keeper_computes_slowdown() {
    let mut sim = Simulation::new(123);
    let mut keeper = AllKeeper::new("test", sim.create_context("stats"));
    keeper.terminate(Request::new(-10., 4.));
    keeper.terminate(Request::new(-5., 5.));

    assert_float_eq(keeper.mean_slowdown(), (2.5 + 1.) / 2., 1e-9);
    let percentiles = keeper.slowdown_percentiles();
    assert_float_eq(percentiles[0], 2.5, 1e-9);
    assert_float_eq(percentiles[3], 2.5, 1e-9);
}

#[test]
fn all_keeper_tallies_stolen_requests() {
    let mut sim = Simulation::new(123);
    let mut keeper = AllKeeper::new("test", sim.create_context("stats"));
    let mut stolen = Request::with_kind(-1., 1., RequestKind::Stealable { stolen: false });
    stolen.mark_stolen();
    keeper.terminate(stolen);
    keeper.terminate(Request::with_kind(-1., 1., RequestKind::Stealable { stolen: false }));

    assert_eq!(keeper.count(), 2);
    assert_eq!(keeper.stolen_count(), 1);
}

#[test]
fn book_keeper_interpolates_percentiles_within_buckets() {
    let mut sim = Simulation::new(123);
    let mut keeper = BookKeeper::new("test", sim.create_context("stats"));
    // One sample per 0.01-wide bucket, at the bucket midpoints.
    for i in 0..100 {
        keeper.terminate(Request::new(-(0.005 + 0.01 * i as f64), 1.));
    }

    assert_eq!(keeper.count(), 100);
    assert_float_eq(keeper.mean_delay(), 0.5, 1e-9);
    let percentiles = keeper.delay_percentiles();
    assert_float_eq(percentiles[0], 0.5, 1e-9);
    assert_float_eq(percentiles[1], 0.9, 1e-9);
    assert_float_eq(percentiles[2], 0.95, 1e-9);
    assert_float_eq(percentiles[3], 0.99, 1e-9);
}

#[test]
fn record_count_matches_terminations() {
    let (mut sim, stats, queue) = setup(false);
    let proc = RtcProcessor::new(sim.create_context("rtc"), &queue, stats.clone(), 0.);
    sim.add_actor("rtc", rc!(refcell!(proc)));
    let script: Vec<ScriptEntry> = (0..10).map(|i| plain(i as f64 * 2., 1.)).collect();
    ScriptedSource::register(&mut sim, vec![queue], script);
    sim.step_until_no_events();

    assert_eq!(stats.borrow().count(), 10);
}

// Generator ///////////////////////////////////////////////////////////////

#[test]
fn generator_produces_requests_at_interarrival_times() {
    let mut sim = Simulation::new(123);
    let stats = rc!(refcell!(AllKeeper::new("test", sim.create_context("stats"))));
    let queue = sim.add_queue(FifoQueue::new());
    let proc = RtcProcessor::new(sim.create_context("rtc"), &queue, stats.clone(), 0.);
    sim.add_actor("rtc", rc!(refcell!(proc)));
    let mut generator = crate::generator::Generator::new(
        sim.create_context("generator"),
        0.01,
        ServiceDistribution::deterministic(1.),
        Box::new(crate::generator::PlainRequestCreator),
    );
    generator.add_out_queue(&queue);
    sim.add_actor("generator", rc!(refcell!(generator)));
    sim.run(100_000.);

    // Around lambda * duration = 1000 arrivals, all served (utilization 1%).
    let count = stats.borrow().count();
    assert!((850..=1150).contains(&count), "unexpected count: {}", count);
    for record in stats.borrow().records() {
        assert_eq!(record.service_time, 1.);
        assert!(record.delay >= 1.);
    }
}

#[test]
fn colored_creator_draws_both_colors() {
    let mut sim = Simulation::new(123);
    let ctx = sim.create_context("generator");
    let creator = crate::generator::ColoredRequestCreator;
    let mut seen = [false; 2];
    for _ in 0..100 {
        use crate::generator::RequestCreator;
        let req = creator.new_request(1., &ctx);
        seen[req.color().unwrap() as usize] = true;
    }
    assert!(seen[0] && seen[1]);
}
