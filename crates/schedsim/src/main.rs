use std::io::Write;

use clap::{arg, command};
use env_logger::Builder;
use log::info;

use schedsim::{bounded_queue, multi_queue, single_queue, workload_path, SimConfig};

fn main() {
    let matches = command!()
        .arg(
            arg!(--topo [TOPO] "topology selector")
                .validator(|s| s.parse::<u32>())
                .default_value("0"),
        )
        .arg(
            arg!(--mu [MU] "mu service rate [reqs/us]")
                .validator(|s| s.parse::<f64>())
                .default_value("0.02"),
        )
        .arg(
            arg!(--lambda [LAMBDA] "lambda poisson interarrival [reqs/us]")
                .validator(|s| s.parse::<f64>())
                .default_value("0.005"),
        )
        .arg(
            arg!(--genType [GEN_TYPE] "type of generator")
                .validator(|s| s.parse::<u32>())
                .default_value("0"),
        )
        .arg(
            arg!(--procType [PROC_TYPE] "type of processor")
                .validator(|s| s.parse::<u32>())
                .default_value("0"),
        )
        .arg(
            arg!(--duration [DURATION] "experiment duration [us]")
                .validator(|s| s.parse::<f64>())
                .default_value("10000000"),
        )
        .arg(
            arg!(--buffersize [BUFFER_SIZE] "size of the bounded buffer")
                .validator(|s| s.parse::<usize>())
                .default_value("1"),
        )
        .arg(
            arg!(--quantum [QUANTUM] "time sharing processor quantum [us]")
                .validator(|s| s.parse::<f64>())
                .default_value("10.0"),
        )
        .arg(
            arg!(--cores [CORES] "number of processor cores")
                .validator(|s| s.parse::<usize>())
                .default_value("1"),
        )
        .arg(
            arg!(--ctxCost [CTX_COST] "absolute context switch cost [us]")
                .validator(|s| s.parse::<f64>())
                .default_value("0.0"),
        )
        .arg(
            arg!(--cdfWorkload [WORKLOAD] "name of the CDF workload to draw processing times from")
                .default_value(""),
        )
        .arg(
            arg!(--seed [SEED] "random seed")
                .validator(|s| s.parse::<u64>())
                .default_value("123"),
        )
        .get_matches();

    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let workload: String = matches.value_of_t("cdfWorkload").unwrap();
    let cfg = SimConfig {
        lambda: matches.value_of_t("lambda").unwrap(),
        mu: matches.value_of_t("mu").unwrap(),
        duration: matches.value_of_t("duration").unwrap(),
        gen_type: matches.value_of_t("genType").unwrap(),
        proc_type: matches.value_of_t("procType").unwrap(),
        quantum: matches.value_of_t("quantum").unwrap(),
        cores: matches.value_of_t("cores").unwrap(),
        ctx_cost: matches.value_of_t("ctxCost").unwrap(),
        buffer_size: matches.value_of_t("buffersize").unwrap(),
        cdf_path: workload_path(&workload),
        seed: matches.value_of_t("seed").unwrap(),
    };

    let topo: u32 = matches.value_of_t("topo").unwrap();
    info!("selected topology: {}, workload path: {:?}", topo, cfg.cdf_path);

    let stats = match topo {
        0 => single_queue(&cfg),
        1 => multi_queue(&cfg),
        2 => bounded_queue(&cfg),
        other => panic!("unknown topology: {}", other),
    };
    stats.borrow().print_stats();
}
