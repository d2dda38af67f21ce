//! Service-time distributions sampled through the simulation-wide RNG.

use std::fs;

use rand::distributions::Distribution;
use rand::Rng;
use rand_distr::Exp;

// Workload files carry sizes in bytes; divide to land in simulation time
// units of the same magnitude as the synthetic generators.
const CDF_SIZE_DIVISOR: f64 = 100.;

/// A service-time distribution. Implements [`Distribution<f64>`] so samples
/// are drawn through the engine's seeded generator.
pub enum ServiceDistribution {
    /// Exponential with the given rate (M/M service).
    Exponential(Exp<f64>),
    /// A single fixed value (M/D service).
    Deterministic(f64),
    /// Two peaks: the first drawn with probability `ratio` (M/B service).
    Bimodal {
        /// The frequent peak.
        peak1: f64,
        /// The rare peak.
        peak2: f64,
        /// Probability of drawing `peak1`.
        ratio: f64,
    },
    /// Inverse-CDF interpolation over a loaded table.
    Cdf(CdfTable),
    /// Uniform draw from recorded service times.
    Playback(Playback),
}

impl ServiceDistribution {
    /// Exponential distribution with the given rate.
    pub fn exponential(rate: f64) -> Self {
        let exp = Exp::new(rate).unwrap_or_else(|e| panic!("invalid exponential rate {}: {:?}", rate, e));
        Self::Exponential(exp)
    }

    /// Constant distribution.
    pub fn deterministic(value: f64) -> Self {
        Self::Deterministic(value)
    }

    /// Bimodal distribution drawing `peak1` with probability `ratio`.
    pub fn bimodal(peak1: f64, peak2: f64, ratio: f64) -> Self {
        assert!((0. ..=1.).contains(&ratio), "bimodal ratio out of range: {}", ratio);
        Self::Bimodal { peak1, peak2, ratio }
    }

    /// CDF-playback distribution loaded from the given file.
    pub fn cdf_from_file(path: &str) -> Self {
        Self::Cdf(CdfTable::load(path))
    }

    /// Playback distribution loaded from the given file.
    pub fn playback_from_file(path: &str) -> Self {
        Self::Playback(Playback::load(path))
    }
}

impl Distribution<f64> for ServiceDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Exponential(exp) => exp.sample(rng),
            Self::Deterministic(value) => *value,
            Self::Bimodal { peak1, peak2, ratio } => {
                if rng.gen::<f64>() < *ratio {
                    *peak1
                } else {
                    *peak2
                }
            }
            Self::Cdf(table) => table.value_at(rng.gen::<f64>()),
            Self::Playback(playback) => playback.times[rng.gen_range(0..playback.times.len())],
        }
    }
}

/// Points of a cumulative distribution function, sampled by inverse-CDF
/// linear interpolation.
pub struct CdfTable {
    sizes: Vec<f64>,
    probs: Vec<f64>,
}

impl CdfTable {
    /// Loads a CDF table from a file.
    ///
    /// Format: the first line is a mean label (discarded); every following
    /// non-empty line is `<size> <cumulative_probability>` with
    /// non-decreasing probabilities. Malformed input is fatal.
    pub fn load(path: &str) -> Self {
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read CDF file {}: {}", path, e));
        Self::parse(&content, path)
    }

    pub(crate) fn parse(content: &str, origin: &str) -> Self {
        let mut lines = content.lines();
        if lines.next().is_none() {
            panic!("empty CDF file: {}", origin);
        }
        let mut sizes = Vec::new();
        let mut probs = Vec::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 2 {
                panic!("invalid CDF line '{}' in {}", line, origin);
            }
            let size: f64 = fields[0]
                .parse()
                .unwrap_or_else(|e| panic!("invalid CDF size '{}' in {}: {}", fields[0], origin, e));
            let prob: f64 = fields[1]
                .parse()
                .unwrap_or_else(|e| panic!("invalid CDF probability '{}' in {}: {}", fields[1], origin, e));
            if let Some(&prev) = probs.last() {
                assert!(
                    prob >= prev,
                    "CDF probabilities must be non-decreasing, got {} after {} in {}",
                    prob,
                    prev,
                    origin
                );
            }
            sizes.push(size / CDF_SIZE_DIVISOR);
            probs.push(prob);
        }
        if sizes.is_empty() {
            panic!("no CDF data in file: {}", origin);
        }
        Self { sizes, probs }
    }

    /// Inverse-CDF lookup: linear interpolation between the bracketing
    /// points of `u`.
    pub fn value_at(&self, u: f64) -> f64 {
        if u <= self.probs[0] {
            return self.sizes[0];
        }
        for i in 1..self.probs.len() {
            if u <= self.probs[i] {
                let step = self.probs[i] - self.probs[i - 1];
                if step <= 0. {
                    return self.sizes[i];
                }
                let frac = (u - self.probs[i - 1]) / step;
                return self.sizes[i - 1] + frac * (self.sizes[i] - self.sizes[i - 1]);
            }
        }
        *self.sizes.last().unwrap()
    }
}

/// Recorded service times, sampled uniformly at random.
pub struct Playback {
    times: Vec<f64>,
}

impl Playback {
    /// Loads recorded service times from a file with one non-negative
    /// integer per line. Malformed input is fatal.
    pub fn load(path: &str) -> Self {
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("failed to read playback file {}: {}", path, e));
        Self::parse(&content, path)
    }

    pub(crate) fn parse(content: &str, origin: &str) -> Self {
        let mut times = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: u64 = line
                .parse()
                .unwrap_or_else(|e| panic!("invalid playback line '{}' in {}: {}", line, origin, e));
            times.push(value as f64);
        }
        if times.is_empty() {
            panic!("no playback data in file: {}", origin);
        }
        Self { times }
    }
}
