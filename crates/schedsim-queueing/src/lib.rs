//! Building blocks for request-scheduling simulations: service-time
//! distributions, request generators, processor policy state machines and
//! statistics drains.

pub mod distribution;
pub mod generator;
pub mod processors;
pub mod stats;

#[cfg(test)]
mod tests;

pub use distribution::{CdfTable, Playback, ServiceDistribution};
pub use generator::{
    ColoredRequestCreator, Generator, MonitorRequestCreator, PlainRequestCreator, RequestCreator,
    StealableRequestCreator,
};
pub use processors::{
    BoundedForwardProcessor, BoundedSinkProcessor, PsProcessor, RtcProcessor, StealingProcessor,
    TsProcessor,
};
pub use stats::{AllKeeper, BookKeeper, MonitorKeeper, RequestDrain, RequestRecord};
