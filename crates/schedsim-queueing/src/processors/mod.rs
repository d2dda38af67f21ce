//! Processor policy state machines.
//!
//! Every processor consumes requests from an input queue and hands
//! completions to a [`RequestDrain`](crate::stats::RequestDrain). Each
//! dispatch charges an optional context-switch cost against virtual time.

mod bounded;
mod ps;
mod rtc;
mod stealing;
mod ts;

pub use bounded::{BoundedForwardProcessor, BoundedSinkProcessor};
pub use ps::PsProcessor;
pub use rtc::RtcProcessor;
pub use stealing::StealingProcessor;
pub use ts::TsProcessor;
