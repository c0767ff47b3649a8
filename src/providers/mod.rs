//! Production implementations of the [`crate::traits`] abstractions.
//!
//! [`NetworkEventSource`] reads swap events straight from an in-process
//! [`crate::SharedNetwork`]; [`TokioClock`] uses the real clock.

mod network;
mod tokio_clock;

pub use self::network::NetworkEventSource;
pub use self::tokio_clock::TokioClock;
