//! Core trait abstractions for off-chain bridge tooling.
//!
//! The relayer needs two things from the outside world: a way to look up the
//! `SwapInitialized` event for a counter on the source chain, and a way to
//! wait between lookups. Both sit behind traits so tests can substitute fakes
//! that fail, lag behind, or fast-forward time.
//!
//! # Example: Implementing a Test Fake
//!
//! ```rust,ignore
//! use swap_bridge::{SwapEventSource, SwapRecord, Result};
//! use alloy_primitives::U256;
//! use std::collections::HashMap;
//!
//! struct StaticEventSource {
//!     events: HashMap<U256, SwapRecord>,
//! }
//!
//! #[async_trait::async_trait]
//! impl SwapEventSource for StaticEventSource {
//!     async fn swap_event(&self, counter: U256) -> Result<Option<SwapRecord>> {
//!         Ok(self.events.get(&counter).cloned())
//!     }
//! }
//! ```

use alloy_primitives::U256;
use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::protocol::SwapRecord;

/// Lookup of swap announcements on a source chain.
///
/// # Test Scenarios
///
/// Implementing this trait with fakes enables testing:
/// - Events that appear only after several polls
/// - Transient lookup failures
/// - Events that never appear
#[async_trait]
pub trait SwapEventSource: Send + Sync {
    /// Returns the swap announced with `counter`, or `None` if it has not
    /// been observed yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails. Callers may retry.
    async fn swap_event(&self, counter: U256) -> Result<Option<SwapRecord>>;
}

/// Trait for time-based operations.
///
/// Abstracts sleep and time queries so polling loops and timeouts can be
/// tested without actually waiting.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Asynchronously sleeps for the given duration.
    async fn sleep(&self, duration: Duration);

    /// Returns the current instant in time.
    fn now(&self) -> Instant;
}
