//! Test utilities and fake implementations for the relayer seams
//!
//! These fakes stand in for a source chain and the system clock so relayer
//! behavior can be tested under slow, flaky, or silent event sources without
//! real waiting.

use alloy_primitives::U256;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::traits::{Clock, SwapEventSource};
use crate::{BridgeError, Result, SwapRecord};

// ============================================================================
// Fake Swap Event Source
// ============================================================================

#[derive(Clone, Debug)]
enum Lookup {
    Pending,
    Failure,
    Found(SwapRecord),
}

/// A fake event source that replays a scripted sequence per counter.
///
/// This allows testing scenarios like:
/// - Event available on the first lookup
/// - Several empty lookups before the event appears
/// - Transient lookup failures
/// - Events that never appear
///
/// Once a sequence is exhausted, its last entry repeats. Counters with no
/// script are reported as not yet observed.
#[derive(Clone, Debug, Default)]
pub struct FakeSwapEventSource {
    lookups: Arc<Mutex<HashMap<U256, Vec<Lookup>>>>,
    calls: Arc<Mutex<HashMap<U256, usize>>>,
}

impl FakeSwapEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the record available immediately
    pub fn add_event(&self, record: SwapRecord) {
        self.add_event_after(record, 0);
    }

    /// Report the record as missing for `pending_count` lookups, then found
    pub fn add_event_after(&self, record: SwapRecord, pending_count: usize) {
        let mut script = vec![Lookup::Pending; pending_count];
        script.push(Lookup::Found(record.clone()));
        self.lookups.lock().unwrap().insert(record.counter, script);
    }

    /// Fail `failure_count` lookups, then return the record
    pub fn add_failures_then_event(&self, record: SwapRecord, failure_count: usize) {
        let mut script = vec![Lookup::Failure; failure_count];
        script.push(Lookup::Found(record.clone()));
        self.lookups.lock().unwrap().insert(record.counter, script);
    }

    /// Fail every lookup for `counter`
    pub fn add_always_failing(&self, counter: U256) {
        self.lookups
            .lock()
            .unwrap()
            .insert(counter, vec![Lookup::Failure]);
    }

    /// Number of lookups made for `counter`
    pub fn call_count(&self, counter: U256) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&counter)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl SwapEventSource for FakeSwapEventSource {
    async fn swap_event(&self, counter: U256) -> Result<Option<SwapRecord>> {
        let lookups = self.lookups.lock().unwrap();
        let mut calls = self.calls.lock().unwrap();

        let index = calls.get(&counter).copied().unwrap_or(0);
        calls.insert(counter, index + 1);

        let Some(script) = lookups.get(&counter) else {
            return Ok(None);
        };

        match script.get(index).or(script.last()) {
            Some(Lookup::Found(record)) => Ok(Some(record.clone())),
            Some(Lookup::Failure) => Err(BridgeError::EventSource(
                "Simulated lookup error".to_string(),
            )),
            Some(Lookup::Pending) | None => Ok(None),
        }
    }
}

// ============================================================================
// Fake Clock
// ============================================================================

/// A fake clock that allows fast-forwarding time in tests.
///
/// This enables testing timeout behavior without actually waiting.
#[derive(Clone, Debug)]
pub struct FakeClock {
    current_time: Arc<Mutex<Instant>>,
    sleep_log: Arc<Mutex<Vec<Duration>>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self {
            current_time: Arc::new(Mutex::new(Instant::now())),
            sleep_log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fast-forward the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock().unwrap();
        *time += duration;
    }

    /// Get the total time "slept" by this clock
    pub fn total_sleep_time(&self) -> Duration {
        self.sleep_log.lock().unwrap().iter().sum()
    }

    /// Get the number of times sleep was called
    pub fn sleep_count(&self) -> usize {
        self.sleep_log.lock().unwrap().len()
    }

    /// Clear the sleep log
    pub fn clear_sleep_log(&self) {
        self.sleep_log.lock().unwrap().clear();
    }
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) {
        self.sleep_log.lock().unwrap().push(duration);
        self.advance(duration);
    }

    fn now(&self) -> Instant {
        *self.current_time.lock().unwrap()
    }
}
