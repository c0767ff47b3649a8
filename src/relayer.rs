// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Waits for swap events on the source chain and attests them.

use alloy_primitives::U256;
use bon::Builder;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::attestor::{Attestor, SwapAttestation};
use crate::config::PollingConfig;
use crate::error::{BridgeError, Result};
use crate::spans;
use crate::traits::{Clock, SwapEventSource};

/// Polls a [`SwapEventSource`] for a swap and signs it once it appears.
///
/// # Example
///
/// ```rust,no_run
/// use swap_bridge::providers::{NetworkEventSource, TokioClock};
/// use swap_bridge::{Attestor, Network, PollingConfig, Relayer, SharedNetwork};
/// use alloy_primitives::{Address, U256};
///
/// # async fn example() -> swap_bridge::Result<()> {
/// let network = SharedNetwork::new(Network::new(1u64));
/// let relayer = Relayer::builder()
///     .source(NetworkEventSource::new(network, Address::ZERO))
///     .clock(TokioClock::new())
///     .attestor(Attestor::random())
///     .polling(PollingConfig::fast())
///     .build();
///
/// let attestation = relayer.attest_swap(U256::from(1)).await?;
/// println!("{}", attestation.to_json()?);
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Debug, Clone)]
pub struct Relayer<S, C> {
    source: S,
    clock: C,
    attestor: Attestor,
    #[builder(default)]
    polling: PollingConfig,
}

impl<S: SwapEventSource, C: Clock> Relayer<S, C> {
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn attestor(&self) -> &Attestor {
        &self.attestor
    }

    pub fn polling(&self) -> PollingConfig {
        self.polling
    }

    /// Waits for the swap with `counter` and returns its attestation.
    ///
    /// Lookup errors are logged and retried on the next attempt.
    ///
    /// # Errors
    ///
    /// Returns `SwapEventTimeout` once `max_attempts` lookups have found
    /// nothing, or a signing error.
    pub async fn attest_swap(&self, counter: U256) -> Result<SwapAttestation> {
        let max_attempts = self.polling.max_attempts;
        let poll_interval = self.polling.poll_interval_secs;

        let span = spans::attest_swap_with_retry(
            &counter,
            &self.attestor.address(),
            max_attempts,
            poll_interval,
        );
        let _guard = span.enter();

        info!(event = "swap_polling_started");
        let started = self.clock.now();

        for attempt in 1..=max_attempts {
            let attempt_span = spans::poll_swap_event(&counter, attempt);
            let _attempt_guard = attempt_span.enter();

            match self.source.swap_event(counter).await {
                Ok(Some(record)) => {
                    let attestation = self.attestor.attest(&record)?;
                    info!(
                        attempt = attempt,
                        waited_secs = self.clock.now().duration_since(started).as_secs(),
                        event = "swap_event_attested"
                    );
                    return Ok(attestation);
                }
                Ok(None) => {
                    debug!(event = "swap_event_pending");
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        attempt = attempt,
                        event = "swap_event_lookup_failed"
                    );
                }
            }

            self.clock.sleep(Duration::from_secs(poll_interval)).await;
        }

        spans::record_error_with_context(
            "SwapEventTimeout",
            &format!("Swap event polling timed out after {max_attempts} attempts"),
            Some(&format!(
                "Total duration: {} seconds",
                self.polling.total_timeout_secs()
            )),
        );
        error!(
            total_duration_secs = self.polling.total_timeout_secs(),
            event = "swap_event_timeout"
        );
        Err(BridgeError::SwapEventTimeout { counter })
    }
}
