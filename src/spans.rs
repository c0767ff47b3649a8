//! OpenTelemetry span helpers for bridge operations
//!
//! Static span names, structured attributes, and separation from business
//! logic. Each mutating bridge entry point opens one of these spans; failures
//! are recorded on the current span with [`record_error`].
//!
//! # Example
//!
//! ```rust,no_run
//! use swap_bridge::{spans, ChainId};
//! use alloy_primitives::{Address, U256};
//!
//! let span = spans::swap(
//!     &Address::ZERO,
//!     &Address::ZERO,
//!     "KZT",
//!     &Address::ZERO,
//!     ChainId::new(1),
//!     ChainId::new(2),
//!     &U256::from(1000u64),
//! );
//! let _guard = span.enter();
//! ```

use alloy_primitives::{Address, U256};
use tracing::Span;

use crate::chain::ChainId;

/// Create span for a source-side swap.
///
/// Parent: caller's transaction span, if any
/// Children: token burn
#[inline]
pub fn swap(
    bridge: &Address,
    caller: &Address,
    token_name: &str,
    recipient: &Address,
    source_chain_id: ChainId,
    destination_chain_id: ChainId,
    amount: &U256,
) -> Span {
    tracing::info_span!(
        "swap_bridge.swap",
        bridge = %bridge,
        caller = %caller,
        token_name = token_name,
        recipient = %recipient,
        source_chain_id = %source_chain_id,
        destination_chain_id = %destination_chain_id,
        amount = %amount,
        counter = tracing::field::Empty,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a destination-side redeem.
///
/// Parent: caller's transaction span, if any
/// Children: signature recovery, token mint
#[inline]
pub fn redeem(
    bridge: &Address,
    caller: &Address,
    token_name: &str,
    source_chain_id: ChainId,
    destination_chain_id: ChainId,
    amount: &U256,
    counter: &U256,
) -> Span {
    tracing::info_span!(
        "swap_bridge.redeem",
        bridge = %bridge,
        caller = %caller,
        token_name = token_name,
        source_chain_id = %source_chain_id,
        destination_chain_id = %destination_chain_id,
        amount = %amount,
        counter = %counter,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for an administrative registry or role change.
///
/// `operation` is one of `update_chain_by_id`, `include_token`,
/// `exclude_token`, `grant_role`.
#[inline]
pub fn admin_operation(operation: &'static str, bridge: &Address, caller: &Address) -> Span {
    tracing::info_span!(
        "swap_bridge.admin",
        operation = operation,
        bridge = %bridge,
        caller = %caller,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for waiting on a swap event and attesting it.
///
/// Parent: relayer caller
/// Children: swap_bridge.poll_swap_event (one per attempt)
#[inline]
pub fn attest_swap_with_retry(
    counter: &U256,
    administrator: &Address,
    max_attempts: u32,
    poll_interval_secs: u64,
) -> Span {
    tracing::info_span!(
        "swap_bridge.attest_swap_with_retry",
        counter = %counter,
        administrator = %administrator,
        max_attempts = max_attempts,
        poll_interval_secs = poll_interval_secs,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a single swap event lookup.
///
/// Parent: swap_bridge.attest_swap_with_retry
#[inline]
pub fn poll_swap_event(counter: &U256, attempt: u32) -> Span {
    tracing::debug_span!(
        "swap_bridge.poll_swap_event",
        counter = %counter,
        attempt = attempt,
    )
}

/// Create span for a full bridge deployment on one network.
#[inline]
pub fn deploy(chain_id: ChainId, deployer: &Address, token_name: &str) -> Span {
    tracing::info_span!(
        "swap_bridge.deploy",
        chain_id = %chain_id,
        deployer = %deployer,
        token_name = token_name,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Record error attributes on the current span.
///
/// Follows OpenTelemetry semantic conventions for error tracking:
/// - error.type: The error type/variant
/// - error.message: Human-readable error message
/// - error.source: The underlying cause, when there is one
///
/// # Example
///
/// ```rust,no_run
/// use swap_bridge::spans;
/// use swap_bridge::BridgeError;
///
/// # fn example() -> Result<(), BridgeError> {
/// let span = tracing::info_span!("swap_bridge.operation");
/// let _guard = span.enter();
///
/// let result = some_operation();
/// if let Err(ref e) = result {
///     spans::record_error(e);
/// }
/// result
/// # }
/// # fn some_operation() -> Result<(), BridgeError> { Ok(()) }
/// ```
pub fn record_error<E: std::error::Error>(error: &E) {
    let current_span = tracing::Span::current();
    current_span.record(
        "error.type",
        error.to_string().split(':').next().unwrap_or("Unknown"),
    );
    current_span.record("error.message", error.to_string());
    current_span.record("otel.status_code", "ERROR");

    if let Some(source) = error.source() {
        current_span.record("error.source", source.to_string());
    }
}

/// Record error attributes with custom context on the current span.
pub fn record_error_with_context(
    error_type: &str,
    error_message: &str,
    additional_context: Option<&str>,
) {
    let current_span = tracing::Span::current();
    current_span.record("error.type", error_type);
    current_span.record("error.message", error_message);
    current_span.record("otel.status_code", "ERROR");

    if let Some(context) = additional_context {
        current_span.record("error.context", context);
    }
}
