//! Source-side swap: burn, advance the counter, announce the record.

use alloy_primitives::{Address, U256};
use tracing::{error, info};

use super::contract::resolve_token_mut;
use super::{Bridge, SwapParams};
use crate::error::{BridgeError, Result};
use crate::protocol::SwapRecord;
use crate::spans;
use crate::token::TokenDirectory;

impl Bridge {
    /// Burns `amount` of the named token from `caller` and returns the swap
    /// record to be signed by the administrator.
    ///
    /// # Errors
    ///
    /// - `ChainNotSupported` if the destination chain is not enabled
    /// - `TokenNotAdded` if the token name is not registered
    /// - Any token failure from the burn (insufficient balance, missing
    ///   authority), unchanged
    ///
    /// On error neither the counter nor any balance has changed.
    pub fn swap<D>(
        &mut self,
        caller: Address,
        directory: &mut D,
        params: &SwapParams,
    ) -> Result<SwapRecord>
    where
        D: TokenDirectory + ?Sized,
    {
        let span = spans::swap(
            &self.address,
            &caller,
            params.token_name(),
            &params.recipient(),
            self.chain_id,
            params.destination_chain_id(),
            &params.amount(),
        );
        let _guard = span.enter();

        match self.execute_swap(caller, directory, params) {
            Ok(record) => {
                span.record("counter", tracing::field::display(record.counter));
                info!(
                    token_name = %record.token_name,
                    recipient = %record.recipient,
                    destination_chain_id = %record.destination_chain_id,
                    amount = %record.amount,
                    counter = %record.counter,
                    event = "swap_initialized"
                );
                Ok(record)
            }
            Err(e) => {
                spans::record_error(&e);
                error!(error = %e, event = "swap_failed");
                Err(e)
            }
        }
    }

    fn execute_swap<D>(
        &mut self,
        caller: Address,
        directory: &mut D,
        params: &SwapParams,
    ) -> Result<SwapRecord>
    where
        D: TokenDirectory + ?Sized,
    {
        let destination_chain_id = params.destination_chain_id();
        if !self.chains.is_supported(destination_chain_id) {
            return Err(BridgeError::ChainNotSupported {
                chain_id: destination_chain_id,
            });
        }

        let token_address = self.tokens.resolve(params.token_name())?;
        let counter = self
            .counter
            .checked_add(U256::from(1u64))
            .ok_or(BridgeError::CounterOverflow)?;

        let token = resolve_token_mut(directory, token_address)?;
        token.burn(self.address, caller, params.amount())?;

        // Committed only after the burn succeeded.
        self.counter = counter;

        Ok(SwapRecord::new(
            self.chain_id,
            params.token_name(),
            params.recipient(),
            destination_chain_id,
            params.amount(),
            counter,
        ))
    }
}
