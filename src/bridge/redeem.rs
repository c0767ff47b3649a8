//! Destination-side redeem: verify the administrator's signature, consume the
//! counter, mint to the caller.

use alloy_primitives::Address;
use tracing::{debug, error, info};

use super::contract::resolve_token_mut;
use super::{Bridge, RedeemParams};
use crate::error::{BridgeError, Result};
use crate::protocol::{recover_signer, SwapRecord};
use crate::spans;
use crate::token::TokenDirectory;

impl Bridge {
    /// Redeems a swap made on `params.source_chain_id()` to this chain,
    /// crediting `caller`.
    ///
    /// The signed record is rebuilt from the parameters with `caller` as the
    /// recipient and this bridge's chain id as the destination, so a signature
    /// only verifies for the account and chain it was issued for.
    ///
    /// # Errors
    ///
    /// - `ChainNotSupported` if the source chain is not enabled
    /// - `TokenNotAdded` if the token name is not registered
    /// - `AlreadyRedeemed` if the counter was consumed before
    /// - `SignatureNotValid` if the signer is not the current administrator
    /// - Any token failure from the mint, unchanged
    ///
    /// On error the counter is still unredeemed and no balance has changed.
    pub fn redeem<D>(
        &mut self,
        caller: Address,
        directory: &mut D,
        params: &RedeemParams,
    ) -> Result<SwapRecord>
    where
        D: TokenDirectory + ?Sized,
    {
        let span = spans::redeem(
            &self.address,
            &caller,
            params.token_name(),
            params.source_chain_id(),
            self.chain_id,
            &params.amount(),
            &params.counter(),
        );
        let _guard = span.enter();

        match self.execute_redeem(caller, directory, params) {
            Ok(record) => {
                info!(
                    token_name = %record.token_name,
                    recipient = %record.recipient,
                    source_chain_id = %record.source_chain_id,
                    amount = %record.amount,
                    counter = %record.counter,
                    event = "redeem_completed"
                );
                Ok(record)
            }
            Err(e) => {
                spans::record_error(&e);
                error!(error = %e, event = "redeem_failed");
                Err(e)
            }
        }
    }

    fn execute_redeem<D>(
        &mut self,
        caller: Address,
        directory: &mut D,
        params: &RedeemParams,
    ) -> Result<SwapRecord>
    where
        D: TokenDirectory + ?Sized,
    {
        let source_chain_id = params.source_chain_id();
        if !self.chains.is_supported(source_chain_id) {
            return Err(BridgeError::ChainNotSupported {
                chain_id: source_chain_id,
            });
        }

        let token_address = self.tokens.resolve(params.token_name())?;

        let counter = params.counter();
        if self.redeemed.contains(&counter) {
            return Err(BridgeError::AlreadyRedeemed { counter });
        }

        let record = SwapRecord::new(
            source_chain_id,
            params.token_name(),
            caller,
            self.chain_id,
            params.amount(),
            counter,
        );

        let signer = recover_signer(&record, params.signature())?;
        debug!(
            signer = %signer,
            message_hash = %record.message_hash(),
            event = "redeem_signer_recovered"
        );
        if self.access.administrator() != Some(signer) {
            return Err(BridgeError::SignatureNotValid);
        }

        let token = resolve_token_mut(directory, token_address)?;

        // The counter is consumed before the credit and released again if the
        // mint fails, so it moves to redeemed exactly when the mint commits.
        self.redeemed.insert(counter);
        if let Err(e) = token.mint(self.address, caller, params.amount()) {
            self.redeemed.remove(&counter);
            return Err(e);
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Role;
    use crate::chain::ChainId;
    use crate::protocol::SignatureParts;
    use crate::token::{BridgeToken, MintableToken};
    use alloy_primitives::{address, Signature, U256};
    use alloy_signer::SignerSync;
    use alloy_signer_local::PrivateKeySigner;
    use std::collections::HashMap;

    const OWNER: Address = address!("00000000000000000000000000000000000000a1");
    const RECIPIENT: Address = address!("00000000000000000000000000000000000000b2");
    const HACKER: Address = address!("00000000000000000000000000000000000000b3");
    const BRIDGE: Address = address!("00000000000000000000000000000000000000e2");
    const TOKEN: Address = address!("00000000000000000000000000000000000000c1");
    const NAME: &str = "KirillZaynutdinovToken";
    const AMOUNT: u64 = 100_000;

    struct Fixture {
        bridge: Bridge,
        tokens: HashMap<Address, MintableToken>,
        administrator: PrivateKeySigner,
    }

    fn setup(grant_bridge: bool) -> Fixture {
        let administrator = PrivateKeySigner::random();

        let mut token = MintableToken::new(OWNER, NAME, "KZT", 3);
        if grant_bridge {
            token.grant_role(OWNER, Role::Administrator, BRIDGE).unwrap();
        }
        let tokens = HashMap::from([(TOKEN, token)]);

        let mut bridge = Bridge::new(BRIDGE, OWNER, ChainId::new(2));
        bridge
            .grant_role(OWNER, Role::Administrator, administrator.address())
            .unwrap();
        bridge.update_chain_by_id(OWNER, ChainId::new(1), true).unwrap();
        bridge.include_token(OWNER, &tokens, TOKEN).unwrap();

        Fixture {
            bridge,
            tokens,
            administrator,
        }
    }

    fn sign(signer: &PrivateKeySigner, recipient: Address, counter: u64) -> Signature {
        let record = SwapRecord::new(
            ChainId::new(1),
            NAME,
            recipient,
            ChainId::new(2),
            U256::from(AMOUNT),
            U256::from(counter),
        );
        signer
            .sign_message_sync(record.message_hash().as_slice())
            .unwrap()
    }

    fn params(source: u64, name: &str, counter: u64, signature: Signature) -> RedeemParams {
        RedeemParams::builder()
            .source_chain_id(source)
            .token_name(name)
            .amount(U256::from(AMOUNT))
            .counter(U256::from(counter))
            .signature(signature)
            .build()
    }

    #[test]
    fn test_redeem_mints_once() {
        let mut f = setup(true);
        let signature = sign(&f.administrator, RECIPIENT, 1);

        let record = f
            .bridge
            .redeem(RECIPIENT, &mut f.tokens, &params(1, NAME, 1, signature))
            .unwrap();

        assert_eq!(record.recipient, RECIPIENT);
        assert_eq!(f.tokens[&TOKEN].balance_of(RECIPIENT), U256::from(AMOUNT));
        assert_eq!(f.tokens[&TOKEN].total_supply(), U256::from(AMOUNT));
        assert!(f.bridge.is_redeemed(U256::from(1u64)));

        let err = f
            .bridge
            .redeem(RECIPIENT, &mut f.tokens, &params(1, NAME, 1, signature))
            .unwrap_err();
        assert!(matches!(err, BridgeError::AlreadyRedeemed { .. }));
        assert_eq!(f.tokens[&TOKEN].total_supply(), U256::from(AMOUNT));
    }

    #[test]
    fn test_unsupported_source_chain_is_rejected() {
        let mut f = setup(true);
        let signature = sign(&f.administrator, RECIPIENT, 1);

        let err = f
            .bridge
            .redeem(RECIPIENT, &mut f.tokens, &params(4, NAME, 1, signature))
            .unwrap_err();
        assert!(matches!(err, BridgeError::ChainNotSupported { chain_id } if chain_id == ChainId::new(4)));
    }

    #[test]
    fn test_unregistered_token_is_rejected() {
        let mut f = setup(true);
        let signature = sign(&f.administrator, RECIPIENT, 1);

        let err = f
            .bridge
            .redeem(RECIPIENT, &mut f.tokens, &params(1, "TestToken", 1, signature))
            .unwrap_err();
        assert!(matches!(err, BridgeError::TokenNotAdded { .. }));
    }

    #[test]
    fn test_non_administrator_signature_is_rejected() {
        let mut f = setup(true);
        let hacker_key = PrivateKeySigner::random();
        let signature = sign(&hacker_key, HACKER, 2);

        let err = f
            .bridge
            .redeem(HACKER, &mut f.tokens, &params(1, NAME, 2, signature))
            .unwrap_err();

        assert!(matches!(err, BridgeError::SignatureNotValid));
        assert!(!f.bridge.is_redeemed(U256::from(2u64)));
        assert_eq!(f.tokens[&TOKEN].total_supply(), U256::ZERO);
    }

    #[test]
    fn test_signature_is_bound_to_recipient() {
        let mut f = setup(true);
        let signature = sign(&f.administrator, RECIPIENT, 1);

        let err = f
            .bridge
            .redeem(HACKER, &mut f.tokens, &params(1, NAME, 1, signature))
            .unwrap_err();

        assert!(matches!(err, BridgeError::SignatureNotValid));
        assert!(!f.bridge.is_redeemed(U256::from(1u64)));
    }

    #[test]
    fn test_replaced_administrator_signatures_stop_verifying() {
        let mut f = setup(true);
        let signature = sign(&f.administrator, RECIPIENT, 1);
        let successor = PrivateKeySigner::random();
        f.bridge
            .grant_role(OWNER, Role::Administrator, successor.address())
            .unwrap();

        let err = f
            .bridge
            .redeem(RECIPIENT, &mut f.tokens, &params(1, NAME, 1, signature))
            .unwrap_err();
        assert!(matches!(err, BridgeError::SignatureNotValid));
    }

    #[test]
    fn test_failed_mint_leaves_counter_unredeemed() {
        let mut f = setup(false);
        let signature = sign(&f.administrator, RECIPIENT, 1);

        let err = f
            .bridge
            .redeem(RECIPIENT, &mut f.tokens, &params(1, NAME, 1, signature))
            .unwrap_err();

        assert!(matches!(err, BridgeError::TokenAccessDenied { .. }));
        assert!(!f.bridge.is_redeemed(U256::from(1u64)));

        f.tokens
            .get_mut(&TOKEN)
            .unwrap()
            .grant_role(OWNER, Role::Administrator, BRIDGE)
            .unwrap();
        f.bridge
            .redeem(RECIPIENT, &mut f.tokens, &params(1, NAME, 1, signature))
            .unwrap();
        assert!(f.bridge.is_redeemed(U256::from(1u64)));
    }

    #[test]
    fn test_supply_overflow_leaves_counter_unredeemed() {
        let mut f = setup(true);
        f.tokens
            .get_mut(&TOKEN)
            .unwrap()
            .mint(OWNER, OWNER, U256::MAX)
            .unwrap();
        let signature = sign(&f.administrator, RECIPIENT, 1);

        let err = f
            .bridge
            .redeem(RECIPIENT, &mut f.tokens, &params(1, NAME, 1, signature))
            .unwrap_err();

        assert!(matches!(err, BridgeError::SupplyOverflow { .. }));
        assert!(!f.bridge.is_redeemed(U256::from(1u64)));
        assert_eq!(f.tokens[&TOKEN].total_supply(), U256::MAX);
        assert_eq!(f.tokens[&TOKEN].balance_of(RECIPIENT), U256::ZERO);
    }

    #[test]
    fn test_redeem_from_signature_parts() {
        let mut f = setup(true);
        let parts = SignatureParts::from(&sign(&f.administrator, RECIPIENT, 7));
        let params =
            RedeemParams::from_parts(1u64, NAME, U256::from(AMOUNT), U256::from(7u64), parts)
                .unwrap();

        f.bridge.redeem(RECIPIENT, &mut f.tokens, &params).unwrap();
        assert!(f.bridge.is_redeemed(U256::from(7u64)));
    }
}
