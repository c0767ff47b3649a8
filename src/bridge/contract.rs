//! Bridge instance state and administrative entry points.

use std::collections::BTreeSet;

use alloy_primitives::{Address, U256};
use tracing::{info, warn};

use crate::access::{AccessControl, Role};
use crate::chain::{ChainId, ChainRegistry};
use crate::error::{BridgeError, Result};
use crate::spans;
use crate::token::{BridgeToken, TokenDirectory, TokenRegistry};

/// One bridge instance, deployed on one chain.
///
/// A bridge is a sequential state machine: every entry point takes `&mut self`
/// and either applies all of its state changes or returns an error having
/// applied none. Two bridges on different chains share no state; the only
/// link between them is the administrator's signature over a swap record.
///
/// # Example
///
/// ```rust
/// use swap_bridge::{Bridge, ChainId};
/// use alloy_primitives::address;
///
/// let owner = address!("00000000000000000000000000000000000000a1");
/// let mut bridge = Bridge::new(
///     address!("00000000000000000000000000000000000000e1"),
///     owner,
///     ChainId::new(1),
/// );
///
/// bridge.update_chain_by_id(owner, ChainId::new(2), true)?;
/// assert!(bridge.is_chain_supported(ChainId::new(2)));
/// # Ok::<(), swap_bridge::BridgeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bridge {
    pub(super) address: Address,
    pub(super) chain_id: ChainId,
    pub(super) access: AccessControl,
    pub(super) chains: ChainRegistry,
    pub(super) tokens: TokenRegistry,
    pub(super) counter: U256,
    pub(super) redeemed: BTreeSet<U256>,
}

impl Bridge {
    /// Creates a bridge at `address` owned by `owner` on chain `chain_id`.
    ///
    /// The chain id is fixed for the lifetime of the instance.
    pub fn new(address: Address, owner: Address, chain_id: ChainId) -> Self {
        info!(
            bridge = %address,
            owner = %owner,
            chain_id = %chain_id,
            event = "bridge_initialized"
        );

        Self {
            address,
            chain_id,
            access: AccessControl::new(owner),
            chains: ChainRegistry::new(),
            tokens: TokenRegistry::new(),
            counter: U256::ZERO,
            redeemed: BTreeSet::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// This bridge's own chain id.
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    pub fn administrator(&self) -> Option<Address> {
        self.access.administrator()
    }

    /// Value of the swap counter. Equals the counter of the latest swap, or
    /// zero before the first one.
    pub fn counter(&self) -> U256 {
        self.counter
    }

    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.access.has_role(role, account)
    }

    pub fn is_chain_supported(&self, chain_id: ChainId) -> bool {
        self.chains.is_supported(chain_id)
    }

    pub fn chains(&self) -> &ChainRegistry {
        &self.chains
    }

    /// Registered token address for `name`.
    pub fn token_address(&self, name: &str) -> Option<Address> {
        self.tokens.get(name)
    }

    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }

    /// True once `counter` has been consumed by a redeem on this bridge.
    pub fn is_redeemed(&self, counter: U256) -> bool {
        self.redeemed.contains(&counter)
    }

    /// Grants `role` to `account`. The administrator slot is single-valued:
    /// granting it replaces the previous holder.
    pub fn grant_role(&mut self, caller: Address, role: Role, account: Address) -> Result<()> {
        let span = spans::admin_operation("grant_role", &self.address, &caller);
        let _guard = span.enter();

        self.access
            .grant_role(caller, role, account)
            .map(|_| ())
            .inspect_err(|e| spans::record_error(e))
    }

    /// Enables or disables a remote chain. Idempotent.
    pub fn update_chain_by_id(
        &mut self,
        caller: Address,
        chain_id: ChainId,
        enabled: bool,
    ) -> Result<()> {
        let span = spans::admin_operation("update_chain_by_id", &self.address, &caller);
        let _guard = span.enter();

        self.access
            .require_admin_or_owner(caller)
            .inspect_err(|e| spans::record_error(e))?;
        self.chains.update(chain_id, enabled);

        info!(
            chain_id = %chain_id,
            enabled = enabled,
            event = "chain_updated"
        );

        Ok(())
    }

    /// Registers the token at `token_address` under the name the token
    /// declares.
    pub fn include_token<D>(
        &mut self,
        caller: Address,
        directory: &D,
        token_address: Address,
    ) -> Result<()>
    where
        D: TokenDirectory + ?Sized,
    {
        let span = spans::admin_operation("include_token", &self.address, &caller);
        let _guard = span.enter();

        let result = self.access.require_admin_or_owner(caller).and_then(|()| {
            let name = declared_name(directory, token_address)?;
            self.tokens.include(&name, token_address)?;
            Ok(name)
        });

        match result {
            Ok(name) => {
                info!(
                    token_name = %name,
                    token_address = %token_address,
                    event = "token_included"
                );
                Ok(())
            }
            Err(e) => {
                spans::record_error(&e);
                Err(e)
            }
        }
    }

    /// Removes the registry entry for the name the token at `token_address`
    /// declares.
    ///
    /// The entry is keyed by name only: the stored address is not required to
    /// equal `token_address`. A mismatch is logged but still removes the entry.
    pub fn exclude_token<D>(
        &mut self,
        caller: Address,
        directory: &D,
        token_address: Address,
    ) -> Result<()>
    where
        D: TokenDirectory + ?Sized,
    {
        let span = spans::admin_operation("exclude_token", &self.address, &caller);
        let _guard = span.enter();

        let result = self.access.require_admin_or_owner(caller).and_then(|()| {
            let name = declared_name(directory, token_address)?;
            let stored = self.tokens.exclude(&name)?;
            Ok((name, stored))
        });

        match result {
            Ok((name, stored)) => {
                if stored != token_address {
                    warn!(
                        token_name = %name,
                        passed_address = %token_address,
                        stored_address = %stored,
                        event = "token_excluded_by_name_mismatch"
                    );
                }
                info!(
                    token_name = %name,
                    token_address = %stored,
                    event = "token_excluded"
                );
                Ok(())
            }
            Err(e) => {
                spans::record_error(&e);
                Err(e)
            }
        }
    }
}

fn declared_name<D>(directory: &D, token_address: Address) -> Result<String>
where
    D: TokenDirectory + ?Sized,
{
    directory
        .token(token_address)
        .map(|token| token.name().to_string())
        .ok_or(BridgeError::TokenContractNotFound {
            address: token_address,
        })
}

/// Resolves the token contract behind a registered address for mutation.
pub(super) fn resolve_token_mut<D>(
    directory: &mut D,
    token_address: Address,
) -> Result<&mut dyn BridgeToken>
where
    D: TokenDirectory + ?Sized,
{
    directory
        .token_mut(token_address)
        .ok_or(BridgeError::TokenContractNotFound {
            address: token_address,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MintableToken;
    use alloy_primitives::address;
    use std::collections::HashMap;

    const OWNER: Address = address!("00000000000000000000000000000000000000a1");
    const ADMIN: Address = address!("00000000000000000000000000000000000000a2");
    const HACKER: Address = address!("00000000000000000000000000000000000000a3");
    const BRIDGE: Address = address!("00000000000000000000000000000000000000e1");
    const TOKEN_A: Address = address!("00000000000000000000000000000000000000c1");
    const TOKEN_B: Address = address!("00000000000000000000000000000000000000c2");
    const TOKEN_C: Address = address!("00000000000000000000000000000000000000c3");

    fn directory() -> HashMap<Address, MintableToken> {
        HashMap::from([
            (TOKEN_A, MintableToken::new(OWNER, "KirillZaynutdinovToken", "KZT", 3)),
            (TOKEN_B, MintableToken::new(OWNER, "TestToken", "KZT", 3)),
            (TOKEN_C, MintableToken::new(OWNER, "KirillZaynutdinovToken", "KZT", 3)),
        ])
    }

    fn bridge() -> Bridge {
        Bridge::new(BRIDGE, OWNER, ChainId::new(1))
    }

    #[test]
    fn test_administrator_can_manage_registries() {
        let tokens = directory();
        let mut bridge = bridge();
        bridge.grant_role(OWNER, Role::Administrator, ADMIN).unwrap();

        bridge.update_chain_by_id(ADMIN, ChainId::new(2), true).unwrap();
        bridge.include_token(ADMIN, &tokens, TOKEN_A).unwrap();

        assert!(bridge.is_chain_supported(ChainId::new(2)));
        assert_eq!(bridge.token_address("KirillZaynutdinovToken"), Some(TOKEN_A));
    }

    #[test]
    fn test_update_chain_twice_is_not_an_error() {
        let mut bridge = bridge();
        bridge.update_chain_by_id(OWNER, ChainId::new(2), true).unwrap();
        bridge.update_chain_by_id(OWNER, ChainId::new(2), true).unwrap();
        assert!(bridge.is_chain_supported(ChainId::new(2)));
    }

    #[test]
    fn test_unauthorized_calls_leave_state_unchanged() {
        let tokens = directory();
        let mut bridge = bridge();
        bridge.update_chain_by_id(OWNER, ChainId::new(3), true).unwrap();
        bridge.include_token(OWNER, &tokens, TOKEN_A).unwrap();
        let before = bridge.clone();

        let results = [
            bridge.update_chain_by_id(HACKER, ChainId::new(3), false),
            bridge.include_token(HACKER, &tokens, TOKEN_B),
            bridge.exclude_token(HACKER, &tokens, TOKEN_A),
            bridge.grant_role(HACKER, Role::Administrator, HACKER),
        ];

        for result in results {
            assert!(matches!(
                result,
                Err(BridgeError::Unauthorized { account }) if account == HACKER
            ));
        }
        assert_eq!(bridge, before);
    }

    #[test]
    fn test_include_same_name_twice_fails() {
        let tokens = directory();
        let mut bridge = bridge();
        bridge.include_token(OWNER, &tokens, TOKEN_A).unwrap();

        let same = bridge.include_token(OWNER, &tokens, TOKEN_A).unwrap_err();
        assert!(matches!(same, BridgeError::TokenAlreadyAdded { .. }));

        // A different contract declaring the same name collides too.
        let other = bridge.include_token(OWNER, &tokens, TOKEN_C).unwrap_err();
        assert!(matches!(other, BridgeError::TokenAlreadyAdded { .. }));
        assert_eq!(bridge.token_address("KirillZaynutdinovToken"), Some(TOKEN_A));
    }

    #[test]
    fn test_exclude_then_exclude_again_fails() {
        let tokens = directory();
        let mut bridge = bridge();
        bridge.include_token(OWNER, &tokens, TOKEN_B).unwrap();

        bridge.exclude_token(OWNER, &tokens, TOKEN_B).unwrap();
        let err = bridge.exclude_token(OWNER, &tokens, TOKEN_B).unwrap_err();
        assert!(matches!(err, BridgeError::TokenNotAdded { ref name } if name == "TestToken"));

        bridge.include_token(OWNER, &tokens, TOKEN_B).unwrap();
        assert_eq!(bridge.token_address("TestToken"), Some(TOKEN_B));
    }

    #[test]
    fn test_exclude_is_keyed_by_declared_name() {
        let tokens = directory();
        let mut bridge = bridge();
        bridge.include_token(OWNER, &tokens, TOKEN_A).unwrap();

        // TOKEN_C declares the same name as the registered TOKEN_A.
        bridge.exclude_token(OWNER, &tokens, TOKEN_C).unwrap();
        assert_eq!(bridge.token_address("KirillZaynutdinovToken"), None);
    }

    #[test]
    fn test_include_unknown_contract_fails() {
        let tokens = directory();
        let mut bridge = bridge();
        let missing = address!("00000000000000000000000000000000000000ff");

        let err = bridge.include_token(OWNER, &tokens, missing).unwrap_err();
        assert!(matches!(err, BridgeError::TokenContractNotFound { address } if address == missing));
        assert!(bridge.tokens().is_empty());
    }
}
