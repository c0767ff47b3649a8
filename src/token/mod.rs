// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token collaborator interface and registry
//!
//! The bridge never owns token balances. It reaches token contracts through
//! [`TokenDirectory`] and drives them through the narrow [`BridgeToken`]
//! interface: a name to key the registry, balance queries, and mint/burn calls
//! that the token authorizes against its own access control.

mod mintable;
mod registry;

pub use mintable::MintableToken;
pub use registry::TokenRegistry;

use std::collections::HashMap;

use alloy_primitives::{Address, U256};

use crate::access::Role;
use crate::error::Result;

/// Interface the bridge consumes from a token contract.
///
/// Mint and burn take the calling account explicitly; implementations must
/// reject callers without mint authority and must either apply the full
/// balance change or fail without side effects.
pub trait BridgeToken {
    /// Declared token name. Keys the bridge's token registry.
    fn name(&self) -> &str;

    fn symbol(&self) -> &str;

    fn decimals(&self) -> u8;

    fn balance_of(&self, account: Address) -> U256;

    fn total_supply(&self) -> U256;

    /// Credits `amount` to `to`, raising total supply.
    fn mint(&mut self, caller: Address, to: Address, amount: U256) -> Result<()>;

    /// Debits `amount` from `from`, lowering total supply.
    fn burn(&mut self, caller: Address, from: Address, amount: U256) -> Result<()>;

    /// Grants a role on the token. Granting the administrator role to the
    /// bridge is what gives the bridge mint authority.
    fn grant_role(&mut self, caller: Address, role: Role, account: Address) -> Result<()>;

    fn has_role(&self, role: Role, account: Address) -> bool;
}

/// Resolves token contract addresses to token instances.
pub trait TokenDirectory {
    fn token(&self, address: Address) -> Option<&dyn BridgeToken>;

    fn token_mut(&mut self, address: Address) -> Option<&mut dyn BridgeToken>;
}

impl<T: BridgeToken> TokenDirectory for HashMap<Address, T> {
    fn token(&self, address: Address) -> Option<&dyn BridgeToken> {
        self.get(&address).map(|token| token as &dyn BridgeToken)
    }

    fn token_mut(&mut self, address: Address) -> Option<&mut dyn BridgeToken> {
        self.get_mut(&address)
            .map(|token| token as &mut dyn BridgeToken)
    }
}
