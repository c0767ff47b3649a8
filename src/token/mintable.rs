// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory ERC-20 style token with owner/administrator mint authority.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use tracing::{debug, info};

use super::BridgeToken;
use crate::access::{AccessControl, Role};
use crate::error::{BridgeError, Result};

/// Token contract the bridge mints into and burns from.
///
/// Mint and burn are restricted to the token's owner and administrator. The
/// bridge is granted the administrator role at deployment, which lets it burn
/// on swap and mint on redeem.
///
/// # Example
///
/// ```rust
/// use swap_bridge::{BridgeToken, MintableToken};
/// use alloy_primitives::{address, U256};
///
/// let owner = address!("00000000000000000000000000000000000000a1");
/// let holder = address!("00000000000000000000000000000000000000b1");
///
/// let mut token = MintableToken::new(owner, "KirillZaynutdinovToken", "KZT", 3);
/// token.mint(owner, holder, U256::from(10_000u64))?;
/// assert_eq!(token.balance_of(holder), U256::from(10_000u64));
/// # Ok::<(), swap_bridge::BridgeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MintableToken {
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: U256,
    balances: HashMap<Address, U256>,
    access: AccessControl,
}

impl MintableToken {
    pub fn new(
        owner: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Self {
        let token = Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply: U256::ZERO,
            balances: HashMap::new(),
            access: AccessControl::new(owner),
        };

        debug!(
            owner = %owner,
            name = %token.name,
            symbol = %token.symbol,
            decimals = decimals,
            event = "token_initialized"
        );

        token
    }

    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    pub fn administrator(&self) -> Option<Address> {
        self.access.administrator()
    }

    /// Moves `amount` from `from` to `to`. No authority beyond ownership of
    /// the balance is required.
    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<()> {
        let from_balance = self.debited_balance(from, amount)?;
        if from != to {
            let to_balance = self.credited_balance(to, amount)?;
            self.balances.insert(from, from_balance);
            self.balances.insert(to, to_balance);
        }

        debug!(
            token = %self.name,
            from = %from,
            to = %to,
            amount = %amount,
            event = "token_transferred"
        );

        Ok(())
    }

    fn require_mint_authority(&self, caller: Address) -> Result<()> {
        if self.access.is_privileged(caller) {
            Ok(())
        } else {
            Err(BridgeError::TokenAccessDenied {
                token: self.name.clone(),
                account: caller,
            })
        }
    }

    /// Balance of `account` after removing `amount`. Does not write.
    fn debited_balance(&self, account: Address, amount: U256) -> Result<U256> {
        let balance = self.balance_of(account);
        balance
            .checked_sub(amount)
            .ok_or_else(|| BridgeError::InsufficientBalance {
                token: self.name.clone(),
                account,
                balance,
                required: amount,
            })
    }

    /// Balance of `account` after adding `amount`. Does not write.
    fn credited_balance(&self, account: Address, amount: U256) -> Result<U256> {
        self.balance_of(account)
            .checked_add(amount)
            .ok_or_else(|| self.supply_overflow())
    }

    fn supply_overflow(&self) -> BridgeError {
        BridgeError::SupplyOverflow {
            token: self.name.clone(),
        }
    }
}

impl BridgeToken for MintableToken {
    fn name(&self) -> &str {
        &self.name
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or(U256::ZERO)
    }

    fn total_supply(&self) -> U256 {
        self.total_supply
    }

    fn mint(&mut self, caller: Address, to: Address, amount: U256) -> Result<()> {
        self.require_mint_authority(caller)?;
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or_else(|| self.supply_overflow())?;
        let balance = self.credited_balance(to, amount)?;

        self.total_supply = total_supply;
        self.balances.insert(to, balance);

        info!(
            token = %self.name,
            caller = %caller,
            to = %to,
            amount = %amount,
            total_supply = %self.total_supply,
            event = "token_minted"
        );

        Ok(())
    }

    fn burn(&mut self, caller: Address, from: Address, amount: U256) -> Result<()> {
        self.require_mint_authority(caller)?;
        let balance = self.debited_balance(from, amount)?;
        let total_supply = self.total_supply.checked_sub(amount).ok_or_else(|| {
            BridgeError::InsufficientBalance {
                token: self.name.clone(),
                account: from,
                balance: self.total_supply,
                required: amount,
            }
        })?;

        self.balances.insert(from, balance);
        self.total_supply = total_supply;

        info!(
            token = %self.name,
            caller = %caller,
            from = %from,
            amount = %amount,
            total_supply = %self.total_supply,
            event = "token_burned"
        );

        Ok(())
    }

    fn grant_role(&mut self, caller: Address, role: Role, account: Address) -> Result<()> {
        self.access
            .grant_role(caller, role, account)
            .map(|_| ())
            .map_err(|err| match err {
                BridgeError::Unauthorized { account } => BridgeError::TokenAccessDenied {
                    token: self.name.clone(),
                    account,
                },
                other => other,
            })
    }

    fn has_role(&self, role: Role, account: Address) -> bool {
        self.access.has_role(role, account)
    }
}
