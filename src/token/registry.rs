//! Name-keyed table of the token contracts a bridge manages.

use std::collections::BTreeMap;

use alloy_primitives::Address;

use crate::error::{BridgeError, Result};

/// Mapping from declared token name to token contract address.
///
/// Names are the only key: one name maps to at most one address, and an entry
/// can be re-added after it has been removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenRegistry {
    tokens: BTreeMap<String, Address>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(&mut self, name: &str, address: Address) -> Result<()> {
        if self.tokens.contains_key(name) {
            return Err(BridgeError::TokenAlreadyAdded {
                name: name.to_string(),
            });
        }
        self.tokens.insert(name.to_string(), address);
        Ok(())
    }

    /// Removes the entry for `name` and returns the address it pointed at.
    pub fn exclude(&mut self, name: &str) -> Result<Address> {
        self.tokens
            .remove(name)
            .ok_or_else(|| BridgeError::TokenNotAdded {
                name: name.to_string(),
            })
    }

    pub fn get(&self, name: &str) -> Option<Address> {
        self.tokens.get(name).copied()
    }

    /// Like [`TokenRegistry::get`], failing with `TokenNotAdded`.
    pub fn resolve(&self, name: &str) -> Result<Address> {
        self.get(name).ok_or_else(|| BridgeError::TokenNotAdded {
            name: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Address)> + '_ {
        self.tokens
            .iter()
            .map(|(name, address)| (name.as_str(), *address))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
