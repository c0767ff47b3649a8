//! Single-chain host environment
//!
//! A [`Network`] plays the part of one blockchain: it owns the deployed token
//! and bridge contracts, assigns contract addresses, routes calls that need
//! both a bridge and its tokens, and keeps the event log. Every call runs to
//! completion before the next one starts; [`SharedNetwork`] extends that
//! guarantee to concurrent callers by holding a lock for the whole call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy_primitives::{Address, Log, U256};
use tracing::{debug, info};

use crate::access::Role;
use crate::bridge::{Bridge, RedeemParams, SwapParams};
use crate::chain::ChainId;
use crate::error::{BridgeError, Result};
use crate::protocol::{redeemed_log, SwapRecord};
use crate::token::{BridgeToken, MintableToken};

/// In-process model of one chain with its token and bridge contracts.
#[derive(Debug, Clone)]
pub struct Network {
    chain_id: ChainId,
    tokens: HashMap<Address, MintableToken>,
    bridges: HashMap<Address, Bridge>,
    logs: Vec<Log>,
    deploy_nonce: u64,
}

impl Network {
    pub fn new(chain_id: impl Into<ChainId>) -> Self {
        Self {
            chain_id: chain_id.into(),
            tokens: HashMap::new(),
            bridges: HashMap::new(),
            logs: Vec::new(),
            deploy_nonce: 0,
        }
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Derives the next contract address for `deployer`, EVM `CREATE` style.
    fn next_address(&mut self, deployer: Address) -> Address {
        let address = deployer.create(self.deploy_nonce);
        self.deploy_nonce += 1;
        address
    }

    /// Deploys a token owned by `deployer` and returns its address.
    pub fn deploy_token(
        &mut self,
        deployer: Address,
        name: &str,
        symbol: &str,
        decimals: u8,
    ) -> Address {
        let address = self.next_address(deployer);
        self.tokens.insert(
            address,
            MintableToken::new(deployer, name, symbol, decimals),
        );

        info!(
            chain_id = %self.chain_id,
            token_address = %address,
            token_name = name,
            event = "token_deployed"
        );

        address
    }

    /// Deploys a bridge owned by `deployer` for this network's chain id.
    pub fn deploy_bridge(&mut self, deployer: Address) -> Address {
        let address = self.next_address(deployer);
        self.bridges
            .insert(address, Bridge::new(address, deployer, self.chain_id));

        info!(
            chain_id = %self.chain_id,
            bridge = %address,
            event = "bridge_deployed"
        );

        address
    }

    pub fn token(&self, address: Address) -> Result<&MintableToken> {
        self.tokens
            .get(&address)
            .ok_or(BridgeError::TokenContractNotFound { address })
    }

    pub fn token_mut(&mut self, address: Address) -> Result<&mut MintableToken> {
        self.tokens
            .get_mut(&address)
            .ok_or(BridgeError::TokenContractNotFound { address })
    }

    pub fn bridge(&self, address: Address) -> Result<&Bridge> {
        self.bridges
            .get(&address)
            .ok_or(BridgeError::BridgeNotFound { address })
    }

    /// Direct access for entry points that do not touch tokens
    /// (`grant_role`, `update_chain_by_id`).
    pub fn bridge_mut(&mut self, address: Address) -> Result<&mut Bridge> {
        self.bridges
            .get_mut(&address)
            .ok_or(BridgeError::BridgeNotFound { address })
    }

    /// Token contract registered on `bridge` under `name`.
    pub fn bridge_token(&self, bridge: Address, name: &str) -> Result<&MintableToken> {
        let address = self.bridge(bridge)?.tokens().resolve(name)?;
        self.token(address)
    }

    pub fn mint(
        &mut self,
        token: Address,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<()> {
        self.token_mut(token)?.mint(caller, to, amount)
    }

    pub fn grant_token_role(
        &mut self,
        token: Address,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<()> {
        self.token_mut(token)?.grant_role(caller, role, account)
    }

    pub fn include_token(
        &mut self,
        bridge: Address,
        caller: Address,
        token_address: Address,
    ) -> Result<()> {
        let bridge = self
            .bridges
            .get_mut(&bridge)
            .ok_or(BridgeError::BridgeNotFound { address: bridge })?;
        bridge.include_token(caller, &self.tokens, token_address)
    }

    pub fn exclude_token(
        &mut self,
        bridge: Address,
        caller: Address,
        token_address: Address,
    ) -> Result<()> {
        let bridge = self
            .bridges
            .get_mut(&bridge)
            .ok_or(BridgeError::BridgeNotFound { address: bridge })?;
        bridge.exclude_token(caller, &self.tokens, token_address)
    }

    /// Runs `swap` on `bridge` and appends the `SwapInitialized` log.
    pub fn swap(
        &mut self,
        bridge_address: Address,
        caller: Address,
        params: &SwapParams,
    ) -> Result<SwapRecord> {
        let bridge = self
            .bridges
            .get_mut(&bridge_address)
            .ok_or(BridgeError::BridgeNotFound {
                address: bridge_address,
            })?;
        let record = bridge.swap(caller, &mut self.tokens, params)?;
        self.logs.push(record.to_log(bridge_address));
        Ok(record)
    }

    /// Runs `redeem` on `bridge` and appends the `Redeemed` log.
    pub fn redeem(
        &mut self,
        bridge_address: Address,
        caller: Address,
        params: &RedeemParams,
    ) -> Result<SwapRecord> {
        let bridge = self
            .bridges
            .get_mut(&bridge_address)
            .ok_or(BridgeError::BridgeNotFound {
                address: bridge_address,
            })?;
        let record = bridge.redeem(caller, &mut self.tokens, params)?;
        self.logs.push(redeemed_log(bridge_address, &record));
        Ok(record)
    }

    /// All logs emitted on this network, oldest first.
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Swap records announced by `bridge`, oldest first.
    pub fn swap_events(&self, bridge: Address) -> Result<Vec<SwapRecord>> {
        let mut records = Vec::new();
        for log in self.logs.iter().filter(|log| log.address == bridge) {
            if let Some(record) = SwapRecord::from_log(log)? {
                records.push(record);
            }
        }

        debug!(
            bridge = %bridge,
            swap_events = records.len(),
            event = "swap_events_scanned"
        );

        Ok(records)
    }

    /// The swap announced by `bridge` with the given counter, if any.
    pub fn swap_event(&self, bridge: Address, counter: U256) -> Result<Option<SwapRecord>> {
        Ok(self
            .swap_events(bridge)?
            .into_iter()
            .find(|record| record.counter == counter))
    }
}

/// A [`Network`] shared between tasks.
///
/// Each [`SharedNetwork::with`] call holds the lock for its full duration, so
/// calls are serialized exactly as transactions on one chain are.
#[derive(Debug, Clone)]
pub struct SharedNetwork {
    inner: Arc<Mutex<Network>>,
}

impl SharedNetwork {
    pub fn new(network: Network) -> Self {
        Self {
            inner: Arc::new(Mutex::new(network)),
        }
    }

    /// Runs `f` against the network with exclusive access.
    pub fn with<T>(&self, f: impl FnOnce(&mut Network) -> T) -> Result<T> {
        let mut network = self
            .inner
            .lock()
            .map_err(|e| BridgeError::EventSource(format!("network lock poisoned: {e}")))?;
        Ok(f(&mut network))
    }
}

impl From<Network> for SharedNetwork {
    fn from(network: Network) -> Self {
        Self::new(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const DEPLOYER: Address = address!("00000000000000000000000000000000000000a1");
    const USER: Address = address!("00000000000000000000000000000000000000b1");

    #[test]
    fn test_deploy_addresses_are_distinct_and_deterministic() {
        let mut first = Network::new(1u64);
        let mut second = Network::new(1u64);

        let token = first.deploy_token(DEPLOYER, "KirillZaynutdinovToken", "KZT", 3);
        let bridge = first.deploy_bridge(DEPLOYER);

        assert_ne!(token, bridge);
        assert_eq!(token, DEPLOYER.create(0));
        assert_eq!(second.deploy_token(DEPLOYER, "Other", "OTH", 18), token);
    }

    #[test]
    fn test_bridge_uses_network_chain_id() {
        let mut network = Network::new(56u64);
        let bridge = network.deploy_bridge(DEPLOYER);
        assert_eq!(network.bridge(bridge).unwrap().chain_id(), ChainId::new(56));
        assert_eq!(network.bridge(bridge).unwrap().owner(), DEPLOYER);
    }

    #[test]
    fn test_unknown_contracts_are_reported() {
        let mut network = Network::new(1u64);
        assert!(matches!(
            network.bridge(USER),
            Err(BridgeError::BridgeNotFound { .. })
        ));
        assert!(matches!(
            network.mint(USER, DEPLOYER, USER, U256::from(1u64)),
            Err(BridgeError::TokenContractNotFound { .. })
        ));
    }

    #[test]
    fn test_failed_swap_emits_no_log() {
        let mut network = Network::new(1u64);
        let token = network.deploy_token(DEPLOYER, "KirillZaynutdinovToken", "KZT", 3);
        let bridge = network.deploy_bridge(DEPLOYER);
        network.include_token(bridge, DEPLOYER, token).unwrap();

        let params = SwapParams::builder()
            .token_name("KirillZaynutdinovToken")
            .recipient(USER)
            .destination_chain_id(2u64)
            .amount(U256::from(10u64))
            .build();

        assert!(network.swap(bridge, USER, &params).is_err());
        assert!(network.logs().is_empty());
    }

    #[test]
    fn test_shared_network_serializes_access() {
        let shared = SharedNetwork::new(Network::new(1u64));
        let bridge = shared.with(|network| network.deploy_bridge(DEPLOYER)).unwrap();

        let handles: Vec<_> = (0..4u64)
            .map(|id| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    shared
                        .with(|network| {
                            network
                                .bridge_mut(bridge)
                                .and_then(|b| b.update_chain_by_id(DEPLOYER, ChainId::new(id + 10), true))
                        })
                        .unwrap()
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let supported = shared
            .with(|network| network.bridge(bridge).map(|b| b.chains().len()))
            .unwrap()
            .unwrap();
        assert_eq!(supported, 4);
    }
}
