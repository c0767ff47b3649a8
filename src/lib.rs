//! # swap-bridge
//!
//! A signature-authorized burn-and-mint token bridge.
//!
//! Each chain runs a [`Bridge`] next to a mintable token. A user calls
//! [`Bridge::swap`] on the source chain, which burns their tokens and emits a
//! `SwapInitialized` event with a fresh counter. The bridge administrator
//! signs that event off-chain ([`Attestor`], [`Relayer`]); the recipient then
//! calls [`Bridge::redeem`] on the destination chain with the signature, which
//! mints the same amount at most once per counter on that bridge.
//!
//! ## Quick Start
//!
//! ```rust
//! use swap_bridge::{deploy, Attestor, DeploymentConfig, Network, SwapParams};
//! use alloy_primitives::{address, U256};
//!
//! # fn example() -> swap_bridge::Result<()> {
//! let owner = address!("00000000000000000000000000000000000000a1");
//! let user = address!("00000000000000000000000000000000000000b1");
//! let attestor = Attestor::random();
//!
//! let mut eth = Network::new(1u64);
//! let mut bsc = Network::new(2u64);
//! let config = DeploymentConfig {
//!     token_name: "KirillZaynutdinovToken".to_string(),
//!     token_symbol: "KZT".to_string(),
//!     decimals: 3,
//!     remote_chains: vec![2u64.into()],
//!     initial_mint: U256::ZERO,
//! };
//! let on_eth = deploy(&mut eth, &config, owner, attestor.address())?;
//! let bsc_config = DeploymentConfig {
//!     remote_chains: vec![1u64.into()],
//!     ..config.clone()
//! };
//! let on_bsc = deploy(&mut bsc, &bsc_config, owner, attestor.address())?;
//!
//! eth.mint(on_eth.token, owner, user, U256::from(100_000u64))?;
//!
//! let params = SwapParams::builder()
//!     .token_name("KirillZaynutdinovToken")
//!     .recipient(user)
//!     .destination_chain_id(2u64)
//!     .amount(U256::from(100_000u64))
//!     .build();
//! let record = eth.swap(on_eth.bridge, user, &params)?;
//!
//! let attestation = attestor.attest(&record)?;
//! bsc.redeem(on_bsc.bridge, user, &attestation.redeem_params()?)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Public API
//!
//! - [`Bridge`] with [`SwapParams`] and [`RedeemParams`] - the bridge contract
//! - [`AccessControl`], [`ChainRegistry`], [`TokenRegistry`] - its state
//! - [`BridgeToken`], [`TokenDirectory`], [`MintableToken`] - the token seam
//! - [`SwapRecord`], [`SignatureParts`] - the signed message and its signature
//! - [`Network`], [`SharedNetwork`] - an in-process chain hosting the contracts
//! - [`Attestor`], [`Relayer`] - administrator tooling
//! - [`BridgeError`] and [`Result`] - error types

mod access;
mod attestor;
mod bridge;
mod chain;
mod config;
mod deploy;
mod error;
mod network;
mod protocol;
mod relayer;
mod token;
mod traits;

pub use access::{AccessControl, Role};
pub use attestor::{Attestor, SwapAttestation};
pub use bridge::{Bridge, RedeemParams, SwapParams};
pub use chain::{ChainId, ChainRegistry, InvalidChainId};
pub use config::{AttestorConfig, DeploymentConfig, PollingConfig, ADMINISTRATOR_KEY_ENV};
pub use deploy::{deploy, Deployment};
pub use error::{BridgeError, Result};
pub use network::{Network, SharedNetwork};
pub use protocol::{recover_signer, Redeemed, SignatureParts, SwapInitialized, SwapRecord};
pub use relayer::Relayer;
pub use token::{BridgeToken, MintableToken, TokenDirectory, TokenRegistry};
pub use traits::{Clock, SwapEventSource};

pub mod providers;

// Public module for advanced users who need custom instrumentation
pub mod spans;

// Fakes for the relayer seams
pub mod testing;
