//! Swap record format
//!
//! A swap record is the ordered tuple an administrator signs on the source
//! chain and a redeemer presents on the destination chain. Its byte layout is
//! the wire contract between two independent bridge instances, so field order
//! and widths must match the EVM deployment exactly.
//!
//! # Packed pre-image
//!
//! Solidity `abi.encodePacked(uint256, string, address, uint256, uint256, uint256)`:
//!
//! - sourceChainId: uint256 (32 bytes, big-endian)
//! - tokenName: string (raw UTF-8 bytes, no length prefix, no padding)
//! - recipient: address (20 bytes)
//! - destinationChainId: uint256 (32 bytes)
//! - amount: uint256 (32 bytes)
//! - counter: uint256 (32 bytes)
//!
//! Fixed size: 32 + 20 + 32 + 32 + 32 = 148 bytes plus the name length.

use alloy_primitives::{eip191_hash_message, keccak256, Address, Bytes, Log, LogData, B256, U256};
use alloy_sol_types::{sol, SolEvent};
use serde::{Deserialize, Serialize};

use crate::chain::ChainId;
use crate::error::Result;

sol! {
    /// Emitted by `swap`; carries exactly the tuple that must be signed.
    event SwapInitialized(
        uint256 currentChainId,
        string tokenName,
        address recipient,
        uint256 chainId,
        uint256 value,
        uint256 counter
    );

    /// Emitted by `redeem` once the counter has been consumed.
    event Redeemed(
        uint256 sourceChainId,
        string tokenName,
        address recipient,
        uint256 value,
        uint256 counter
    );
}

/// One swap, as announced on the source chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRecord {
    /// Chain the tokens were burned on
    pub source_chain_id: ChainId,
    /// Registered token name, identical on both chains
    pub token_name: String,
    /// Account that may redeem on the destination chain
    pub recipient: Address,
    /// Chain the tokens will be minted on
    pub destination_chain_id: ChainId,
    /// Amount in the token's smallest unit
    pub amount: U256,
    /// Source bridge's swap counter after this swap
    pub counter: U256,
}

impl SwapRecord {
    /// Size of the packed pre-image excluding the token name
    pub const FIXED_SIZE: usize = 148;

    pub fn new(
        source_chain_id: ChainId,
        token_name: impl Into<String>,
        recipient: Address,
        destination_chain_id: ChainId,
        amount: U256,
        counter: U256,
    ) -> Self {
        Self {
            source_chain_id,
            token_name: token_name.into(),
            recipient,
            destination_chain_id,
            amount,
            counter,
        }
    }

    /// Encodes the record as the packed signing pre-image.
    pub fn encode_packed(&self) -> Bytes {
        let mut bytes = Vec::with_capacity(Self::FIXED_SIZE + self.token_name.len());

        bytes.extend_from_slice(&self.source_chain_id.to_u256().to_be_bytes::<32>());
        bytes.extend_from_slice(self.token_name.as_bytes());
        bytes.extend_from_slice(self.recipient.as_slice());
        bytes.extend_from_slice(&self.destination_chain_id.to_u256().to_be_bytes::<32>());
        bytes.extend_from_slice(&self.amount.to_be_bytes::<32>());
        bytes.extend_from_slice(&self.counter.to_be_bytes::<32>());

        Bytes::from(bytes)
    }

    /// `keccak256` of the packed pre-image. This is the 32-byte message the
    /// administrator signs.
    pub fn message_hash(&self) -> B256 {
        keccak256(self.encode_packed())
    }

    /// EIP-191 personal-message digest of [`SwapRecord::message_hash`]; the
    /// value the signature is actually computed over.
    pub fn signing_hash(&self) -> B256 {
        eip191_hash_message(self.message_hash())
    }

    /// Encodes the record as the `SwapInitialized` log emitted by `bridge`.
    pub fn to_log(&self, bridge: Address) -> Log {
        Log {
            address: bridge,
            data: SwapInitialized::from(self).encode_log_data(),
        }
    }

    /// Decodes a `SwapInitialized` log.
    ///
    /// Returns `Ok(None)` for logs of any other event.
    pub fn from_log(log: &Log) -> Result<Option<Self>> {
        if !is_event::<SwapInitialized>(&log.data) {
            return Ok(None);
        }
        let event = SwapInitialized::decode_log_data(&log.data)?;
        Ok(Some(Self::try_from(event)?))
    }
}

fn is_event<E: SolEvent>(data: &LogData) -> bool {
    data.topics()
        .first()
        .is_some_and(|topic| *topic == E::SIGNATURE_HASH)
}

impl From<&SwapRecord> for SwapInitialized {
    fn from(record: &SwapRecord) -> Self {
        Self {
            currentChainId: record.source_chain_id.to_u256(),
            tokenName: record.token_name.clone(),
            recipient: record.recipient,
            chainId: record.destination_chain_id.to_u256(),
            value: record.amount,
            counter: record.counter,
        }
    }
}

impl TryFrom<SwapInitialized> for SwapRecord {
    type Error = crate::error::BridgeError;

    fn try_from(event: SwapInitialized) -> Result<Self> {
        Ok(Self {
            source_chain_id: ChainId::try_from(event.currentChainId)?,
            token_name: event.tokenName,
            recipient: event.recipient,
            destination_chain_id: ChainId::try_from(event.chainId)?,
            amount: event.value,
            counter: event.counter,
        })
    }
}

/// Builds the `Redeemed` log for a consumed record.
pub(crate) fn redeemed_log(bridge: Address, record: &SwapRecord) -> Log {
    let event = Redeemed {
        sourceChainId: record.source_chain_id.to_u256(),
        tokenName: record.token_name.clone(),
        recipient: record.recipient,
        value: record.amount,
        counter: record.counter,
    };
    Log {
        address: bridge,
        data: event.encode_log_data(),
    }
}
