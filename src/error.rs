use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::access::Role;
use crate::chain::{ChainId, InvalidChainId};

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge: account {account} does not have access rights")]
    Unauthorized { account: Address },

    #[error("Role {role} cannot be granted")]
    RoleNotGrantable { role: Role },

    #[error("Chain is not supported: {chain_id}")]
    ChainNotSupported { chain_id: ChainId },

    #[error("Token not added: {name}")]
    TokenNotAdded { name: String },

    #[error("Token already added: {name}")]
    TokenAlreadyAdded { name: String },

    #[error("Swap {counter} is already redeemed")]
    AlreadyRedeemed { counter: U256 },

    #[error("Signature not valid")]
    SignatureNotValid,

    #[error("Swap counter overflow")]
    CounterOverflow,

    #[error("Token {token}: account {account} is not owner or administrator")]
    TokenAccessDenied { token: String, account: Address },

    #[error("Token {token}: insufficient balance for {account}, has {balance}, needs {required}")]
    InsufficientBalance {
        token: String,
        account: Address,
        balance: U256,
        required: U256,
    },

    #[error("Token {token}: total supply would overflow")]
    SupplyOverflow { token: String },

    #[error("No token contract at {address}")]
    TokenContractNotFound { address: Address },

    #[error("No bridge contract at {address}")]
    BridgeNotFound { address: Address },

    #[error("Invalid event data: {0}")]
    InvalidChainId(#[from] InvalidChainId),

    #[error("Timeout waiting for swap event {counter}")]
    SwapEventTimeout { counter: U256 },

    #[error("Event source error: {0}")]
    EventSource(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Signer error: {0}")]
    Signer(#[from] alloy_signer::Error),

    #[error("Local signer error: {0}")]
    LocalSigner(#[from] alloy_signer_local::LocalSignerError),

    #[error("ABI encoding/decoding error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
