//! Administrator-side signing of observed swaps
//!
//! After a `SwapInitialized` event appears on the source chain, the
//! administrator signs the record's message hash and hands the `(v, r, s)`
//! triple to the recipient, who submits it to `redeem` on the destination.

use alloy_primitives::{Address, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bridge::RedeemParams;
use crate::config::AttestorConfig;
use crate::error::Result;
use crate::protocol::{SignatureParts, SwapRecord};

/// Holds the administrator key and signs swap records.
#[derive(Debug, Clone)]
pub struct Attestor {
    signer: PrivateKeySigner,
}

impl Attestor {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    /// Attestor with a freshly generated key.
    pub fn random() -> Self {
        Self::new(PrivateKeySigner::random())
    }

    pub fn from_private_key(key: &str) -> Result<Self> {
        Ok(AttestorConfig::from_private_key(key)?.into())
    }

    /// The account the bridge must have as administrator for these
    /// attestations to be accepted.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signs `record` as an EIP-191 personal message over its message hash.
    pub fn attest(&self, record: &SwapRecord) -> Result<SwapAttestation> {
        let message_hash = record.message_hash();
        let signature = self.signer.sign_message_sync(message_hash.as_slice())?;

        info!(
            administrator = %self.address(),
            counter = %record.counter,
            message_hash = %message_hash,
            event = "swap_attested"
        );

        Ok(SwapAttestation {
            record: record.clone(),
            signature: SignatureParts::from(&signature),
        })
    }
}

impl From<AttestorConfig> for Attestor {
    fn from(config: AttestorConfig) -> Self {
        Self::new(config.signer)
    }
}

/// A signed swap, everything the recipient needs to redeem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapAttestation {
    pub record: SwapRecord,
    pub signature: SignatureParts,
}

impl SwapAttestation {
    pub fn v(&self) -> u8 {
        self.signature.v
    }

    pub fn r(&self) -> B256 {
        self.signature.r
    }

    pub fn s(&self) -> B256 {
        self.signature.s
    }

    /// Arguments for `redeem` on the destination bridge. The recipient must
    /// submit them from `record.recipient`.
    pub fn redeem_params(&self) -> Result<RedeemParams> {
        RedeemParams::from_parts(
            self.record.source_chain_id,
            self.record.token_name.clone(),
            self.record.amount,
            self.record.counter,
            self.signature,
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainId;
    use crate::protocol::recover_signer;
    use alloy_primitives::{address, U256};

    fn record() -> SwapRecord {
        SwapRecord::new(
            ChainId::new(1),
            "KirillZaynutdinovToken",
            address!("00000000000000000000000000000000000000b1"),
            ChainId::new(2),
            U256::from(100_000u64),
            U256::from(1u64),
        )
    }

    #[test]
    fn test_attestation_recovers_to_administrator() {
        let attestor = Attestor::random();
        let attestation = attestor.attest(&record()).unwrap();

        assert!(attestation.v() == 27 || attestation.v() == 28);

        let params = attestation.redeem_params().unwrap();
        let signer = recover_signer(&attestation.record, params.signature()).unwrap();
        assert_eq!(signer, attestor.address());
    }

    #[test]
    fn test_redeem_params_carry_record_fields() {
        let attestation = Attestor::random().attest(&record()).unwrap();
        let params = attestation.redeem_params().unwrap();

        assert_eq!(params.source_chain_id(), ChainId::new(1));
        assert_eq!(params.token_name(), "KirillZaynutdinovToken");
        assert_eq!(params.amount(), U256::from(100_000u64));
        assert_eq!(params.counter(), U256::from(1u64));
    }

    #[test]
    fn test_from_private_key_is_deterministic() {
        let key = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let attestor = Attestor::from_private_key(key).unwrap();
        assert_eq!(
            attestor.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn test_json_hand_off() {
        let attestation = Attestor::random().attest(&record()).unwrap();
        let json = attestation.to_json().unwrap();

        assert!(json.contains("\"sourceChainId\""));
        assert!(json.contains("\"v\""));
        assert_eq!(SwapAttestation::from_json(&json).unwrap(), attestation);
    }
}
