//! Administrator signatures over swap records
//!
//! Signatures are secp256k1 over the EIP-191 personal-message digest of the
//! record's message hash (what `eth_sign`/`signMessage` produce). They travel
//! either as [`Signature`] values or as the `(v, r, s)` triple accepted by the
//! EVM `redeem` entry point.

use alloy_primitives::{Address, Signature, B256, U256};
use serde::{Deserialize, Serialize};

use super::SwapRecord;
use crate::error::{BridgeError, Result};

/// The `(v, r, s)` components of a recoverable signature.
///
/// `v` is 27 or 28 as produced by `splitSignature`; 0 and 1 are also accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureParts {
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl SignatureParts {
    pub fn new(v: u8, r: B256, s: B256) -> Self {
        Self { v, r, s }
    }

    /// Reassembles the signature. An out-of-range `v` cannot recover a signer,
    /// so it is reported as `SignatureNotValid`.
    pub fn to_signature(&self) -> Result<Signature> {
        let y_parity = match self.v {
            0 | 27 => false,
            1 | 28 => true,
            _ => return Err(BridgeError::SignatureNotValid),
        };
        Ok(Signature::new(
            U256::from_be_slice(self.r.as_slice()),
            U256::from_be_slice(self.s.as_slice()),
            y_parity,
        ))
    }
}

impl From<&Signature> for SignatureParts {
    fn from(signature: &Signature) -> Self {
        Self {
            v: 27 + u8::from(signature.v()),
            r: B256::from(signature.r().to_be_bytes::<32>()),
            s: B256::from(signature.s().to_be_bytes::<32>()),
        }
    }
}

/// Recovers the account that signed `record`.
///
/// Any recovery failure is reported as `SignatureNotValid`, matching the EVM
/// behavior where `ecrecover` yields the zero address.
pub fn recover_signer(record: &SwapRecord, signature: &Signature) -> Result<Address> {
    signature
        .recover_address_from_prehash(&record.signing_hash())
        .map_err(|_| BridgeError::SignatureNotValid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainId;
    use alloy_primitives::address;
    use alloy_signer::SignerSync;
    use alloy_signer_local::PrivateKeySigner;

    fn record() -> SwapRecord {
        SwapRecord::new(
            ChainId::new(1),
            "KZT",
            address!("3c44cdddb6a900fa2b585dd299e03d12fa4293bc"),
            ChainId::new(2),
            U256::from(100_000u64),
            U256::from(1u64),
        )
    }

    #[test]
    fn test_recovers_personal_message_signer() {
        let signer = PrivateKeySigner::random();
        let record = record();
        let signature = signer
            .sign_message_sync(record.message_hash().as_slice())
            .unwrap();

        assert_eq!(recover_signer(&record, &signature).unwrap(), signer.address());
    }

    #[test]
    fn test_parts_round_trip() {
        let signer = PrivateKeySigner::random();
        let signature = signer
            .sign_message_sync(record().message_hash().as_slice())
            .unwrap();

        let parts = SignatureParts::from(&signature);
        assert!(parts.v == 27 || parts.v == 28);
        assert_eq!(parts.to_signature().unwrap(), signature);

        let zero_based = SignatureParts::new(parts.v - 27, parts.r, parts.s);
        assert_eq!(zero_based.to_signature().unwrap(), signature);
    }

    #[test]
    fn test_invalid_v_is_rejected() {
        let parts = SignatureParts::new(29, B256::repeat_byte(1), B256::repeat_byte(2));
        assert!(matches!(
            parts.to_signature().unwrap_err(),
            BridgeError::SignatureNotValid
        ));
    }

    #[test]
    fn test_tampered_record_recovers_other_account() {
        let signer = PrivateKeySigner::random();
        let record = record();
        let signature = signer
            .sign_message_sync(record.message_hash().as_slice())
            .unwrap();

        let mut tampered = record.clone();
        tampered.amount = U256::from(999_999u64);

        let recovered = recover_signer(&tampered, &signature);
        assert!(recovered.map_or(true, |account| account != signer.address()));
    }
}
