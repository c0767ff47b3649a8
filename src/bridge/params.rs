use alloy_primitives::{Address, Signature, U256};
use bon::Builder;

use crate::chain::ChainId;
use crate::error::Result;
use crate::protocol::SignatureParts;

/// Parameters for a source-side swap
#[derive(Builder, Debug, Clone)]
pub struct SwapParams {
    #[builder(into)]
    token_name: String,
    recipient: Address,
    #[builder(into)]
    destination_chain_id: ChainId,
    amount: U256,
}

impl SwapParams {
    pub fn token_name(&self) -> &str {
        &self.token_name
    }

    pub fn recipient(&self) -> Address {
        self.recipient
    }

    pub fn destination_chain_id(&self) -> ChainId {
        self.destination_chain_id
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }
}

/// Parameters for a destination-side redeem
///
/// The recipient is not a parameter: it is always the calling account.
#[derive(Builder, Debug, Clone)]
pub struct RedeemParams {
    #[builder(into)]
    source_chain_id: ChainId,
    #[builder(into)]
    token_name: String,
    amount: U256,
    counter: U256,
    signature: Signature,
}

impl RedeemParams {
    /// Builds redeem parameters from the `(v, r, s)` signature components.
    pub fn from_parts(
        source_chain_id: impl Into<ChainId>,
        token_name: impl Into<String>,
        amount: U256,
        counter: U256,
        parts: SignatureParts,
    ) -> Result<Self> {
        Ok(Self {
            source_chain_id: source_chain_id.into(),
            token_name: token_name.into(),
            amount,
            counter,
            signature: parts.to_signature()?,
        })
    }

    pub fn source_chain_id(&self) -> ChainId {
        self.source_chain_id
    }

    pub fn token_name(&self) -> &str {
        &self.token_name
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }

    pub fn counter(&self) -> U256 {
        self.counter
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}
