//! Chain identifiers
//!
//! A chain identifier is an opaque integer that names one blockchain network.
//! It is carried as a `uint256` in the swap pre-image, but every network this
//! crate models fits in a `u64` (the EIP-155 chain id space).

use std::fmt;

use alloy_chains::NamedChain;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Identifier of a blockchain network.
///
/// # Example
///
/// ```rust
/// use swap_bridge::ChainId;
/// use alloy_chains::NamedChain;
///
/// let mainnet = ChainId::from(NamedChain::Mainnet);
/// assert_eq!(mainnet.as_u64(), 1);
/// assert_eq!(mainnet.named(), Some(NamedChain::Mainnet));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// Creates a chain identifier from its numeric value.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric chain id.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the chain id widened to the `uint256` used on the wire.
    #[inline]
    pub fn to_u256(self) -> U256 {
        U256::from(self.0)
    }

    /// Returns the well-known network for this id, if there is one.
    pub fn named(self) -> Option<NamedChain> {
        NamedChain::try_from(self.0).ok()
    }
}

impl From<u64> for ChainId {
    #[inline]
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    #[inline]
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl From<NamedChain> for ChainId {
    #[inline]
    fn from(chain: NamedChain) -> Self {
        Self(chain as u64)
    }
}

impl TryFrom<U256> for ChainId {
    type Error = InvalidChainId;

    fn try_from(value: U256) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| InvalidChainId(value))
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a `uint256` chain id does not fit in a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidChainId(pub U256);

impl fmt::Display for InvalidChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid chain id: {}", self.0)
    }
}

impl std::error::Error for InvalidChainId {}
