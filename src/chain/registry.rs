//! Set of remote chains a bridge accepts swaps to and redemptions from.

use std::collections::BTreeSet;

use tracing::debug;

use super::ChainId;

/// Boolean membership table keyed by chain id.
///
/// The table itself performs no access checks; the owning bridge guards every
/// mutation with its access control before calling [`ChainRegistry::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainRegistry {
    enabled: BTreeSet<ChainId>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables a chain. Setting a chain to its current state is a
    /// no-op.
    pub fn update(&mut self, chain_id: ChainId, enabled: bool) {
        let changed = if enabled {
            self.enabled.insert(chain_id)
        } else {
            self.enabled.remove(&chain_id)
        };

        debug!(
            chain_id = %chain_id,
            enabled = enabled,
            changed = changed,
            event = "chain_registry_updated"
        );
    }

    pub fn is_supported(&self, chain_id: ChainId) -> bool {
        self.enabled.contains(&chain_id)
    }

    /// Enabled chains in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.enabled.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}
