use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::network::SharedNetwork;
use crate::protocol::SwapRecord;
use crate::traits::SwapEventSource;

/// Reads `SwapInitialized` events emitted by one bridge on a shared network.
#[derive(Debug, Clone)]
pub struct NetworkEventSource {
    network: SharedNetwork,
    bridge: Address,
}

impl NetworkEventSource {
    pub fn new(network: SharedNetwork, bridge: Address) -> Self {
        Self { network, bridge }
    }

    pub fn bridge(&self) -> Address {
        self.bridge
    }
}

#[async_trait]
impl SwapEventSource for NetworkEventSource {
    async fn swap_event(&self, counter: U256) -> Result<Option<SwapRecord>> {
        let record = self
            .network
            .with(|network| network.swap_event(self.bridge, counter))??;

        debug!(
            bridge = %self.bridge,
            counter = %counter,
            found = record.is_some(),
            event = "swap_event_lookup"
        );

        Ok(record)
    }
}
