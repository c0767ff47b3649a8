//! One-shot deployment of a token and bridge pair onto a network.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::access::Role;
use crate::config::DeploymentConfig;
use crate::error::Result;
use crate::network::Network;
use crate::spans;

/// Addresses produced by [`deploy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub token: Address,
    pub bridge: Address,
}

/// Deploys and wires a token and bridge on `network`.
///
/// In order: deploy the token and the bridge as `owner`, enable every remote
/// chain, register the token, mint `initial_mint` to the owner, make
/// `administrator` the bridge administrator, and make the bridge the token
/// administrator so it can burn and mint.
pub fn deploy(
    network: &mut Network,
    config: &DeploymentConfig,
    owner: Address,
    administrator: Address,
) -> Result<Deployment> {
    let span = spans::deploy(network.chain_id(), &owner, &config.token_name);
    let _guard = span.enter();

    config.validate().inspect_err(|e| spans::record_error(e))?;

    let token = network.deploy_token(
        owner,
        &config.token_name,
        &config.token_symbol,
        config.decimals,
    );
    let bridge = network.deploy_bridge(owner);

    wire(network, config, owner, administrator, token, bridge)
        .inspect_err(|e| spans::record_error(e))?;

    info!(
        token = %token,
        bridge = %bridge,
        administrator = %administrator,
        remote_chains = config.remote_chains.len(),
        event = "bridge_ready"
    );

    Ok(Deployment { token, bridge })
}

fn wire(
    network: &mut Network,
    config: &DeploymentConfig,
    owner: Address,
    administrator: Address,
    token: Address,
    bridge: Address,
) -> Result<()> {
    for &remote in &config.remote_chains {
        network
            .bridge_mut(bridge)?
            .update_chain_by_id(owner, remote, true)?;
    }

    network.include_token(bridge, owner, token)?;

    if !config.initial_mint.is_zero() {
        network.mint(token, owner, owner, config.initial_mint)?;
    }

    network
        .bridge_mut(bridge)?
        .grant_role(owner, Role::Administrator, administrator)?;
    network.grant_token_role(token, owner, Role::Administrator, bridge)?;

    Ok(())
}
