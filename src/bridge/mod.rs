// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Bridge ledger state machine
//!
//! This module provides the bridge instance: access control over the chain and
//! token registries, the source-side swap, and the destination-side redeem
//! with its replay-protected counter set.

mod contract;
mod params;
mod redeem;
mod swap;

pub use contract::Bridge;
pub use params::{RedeemParams, SwapParams};
