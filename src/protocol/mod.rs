//! Swap record wire format and signature handling
//!
//! This module contains the types shared by the source-side swap and the
//! destination-side redeem: the ordered swap tuple, its packed hash pre-image,
//! the EVM event encodings, and administrator signature recovery.

mod signature;
mod swap;

pub use signature::{recover_signer, SignatureParts};
pub use swap::{Redeemed, SwapInitialized, SwapRecord};

pub(crate) use swap::redeemed_log;
