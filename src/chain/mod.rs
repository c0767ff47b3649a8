//! Chain identifiers and the per-bridge chain registry.

mod id;
mod registry;

pub use id::{ChainId, InvalidChainId};
pub use registry::ChainRegistry;
