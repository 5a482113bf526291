//! Configuration of a masternode list store.

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::network::constants::{LLMQ_SIGN_HEIGHT_OFFSET, Network};

/// Number of lists a store keeps when not configured otherwise.
pub const DEFAULT_MAX_LISTS_LIMIT: usize = 1000;

/// Lists a store needs to reach back far enough for lock verification.
pub const MIN_LISTS_LIMIT: usize = 2 * LLMQ_SIGN_HEIGHT_OFFSET as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct MasternodeListStoreConfig {
    /// Network the diffs belong to.
    pub network: Network,

    /// Lists retained, the base list included. Older diffs are folded into
    /// the base list.
    pub max_lists_limit: usize,
}

impl Default for MasternodeListStoreConfig {
    fn default() -> Self {
        Self { network: Network::Dash, max_lists_limit: DEFAULT_MAX_LISTS_LIMIT }
    }
}

impl MasternodeListStoreConfig {
    pub fn new(network: Network) -> Self {
        Self { network, ..Self::default() }
    }

    pub fn with_max_lists_limit(mut self, max_lists_limit: usize) -> Self {
        self.max_lists_limit = max_lists_limit;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_lists_limit < MIN_LISTS_LIMIT {
            return Err(format!(
                "max_lists_limit must be at least {MIN_LISTS_LIMIT}, got {}",
                self.max_lists_limit
            ));
        }
        Ok(())
    }
}
