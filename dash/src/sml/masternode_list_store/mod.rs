//! A sliding window of masternode lists.
//!
//! The store keeps a base list plus the diffs applied after it, and rebuilds
//! the list at any retained height on request. Once the window holds more
//! lists than configured, the oldest diff is folded into the base list and
//! the heights before it can no longer be queried.

pub mod config;
#[cfg(feature = "bls")]
mod message_request_verification;

use hashes::Hash;
use tracing::{debug, info};

use crate::hash_types::{BlockHash, QuorumHash};
use crate::network::message_sml::MnListDiff;
use crate::sml::error::SmlError;
use crate::sml::masternode_list::MasternodeList;
pub use crate::sml::masternode_list_store::config::{
    DEFAULT_MAX_LISTS_LIMIT, MIN_LISTS_LIMIT, MasternodeListStoreConfig,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasternodeListStore {
    config: MasternodeListStoreConfig,
    base_masternode_list: MasternodeList,
    /// Diffs applied after the base list with the height they lead to,
    /// oldest first.
    diffs: Vec<(u32, MnListDiff)>,
    current_masternode_list: MasternodeList,
}

impl MasternodeListStore {
    /// Builds a store from consecutive diffs, the first of which defines the
    /// base list.
    ///
    /// At least [`MIN_LISTS_LIMIT`] diffs are required.
    pub fn new(diffs: Vec<MnListDiff>, config: MasternodeListStoreConfig) -> Result<Self, SmlError> {
        config.validate().map_err(SmlError::InvalidConfig)?;
        if diffs.len() < MIN_LISTS_LIMIT {
            return Err(SmlError::InsufficientDiffs {
                required: MIN_LISTS_LIMIT,
                provided: diffs.len(),
            });
        }

        let mut diffs = diffs.into_iter();
        let Some(first) = diffs.next() else {
            return Err(SmlError::InsufficientDiffs { required: MIN_LISTS_LIMIT, provided: 0 });
        };
        let base_masternode_list = MasternodeList::from_diff(&first, config.network)?;
        let mut store = MasternodeListStore {
            config,
            current_masternode_list: base_masternode_list.clone(),
            base_masternode_list,
            diffs: Vec::new(),
        };
        for diff in diffs {
            store.add_diff(diff)?;
        }
        debug!(
            base_height = store.base_height(),
            tip_height = store.tip_height(),
            "masternode list store initialized"
        );
        Ok(store)
    }

    pub fn config(&self) -> &MasternodeListStoreConfig {
        &self.config
    }

    /// Applies `diff` on top of the tip, then drops the oldest lists beyond
    /// the configured limit.
    ///
    /// The diff must be based on the current tip. On error the store is left
    /// as it was.
    pub fn add_diff(&mut self, diff: MnListDiff) -> Result<(), SmlError> {
        if diff.base_block_hash != self.current_masternode_list.block_hash {
            return Err(SmlError::NonContiguousDiff {
                tip_block_hash: self.current_masternode_list.block_hash,
                base_block_hash: diff.base_block_hash,
            });
        }
        let current_masternode_list = self.current_masternode_list.apply_diff(&diff)?;
        self.diffs.push((current_masternode_list.known_height, diff));
        self.current_masternode_list = current_masternode_list;
        self.prune()
    }

    fn prune(&mut self) -> Result<(), SmlError> {
        while self.diffs.len() + 1 > self.config.max_lists_limit {
            let (height, diff) = self.diffs.remove(0);
            self.base_masternode_list = self.base_masternode_list.apply_diff(&diff)?;
            info!(
                height,
                block_hash = %self.base_masternode_list.block_hash,
                "folded oldest masternode list diff into the base list"
            );
        }
        Ok(())
    }

    /// Block hash the first diff of the store was based on.
    pub fn base_block_hash(&self) -> BlockHash {
        self.base_masternode_list.base_block_hash
    }

    pub fn base_height(&self) -> u32 {
        self.base_masternode_list.known_height
    }

    pub fn base_masternode_list(&self) -> &MasternodeList {
        &self.base_masternode_list
    }

    pub fn tip_height(&self) -> u32 {
        self.current_masternode_list.known_height
    }

    pub fn tip_hash(&self) -> BlockHash {
        self.current_masternode_list.block_hash
    }

    /// Heights a list can be built for, ascending.
    pub fn heights(&self) -> Vec<u32> {
        std::iter::once(self.base_height())
            .chain(self.diffs.iter().map(|(height, _)| *height))
            .collect()
    }

    /// Copy of the list at the tip.
    pub fn current_sml(&self) -> MasternodeList {
        self.current_masternode_list.clone()
    }

    /// The list at `height`, that is the list of the last retained block at
    /// or below it.
    pub fn sml_by_height(&self, height: u32) -> Result<MasternodeList, SmlError> {
        let (base, tip) = (self.base_height(), self.tip_height());
        if height < base || height > tip {
            debug!(height, base, tip, "masternode list requested outside of the window");
            return Err(SmlError::HeightOutOfRange { height, base, tip });
        }
        if height == tip {
            return Ok(self.current_sml());
        }
        self.diffs
            .iter()
            .take_while(|(diff_height, _)| *diff_height <= height)
            .try_fold(self.base_masternode_list.clone(), |list, (_, diff)| list.apply_diff(diff))
    }

    pub fn sml_by_hash(&self, block_hash: BlockHash) -> Result<MasternodeList, SmlError> {
        if block_hash == self.base_masternode_list.block_hash {
            return Ok(self.base_masternode_list.clone());
        }
        let (height, _) = self
            .diffs
            .iter()
            .find(|(_, diff)| diff.block_hash == block_hash)
            .ok_or(SmlError::UnknownBlock(block_hash))?;
        self.sml_by_height(*height)
    }

    /// The list at the block a quorum was formed at, which its members are
    /// drawn from.
    pub fn quorum_masternode_list(&self, quorum_hash: QuorumHash) -> Result<MasternodeList, SmlError> {
        self.sml_by_hash(BlockHash::from_byte_array(quorum_hash.to_byte_array())).map_err(|e| match e {
            SmlError::UnknownBlock(_) => SmlError::MissingQuorumMasternodeList(quorum_hash),
            e => e,
        })
    }
}
