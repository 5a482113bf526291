//! Simplified masternode lists.
//!
//! A [`MasternodeList`] is the set of masternodes and active quorums at one
//! block, built by applying `mnlistdiff` messages on top of each other.
//! Applying a diff never mutates the list it is applied to, so a list handed
//! out to a caller keeps its state no matter what is applied afterwards.

mod apply_diff;
mod is_lock_methods;
pub mod merkle_roots;
mod quorum_helpers;
mod scores_for_quorum;
mod to_diff;

use std::collections::BTreeMap;

use hashes::Hash;

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::blockdata::transaction::Transaction;
use crate::hash_types::{BlockHash, MerkleRootMasternodeList, MerkleRootQuorums, ProTxHash};
use crate::network::constants::Network;
use crate::sml::llmq_type::LLMQType;
use crate::sml::masternode_list_entry::qualified_masternode_list_entry::QualifiedMasternodeListEntry;
use crate::sml::quorum_entry::qualified_quorum_entry::QualifiedQuorumEntry;

/// Partial merkle tree proving that the coinbase transaction of a list is
/// part of its block.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct CoinbaseMerkleProof {
    pub total_transactions: u32,
    pub merkle_hashes: Vec<[u8; 32]>,
    pub merkle_flags: Vec<u8>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct MasternodeList {
    pub network: Network,
    /// Base of the first diff this list was built from.
    pub base_block_hash: BlockHash,
    pub block_hash: BlockHash,
    pub known_height: u32,
    pub masternodes: BTreeMap<ProTxHash, QualifiedMasternodeListEntry>,
    /// Active quorums per type, oldest first.
    pub quorums: BTreeMap<LLMQType, Vec<QualifiedQuorumEntry>>,
    pub masternode_merkle_root: MerkleRootMasternodeList,
    pub llmq_merkle_root: MerkleRootQuorums,
    pub last_diff_masternode_merkle_root: MerkleRootMasternodeList,
    pub last_diff_llmq_merkle_root: MerkleRootQuorums,
    pub quorums_active: bool,
    pub coinbase_tx: Option<Transaction>,
    pub coinbase_merkle_proof: Option<CoinbaseMerkleProof>,
}

impl MasternodeList {
    pub fn empty(network: Network) -> Self {
        MasternodeList {
            network,
            base_block_hash: BlockHash::all_zeros(),
            block_hash: BlockHash::all_zeros(),
            known_height: 0,
            masternodes: BTreeMap::new(),
            quorums: BTreeMap::new(),
            masternode_merkle_root: MerkleRootMasternodeList::all_zeros(),
            llmq_merkle_root: MerkleRootQuorums::all_zeros(),
            last_diff_masternode_merkle_root: MerkleRootMasternodeList::all_zeros(),
            last_diff_llmq_merkle_root: MerkleRootQuorums::all_zeros(),
            quorums_active: false,
            coinbase_tx: None,
            coinbase_merkle_proof: None,
        }
    }

    pub fn masternode_count(&self) -> usize {
        self.masternodes.len()
    }

    pub fn quorums_count(&self) -> usize {
        self.quorums.values().map(Vec::len).sum()
    }

    pub fn has_masternode(&self, pro_reg_tx_hash: &ProTxHash) -> bool {
        self.masternodes.contains_key(pro_reg_tx_hash)
    }

    pub fn masternode_for(&self, pro_reg_tx_hash: &ProTxHash) -> Option<&QualifiedMasternodeListEntry> {
        self.masternodes.get(pro_reg_tx_hash)
    }
}
