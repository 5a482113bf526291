use crate::blockdata::transaction::Transaction;
use crate::blockdata::transaction::special_transaction::coinbase::CoinbasePayload;
use crate::hash_types::{BlockHash, MerkleRootMasternodeList, MerkleRootQuorums, ProTxHash, QuorumHash};
use crate::internal_macros::impl_consensus_encoding;
use crate::sml::llmq_type::LLMQType;
use crate::sml::masternode_list_entry::MasternodeListEntry;
use crate::sml::quorum_entry::QuorumEntry;

/// The getmnlistd message requests a mnlistdiff message that provides either:
/// - A full masternode list (if baseBlockHash is all-zero)
/// - An update to a previously requested masternode list
///
/// https://docs.dash.org/en/stable/docs/core/reference/p2p-network-data-messages.html#getmnlistd
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct GetMnListDiff {
    pub base_block_hash: BlockHash,
    pub block_hash: BlockHash,
}

impl_consensus_encoding!(GetMnListDiff, base_block_hash, block_hash);

/// The mnlistdiff message is a reply to a getmnlistd message which requested
/// either a full masternode list or a diff for a range of blocks.
///
/// The merkle roots a diff commits to are those of its coinbase payload.
///
/// https://docs.dash.org/en/stable/docs/core/reference/p2p-network-data-messages.html#mnlistdiff
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MnListDiff {
    pub base_block_hash: BlockHash,
    pub block_hash: BlockHash,
    pub total_transactions: u32,
    /// Partial merkle tree proving the coinbase is part of `block_hash`.
    pub merkle_hashes: Vec<[u8; 32]>,
    pub merkle_flags: Vec<u8>,
    pub coinbase_tx: Transaction,
    pub deleted_masternodes: Vec<ProTxHash>,
    pub new_masternodes: Vec<MasternodeListEntry>,
    pub deleted_quorums: Vec<DeletedQuorum>,
    pub new_quorums: Vec<QuorumEntry>,
}

impl_consensus_encoding!(
    MnListDiff,
    base_block_hash,
    block_hash,
    total_transactions,
    merkle_hashes,
    merkle_flags,
    coinbase_tx,
    deleted_masternodes,
    new_masternodes,
    deleted_quorums,
    new_quorums
);

impl MnListDiff {
    pub fn coinbase_payload(&self) -> Option<&CoinbasePayload> {
        self.coinbase_tx.coinbase_payload()
    }

    /// Height of `block_hash`, as committed to by the coinbase.
    pub fn height(&self) -> Option<u32> {
        self.coinbase_payload().map(|payload| payload.height)
    }

    pub fn merkle_root_masternode_list(&self) -> Option<MerkleRootMasternodeList> {
        self.coinbase_payload().map(|payload| payload.merkle_root_masternode_list)
    }

    pub fn merkle_root_quorums(&self) -> Option<MerkleRootQuorums> {
        self.coinbase_payload().map(|payload| payload.merkle_root_quorums)
    }
}

/// A quorum removed by a diff, identified by its type and DKG block.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct DeletedQuorum {
    pub llmq_type: LLMQType,
    pub quorum_hash: QuorumHash,
}

impl_consensus_encoding!(DeletedQuorum, llmq_type, quorum_hash);
