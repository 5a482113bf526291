use std::fmt;

use hashes::sha256d;
use thiserror::Error;

use crate::consensus::encode;
use crate::hash_types::{BlockHash, QuorumHash};
use crate::sml::quorum_validation_error::QuorumValidationError;

/// Which of the two roots a coinbase commits to failed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerkleRootKind {
    Masternodes,
    Quorums,
}

impl fmt::Display for MerkleRootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MerkleRootKind::Masternodes => "masternode list",
            MerkleRootKind::Quorums => "quorum list",
        })
    }
}

/// Errors raised while building, updating or querying masternode lists.
#[derive(Debug, Error)]
pub enum SmlError {
    #[error(transparent)]
    Encode(#[from] encode::Error),

    #[error(transparent)]
    QuorumValidation(#[from] QuorumValidationError),

    #[error("{kind} merkle root mismatch: diff declares {expected}, calculated {calculated}")]
    MerkleMismatch { kind: MerkleRootKind, expected: sha256d::Hash, calculated: sha256d::Hash },

    #[error("unable to construct SML at this height: {height} is outside {base}..={tip}")]
    HeightOutOfRange { height: u32, base: u32, tip: u32 },

    #[error("at least {required} diffs are needed to build a store, got {provided}")]
    InsufficientDiffs { required: usize, provided: usize },

    #[error("diff based on {base_block_hash} does not follow the tip {tip_block_hash}")]
    NonContiguousDiff { tip_block_hash: BlockHash, base_block_hash: BlockHash },

    #[error("the coinbase transaction of block {0} carries no coinbase payload")]
    MissingCoinbasePayload(BlockHash),

    #[error("masternode list at block {0} holds no coinbase transaction")]
    MissingCoinbaseTransaction(BlockHash),

    #[error("block {0} is not part of the retained masternode lists")]
    UnknownBlock(BlockHash),

    #[error("no masternode list is known at quorum block {0}")]
    MissingQuorumMasternodeList(QuorumHash),

    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),
}

impl SmlError {
    /// Whether the error comes from querying outside of the retained window.
    pub fn is_height_out_of_range(&self) -> bool {
        matches!(self, SmlError::HeightOutOfRange { .. })
    }
}
