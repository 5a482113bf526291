use thiserror::Error;

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::hash_types::{BlockHash, QuorumHash};

#[derive(Debug, Error, Clone, Ord, PartialOrd, PartialEq, Hash, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub enum QuorumValidationError {
    #[error("Masternode list at block {block_hash} cannot validate quorum {quorum_hash}")]
    WrongMasternodeList { block_hash: BlockHash, quorum_hash: QuorumHash },

    #[error("Quorum entry uses the outdated encoding and carries no signatures")]
    OutdatedEncoding,

    #[error("No signer of the quorum is part of the masternode list")]
    NoSigners,

    #[error("Invalid BLS public key: {0}")]
    InvalidBLSPublicKey(String),

    #[error("Invalid BLS signature: {0}")]
    InvalidBLSSignature(String),

    #[error("All commitment aggregated signature not valid: {0}")]
    AllCommitmentAggregatedSignatureNotValid(String),

    #[error("Threshold signature not valid: {0}")]
    ThresholdSignatureNotValid(String),
}
