#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::hash_types::{QuorumCommitmentHash, QuorumEntryHash};
use crate::sml::llmq_entry_verification::{
    LLMQEntryVerificationSkipStatus, LLMQEntryVerificationStatus,
};
use crate::sml::quorum_entry::QuorumEntry;
use crate::sml::quorum_validation_error::QuorumValidationError;

/// A quorum entry together with its derived hashes and verification state.
///
/// The state is owned by this instance. Once verified an entry stays
/// verified, while a failed verification may be attempted again.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct QualifiedQuorumEntry {
    pub quorum_entry: QuorumEntry,
    pub verified: LLMQEntryVerificationStatus,
    pub commitment_hash: Option<QuorumCommitmentHash>,
    pub entry_hash: QuorumEntryHash,
}

impl From<QuorumEntry> for QualifiedQuorumEntry {
    fn from(value: QuorumEntry) -> Self {
        let commitment_hash = value.calculate_commitment_hash();
        let entry_hash = value.calculate_entry_hash();
        let verified = if value.is_outdated_rpc() {
            LLMQEntryVerificationStatus::Skipped(LLMQEntryVerificationSkipStatus::OtherContext(
                "outdated encoding".to_string(),
            ))
        } else {
            LLMQEntryVerificationStatus::Unknown
        };
        QualifiedQuorumEntry { quorum_entry: value, verified, commitment_hash, entry_hash }
    }
}

impl QualifiedQuorumEntry {
    pub fn is_verified(&self) -> bool {
        self.verified == LLMQEntryVerificationStatus::Verified
    }

    pub fn update_quorum_status(&mut self, result: Result<(), QuorumValidationError>) {
        self.verified = match result {
            Ok(()) => LLMQEntryVerificationStatus::Verified,
            Err(e) => LLMQEntryVerificationStatus::Invalid(e),
        };
    }
}
