use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::hash_types::QuorumHash;
use crate::sml::quorum_validation_error::QuorumValidationError;

#[derive(Clone, Ord, PartialOrd, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub enum LLMQEntryVerificationSkipStatus {
    NotMarkedForVerification,
    /// The masternode list the quorum was formed at is not available.
    MissedList(QuorumHash),
    OtherContext(String),
}

impl Display for LLMQEntryVerificationSkipStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMQEntryVerificationSkipStatus::NotMarkedForVerification => {
                f.write_str("NotMarkedForVerification")
            }
            LLMQEntryVerificationSkipStatus::MissedList(quorum_hash) => {
                write!(f, "MissedList({quorum_hash})")
            }
            LLMQEntryVerificationSkipStatus::OtherContext(message) => {
                write!(f, "OtherContext({message})")
            }
        }
    }
}

/// Outcome of the last verification attempt of a quorum entry.
///
/// Only `Verified` is final. Every other state may be replaced by a later
/// attempt.
#[derive(Clone, Ord, PartialOrd, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub enum LLMQEntryVerificationStatus {
    Unknown,
    Verified,
    Skipped(LLMQEntryVerificationSkipStatus),
    Invalid(QuorumValidationError),
}

impl Display for LLMQEntryVerificationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMQEntryVerificationStatus::Unknown => f.write_str("unknown"),
            LLMQEntryVerificationStatus::Verified => f.write_str("verified"),
            LLMQEntryVerificationStatus::Invalid(error) => write!(f, "Invalid({error})"),
            LLMQEntryVerificationStatus::Skipped(reason) => write!(f, "Skipped({reason})"),
        }
    }
}
