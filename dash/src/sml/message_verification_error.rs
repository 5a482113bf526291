use thiserror::Error;

use crate::bls_sig_utils::{BLSPublicKey, BLSSignature};
use crate::hash_types::{QuorumHash, QuorumSigningSignId};
use crate::sml::error::SmlError;
use crate::sml::llmq_type::LLMQType;
use crate::sml::quorum_validation_error::QuorumValidationError;

#[derive(Debug, Error)]
pub enum MessageVerificationError {
    #[error("Masternode list at height {0} has no quorums of type {1}")]
    MasternodeListHasNoQuorums(u32, LLMQType),

    #[error("Quorum {0} uses the outdated encoding and cannot sign")]
    OutdatedQuorum(QuorumHash),

    #[error(
        "Threshold signature {0} is not valid for digest {1} using public key {2} for quorum {3} of type {4}, error is: {5}"
    )]
    ThresholdSignatureNotValid(
        Box<BLSSignature>,
        Box<QuorumSigningSignId>,
        Box<BLSPublicKey>,
        QuorumHash,
        LLMQType,
        String,
    ),

    #[error("Invalid BLS public key: {0}")]
    InvalidBLSPublicKey(String),

    #[error("Invalid BLS signature: {0}")]
    InvalidBLSSignature(String),

    #[error(transparent)]
    Sml(#[from] SmlError),
}

impl From<QuorumValidationError> for MessageVerificationError {
    fn from(value: QuorumValidationError) -> Self {
        match value {
            QuorumValidationError::InvalidBLSPublicKey(public_key) => {
                MessageVerificationError::InvalidBLSPublicKey(public_key)
            }
            QuorumValidationError::InvalidBLSSignature(signature) => {
                MessageVerificationError::InvalidBLSSignature(signature)
            }
            error => MessageVerificationError::Sml(SmlError::QuorumValidation(error)),
        }
    }
}
