//! Chain lock is a mechanism used by the Dash network to finalize a block
//! once a quorum has signed it. This data structure represents the `clsig`
//! p2p message carrying that signature.

use std::fmt;

use hashes::{Hash, HashEngine};

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::bls_sig_utils::BLSSignature;
use crate::consensus::{VarInt, encode};
use crate::ephemerealdata::sign_id;
use crate::hash_types::{BlockHash, ChainLockHash, QuorumSigningRequestId, QuorumSigningSignId};
use crate::internal_macros::impl_consensus_encoding;
use crate::network::constants::CLSIG_REQUESTID_PREFIX;
use crate::sml::masternode_list::MasternodeList;
use crate::sml::quorum_entry::QuorumEntry;
use crate::sml::quorum_entry::qualified_quorum_entry::QualifiedQuorumEntry;
#[cfg(feature = "bls")]
use crate::{
    ephemerealdata::verify_at_signing_offsets, sml::error::SmlError,
    sml::masternode_list_store::MasternodeListStore,
    sml::message_verification_error::MessageVerificationError,
};

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct ChainLock {
    /// Block height
    pub block_height: u32,
    /// Block hash
    pub block_hash: BlockHash,
    /// Quorum signature
    pub signature: BLSSignature,
}

impl_consensus_encoding!(ChainLock, block_height, block_hash, signature);

impl ChainLock {
    pub fn from_bytes(bytes: &[u8]) -> Result<ChainLock, encode::Error> {
        encode::deserialize(bytes)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        encode::serialize(self)
    }

    /// Hash of the serialized chain lock.
    pub fn hash(&self) -> ChainLockHash {
        ChainLockHash::hash(&self.to_bytes())
    }

    /// Returns quorum signing request ID
    pub fn request_id(&self) -> QuorumSigningRequestId {
        let mut engine = QuorumSigningRequestId::engine();

        // Prefix
        engine.input(&encode::serialize(&VarInt(CLSIG_REQUESTID_PREFIX.len() as u64)));
        engine.input(CLSIG_REQUESTID_PREFIX.as_bytes());

        // Inputs
        engine.input(&self.block_height.to_le_bytes());

        QuorumSigningRequestId::from_engine(engine)
    }

    /// The digest `quorum` signs to lock this block.
    pub fn sign_hash_for_quorum_entry(&self, quorum: &QuorumEntry) -> QuorumSigningSignId {
        sign_id(quorum, self.request_id(), self.block_hash.as_byte_array())
    }

    /// The quorum of `masternode_list` expected to sign this lock.
    pub fn select_signatory_quorum<'a>(
        &self,
        masternode_list: &'a MasternodeList,
    ) -> Option<&'a QualifiedQuorumEntry> {
        masternode_list
            .quorum_entry_for_lock_request_id(self.request_id(), masternode_list.chain_lock_llmq_type())
    }

    /// Whether `quorum` signed this lock. Malformed keys or signatures make
    /// the lock invalid.
    #[cfg(feature = "bls")]
    pub fn verify_signature_against_quorum(&self, quorum: &QualifiedQuorumEntry) -> bool {
        quorum
            .verify_message_digest(self.sign_hash_for_quorum_entry(&quorum.quorum_entry), &self.signature)
            .is_ok()
    }

    /// Verifies the lock against the lists of `store`, reporting why it
    /// failed.
    #[cfg(feature = "bls")]
    pub fn verify_detailed(&self, store: &MasternodeListStore) -> Result<(), MessageVerificationError> {
        verify_at_signing_offsets(
            store,
            self.block_height,
            self.request_id(),
            MasternodeList::chain_lock_llmq_type,
            |quorum| self.sign_hash_for_quorum_entry(quorum),
            &self.signature,
        )
    }

    /// Whether a quorum of the lists of `store` signed this lock.
    ///
    /// Fails only if a list the verification needs is outside the window of
    /// `store`.
    #[cfg(feature = "bls")]
    pub fn verify(&self, store: &MasternodeListStore) -> Result<bool, SmlError> {
        match self.verify_detailed(store) {
            Ok(()) => Ok(true),
            Err(MessageVerificationError::Sml(e)) => Err(e),
            Err(e) => {
                tracing::warn!(block_hash = %self.block_hash, height = self.block_height, error = %e, "chain lock not verified");
                Ok(false)
            }
        }
    }
}

impl fmt::Display for ChainLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<ChainLock: {}, height: {}>", self.block_hash, self.block_height)
    }
}
