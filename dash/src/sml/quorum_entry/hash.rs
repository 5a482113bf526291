use hashes::{Hash, sha256d};

use crate::consensus::{Encodable, VarInt, encode};
use crate::hash_types::{
    QuorumCommitmentHash, QuorumEntryHash, QuorumModifierHash, QuorumOrderingHash,
    QuorumSigningRequestId,
};
use crate::sml::quorum_entry::{FullQuorumEntry, QuorumEntry};

impl FullQuorumEntry {
    /// The message both quorum signatures are made over.
    ///
    /// `llmq_type || quorum_hash || varint(size) || valid_members || quorum_public_key || quorum_vvec_hash`
    pub fn calculate_commitment_hash(&self) -> QuorumCommitmentHash {
        let mut writer = Vec::with_capacity(1 + 32 + 3 + self.valid_members.len() + 48 + 32);
        writer.push(self.llmq_type.index());
        writer.extend_from_slice(self.quorum_hash.as_byte_array());
        VarInt(self.llmq_type.size() as u64)
            .consensus_encode(&mut writer)
            .expect("in-memory writers don't error");
        writer.extend_from_slice(&self.valid_members);
        writer.extend_from_slice(self.quorum_public_key.as_bytes());
        writer.extend_from_slice(self.quorum_vvec_hash.as_byte_array());
        QuorumCommitmentHash::hash(&writer)
    }
}

impl QuorumEntry {
    /// Hash of the entry as committed to by the quorum merkle root.
    ///
    /// Full entries are hashed with both member counts set to the quorum size.
    /// Legacy entries cannot be hashed that way and use their plain encoding.
    pub fn calculate_entry_hash(&self) -> QuorumEntryHash {
        match self {
            QuorumEntry::Full(entry) => {
                let mut writer = Vec::new();
                entry.encode_with_counts(&mut writer, true).expect("in-memory writers don't error");
                QuorumEntryHash::hash(&writer)
            }
            QuorumEntry::Legacy(entry) => QuorumEntryHash::hash(&encode::serialize(entry)),
        }
    }

    /// `None` for legacy entries, which carry no valid members bitset.
    pub fn calculate_commitment_hash(&self) -> Option<QuorumCommitmentHash> {
        self.as_full().map(FullQuorumEntry::calculate_commitment_hash)
    }

    /// Seed for the deterministic member ordering of this quorum.
    pub fn selection_modifier(&self) -> QuorumModifierHash {
        let mut writer = Vec::with_capacity(33);
        writer.push(self.llmq_type().index());
        writer.extend_from_slice(self.quorum_hash().as_byte_array());
        QuorumModifierHash::hash(&writer)
    }

    /// Rank of this quorum for a signing request. The quorum with the lowest
    /// ordering hash is the one expected to sign.
    pub fn ordering_hash_for_request_id(
        &self,
        request_id: QuorumSigningRequestId,
    ) -> QuorumOrderingHash {
        let llmq_type = VarInt(self.llmq_type().index() as u64);

        let mut writer = Vec::with_capacity(llmq_type.len() + 64);
        llmq_type.consensus_encode(&mut writer).expect("in-memory writers don't error");
        writer.extend_from_slice(self.quorum_hash().as_byte_array());
        writer.extend_from_slice(request_id.as_byte_array());

        QuorumOrderingHash::from_raw_hash(sha256d::Hash::hash(&writer))
    }
}
