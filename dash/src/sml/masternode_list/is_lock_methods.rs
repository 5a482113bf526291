use hashes::Hash;
use tracing::trace;

use crate::hash_types::QuorumSigningRequestId;
use crate::sml::llmq_type::LLMQType;
use crate::sml::masternode_list::MasternodeList;
use crate::sml::quorum_entry::qualified_quorum_entry::QualifiedQuorumEntry;

impl MasternodeList {
    /// Quorums of `quorum_type` able to sign, ordered by their ordering hash
    /// for `request_id`. The first one is the expected signer.
    ///
    /// Legacy entries carry no signatures and are never returned.
    pub fn ordered_quorums_for_request_id(
        &self,
        quorum_type: LLMQType,
        request_id: QuorumSigningRequestId,
    ) -> Vec<&QualifiedQuorumEntry> {
        let mut ordered: Vec<_> = self
            .get_quorums_of_type(quorum_type)
            .iter()
            .filter(|entry| !entry.quorum_entry.is_outdated_rpc())
            .map(|entry| {
                let mut ordering_hash =
                    entry.quorum_entry.ordering_hash_for_request_id(request_id).to_byte_array();
                ordering_hash.reverse();
                trace!(quorum_hash = %entry.quorum_entry.quorum_hash(), ordering_hash = %hex::encode(ordering_hash), "quorum ordering");
                (ordering_hash, entry)
            })
            .collect();
        ordered.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        ordered.into_iter().map(|(_, entry)| entry).collect()
    }

    /// The quorum of `quorum_type` expected to sign `request_id`, if the list
    /// has any quorum able to sign.
    pub fn quorum_entry_for_lock_request_id(
        &self,
        request_id: QuorumSigningRequestId,
        quorum_type: LLMQType,
    ) -> Option<&QualifiedQuorumEntry> {
        self.get_quorums_of_type(quorum_type)
            .iter()
            .filter(|entry| !entry.quorum_entry.is_outdated_rpc())
            .min_by_key(|entry| {
                let mut ordering_hash =
                    entry.quorum_entry.ordering_hash_for_request_id(request_id).to_byte_array();
                ordering_hash.reverse();
                ordering_hash
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_types::QuorumHash;
    use crate::network::constants::Network;
    use crate::sml::quorum_entry::tests::QUORUM_ENTRY_HEX;
    use crate::sml::quorum_entry::{LegacyQuorumEntry, QuorumEntry};

    fn quorum(seed: u8) -> QualifiedQuorumEntry {
        let mut entry = QuorumEntry::from_bytes(&hex::decode(QUORUM_ENTRY_HEX).unwrap()).unwrap();
        if let QuorumEntry::Full(full) = &mut entry {
            full.quorum_hash = QuorumHash::hash(&[seed]);
        }
        entry.into()
    }

    #[test]
    fn lowest_reversed_ordering_hash_signs() {
        let mut list = MasternodeList::empty(Network::Testnet);
        list.quorums.insert(LLMQType::Llmqtype50_60, (1..=5).map(quorum).collect());
        let request_id = QuorumSigningRequestId::hash(b"request");

        let ordered = list.ordered_quorums_for_request_id(LLMQType::Llmqtype50_60, request_id);
        assert_eq!(ordered.len(), 5);
        let selected = list.quorum_entry_for_lock_request_id(request_id, LLMQType::Llmqtype50_60).unwrap();
        assert_eq!(selected, ordered[0]);

        let key = |entry: &QualifiedQuorumEntry| {
            let mut hash = entry.quorum_entry.ordering_hash_for_request_id(request_id).to_byte_array();
            hash.reverse();
            hash
        };
        assert!(ordered.windows(2).all(|pair| key(pair[0]) <= key(pair[1])));
    }

    #[test]
    fn legacy_quorums_never_sign() {
        let mut list = MasternodeList::empty(Network::Testnet);
        let legacy = QualifiedQuorumEntry::from(QuorumEntry::Legacy(LegacyQuorumEntry {
            version: 1,
            llmq_type: LLMQType::Llmqtype50_60,
            quorum_hash: QuorumHash::hash(&[1]),
            signers_count: 50,
            valid_members_count: 50,
            quorum_public_key: [1u8; 48].into(),
        }));
        list.quorums.insert(LLMQType::Llmqtype50_60, vec![legacy]);
        let request_id = QuorumSigningRequestId::hash(b"request");
        assert!(list.quorum_entry_for_lock_request_id(request_id, LLMQType::Llmqtype50_60).is_none());
        assert!(list.ordered_quorums_for_request_id(LLMQType::Llmqtype50_60, request_id).is_empty());
    }
}
