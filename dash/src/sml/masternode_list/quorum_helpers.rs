use crate::hash_types::QuorumHash;
use crate::sml::llmq_type::LLMQType;
use crate::sml::llmq_type::network::NetworkLLMQExt;
use crate::sml::masternode_list::MasternodeList;
use crate::sml::masternode_list_entry::qualified_masternode_list_entry::QualifiedMasternodeListEntry;
use crate::sml::quorum_entry::qualified_quorum_entry::QualifiedQuorumEntry;

impl MasternodeList {
    /// Quorum types this list tracks, in the order their quorums are listed.
    pub fn llmq_types(&self) -> &'static [LLMQType] {
        self.network.enabled_llmq_types()
    }

    pub fn chain_lock_llmq_type(&self) -> LLMQType {
        self.network.chain_locks_type()
    }

    pub fn instant_send_llmq_type(&self) -> LLMQType {
        self.network.is_llmq_type()
    }

    pub fn get_valid_masternodes_list(&self) -> Vec<&QualifiedMasternodeListEntry> {
        self.masternodes.values().filter(|entry| entry.masternode_list_entry.is_valid).collect()
    }

    pub fn get_quorum(
        &self,
        llmq_type: LLMQType,
        quorum_hash: QuorumHash,
    ) -> Option<&QualifiedQuorumEntry> {
        self.quorums
            .get(&llmq_type)?
            .iter()
            .find(|quorum| quorum.quorum_entry.quorum_hash() == quorum_hash)
    }

    pub fn get_quorum_mut(
        &mut self,
        llmq_type: LLMQType,
        quorum_hash: QuorumHash,
    ) -> Option<&mut QualifiedQuorumEntry> {
        self.quorums
            .get_mut(&llmq_type)?
            .iter_mut()
            .find(|quorum| quorum.quorum_entry.quorum_hash() == quorum_hash)
    }

    /// All quorums, grouped by type in [`Self::llmq_types`] order and oldest
    /// first within a type.
    pub fn get_quorums(&self) -> impl Iterator<Item = &QualifiedQuorumEntry> {
        self.llmq_types().iter().flat_map(move |llmq_type| self.get_quorums_of_type(*llmq_type))
    }

    pub fn get_quorums_of_type(&self, llmq_type: LLMQType) -> &[QualifiedQuorumEntry] {
        self.quorums.get(&llmq_type).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn get_verified_quorums(&self) -> Vec<&QualifiedQuorumEntry> {
        self.get_quorums().filter(|quorum| quorum.is_verified()).collect()
    }

    pub fn get_unverified_quorums(&self) -> Vec<&QualifiedQuorumEntry> {
        self.get_quorums().filter(|quorum| !quorum.is_verified()).collect()
    }
}
