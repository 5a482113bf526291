use std::collections::BTreeMap;

use tracing::debug;

use crate::ephemerealdata::chain_lock::ChainLock;
use crate::ephemerealdata::instant_lock::InstantLock;
use crate::sml::error::SmlError;
use crate::sml::llmq_entry_verification::{
    LLMQEntryVerificationSkipStatus, LLMQEntryVerificationStatus,
};
use crate::sml::llmq_type::LLMQType;
use crate::sml::masternode_list_store::MasternodeListStore;
use crate::sml::quorum_entry::qualified_quorum_entry::QualifiedQuorumEntry;

impl MasternodeListStore {
    /// Verifies `quorum` against the list at the block it was formed at.
    pub fn verify_quorum(&self, quorum: &mut QualifiedQuorumEntry) -> Result<bool, SmlError> {
        let masternode_list = self.quorum_masternode_list(quorum.quorum_entry.quorum_hash())?;
        Ok(quorum.verify(&masternode_list)?)
    }

    /// Verifies every quorum of the list at the tip and returns how many of
    /// them are verified afterwards.
    ///
    /// Quorums formed before the base of the store cannot be checked and are
    /// marked as skipped.
    pub fn verify_current_quorums(&mut self) -> Result<usize, SmlError> {
        let mut quorums = std::mem::take(&mut self.current_masternode_list.quorums);
        let result = self.verify_quorums(&mut quorums);
        self.current_masternode_list.quorums = quorums;
        result
    }

    fn verify_quorums(
        &self,
        quorums: &mut BTreeMap<LLMQType, Vec<QualifiedQuorumEntry>>,
    ) -> Result<usize, SmlError> {
        let mut verified = 0;
        for quorum in quorums.values_mut().flatten() {
            match self.verify_quorum(quorum) {
                Ok(true) => verified += 1,
                Ok(false) => {}
                Err(SmlError::MissingQuorumMasternodeList(quorum_hash)) => {
                    debug!(%quorum_hash, "quorum formed outside of the retained lists");
                    quorum.verified = LLMQEntryVerificationStatus::Skipped(
                        LLMQEntryVerificationSkipStatus::MissedList(quorum_hash),
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Ok(verified)
    }

    pub fn verify_chain_lock(&self, chain_lock: &ChainLock) -> Result<bool, SmlError> {
        chain_lock.verify(self)
    }

    pub fn verify_instant_lock(&self, instant_lock: &InstantLock) -> Result<bool, SmlError> {
        instant_lock.verify(self)
    }
}
