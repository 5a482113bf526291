use crate::hash_types::{QuorumModifierHash, ScoreHash};
use crate::sml::masternode_list_entry::qualified_masternode_list_entry::QualifiedMasternodeListEntry;

impl QualifiedMasternodeListEntry {
    /// The masternode's score for a quorum modifier.
    ///
    /// Banned and unconfirmed masternodes take no part in quorums and get no score.
    pub fn score(&self, modifier: QuorumModifierHash) -> Option<ScoreHash> {
        if !self.masternode_list_entry.is_valid {
            return None;
        }
        self.confirmed_hash_hashed_with_pro_reg_tx
            .map(|confirmed_hash_hashed| ScoreHash::create_score(confirmed_hash_hashed, modifier))
    }
}
