use tracing::trace;

use crate::hash_types::{QuorumModifierHash, ScoreHash};
use crate::sml::masternode_list::MasternodeList;
use crate::sml::masternode_list_entry::qualified_masternode_list_entry::QualifiedMasternodeListEntry;
use crate::sml::quorum_entry::QuorumEntry;

impl MasternodeList {
    /// Scores of every valid, confirmed masternode for `quorum_modifier`,
    /// highest score first.
    pub fn scores_for_quorum(
        &self,
        quorum_modifier: QuorumModifierHash,
    ) -> Vec<(ScoreHash, &QualifiedMasternodeListEntry)> {
        let mut scores: Vec<_> = self
            .masternodes
            .values()
            .filter_map(|entry| entry.score(quorum_modifier).map(|score| (score, entry)))
            .collect();
        scores.sort_unstable_by(|(a, _), (b, _)| b.cmp(a));
        scores
    }

    /// The `size` members of the quorum seeded by `quorum_modifier`, in
    /// member order.
    pub fn calculate_quorum(
        &self,
        quorum_modifier: QuorumModifierHash,
        size: usize,
    ) -> Vec<&QualifiedMasternodeListEntry> {
        self.scores_for_quorum(quorum_modifier)
            .into_iter()
            .take(size)
            .map(|(score, entry)| {
                trace!(%score, pro_reg_tx_hash = %entry.masternode_list_entry.pro_reg_tx_hash, "quorum member");
                entry
            })
            .collect()
    }

    /// Members of `quorum` as this list, taken at the quorum's block, orders them.
    pub fn quorum_members(&self, quorum: &QuorumEntry) -> Vec<&QualifiedMasternodeListEntry> {
        self.calculate_quorum(quorum.selection_modifier(), quorum.llmq_type().size() as usize)
    }
}
