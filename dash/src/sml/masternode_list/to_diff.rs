use crate::network::message_sml::MnListDiff;
use crate::sml::error::SmlError;
use crate::sml::masternode_list::MasternodeList;

impl MasternodeList {
    /// Expresses this list as a single diff from its base block.
    ///
    /// The diff deletes nothing and lists every masternode and quorum, so
    /// applying it to an empty list rebuilds this one.
    pub fn to_diff(&self) -> Result<MnListDiff, SmlError> {
        let coinbase_tx = self
            .coinbase_tx
            .clone()
            .ok_or(SmlError::MissingCoinbaseTransaction(self.block_hash))?;
        let proof = self.coinbase_merkle_proof.clone().unwrap_or_default();
        Ok(MnListDiff {
            base_block_hash: self.base_block_hash,
            block_hash: self.block_hash,
            total_transactions: proof.total_transactions,
            merkle_hashes: proof.merkle_hashes,
            merkle_flags: proof.merkle_flags,
            coinbase_tx,
            deleted_masternodes: vec![],
            new_masternodes: self
                .masternodes
                .values()
                .map(|entry| entry.masternode_list_entry.clone())
                .collect(),
            deleted_quorums: vec![],
            new_quorums: self.get_quorums().map(|entry| entry.quorum_entry.clone()).collect(),
        })
    }
}
