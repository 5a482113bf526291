use hashes::Hash;
use tracing::{debug, warn};

use crate::network::constants::Network;
use crate::network::message_sml::MnListDiff;
use crate::sml::error::{MerkleRootKind, SmlError};
use crate::sml::llmq_type::network::NetworkLLMQExt;
use crate::sml::masternode_list::{CoinbaseMerkleProof, MasternodeList};
use crate::sml::quorum_entry::qualified_quorum_entry::QualifiedQuorumEntry;

impl MasternodeList {
    /// Builds a list from a single diff applied to an empty list.
    pub fn from_diff(diff: &MnListDiff, network: Network) -> Result<MasternodeList, SmlError> {
        MasternodeList::empty(network).apply_diff(diff)
    }

    /// Returns the list that results from applying `diff` on top of this one.
    ///
    /// Fails without touching `self` if the diff carries no coinbase payload
    /// or if a merkle root it declares does not match the resulting list.
    pub fn apply_diff(&self, diff: &MnListDiff) -> Result<MasternodeList, SmlError> {
        let coinbase_payload =
            diff.coinbase_payload().ok_or(SmlError::MissingCoinbasePayload(diff.block_hash))?;

        let mut list = self.clone();

        if list.base_block_hash == Hash::all_zeros() {
            list.base_block_hash = diff.base_block_hash;
        }
        list.block_hash = diff.block_hash;
        list.known_height = coinbase_payload.height;

        for pro_tx_hash in &diff.deleted_masternodes {
            list.masternodes.remove(pro_tx_hash);
        }
        for new_mn in &diff.new_masternodes {
            list.masternodes.insert(new_mn.pro_reg_tx_hash, new_mn.clone().into());
        }

        list.last_diff_masternode_merkle_root = coinbase_payload.merkle_root_masternode_list;
        list.masternode_merkle_root = list.calculate_masternodes_merkle_root();
        if list.masternode_merkle_root != list.last_diff_masternode_merkle_root {
            warn!(
                block_hash = %diff.block_hash,
                height = coinbase_payload.height,
                expected = %list.last_diff_masternode_merkle_root,
                calculated = %list.masternode_merkle_root,
                "masternode list merkle root mismatch"
            );
            return Err(SmlError::MerkleMismatch {
                kind: MerkleRootKind::Masternodes,
                expected: list.last_diff_masternode_merkle_root.to_raw_hash(),
                calculated: list.masternode_merkle_root.to_raw_hash(),
            });
        }

        list.coinbase_tx = Some(diff.coinbase_tx.clone());
        list.coinbase_merkle_proof = Some(CoinbaseMerkleProof {
            total_transactions: diff.total_transactions,
            merkle_hashes: diff.merkle_hashes.clone(),
            merkle_flags: diff.merkle_flags.clone(),
        });
        list.quorums_active = coinbase_payload.has_quorums();

        if list.quorums_active {
            list.apply_quorum_changes(diff);
            list.last_diff_llmq_merkle_root = coinbase_payload.merkle_root_quorums;

            let has_legacy_quorums = list
                .quorums
                .values()
                .flatten()
                .any(|quorum| quorum.quorum_entry.is_outdated_rpc());
            if list.quorums_count() == 0 {
                list.llmq_merkle_root = list.calculate_llmq_merkle_root();
            } else if has_legacy_quorums {
                // legacy entries cannot be hashed the way the coinbase commits to them
                list.llmq_merkle_root = list.last_diff_llmq_merkle_root;
            } else {
                list.llmq_merkle_root = list.calculate_llmq_merkle_root();
                if list.llmq_merkle_root != list.last_diff_llmq_merkle_root {
                    warn!(
                        block_hash = %diff.block_hash,
                        height = coinbase_payload.height,
                        expected = %list.last_diff_llmq_merkle_root,
                        calculated = %list.llmq_merkle_root,
                        "quorum list merkle root mismatch"
                    );
                    return Err(SmlError::MerkleMismatch {
                        kind: MerkleRootKind::Quorums,
                        expected: list.last_diff_llmq_merkle_root.to_raw_hash(),
                        calculated: list.llmq_merkle_root.to_raw_hash(),
                    });
                }
            }
        }

        debug!(
            block_hash = %list.block_hash,
            height = list.known_height,
            masternodes = list.masternode_count(),
            quorums = list.quorums_count(),
            "applied masternode list diff"
        );
        Ok(list)
    }

    /// Removes deleted quorums, then appends new ones per type, dropping the
    /// oldest quorum of a type once it holds its active count.
    fn apply_quorum_changes(&mut self, diff: &MnListDiff) {
        for deleted_quorum in &diff.deleted_quorums {
            if let Some(quorums) = self.quorums.get_mut(&deleted_quorum.llmq_type) {
                quorums.retain(|quorum| quorum.quorum_entry.quorum_hash() != deleted_quorum.quorum_hash);
            }
        }

        let enabled_llmq_types = self.network.enabled_llmq_types();
        for new_quorum in &diff.new_quorums {
            let llmq_type = new_quorum.llmq_type();
            if !enabled_llmq_types.contains(&llmq_type) {
                debug!(%llmq_type, quorum_hash = %new_quorum.quorum_hash(), network = %self.network, "ignoring quorum of a type the network does not track");
                continue;
            }
            let quorums = self.quorums.entry(llmq_type).or_default();
            if quorums.len() >= llmq_type.active_quorum_count() as usize {
                quorums.remove(0);
            }
            quorums.push(QualifiedQuorumEntry::from(new_quorum.clone()));
        }

        self.quorums.retain(|_, quorums| !quorums.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::blockdata::transaction::tests::coinbase_transaction;
    use crate::hash_types::{BlockHash, MerkleRootMasternodeList, MerkleRootQuorums, ProTxHash};
    use crate::sml::llmq_type::LLMQType;
    use crate::sml::masternode_list::merkle_roots::merkle_root_from_hashes;
    use crate::sml::masternode_list_entry::MasternodeListEntry;
    use crate::sml::masternode_list_entry::tests::masternode;
    use crate::sml::quorum_entry::QuorumEntry;
    use crate::sml::quorum_entry::tests::QUORUM_ENTRY_HEX;

    fn mn_root(entries: &[MasternodeListEntry]) -> MerkleRootMasternodeList {
        let mut entries = entries.to_vec();
        entries.sort_by_key(|entry| entry.pro_reg_tx_hash);
        MerkleRootMasternodeList::from_raw_hash(merkle_root_from_hashes(
            entries.iter().map(|entry| entry.calculate_entry_hash().to_byte_array()).collect(),
        ))
    }

    fn diff(
        base: BlockHash,
        height: u32,
        new_masternodes: Vec<MasternodeListEntry>,
        root: MerkleRootMasternodeList,
    ) -> MnListDiff {
        MnListDiff {
            base_block_hash: base,
            block_hash: BlockHash::hash(&height.to_le_bytes()),
            total_transactions: 1,
            merkle_hashes: vec![],
            merkle_flags: vec![],
            coinbase_tx: coinbase_transaction(height, root, MerkleRootQuorums::all_zeros()),
            deleted_masternodes: vec![],
            new_masternodes,
            deleted_quorums: vec![],
            new_quorums: vec![],
        }
    }

    #[test]
    fn first_diff_sets_the_base() {
        let masternodes = vec![masternode(1, true, true), masternode(2, true, false)];
        let first = diff(BlockHash::hash(&[0]), 10, masternodes.clone(), mn_root(&masternodes));
        let list = MasternodeList::from_diff(&first, Network::Regtest).unwrap();
        assert_eq!(list.base_block_hash, BlockHash::hash(&[0]));
        assert_eq!(list.block_hash, first.block_hash);
        assert_eq!(list.known_height, 10);
        assert_eq!(list.masternode_count(), 2);
        assert!(list.quorums_active);
        assert!(list.verify());

        let mut second = diff(first.block_hash, 11, vec![], mn_root(&masternodes[..1]));
        second.deleted_masternodes = vec![masternodes[1].pro_reg_tx_hash];
        let next = list.apply_diff(&second).unwrap();
        assert_eq!(next.base_block_hash, BlockHash::hash(&[0]));
        assert_eq!(next.masternode_count(), 1);
        assert_eq!(list.masternode_count(), 2);
    }

    #[test]
    fn upsert_replaces_by_registration_hash() {
        let original = masternode(1, true, true);
        let first = diff(BlockHash::hash(&[0]), 10, vec![original.clone()], mn_root(&[original.clone()]));
        let list = MasternodeList::from_diff(&first, Network::Regtest).unwrap();

        let mut banned = original.clone();
        banned.is_valid = false;
        let second = diff(first.block_hash, 11, vec![banned.clone()], mn_root(&[banned.clone()]));
        let list = list.apply_diff(&second).unwrap();
        assert_eq!(list.masternode_count(), 1);
        assert!(!list.masternodes[&original.pro_reg_tx_hash].masternode_list_entry.is_valid);
    }

    #[test]
    fn masternode_root_mismatch_is_fatal() {
        let masternodes = vec![masternode(1, true, true)];
        let bad = diff(BlockHash::hash(&[0]), 10, masternodes, MerkleRootMasternodeList::hash(&[9]));
        let empty = MasternodeList::empty(Network::Regtest);
        assert_matches!(
            empty.apply_diff(&bad),
            Err(SmlError::MerkleMismatch { kind: MerkleRootKind::Masternodes, .. })
        );
        assert_eq!(empty, MasternodeList::empty(Network::Regtest));
    }

    #[test]
    fn quorum_root_mismatch_is_fatal() {
        let quorum = QuorumEntry::from_bytes(&hex::decode(QUORUM_ENTRY_HEX).unwrap()).unwrap();
        let mut with_quorum = diff(BlockHash::hash(&[0]), 10, vec![], mn_root(&[]));
        with_quorum.new_quorums = vec![quorum.clone()];
        assert_matches!(
            MasternodeList::from_diff(&with_quorum, Network::Testnet),
            Err(SmlError::MerkleMismatch { kind: MerkleRootKind::Quorums, .. })
        );

        let root = MerkleRootQuorums::from_raw_hash(merkle_root_from_hashes(vec![
            quorum.calculate_entry_hash().to_byte_array(),
        ]));
        with_quorum.coinbase_tx = coinbase_transaction(10, mn_root(&[]), root);
        let list = MasternodeList::from_diff(&with_quorum, Network::Testnet).unwrap();
        assert_eq!(list.quorums_count(), 1);
        assert_eq!(list.llmq_merkle_root, root);
    }

    #[test]
    fn quorums_of_untracked_types_are_dropped() {
        let mut quorum = QuorumEntry::from_bytes(&hex::decode(QUORUM_ENTRY_HEX).unwrap()).unwrap();
        if let QuorumEntry::Full(entry) = &mut quorum {
            entry.llmq_type = LLMQType::Llmqtype100_67;
        }
        let mut with_quorum = diff(BlockHash::hash(&[0]), 10, vec![], mn_root(&[]));
        with_quorum.new_quorums = vec![quorum];
        let list = MasternodeList::from_diff(&with_quorum, Network::Dash).unwrap();
        assert_eq!(list.quorums_count(), 0);
        assert!(list.quorums.is_empty());
    }

    #[test]
    fn missing_coinbase_payload() {
        let mut no_payload = diff(BlockHash::hash(&[0]), 10, vec![], mn_root(&[]));
        no_payload.coinbase_tx.special_transaction_payload = None;
        assert_matches!(
            MasternodeList::from_diff(&no_payload, Network::Dash),
            Err(SmlError::MissingCoinbasePayload(hash)) if hash == no_payload.block_hash
        );
    }

    #[test]
    fn deleted_masternode_that_is_unknown_is_ignored() {
        let mut unknown = diff(BlockHash::hash(&[0]), 10, vec![], mn_root(&[]));
        unknown.deleted_masternodes = vec![ProTxHash::hash(&[42])];
        assert!(MasternodeList::from_diff(&unknown, Network::Dash).is_ok());
    }

    #[test]
    fn masternode_root_does_not_depend_on_diff_order() {
        let masternodes: Vec<_> = (1..=5).map(|seed| masternode(seed, true, seed % 2 == 0)).collect();
        let root = mn_root(&masternodes);
        let mut reversed = masternodes.clone();
        reversed.reverse();

        let forward = MasternodeList::from_diff(&diff(BlockHash::hash(&[0]), 10, masternodes, root), Network::Regtest)
            .unwrap();
        let backward = MasternodeList::from_diff(&diff(BlockHash::hash(&[0]), 10, reversed, root), Network::Regtest)
            .unwrap();
        assert_eq!(forward.masternode_merkle_root, root);
        assert_eq!(backward.masternode_merkle_root, root);
        assert_eq!(forward, backward);
        // iteration follows the registration hash, not the diff
        let keys: Vec<_> = forward.masternodes.keys().copied().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let masternodes = vec![masternode(1, true, true), masternode(2, false, false)];
        let quorum = QuorumEntry::from_bytes(&hex::decode(QUORUM_ENTRY_HEX).unwrap()).unwrap();
        let quorums_root = MerkleRootQuorums::from_raw_hash(merkle_root_from_hashes(vec![
            quorum.calculate_entry_hash().to_byte_array(),
        ]));
        let mut with_quorum = diff(BlockHash::hash(&[0]), 10, masternodes.clone(), mn_root(&masternodes));
        with_quorum.new_quorums = vec![quorum];
        with_quorum.coinbase_tx = coinbase_transaction(10, mn_root(&masternodes), quorums_root);
        let list = MasternodeList::from_diff(&with_quorum, Network::Testnet).unwrap();
        assert_eq!(list.quorums_count(), 1);

        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(serde_json::from_str::<MasternodeList>(&json).unwrap(), list);
    }
}
