use hashes::{Hash, sha256d};

use crate::hash_types::{MerkleRootMasternodeList, MerkleRootQuorums, null_hash};
use crate::sml::masternode_list::MasternodeList;

/// Merkle root of `hashes` in the order given.
///
/// Each level hashes adjacent pairs, an odd last node is paired with
/// itself. An empty input has the null hash as its root.
#[inline]
pub fn merkle_root_from_hashes(hashes: Vec<[u8; 32]>) -> sha256d::Hash {
    let mut level = hashes;
    if level.is_empty() {
        return null_hash();
    }
    while level.len() != 1 {
        let mut higher_level = Vec::with_capacity(level.len().div_ceil(2));
        for pair in level.chunks(2) {
            let mut buffer = Vec::with_capacity(64);
            buffer.extend_from_slice(&pair[0]);
            buffer.extend_from_slice(pair.get(1).unwrap_or(&pair[0]));
            higher_level.push(sha256d::Hash::hash(&buffer).to_byte_array());
        }
        level = higher_level;
    }
    sha256d::Hash::from_byte_array(level[0])
}

impl MasternodeList {
    /// Entry hashes of every masternode, banned ones included, ordered by
    /// registration hash.
    pub fn hashes_for_merkle_root(&self) -> Vec<[u8; 32]> {
        self.masternodes.values().map(|entry| entry.entry_hash.to_byte_array()).collect()
    }

    /// Entry hashes of every quorum, sorted bytewise.
    pub fn hashes_for_quorum_merkle_root(&self) -> Vec<[u8; 32]> {
        let mut llmq_entry_hashes = self
            .quorums
            .values()
            .flat_map(|quorums| quorums.iter().map(|entry| entry.entry_hash.to_byte_array()))
            .collect::<Vec<_>>();
        llmq_entry_hashes.sort();
        llmq_entry_hashes
    }

    pub fn calculate_masternodes_merkle_root(&self) -> MerkleRootMasternodeList {
        MerkleRootMasternodeList::from_raw_hash(merkle_root_from_hashes(
            self.hashes_for_merkle_root(),
        ))
    }

    pub fn calculate_llmq_merkle_root(&self) -> MerkleRootQuorums {
        MerkleRootQuorums::from_raw_hash(merkle_root_from_hashes(
            self.hashes_for_quorum_merkle_root(),
        ))
    }

    /// Whether the masternodes still hash to the root declared by the last
    /// applied diff.
    pub fn verify(&self) -> bool {
        self.calculate_masternodes_merkle_root() == self.last_diff_masternode_merkle_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(byte: u8) -> [u8; 32] {
        [byte; 32]
    }

    fn node(left: [u8; 32], right: [u8; 32]) -> [u8; 32] {
        let mut buffer = left.to_vec();
        buffer.extend_from_slice(&right);
        sha256d::Hash::hash(&buffer).to_byte_array()
    }

    #[test]
    fn empty_input_has_null_root() {
        assert_eq!(merkle_root_from_hashes(vec![]), sha256d::Hash::all_zeros());
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        assert_eq!(merkle_root_from_hashes(vec![leaf(1)]).to_byte_array(), leaf(1));
    }

    #[test]
    fn odd_levels_duplicate_the_last_node() {
        let root = merkle_root_from_hashes(vec![leaf(1), leaf(2), leaf(3)]);
        let expected = node(node(leaf(1), leaf(2)), node(leaf(3), leaf(3)));
        assert_eq!(root.to_byte_array(), expected);
    }

    #[test]
    fn order_matters() {
        assert_ne!(
            merkle_root_from_hashes(vec![leaf(1), leaf(2)]),
            merkle_root_from_hashes(vec![leaf(2), leaf(1)])
        );
    }
}
