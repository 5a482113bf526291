//! Dash hash types.
//!
//! This module defines types for hashes used throughout the library. These
//! types are needed in order to avoid mixing data of the same hash format
//! (e.g. `SHA256d`) but of different meaning (such as transaction id, block
//! hash).
//!
//! All of them display in reversed byte order, the way Dash Core prints
//! hashes, and encode in their internal byte order.

use hashes::{Hash, hash_newtype, sha256, sha256d};

use crate::internal_macros::impl_hashencode;

hash_newtype! {
    /// A dash block hash.
    pub struct BlockHash(sha256d::Hash);
    /// A dash transaction hash/transaction ID.
    pub struct Txid(sha256d::Hash);

    /// The registration transaction id identifying a masternode.
    pub struct ProTxHash(sha256d::Hash);
    /// The hash of the block a masternode registration was confirmed in.
    pub struct ConfirmedHash(sha256d::Hash);
    /// The block hash a quorum's DKG session started at.
    pub struct QuorumHash(sha256d::Hash);
    /// Hash of the verification vector of a quorum.
    pub struct QuorumVVecHash(sha256d::Hash);
    /// The block hash identifying an LLMQ rotation cycle.
    pub struct CycleHash(sha256d::Hash);

    /// Hash of a serialized simplified masternode list entry.
    pub struct MnListEntryHash(sha256d::Hash);
    /// Hash of a serialized quorum entry, with member counts normalized.
    pub struct QuorumEntryHash(sha256d::Hash);
    /// The message both quorum signatures are made over.
    pub struct QuorumCommitmentHash(sha256d::Hash);
    /// Seed for the deterministic member ordering of a quorum.
    pub struct QuorumModifierHash(sha256d::Hash);
    /// Merkle root of the masternode list.
    pub struct MerkleRootMasternodeList(sha256d::Hash);
    /// Merkle root of the active quorums.
    pub struct MerkleRootQuorums(sha256d::Hash);

    /// Identifies a signing session of a quorum.
    pub struct QuorumSigningRequestId(sha256d::Hash);
    /// The digest signed by a quorum for a given request id and message.
    pub struct QuorumSigningSignId(sha256d::Hash);
    /// Ranks quorums for a signing request.
    pub struct QuorumOrderingHash(sha256d::Hash);

    /// Hash of a serialized chain lock.
    pub struct ChainLockHash(sha256d::Hash);
    /// Hash of a serialized instant send lock.
    pub struct InstantLockHash(sha256d::Hash);

    /// Single SHA256 of a masternode's registration and confirmation hashes.
    pub struct ConfirmedHashHashedWithProRegTx(sha256::Hash);
    /// Score of a masternode for a given quorum modifier.
    pub struct ScoreHash(sha256::Hash);
}

impl_hashencode!(BlockHash);
impl_hashencode!(Txid);
impl_hashencode!(ProTxHash);
impl_hashencode!(ConfirmedHash);
impl_hashencode!(QuorumHash);
impl_hashencode!(QuorumVVecHash);
impl_hashencode!(CycleHash);
impl_hashencode!(MerkleRootMasternodeList);
impl_hashencode!(MerkleRootQuorums);

impl ConfirmedHashHashedWithProRegTx {
    /// Hashes `pro_reg_tx_hash || confirmed_hash`, both in internal order.
    pub fn create(pro_reg_tx_hash: &ProTxHash, confirmed_hash: &ConfirmedHash) -> Self {
        let mut buffer = Vec::with_capacity(64);
        buffer.extend_from_slice(pro_reg_tx_hash.as_byte_array());
        buffer.extend_from_slice(confirmed_hash.as_byte_array());
        Self::hash(&buffer)
    }
}

impl ScoreHash {
    /// `sha256(confirmed_hash_hashed_with_pro_reg_tx || modifier)`.
    ///
    /// The score is stored reversed so that comparing byte arrays compares
    /// the scores as big endian numbers.
    pub fn create_score(
        confirmed_hash_hashed_with_pro_reg_tx: ConfirmedHashHashedWithProRegTx,
        modifier: QuorumModifierHash,
    ) -> Self {
        let mut buffer = Vec::with_capacity(64);
        buffer.extend_from_slice(confirmed_hash_hashed_with_pro_reg_tx.as_byte_array());
        buffer.extend_from_slice(modifier.as_byte_array());
        let mut score = sha256::Hash::hash(&buffer).to_byte_array();
        score.reverse();
        Self::from_byte_array(score)
    }
}

/// Returns the null hash: 32 zero bytes.
pub fn null_hash<T: Hash<Bytes = [u8; 32]>>() -> T {
    T::from_byte_array([0u8; 32])
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::consensus::{deserialize, serialize};

    #[test]
    fn block_hash_displays_reversed_and_encodes_internal_order() {
        let display = "0000000007e0a65b763c0a4fb2274ff757abdbd19c9efe9de189f5828c70a5f4";
        let block_hash = BlockHash::from_str(display).unwrap();
        assert_eq!(block_hash.to_string(), display);

        let encoded = serialize(&block_hash);
        assert_eq!(hex::encode(&encoded), "f4a5708c82f589e19dfe9e9cd1dbab57f74f27b24f0a3c765ba6e00700000000");
        assert_eq!(deserialize::<BlockHash>(&encoded).unwrap(), block_hash);
    }

    #[test]
    fn null_hash_is_all_zeros() {
        let hash: QuorumHash = null_hash();
        assert_eq!(hash, QuorumHash::all_zeros());
    }

    #[test]
    fn score_is_reversed_single_sha256() {
        let hashed = ConfirmedHashHashedWithProRegTx::hash(&[1u8; 64]);
        let modifier = QuorumModifierHash::hash(&[2u8; 4]);
        let score = ScoreHash::create_score(hashed, modifier);

        let mut buffer = hashed.to_byte_array().to_vec();
        buffer.extend_from_slice(&modifier.to_byte_array());
        let mut expected = sha256::Hash::hash(&buffer).to_byte_array();
        expected.reverse();
        assert_eq!(score.to_byte_array(), expected);
    }
}
