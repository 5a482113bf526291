//! Quorum entries of a simplified masternode list.
//!
//! A quorum entry is the final commitment of an LLMQ DKG session as carried in
//! `mnlistdiff` messages. Nodes running releases from before quorum
//! signatures were relayed answer with a short entry that has no member
//! bitsets, no verification vector hash and no signatures. Those entries are
//! kept as [`LegacyQuorumEntry`]: they take part in lookups but can never be
//! verified, and so never sign anything.

mod hash;
pub mod helpers;
pub mod qualified_quorum_entry;
#[cfg(feature = "bls")]
mod validation;
#[cfg(feature = "bls")]
mod verify_message;

use std::io;

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::bls_sig_utils::{BLSPublicKey, BLSSignature};
use crate::consensus::encode::{self, read_bytes};
use crate::consensus::{Decodable, Encodable, VarInt};
use crate::hash_types::{QuorumHash, QuorumVVecHash};
use crate::sml::llmq_type::{LLMQParams, LLMQType};

/// Serialized entries shorter than this use the legacy layout.
pub const LEGACY_ENTRY_MAX_LEN: usize = 100;

/// A quorum entry in the short layout of outdated nodes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct LegacyQuorumEntry {
    pub version: u16,
    pub llmq_type: LLMQType,
    pub quorum_hash: QuorumHash,
    pub signers_count: u64,
    pub valid_members_count: u64,
    pub quorum_public_key: BLSPublicKey,
}

/// A complete final commitment of a quorum.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct FullQuorumEntry {
    pub version: u16,
    pub llmq_type: LLMQType,
    pub quorum_hash: QuorumHash,
    /// Present for rotated quorums, versions 2 and 4.
    pub quorum_index: Option<i16>,
    pub signers_count: u64,
    /// Bitset over the ordered members, least significant bit first.
    pub signers: Vec<u8>,
    pub valid_members_count: u64,
    pub valid_members: Vec<u8>,
    pub quorum_public_key: BLSPublicKey,
    pub quorum_vvec_hash: QuorumVVecHash,
    pub threshold_sig: BLSSignature,
    pub all_commitment_aggregated_signature: BLSSignature,
}

/// A quorum entry in either of its wire layouts.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub enum QuorumEntry {
    Legacy(LegacyQuorumEntry),
    Full(FullQuorumEntry),
}

fn has_quorum_index(version: u16) -> bool {
    version == 2 || version == 4
}

impl QuorumEntry {
    /// Decodes an entry from a buffer holding exactly one entry.
    ///
    /// The layout is chosen by the buffer length: anything shorter than
    /// [`LEGACY_ENTRY_MAX_LEN`] bytes is a legacy entry.
    pub fn from_bytes(bytes: &[u8]) -> Result<QuorumEntry, encode::Error> {
        if bytes.len() < LEGACY_ENTRY_MAX_LEN {
            Ok(QuorumEntry::Legacy(encode::deserialize(bytes)?))
        } else {
            Ok(QuorumEntry::Full(encode::deserialize(bytes)?))
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        encode::serialize(self)
    }

    pub fn version(&self) -> u16 {
        match self {
            QuorumEntry::Legacy(entry) => entry.version,
            QuorumEntry::Full(entry) => entry.version,
        }
    }

    pub fn llmq_type(&self) -> LLMQType {
        match self {
            QuorumEntry::Legacy(entry) => entry.llmq_type,
            QuorumEntry::Full(entry) => entry.llmq_type,
        }
    }

    pub fn quorum_hash(&self) -> QuorumHash {
        match self {
            QuorumEntry::Legacy(entry) => entry.quorum_hash,
            QuorumEntry::Full(entry) => entry.quorum_hash,
        }
    }

    pub fn quorum_public_key(&self) -> &BLSPublicKey {
        match self {
            QuorumEntry::Legacy(entry) => &entry.quorum_public_key,
            QuorumEntry::Full(entry) => &entry.quorum_public_key,
        }
    }

    pub fn quorum_index(&self) -> Option<i16> {
        match self {
            QuorumEntry::Legacy(_) => None,
            QuorumEntry::Full(entry) => entry.quorum_index,
        }
    }

    /// Whether the entry came from a node too old to relay signatures.
    pub fn is_outdated_rpc(&self) -> bool {
        matches!(self, QuorumEntry::Legacy(_))
    }

    pub fn as_full(&self) -> Option<&FullQuorumEntry> {
        match self {
            QuorumEntry::Legacy(_) => None,
            QuorumEntry::Full(entry) => Some(entry),
        }
    }

    pub fn params(&self) -> LLMQParams {
        self.llmq_type().params()
    }
}

impl Encodable for LegacyQuorumEntry {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.llmq_type.consensus_encode(w)?;
        len += self.quorum_hash.consensus_encode(w)?;
        len += VarInt(self.signers_count).consensus_encode(w)?;
        len += VarInt(self.valid_members_count).consensus_encode(w)?;
        len += self.quorum_public_key.consensus_encode(w)?;
        Ok(len)
    }
}

impl Decodable for LegacyQuorumEntry {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        Ok(LegacyQuorumEntry {
            version: u16::consensus_decode(r)?,
            llmq_type: LLMQType::consensus_decode(r)?,
            quorum_hash: QuorumHash::consensus_decode(r)?,
            signers_count: VarInt::consensus_decode(r)?.0,
            valid_members_count: VarInt::consensus_decode(r)?.0,
            quorum_public_key: BLSPublicKey::consensus_decode(r)?,
        })
    }
}

impl FullQuorumEntry {
    /// Encodes the entry, optionally replacing both member counts with the
    /// quorum size as done when hashing the entry.
    pub(crate) fn encode_with_counts<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
        normalize_counts: bool,
    ) -> Result<usize, io::Error> {
        let size = self.llmq_type.size() as u64;
        let (signers_count, valid_members_count) = if normalize_counts {
            (size, size)
        } else {
            (self.signers_count, self.valid_members_count)
        };
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.llmq_type.consensus_encode(w)?;
        len += self.quorum_hash.consensus_encode(w)?;
        if has_quorum_index(self.version) {
            len += self.quorum_index.unwrap_or_default().consensus_encode(w)?;
        }
        len += VarInt(signers_count).consensus_encode(w)?;
        w.write_all(&self.signers)?;
        len += self.signers.len();
        len += VarInt(valid_members_count).consensus_encode(w)?;
        w.write_all(&self.valid_members)?;
        len += self.valid_members.len();
        len += self.quorum_public_key.consensus_encode(w)?;
        len += self.quorum_vvec_hash.consensus_encode(w)?;
        len += self.threshold_sig.consensus_encode(w)?;
        len += self.all_commitment_aggregated_signature.consensus_encode(w)?;
        Ok(len)
    }
}

impl Encodable for FullQuorumEntry {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        self.encode_with_counts(w, false)
    }
}

impl Decodable for FullQuorumEntry {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let llmq_type = LLMQType::consensus_decode(r)?;
        let quorum_hash = QuorumHash::consensus_decode(r)?;
        let quorum_index =
            if has_quorum_index(version) { Some(i16::consensus_decode(r)?) } else { None };
        // both bitsets are sized by the quorum type, not by the counts
        let bitset_len = llmq_type.bitset_len();
        let signers_count = VarInt::consensus_decode(r)?.0;
        let signers = read_bytes(r, bitset_len)?;
        let valid_members_count = VarInt::consensus_decode(r)?.0;
        let valid_members = read_bytes(r, bitset_len)?;
        Ok(FullQuorumEntry {
            version,
            llmq_type,
            quorum_hash,
            quorum_index,
            signers_count,
            signers,
            valid_members_count,
            valid_members,
            quorum_public_key: BLSPublicKey::consensus_decode(r)?,
            quorum_vvec_hash: QuorumVVecHash::consensus_decode(r)?,
            threshold_sig: BLSSignature::consensus_decode(r)?,
            all_commitment_aggregated_signature: BLSSignature::consensus_decode(r)?,
        })
    }
}

impl Encodable for QuorumEntry {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        match self {
            QuorumEntry::Legacy(entry) => entry.consensus_encode(w),
            QuorumEntry::Full(entry) => entry.consensus_encode(w),
        }
    }
}

/// Entries embedded in a `mnlistdiff` stream always use the full layout.
impl Decodable for QuorumEntry {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        Ok(QuorumEntry::Full(FullQuorumEntry::consensus_decode(r)?))
    }
}

impl From<FullQuorumEntry> for QuorumEntry {
    fn from(entry: FullQuorumEntry) -> Self {
        QuorumEntry::Full(entry)
    }
}

impl From<LegacyQuorumEntry> for QuorumEntry {
    fn from(entry: LegacyQuorumEntry) -> Self {
        QuorumEntry::Legacy(entry)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::*;

    pub(crate) const QUORUM_ENTRY_HEX: &str = "01000160b156bf6648f8616baf0ae55545d9ba1fa5279ace4184a805c3c1000000000032ffffffffffff0332ffffffffffff038fe19adca131e5a5dbbfb5ae4022abb6838edc3ac13820affe7086ffe7e4d99b9374a18bd558b878f726fd9c5299b5c3f3daa7fe2e079a76f17ec5d9c56cf9786688e8b32d716cf640f7bbabc333ba971527b12834578efb34480234293215cdaaba66ae31804ce57c8cf34ff0cf2b995a974d24c5f66bfe28ae7cd54c945fc8126465f4cf5a32e02d903be19d00e473fb93eaae9c28d9c80097e3410dbdd6e8dd223fde1a3be30a1fda688e0c9a087c82ceec940dd23b3c50ace0645759d4cd7ea7f6153813018d265245e81bf7673b8c2d664e94f5f506655654ee39d2689a007d98513d274aae8dc31ebb0138756a768005774cc718ba55e18e9b442dbb638d54c7ff256e0d997e3544581497f5c0";

    #[test]
    fn parse_full_entry() {
        let bytes = hex::decode(QUORUM_ENTRY_HEX).unwrap();
        let entry = QuorumEntry::from_bytes(&bytes).unwrap();
        let full = entry.as_full().unwrap();
        assert_eq!(full.version, 1);
        assert_eq!(full.llmq_type, LLMQType::Llmqtype50_60);
        assert_eq!(
            full.quorum_hash,
            QuorumHash::from_str("0000000000c1c305a88441ce9a27a51fbad94555e50aaf6b61f84866bf56b160")
                .unwrap()
        );
        assert_eq!(full.quorum_index, None);
        assert_eq!(full.signers_count, 50);
        assert_eq!(hex::encode(&full.signers), "ffffffffffff03");
        assert_eq!(full.valid_members_count, 50);
        assert_eq!(hex::encode(&full.valid_members), "ffffffffffff03");
        assert_eq!(
            full.quorum_public_key.to_string(),
            "8fe19adca131e5a5dbbfb5ae4022abb6838edc3ac13820affe7086ffe7e4d99b9374a18bd558b878f726fd9c5299b5c3"
        );
        assert_eq!(
            full.quorum_vvec_hash.to_string(),
            "97ba33c3abbbf740f66c712db3e8886678f96cc5d9c57ef1769a072efea7daf3"
        );
        assert!(full.threshold_sig.to_string().starts_with("1527b12834578efb"));
        assert!(full.all_commitment_aggregated_signature.to_string().starts_with("82ceec940dd23b3c"));
        assert!(!entry.is_outdated_rpc());
        assert_eq!(entry.to_bytes(), bytes);
    }

    #[test]
    fn short_buffer_is_legacy() {
        let bytes = hex::decode(QUORUM_ENTRY_HEX).unwrap();
        let full = QuorumEntry::from_bytes(&bytes).unwrap();
        let legacy = LegacyQuorumEntry {
            version: 1,
            llmq_type: full.llmq_type(),
            quorum_hash: full.quorum_hash(),
            signers_count: 50,
            valid_members_count: 50,
            quorum_public_key: *full.quorum_public_key(),
        };
        let legacy_bytes = encode::serialize(&legacy);
        assert_eq!(legacy_bytes.len(), 2 + 1 + 32 + 1 + 1 + 48);

        let parsed = QuorumEntry::from_bytes(&legacy_bytes).unwrap();
        assert!(parsed.is_outdated_rpc());
        assert_eq!(parsed, QuorumEntry::Legacy(legacy));
        assert_eq!(parsed.to_bytes(), legacy_bytes);
        assert!(parsed.as_full().is_none());
    }

    #[test]
    fn rotated_entry_carries_quorum_index() {
        let bytes = hex::decode(QUORUM_ENTRY_HEX).unwrap();
        let mut entry = QuorumEntry::from_bytes(&bytes).unwrap().as_full().cloned().unwrap();
        entry.version = 2;
        entry.quorum_index = Some(3);
        let encoded = encode::serialize(&entry);
        assert_eq!(encoded.len(), bytes.len() + 2);
        assert_eq!(encoded[35..37], [3, 0]);
        let decoded = QuorumEntry::from_bytes(&encoded).unwrap();
        assert_eq!(decoded.quorum_index(), Some(3));
    }

    #[test]
    fn unknown_type_and_truncation_fail() {
        let mut bytes = hex::decode(QUORUM_ENTRY_HEX).unwrap();
        bytes.truncate(200);
        assert_matches!(QuorumEntry::from_bytes(&bytes), Err(e) if e.is_unexpected_eof());

        let mut bytes = hex::decode(QUORUM_ENTRY_HEX).unwrap();
        bytes[2] = 42;
        assert_matches!(QuorumEntry::from_bytes(&bytes), Err(encode::Error::UnknownQuorumType(42)));
    }
}
