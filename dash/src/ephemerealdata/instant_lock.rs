//! Instant send lock is a mechanism used by the Dash network to
//! confirm transaction within 1 or 2 seconds. This data structure
//! represents a p2p message containing a data to verify such a lock.
//!
//! Two encodings exist. The original `islock` message lists the inputs, the
//! transaction id and the signature. The deterministic `isdlock` message
//! starts with a version byte and adds the hash of the block starting the
//! quorum cycle before the signature.

use std::fmt;
use std::io::{self, Cursor, Read, Write};

use hashes::{Hash, HashEngine};

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::blockdata::transaction::outpoint::OutPoint;
use crate::bls_sig_utils::BLSSignature;
use crate::consensus::{Decodable, Encodable, VarInt, encode};
use crate::ephemerealdata::sign_id;
use crate::hash_types::{CycleHash, InstantLockHash, QuorumSigningRequestId, QuorumSigningSignId, Txid};
use crate::network::constants::ISLOCK_REQUESTID_PREFIX;
use crate::sml::masternode_list::MasternodeList;
use crate::sml::quorum_entry::QuorumEntry;
use crate::sml::quorum_entry::qualified_quorum_entry::QualifiedQuorumEntry;
#[cfg(feature = "bls")]
use crate::{
    ephemerealdata::verify_at_signing_offsets, sml::error::SmlError,
    sml::masternode_list_store::MasternodeListStore,
    sml::message_verification_error::MessageVerificationError,
};

/// Version of locks in the original `islock` encoding.
pub const LEGACY_INSTANT_LOCK_VERSION: u8 = 0;

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct InstantLock {
    /// Zero for `islock` messages, at least one for `isdlock` messages.
    pub version: u8,
    /// Transaction inputs locked by this lock
    pub inputs: Vec<OutPoint>,
    /// Transaction hash locked by this lock
    pub txid: Txid,
    /// First block of the quorum cycle, present in `isdlock` messages.
    pub cyclehash: Option<CycleHash>,
    /// Quorum signature for this lock
    pub signature: BLSSignature,
}

impl InstantLock {
    /// Decodes an `islock` message.
    pub fn from_bytes(bytes: &[u8]) -> Result<InstantLock, encode::Error> {
        encode::deserialize(bytes)
    }

    /// Decodes an `isdlock` message.
    pub fn deterministic_from_bytes(bytes: &[u8]) -> Result<InstantLock, encode::Error> {
        let mut cursor = Cursor::new(bytes);
        let version = u8::consensus_decode(&mut cursor)?;
        if version == LEGACY_INSTANT_LOCK_VERSION {
            return Err(encode::Error::ParseFailed("deterministic instant lock with version 0"));
        }
        let inputs = decode_inputs(&mut cursor)?;
        let txid = Txid::consensus_decode(&mut cursor)?;

        let remaining = bytes.len().saturating_sub(cursor.position() as usize);
        if remaining == BLSSignature::SIZE {
            return Err(encode::Error::MissingCycleHash);
        }
        let cyclehash = CycleHash::consensus_decode(&mut cursor)?;
        let signature = BLSSignature::consensus_decode(&mut cursor)?;

        let consumed = cursor.position() as usize;
        if consumed != bytes.len() {
            return Err(encode::Error::TrailingBytes(bytes.len() - consumed));
        }
        Ok(InstantLock { version, inputs, txid, cyclehash: Some(cyclehash), signature })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, io::Error> {
        let mut bytes = Vec::new();
        self.consensus_encode(&mut bytes)?;
        Ok(bytes)
    }

    pub fn is_deterministic(&self) -> bool {
        self.version != LEGACY_INSTANT_LOCK_VERSION
    }

    /// Hash of the serialized lock.
    pub fn hash(&self) -> Result<InstantLockHash, io::Error> {
        Ok(InstantLockHash::hash(&self.to_bytes()?))
    }

    /// Returns quorum signing request ID
    pub fn request_id(&self) -> QuorumSigningRequestId {
        let mut engine = QuorumSigningRequestId::engine();

        engine.input(&encode::serialize(&VarInt(ISLOCK_REQUESTID_PREFIX.len() as u64)));
        engine.input(ISLOCK_REQUESTID_PREFIX.as_bytes());

        engine.input(&encode::serialize(&self.inputs));

        QuorumSigningRequestId::from_engine(engine)
    }

    /// The digest `quorum` signs to lock this transaction.
    pub fn sign_hash_for_quorum_entry(&self, quorum: &QuorumEntry) -> QuorumSigningSignId {
        sign_id(quorum, self.request_id(), self.txid.as_byte_array())
    }

    /// The quorum of `masternode_list` expected to sign this lock.
    pub fn select_signatory_quorum<'a>(
        &self,
        masternode_list: &'a MasternodeList,
    ) -> Option<&'a QualifiedQuorumEntry> {
        masternode_list.quorum_entry_for_lock_request_id(
            self.request_id(),
            masternode_list.instant_send_llmq_type(),
        )
    }

    /// Whether `quorum` signed this lock.
    #[cfg(feature = "bls")]
    pub fn verify_signature_against_quorum(&self, quorum: &QualifiedQuorumEntry) -> bool {
        quorum
            .verify_message_digest(self.sign_hash_for_quorum_entry(&quorum.quorum_entry), &self.signature)
            .is_ok()
    }

    /// Verifies the lock against the lists at the tip of `store`, reporting
    /// why it failed.
    #[cfg(feature = "bls")]
    pub fn verify_detailed(&self, store: &MasternodeListStore) -> Result<(), MessageVerificationError> {
        verify_at_signing_offsets(
            store,
            store.tip_height(),
            self.request_id(),
            MasternodeList::instant_send_llmq_type,
            |quorum| self.sign_hash_for_quorum_entry(quorum),
            &self.signature,
        )
    }

    /// Whether a quorum of the lists at the tip of `store` signed this lock.
    ///
    /// Lists without quorums of the instant send type are not an error, the
    /// lock is then simply not verified.
    #[cfg(feature = "bls")]
    pub fn verify(&self, store: &MasternodeListStore) -> Result<bool, SmlError> {
        match self.verify_detailed(store) {
            Ok(()) => Ok(true),
            Err(MessageVerificationError::Sml(e)) => Err(e),
            Err(e) => {
                tracing::warn!(txid = %self.txid, error = %e, "instant lock not verified");
                Ok(false)
            }
        }
    }
}

impl Encodable for InstantLock {
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = 0;
        if self.is_deterministic() {
            len += self.version.consensus_encode(w)?;
        }
        len += self.inputs.consensus_encode(w)?;
        len += self.txid.consensus_encode(w)?;
        if self.is_deterministic() {
            let cyclehash = self.cyclehash.ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "deterministic instant lock without cycle hash")
            })?;
            len += cyclehash.consensus_encode(w)?;
        }
        len += self.signature.consensus_encode(w)?;
        Ok(len)
    }
}

/// A lock always covers at least one input.
fn decode_inputs<R: Read + ?Sized>(r: &mut R) -> Result<Vec<OutPoint>, encode::Error> {
    let inputs = Vec::<OutPoint>::consensus_decode(r)?;
    if inputs.is_empty() {
        return Err(encode::Error::ParseFailed("instant lock without inputs"));
    }
    Ok(inputs)
}

impl Decodable for InstantLock {
    /// Decodes the `islock` encoding, see [`InstantLock::deterministic_from_bytes`]
    /// for `isdlock`.
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        Ok(InstantLock {
            version: LEGACY_INSTANT_LOCK_VERSION,
            inputs: decode_inputs(r)?,
            txid: Decodable::consensus_decode(r)?,
            cyclehash: None,
            signature: Decodable::consensus_decode(r)?,
        })
    }
}

impl fmt::Display for InstantLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<InstantLock: {}, sig: {}>", self.txid, self.signature)
    }
}
