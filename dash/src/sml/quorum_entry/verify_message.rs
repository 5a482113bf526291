use hashes::Hash;

use crate::bls_sig_utils::BLSSignature;
use crate::crypto::bls::backend;
use crate::hash_types::QuorumSigningSignId;
use crate::sml::message_verification_error::MessageVerificationError;
use crate::sml::quorum_entry::qualified_quorum_entry::QualifiedQuorumEntry;

impl QualifiedQuorumEntry {
    /// Verifies a threshold signature made by this quorum over `sign_id`.
    ///
    /// # Errors
    ///
    /// - `OutdatedQuorum` if the entry uses the legacy encoding, which has
    ///   no usable key material.
    /// - `InvalidBLSPublicKey`/`InvalidBLSSignature` if the key or the
    ///   signature do not decode.
    /// - `ThresholdSignatureNotValid` if the signature does not verify.
    pub fn verify_message_digest(
        &self,
        sign_id: QuorumSigningSignId,
        signature: &BLSSignature,
    ) -> Result<(), MessageVerificationError> {
        let quorum_hash = self.quorum_entry.quorum_hash();
        if self.quorum_entry.is_outdated_rpc() {
            return Err(MessageVerificationError::OutdatedQuorum(quorum_hash));
        }
        let quorum_public_key = self.quorum_entry.quorum_public_key();
        let bls = backend();
        let public_key = bls.public_key_from_bytes(quorum_public_key)?;
        let bls_signature = bls.signature_from_bytes(signature)?;
        bls.verify_decoded(&public_key, sign_id.as_byte_array(), &bls_signature).map_err(|e| {
            MessageVerificationError::ThresholdSignatureNotValid(
                Box::new(*signature),
                Box::new(sign_id),
                Box::new(*quorum_public_key),
                quorum_hash,
                self.quorum_entry.llmq_type(),
                e,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::crypto::bls::tests::{public_key_bytes, secret_key, sign};
    use crate::sml::quorum_entry::QuorumEntry;
    use crate::sml::quorum_entry::tests::QUORUM_ENTRY_HEX;

    #[test]
    fn verifies_digest_signed_by_the_quorum_key() {
        let key = secret_key();
        let mut entry = QuorumEntry::from_bytes(&hex::decode(QUORUM_ENTRY_HEX).unwrap()).unwrap();
        if let QuorumEntry::Full(full) = &mut entry {
            full.quorum_public_key = public_key_bytes(&key);
        }
        let quorum = QualifiedQuorumEntry::from(entry);
        let sign_id = QuorumSigningSignId::hash(b"sign id");

        assert!(quorum.verify_message_digest(sign_id, &sign(&key, sign_id.as_byte_array())).is_ok());
        assert_matches!(
            quorum.verify_message_digest(sign_id, &sign(&key, b"something else")),
            Err(MessageVerificationError::ThresholdSignatureNotValid(..))
        );
        assert_matches!(
            quorum.verify_message_digest(sign_id, &BLSSignature::from([0x11; 96])),
            Err(MessageVerificationError::InvalidBLSSignature(_))
        );
    }
}
