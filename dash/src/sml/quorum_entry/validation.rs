use hashes::Hash;
use tracing::{debug, warn};

use crate::crypto::bls::{PublicKey, backend};
use crate::sml::masternode_list::MasternodeList;
use crate::sml::quorum_entry::FullQuorumEntry;
use crate::sml::quorum_entry::qualified_quorum_entry::QualifiedQuorumEntry;
use crate::sml::quorum_validation_error::QuorumValidationError;

impl QualifiedQuorumEntry {
    fn full_entry(&self) -> Result<&FullQuorumEntry, QuorumValidationError> {
        self.quorum_entry.as_full().ok_or(QuorumValidationError::OutdatedEncoding)
    }

    fn commitment_message(&self) -> Result<[u8; 32], QuorumValidationError> {
        self.commitment_hash
            .map(|hash| hash.to_byte_array())
            .ok_or(QuorumValidationError::OutdatedEncoding)
    }

    /// Checks that `masternode_list` is the list at the block the quorum was
    /// formed at.
    pub fn check_masternode_list(
        &self,
        masternode_list: &MasternodeList,
    ) -> Result<(), QuorumValidationError> {
        let quorum_hash = self.quorum_entry.quorum_hash();
        if masternode_list.block_hash.to_byte_array() != quorum_hash.to_byte_array() {
            return Err(QuorumValidationError::WrongMasternodeList {
                block_hash: masternode_list.block_hash,
                quorum_hash,
            });
        }
        Ok(())
    }

    /// Verifies the threshold signature of the quorum over its commitment.
    pub fn verify_quorum_signature(&self) -> Result<(), QuorumValidationError> {
        let entry = self.full_entry()?;
        let message = self.commitment_message()?;
        let bls = backend();
        let public_key = bls.public_key_from_bytes(&entry.quorum_public_key)?;
        let signature = bls.signature_from_bytes(&entry.threshold_sig)?;
        bls.verify_decoded(&public_key, &message, &signature)
            .map_err(QuorumValidationError::ThresholdSignatureNotValid)
    }

    /// Verifies the members signature against the operator keys of the
    /// signers, taken from the list at the quorum block.
    pub fn verify_aggregated_commitment_signature(
        &self,
        masternode_list: &MasternodeList,
    ) -> Result<(), QuorumValidationError> {
        self.check_masternode_list(masternode_list)?;
        let entry = self.full_entry()?;
        let message = self.commitment_message()?;
        let bls = backend();

        let signers = entry.signers_bits();
        let operator_keys = masternode_list
            .quorum_members(&self.quorum_entry)
            .into_iter()
            .enumerate()
            .filter(|(index, _)| signers.get(*index).copied().unwrap_or(false))
            .map(|(_, member)| bls.public_key_from_bytes(&member.masternode_list_entry.operator_public_key))
            .collect::<Result<Vec<PublicKey>, _>>()?;
        debug!(
            quorum_hash = %entry.quorum_hash,
            signers = operator_keys.len(),
            "verifying quorum members signature"
        );

        let aggregated_key = bls.aggregate_public_keys(operator_keys)?;
        let signature = bls.signature_from_bytes(&entry.all_commitment_aggregated_signature)?;
        bls.verify_decoded(&aggregated_key, &message, &signature)
            .map_err(QuorumValidationError::AllCommitmentAggregatedSignatureNotValid)
    }

    /// Whether the threshold signature is valid. Legacy entries never are.
    pub fn is_valid_quorum_sig(&self) -> bool {
        self.verify_quorum_signature().is_ok()
    }

    /// Whether the members signature is valid for the signers of the quorum.
    ///
    /// Fails only when `masternode_list` is not the list at the quorum block.
    pub fn is_valid_member_sig(
        &self,
        masternode_list: &MasternodeList,
    ) -> Result<bool, QuorumValidationError> {
        match self.verify_aggregated_commitment_signature(masternode_list) {
            Ok(()) => Ok(true),
            Err(e @ QuorumValidationError::WrongMasternodeList { .. }) => Err(e),
            Err(_) => Ok(false),
        }
    }

    /// Runs both signature checks, members signature first.
    pub fn validate(&self, masternode_list: &MasternodeList) -> Result<(), QuorumValidationError> {
        self.verify_aggregated_commitment_signature(masternode_list)?;
        self.verify_quorum_signature()
    }

    /// Verifies the entry once.
    ///
    /// An entry that verified is never checked again. A failure is recorded
    /// but a later call checks the signatures anew.
    pub fn verify(&mut self, masternode_list: &MasternodeList) -> Result<bool, QuorumValidationError> {
        if self.is_verified() {
            return Ok(true);
        }
        self.check_masternode_list(masternode_list)?;
        if self.quorum_entry.is_outdated_rpc() {
            return Ok(false);
        }
        let result = self.validate(masternode_list);
        if let Err(e) = &result {
            warn!(quorum_hash = %self.quorum_entry.quorum_hash(), error = %e, "quorum entry failed verification");
        }
        let verified = result.is_ok();
        self.update_quorum_status(result);
        Ok(verified)
    }
}
