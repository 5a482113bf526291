//! Ephemeral data.
//!
//! Messages that are relayed between peers but never stored on chain: chain
//! locks finalizing blocks and instant send locks finalizing transactions.
//! Both are threshold signatures of a quorum, and both are verified against
//! the quorums of a masternode list a few blocks before the lock.

pub mod chain_lock;
pub mod instant_lock;

use hashes::{Hash, HashEngine};
#[cfg(feature = "bls")]
use tracing::debug;

#[cfg(feature = "bls")]
use crate::bls_sig_utils::BLSSignature;
use crate::hash_types::{QuorumSigningRequestId, QuorumSigningSignId};
#[cfg(feature = "bls")]
use crate::network::constants::LLMQ_SIGN_HEIGHT_OFFSET;
#[cfg(feature = "bls")]
use crate::sml::llmq_type::LLMQType;
#[cfg(feature = "bls")]
use crate::sml::masternode_list::MasternodeList;
#[cfg(feature = "bls")]
use crate::sml::masternode_list_store::MasternodeListStore;
#[cfg(feature = "bls")]
use crate::sml::message_verification_error::MessageVerificationError;
use crate::sml::quorum_entry::QuorumEntry;

/// `sha256d(llmq_type || quorum_hash || request_id || message_hash)`, the
/// digest a quorum signs for a request.
pub(crate) fn sign_id(
    quorum: &QuorumEntry,
    request_id: QuorumSigningRequestId,
    message_hash: &[u8; 32],
) -> QuorumSigningSignId {
    let mut engine = QuorumSigningSignId::engine();
    engine.input(&[u8::from(quorum.llmq_type())]);
    engine.input(quorum.quorum_hash().as_byte_array());
    engine.input(request_id.as_byte_array());
    engine.input(message_hash);
    QuorumSigningSignId::from_engine(engine)
}

/// Verifies a lock signed for `request_id` around `signing_height`.
///
/// The signing quorum is looked up in the list `LLMQ_SIGN_HEIGHT_OFFSET`
/// blocks before `signing_height`. If that quorum did not sign, the list at
/// `signing_height` itself is tried, and then the list twice the offset
/// before it. Masternode lists of signers and verifiers can drift apart by
/// that much around quorum rotation.
///
/// A list without a quorum able to sign counts as a failed attempt. Errors
/// of the store, such as a height outside of the retained window, end the
/// verification at once.
#[cfg(feature = "bls")]
pub(crate) fn verify_at_signing_offsets<F>(
    store: &MasternodeListStore,
    signing_height: u32,
    request_id: QuorumSigningRequestId,
    quorum_type_for: fn(&MasternodeList) -> LLMQType,
    sign_id_for: F,
    signature: &BLSSignature,
) -> Result<(), MessageVerificationError>
where
    F: Fn(&QuorumEntry) -> QuorumSigningSignId,
{
    let attempt = |offset: u32| -> Result<(), MessageVerificationError> {
        let masternode_list = store.sml_by_height(signing_height.saturating_sub(offset))?;
        let llmq_type = quorum_type_for(&masternode_list);
        let quorum = masternode_list
            .quorum_entry_for_lock_request_id(request_id, llmq_type)
            .ok_or(MessageVerificationError::MasternodeListHasNoQuorums(
                masternode_list.known_height,
                llmq_type,
            ))?;
        debug!(
            offset,
            height = masternode_list.known_height,
            quorum_hash = %quorum.quorum_entry.quorum_hash(),
            "selected signatory quorum"
        );
        quorum.verify_message_digest(sign_id_for(&quorum.quorum_entry), signature)
    };

    let mut result = attempt(LLMQ_SIGN_HEIGHT_OFFSET);
    for offset in [0, 2 * LLMQ_SIGN_HEIGHT_OFFSET] {
        match &result {
            Ok(()) | Err(MessageVerificationError::Sml(_)) => break,
            Err(e) => {
                debug!(error = %e, next_offset = offset, "lock not verified, retrying at another signing height");
            }
        }
        result = attempt(offset);
    }
    result
}
