#![cfg(feature = "bls")]

mod common;

use std::collections::BTreeMap;

use assert_matches::assert_matches;
use blsful::inner_types::G2Affine;
use blsful::{Bls12381G2Impl, SecretKey, Signature, SignatureSchemes};
use common::{Chain, block_hash, masternode, quorum_hash, test_quorum};
use dashcore_llmq::hashes::Hash;
use dashcore_llmq::sml::llmq_entry_verification::{
    LLMQEntryVerificationSkipStatus, LLMQEntryVerificationStatus,
};
use dashcore_llmq::sml::message_verification_error::MessageVerificationError;
use dashcore_llmq::{
    BLSPublicKey, BLSSignature, ChainLock, InstantLock, LLMQType, MasternodeList,
    MasternodeListStore, MasternodeListStoreConfig, MnListDiff, Network, OutPoint, QuorumEntry,
    QuorumHash, SmlError, Txid,
};

const START_HEIGHT: u32 = 200;

type BlsSecretKey = SecretKey<Bls12381G2Impl>;

fn secret_key() -> BlsSecretKey {
    BlsSecretKey::random(&mut rand::thread_rng())
}

fn public_key(secret_key: &BlsSecretKey) -> BLSPublicKey {
    BLSPublicKey::from(secret_key.public_key().0.to_compressed())
}

fn sign(secret_key: &BlsSecretKey, message: &[u8]) -> BLSSignature {
    match secret_key.sign(SignatureSchemes::Basic, message) {
        Ok(Signature::Basic(point)) => BLSSignature::from(G2Affine::from(point).to_compressed()),
        _ => panic!("basic signing failed"),
    }
}

/// A regtest chain of 20 blocks with a test quorum formed at each of
/// `quorum_heights`, each announced in the following block.
struct RegtestChain {
    diffs: Vec<MnListDiff>,
    quorum_keys: BTreeMap<QuorumHash, BlsSecretKey>,
}

fn regtest_chain(quorum_heights: &[u32]) -> RegtestChain {
    let mut chain = Chain::new(Network::Regtest, START_HEIGHT);
    let mut quorum_keys = BTreeMap::new();
    let diffs = (START_HEIGHT..START_HEIGHT + 20)
        .map(|height| {
            let new_quorums = quorum_heights
                .iter()
                .filter(|quorum_height| **quorum_height + 1 == height)
                .map(|quorum_height| {
                    let key = secret_key();
                    let quorum = test_quorum(*quorum_height, public_key(&key));
                    quorum_keys.insert(quorum.quorum_hash, key);
                    QuorumEntry::Full(quorum)
                })
                .collect();
            chain.diff(Vec::new(), new_quorums)
        })
        .collect();
    RegtestChain { diffs, quorum_keys }
}

fn store(diffs: Vec<MnListDiff>) -> MasternodeListStore {
    MasternodeListStore::new(diffs, MasternodeListStoreConfig::new(Network::Regtest)).unwrap()
}

fn tip() -> u32 {
    START_HEIGHT + 19
}

/// Signs `chain_lock` with the quorum `masternode_list` selects for it.
fn sign_chain_lock(
    chain_lock: &mut ChainLock,
    masternode_list: &MasternodeList,
    quorum_keys: &BTreeMap<QuorumHash, BlsSecretKey>,
) {
    let quorum = chain_lock.select_signatory_quorum(masternode_list).unwrap();
    let key = &quorum_keys[&quorum.quorum_entry.quorum_hash()];
    chain_lock.signature = sign(key, chain_lock.sign_hash_for_quorum_entry(&quorum.quorum_entry).as_byte_array());
}

fn chain_lock(block_height: u32) -> ChainLock {
    ChainLock {
        block_height,
        block_hash: block_hash(block_height),
        signature: BLSSignature::from([0; 96]),
    }
}

#[test]
fn chain_lock_signed_by_the_quorum_eight_blocks_back() {
    let RegtestChain { diffs, quorum_keys } = regtest_chain(&[START_HEIGHT]);
    let store = store(diffs);

    let mut lock = chain_lock(tip());
    let signing_list = store.sml_by_height(tip() - 8).unwrap();
    assert_eq!(signing_list.chain_lock_llmq_type(), LLMQType::LlmqtypeTest);
    sign_chain_lock(&mut lock, &signing_list, &quorum_keys);

    assert!(lock.verify_detailed(&store).is_ok());
    assert!(lock.verify(&store).unwrap());
    assert!(store.verify_chain_lock(&lock).unwrap());

    let quorum = lock.select_signatory_quorum(&signing_list).unwrap();
    assert!(lock.verify_signature_against_quorum(quorum));

    let mut other_block = lock.clone();
    other_block.block_hash = block_hash(tip() - 1);
    assert!(!other_block.verify(&store).unwrap());
}

#[test]
fn chain_lock_falls_back_to_the_list_at_the_lock_height() {
    // the quorum at 200 is rotated out by those formed at 212 and 213
    let RegtestChain { diffs, quorum_keys } =
        regtest_chain(&[START_HEIGHT - 1, START_HEIGHT + 12, START_HEIGHT + 13]);
    let store = store(diffs);

    let mut lock = chain_lock(tip());
    let tip_list = store.sml_by_height(tip()).unwrap();
    assert_eq!(tip_list.get_quorums_of_type(LLMQType::LlmqtypeTest).len(), 2);
    sign_chain_lock(&mut lock, &tip_list, &quorum_keys);

    let signing_list = store.sml_by_height(tip() - 8).unwrap();
    let quorum = lock.select_signatory_quorum(&signing_list).unwrap();
    assert!(!lock.verify_signature_against_quorum(quorum));

    assert!(lock.verify_detailed(&store).is_ok());
}

#[test]
fn chain_lock_falls_back_to_twice_the_offset() {
    let RegtestChain { diffs, quorum_keys } =
        regtest_chain(&[START_HEIGHT - 1, START_HEIGHT + 4, START_HEIGHT + 5]);
    let store = store(diffs);

    let mut lock = chain_lock(tip());
    let old_list = store.sml_by_height(tip() - 16).unwrap();
    assert_eq!(
        old_list.get_quorums_of_type(LLMQType::LlmqtypeTest)[0].quorum_entry.quorum_hash(),
        quorum_hash(START_HEIGHT - 1)
    );
    sign_chain_lock(&mut lock, &old_list, &quorum_keys);

    assert!(lock.verify(&store).unwrap());
}

#[test]
fn chain_lock_signed_by_an_unknown_quorum_fails_at_every_offset() {
    let RegtestChain { diffs, .. } = regtest_chain(&[START_HEIGHT]);
    let store = store(diffs);

    let mut lock = chain_lock(tip());
    lock.signature = sign(&secret_key(), b"anything");
    assert_matches!(
        lock.verify_detailed(&store),
        Err(MessageVerificationError::ThresholdSignatureNotValid(..))
    );
    assert!(!lock.verify(&store).unwrap());
}

#[test]
fn chain_lock_too_old_for_the_store_is_an_error() {
    let RegtestChain { diffs, quorum_keys } = regtest_chain(&[START_HEIGHT]);
    let store = store(diffs);

    let mut lock = chain_lock(START_HEIGHT + 5);
    let list = store.sml_by_height(START_HEIGHT + 5).unwrap();
    sign_chain_lock(&mut lock, &list, &quorum_keys);

    assert_matches!(
        lock.verify(&store),
        Err(SmlError::HeightOutOfRange { height: 197, base: 200, tip: 219 })
    );
}

fn instant_lock(inputs: Vec<OutPoint>) -> InstantLock {
    InstantLock {
        version: 0,
        inputs,
        txid: Txid::hash(b"locked transaction"),
        cyclehash: None,
        signature: BLSSignature::from([0; 96]),
    }
}

#[test]
fn instant_lock_signed_by_the_selected_quorum() {
    let RegtestChain { diffs, quorum_keys } = regtest_chain(&[START_HEIGHT]);
    let store = store(diffs);

    let mut lock = instant_lock(vec![OutPoint::new(Txid::hash(b"funding"), 1)]);
    let signing_list = store.sml_by_height(tip() - 8).unwrap();
    let quorum = lock.select_signatory_quorum(&signing_list).unwrap().clone();
    let key = &quorum_keys[&quorum.quorum_entry.quorum_hash()];
    lock.signature = sign(key, lock.sign_hash_for_quorum_entry(&quorum.quorum_entry).as_byte_array());

    assert!(lock.verify_signature_against_quorum(&quorum));
    assert!(lock.verify(&store).unwrap());
    assert!(store.verify_instant_lock(&lock).unwrap());

    let mut other_transaction = lock.clone();
    other_transaction.txid = Txid::hash(b"double spend");
    assert!(!other_transaction.verify(&store).unwrap());
}

#[test]
fn instant_lock_without_quorums_is_not_verified() {
    let RegtestChain { diffs, .. } = regtest_chain(&[]);
    let store = store(diffs);

    let lock = instant_lock(vec![OutPoint::new(Txid::hash(b"funding"), 0)]);
    assert_matches!(
        lock.verify_detailed(&store),
        Err(MessageVerificationError::MasternodeListHasNoQuorums(203, LLMQType::LlmqtypeTest))
    );
    assert!(!lock.verify(&store).unwrap());
}

/// Builds a store whose base list holds three operators and a quorum formed
/// at the base block, with valid commitment signatures.
fn store_with_signed_quorum() -> MasternodeListStore {
    let operators: Vec<BlsSecretKey> = (0..3).map(|_| secret_key()).collect();
    let mut chain = Chain::new(Network::Regtest, START_HEIGHT);
    let mut diffs = vec![chain.diff(
        operators
            .iter()
            .enumerate()
            .map(|(i, operator)| masternode(i as u8 + 1, public_key(operator)))
            .collect(),
        Vec::new(),
    )];
    let base_list = chain.list_at(START_HEIGHT).clone();

    let quorum_key = secret_key();
    let mut quorum = test_quorum(START_HEIGHT, public_key(&quorum_key));
    let message = quorum.calculate_commitment_hash().to_byte_array();
    quorum.threshold_sig = sign(&quorum_key, &message);
    let aggregate = base_list
        .quorum_members(&QuorumEntry::Full(quorum.clone()))
        .into_iter()
        .map(|member| {
            let operator = operators
                .iter()
                .find(|operator| public_key(operator) == member.masternode_list_entry.operator_public_key)
                .unwrap();
            match operator.sign(SignatureSchemes::Basic, &message) {
                Ok(Signature::Basic(point)) => point,
                _ => panic!("basic signing failed"),
            }
        })
        .reduce(|a, b| a + b)
        .unwrap();
    quorum.all_commitment_aggregated_signature =
        BLSSignature::from(G2Affine::from(aggregate).to_compressed());

    diffs.push(chain.diff(Vec::new(), vec![QuorumEntry::Full(quorum)]));
    diffs.extend(chain.empty_diffs(18));
    store(diffs)
}

#[test]
fn current_quorums_are_verified_against_their_block_list() {
    let mut store = store_with_signed_quorum();
    assert_eq!(store.current_sml().get_unverified_quorums().len(), 1);

    assert_eq!(store.verify_current_quorums().unwrap(), 1);
    let current = store.current_sml();
    assert_eq!(current.get_verified_quorums().len(), 1);
    assert!(current.get_unverified_quorums().is_empty());

    // verified entries are not checked again
    assert_eq!(store.verify_current_quorums().unwrap(), 1);
}

#[test]
fn quorums_formed_before_the_window_are_skipped() {
    let RegtestChain { diffs, .. } = regtest_chain(&[START_HEIGHT - 1]);
    let mut store = store(diffs);

    assert_eq!(store.verify_current_quorums().unwrap(), 0);
    let current = store.current_sml();
    let quorum = &current.get_quorums_of_type(LLMQType::LlmqtypeTest)[0];
    assert_eq!(
        quorum.verified,
        LLMQEntryVerificationStatus::Skipped(LLMQEntryVerificationSkipStatus::MissedList(
            quorum_hash(START_HEIGHT - 1)
        ))
    );
}

#[test]
fn quorums_with_bad_commitments_are_invalid() {
    let RegtestChain { diffs, .. } = regtest_chain(&[START_HEIGHT]);
    let mut store = store(diffs);

    assert_eq!(store.verify_current_quorums().unwrap(), 0);
    let current = store.current_sml();
    assert_matches!(
        current.get_quorums_of_type(LLMQType::LlmqtypeTest)[0].verified,
        LLMQEntryVerificationStatus::Invalid(_)
    );
}
