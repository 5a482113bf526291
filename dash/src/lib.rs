//! # Dash LLMQ verification
//!
//! Client side verification of Dash long living masternode quorums.
//!
//! The crate follows the deterministic masternode list from `mnlistdiff`
//! messages, validates quorum commitments against it and verifies the
//! threshold signatures of chain locks and instant send locks produced by
//! those quorums.
//!
//! BLS verification is behind the `bls` feature, which is enabled by
//! default. Without it the data structures and their encodings are still
//! available.

// Experimental features we need.
#![cfg_attr(docsrs, feature(doc_cfg))]
// Coding conventions
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

pub extern crate hashes;

mod internal_macros;

pub mod blockdata;
pub mod bls_sig_utils;
pub mod consensus;
pub mod crypto;
pub mod ephemerealdata;
pub mod hash_types;
pub mod logging;
pub mod network;
pub mod sml;

pub use crate::blockdata::transaction::Transaction;
pub use crate::blockdata::transaction::outpoint::OutPoint;
pub use crate::bls_sig_utils::{BLSPublicKey, BLSSignature};
pub use crate::consensus::encode::VarInt;
pub use crate::ephemerealdata::chain_lock::ChainLock;
pub use crate::ephemerealdata::instant_lock::InstantLock;
pub use crate::hash_types::{
    BlockHash, ChainLockHash, CycleHash, InstantLockHash, ProTxHash, QuorumHash,
    QuorumSigningRequestId, QuorumSigningSignId, Txid,
};
pub use crate::logging::{LoggingConfig, init_console_logging, init_logging};
pub use crate::network::constants::Network;
pub use crate::network::message_sml::{GetMnListDiff, MnListDiff};
pub use crate::sml::error::SmlError;
pub use crate::sml::llmq_type::LLMQType;
pub use crate::sml::masternode_list::MasternodeList;
pub use crate::sml::masternode_list_store::{MasternodeListStore, MasternodeListStoreConfig};
pub use crate::sml::quorum_entry::QuorumEntry;
pub use tracing::level_filters::LevelFilter;
