//! Simplified masternode lists.
//!
//! Masternode lists are rebuilt from `mnlistdiff` messages, checked against
//! the merkle roots committed to by each block's coinbase, and kept in a
//! [`masternode_list_store::MasternodeListStore`] from which quorums are
//! looked up to verify chain locks and instant send locks.

pub mod address;
pub mod error;
pub mod llmq_entry_verification;
pub mod llmq_type;
pub mod masternode_list;
pub mod masternode_list_entry;
pub mod masternode_list_store;
pub mod message_verification_error;
pub mod quorum_entry;
pub mod quorum_validation_error;
