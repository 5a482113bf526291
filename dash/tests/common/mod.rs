//! A synthetic chain producing consistent `mnlistdiff` messages.

#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};

use dashcore_llmq::blockdata::transaction::special_transaction::TransactionPayload;
use dashcore_llmq::blockdata::transaction::special_transaction::coinbase::CoinbasePayload;
use dashcore_llmq::blockdata::transaction::{TxIn, TxOut};
use dashcore_llmq::hash_types::{
    ConfirmedHash, MerkleRootMasternodeList, MerkleRootQuorums, QuorumVVecHash,
};
use dashcore_llmq::hashes::Hash;
use dashcore_llmq::sml::address::ServiceAddress;
use dashcore_llmq::sml::masternode_list_entry::MasternodeListEntry;
use dashcore_llmq::sml::quorum_entry::FullQuorumEntry;
use dashcore_llmq::{
    BLSPublicKey, BLSSignature, BlockHash, LLMQType, MasternodeList, MnListDiff, Network,
    OutPoint, ProTxHash, QuorumEntry, QuorumHash, Transaction,
};

pub fn block_hash(height: u32) -> BlockHash {
    BlockHash::hash(&height.to_le_bytes())
}

pub fn quorum_hash(height: u32) -> QuorumHash {
    QuorumHash::from_byte_array(block_hash(height).to_byte_array())
}

pub fn coinbase_transaction(
    height: u32,
    merkle_root_masternode_list: MerkleRootMasternodeList,
    merkle_root_quorums: MerkleRootQuorums,
) -> Transaction {
    Transaction {
        version: 3,
        lock_time: 0,
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig: height.to_le_bytes().to_vec(),
            sequence: u32::MAX,
        }],
        output: vec![TxOut { value: 500_000_000, script_pubkey: vec![0x6a] }],
        special_transaction_payload: Some(TransactionPayload::CoinbasePayloadType(
            CoinbasePayload {
                version: 2,
                height,
                merkle_root_masternode_list,
                merkle_root_quorums,
                best_cl_height: None,
                best_cl_signature: None,
                asset_locked_amount: None,
            },
        )),
    }
}

pub fn masternode(seed: u8, operator_public_key: BLSPublicKey) -> MasternodeListEntry {
    MasternodeListEntry {
        pro_reg_tx_hash: ProTxHash::hash(&[seed, 1]),
        confirmed_hash: Some(ConfirmedHash::hash(&[seed, 2])),
        service_address: ServiceAddress {
            ip: IpAddr::V4(Ipv4Addr::new(10, 0, 0, seed)),
            port: 19899,
        },
        operator_public_key,
        key_id_voting: [seed; 20],
        is_valid: true,
    }
}

/// A fully signed regtest quorum formed at `quorum_height`, with
/// placeholder commitment signatures.
pub fn test_quorum(quorum_height: u32, quorum_public_key: BLSPublicKey) -> FullQuorumEntry {
    FullQuorumEntry {
        version: 1,
        llmq_type: LLMQType::LlmqtypeTest,
        quorum_hash: quorum_hash(quorum_height),
        quorum_index: None,
        signers_count: 3,
        signers: vec![0b111],
        valid_members_count: 3,
        valid_members: vec![0b111],
        quorum_public_key,
        quorum_vvec_hash: QuorumVVecHash::hash(&quorum_height.to_le_bytes()),
        threshold_sig: BLSSignature::from([0; 96]),
        all_commitment_aggregated_signature: BLSSignature::from([0; 96]),
    }
}

/// Produces one diff per block, each declaring the merkle roots of the list
/// it leads to.
#[derive(Clone, Debug)]
pub struct Chain {
    pub network: Network,
    pub start_height: u32,
    lists: Vec<MasternodeList>,
}

impl Chain {
    pub fn new(network: Network, start_height: u32) -> Self {
        Chain { network, start_height, lists: Vec::new() }
    }

    fn next_height(&self) -> u32 {
        self.start_height + self.lists.len() as u32
    }

    pub fn tip_height(&self) -> u32 {
        self.next_height() - 1
    }

    /// The list after the diff for `height` was applied.
    pub fn list_at(&self, height: u32) -> &MasternodeList {
        &self.lists[(height - self.start_height) as usize]
    }

    pub fn diff(
        &mut self,
        new_masternodes: Vec<MasternodeListEntry>,
        new_quorums: Vec<QuorumEntry>,
    ) -> MnListDiff {
        let height = self.next_height();
        let previous =
            self.lists.last().cloned().unwrap_or_else(|| MasternodeList::empty(self.network));

        let mut expected = previous.clone();
        for entry in &new_masternodes {
            expected.masternodes.insert(entry.pro_reg_tx_hash, entry.clone().into());
        }
        for quorum in &new_quorums {
            let llmq_type = quorum.llmq_type();
            let quorums = expected.quorums.entry(llmq_type).or_default();
            if quorums.len() >= llmq_type.active_quorum_count() as usize {
                quorums.remove(0);
            }
            quorums.push(quorum.clone().into());
        }

        let base_block_hash =
            if self.lists.is_empty() { BlockHash::all_zeros() } else { block_hash(height - 1) };
        let diff = MnListDiff {
            base_block_hash,
            block_hash: block_hash(height),
            total_transactions: 1,
            merkle_hashes: Vec::new(),
            merkle_flags: vec![0x01],
            coinbase_tx: coinbase_transaction(
                height,
                expected.calculate_masternodes_merkle_root(),
                expected.calculate_llmq_merkle_root(),
            ),
            deleted_masternodes: Vec::new(),
            new_masternodes,
            deleted_quorums: Vec::new(),
            new_quorums,
        };
        let list = previous.apply_diff(&diff).expect("synthetic diff must apply");
        self.lists.push(list);
        diff
    }

    pub fn empty_diffs(&mut self, count: usize) -> Vec<MnListDiff> {
        (0..count).map(|_| self.diff(Vec::new(), Vec::new())).collect()
    }
}
