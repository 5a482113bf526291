// Rust Dash Library
// Written in 2014 by
//     Andrew Poelstra <apoelstra@wpsoftware.net>
//     For Dash
// Updated for Dash in 2022 by
//     The Dash Core Developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! Dash transactions.
//!
//! A trimmed down transaction model: enough to decode the coinbase
//! transaction carried by a masternode list diff, recompute its txid and read
//! the masternode and quorum merkle roots it commits to. Scripts are kept as
//! opaque bytes.

pub mod outpoint;
pub mod special_transaction;

use std::io;

use hashes::Hash;

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::blockdata::transaction::outpoint::OutPoint;
use crate::blockdata::transaction::special_transaction::coinbase::CoinbasePayload;
use crate::blockdata::transaction::special_transaction::{TransactionPayload, TransactionType};
use crate::consensus::encode::{self, read_var_bytes, write_var_bytes};
use crate::consensus::{Decodable, Encodable};
use crate::hash_types::Txid;
use crate::internal_macros::impl_consensus_encoding;

/// A transaction input, which defines old coins to be consumed
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct TxIn {
    /// The reference to the previous output that is being used an an input.
    pub previous_output: OutPoint,
    /// The script which pushes values on the stack which will cause
    /// the referenced output's script to be accepted.
    pub script_sig: Vec<u8>,
    /// The sequence number, which suggests to miners which of two
    /// conflicting transactions should be preferred, or 0xFFFFFFFF
    /// to ignore this feature.
    pub sequence: u32,
}

impl_consensus_encoding!(TxIn, previous_output, script_sig, sequence);

/// A transaction output, which defines new coins to be created from old ones.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct TxOut {
    /// The value of the output, in duffs.
    pub value: u64,
    /// The script which must be satisfied for the output to be spent.
    pub script_pubkey: Vec<u8>,
}

impl_consensus_encoding!(TxOut, value, script_pubkey);

/// A Dash transaction.
///
/// Dash transactions use a format with a 2-byte version followed by a 2-byte
/// transaction type. Standard transactions have type 0, while special transactions
/// (masternode registration, quorum commitments, coinbase, etc.) have non-zero types
/// and include an additional payload.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct Transaction {
    /// The protocol version. Special transactions require version 3.
    pub version: u16,
    /// Block number before which this transaction is valid, or 0 for valid immediately.
    pub lock_time: u32,
    /// List of transaction inputs.
    pub input: Vec<TxIn>,
    /// List of transaction outputs.
    pub output: Vec<TxOut>,
    /// Special Transaction Payload
    pub special_transaction_payload: Option<TransactionPayload>,
}

impl Transaction {
    /// Get the transaction type. If a classical transaction this would be 0.
    /// Otherwise it is gotten by association from the payload type.
    pub fn tx_type(&self) -> TransactionType {
        self.special_transaction_payload
            .as_ref()
            .map_or(TransactionType::Classic, TransactionPayload::get_type)
    }

    /// Computes the transaction ID (txid) by double-SHA256 hashing the serialized transaction.
    pub fn txid(&self) -> Txid {
        Txid::hash(&encode::serialize(self))
    }

    /// Is this a coin base transaction?
    pub fn is_coin_base(&self) -> bool {
        self.input.len() == 1 && self.input[0].previous_output.is_null()
    }

    /// The coinbase payload, if this is a coinbase special transaction.
    pub fn coinbase_payload(&self) -> Option<&CoinbasePayload> {
        match &self.special_transaction_payload {
            Some(TransactionPayload::CoinbasePayloadType(payload)) => Some(payload),
            _ => None,
        }
    }
}

impl Encodable for Transaction {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += (self.tx_type() as u16).consensus_encode(w)?;
        len += self.input.consensus_encode(w)?;
        len += self.output.consensus_encode(w)?;
        len += self.lock_time.consensus_encode(w)?;
        if let Some(payload) = &self.special_transaction_payload {
            len += write_var_bytes(w, &payload.to_bytes())?;
        }
        Ok(len)
    }
}

impl Decodable for Transaction {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let tx_type = TransactionType::try_from(u16::consensus_decode(r)?)?;
        if version < 3 && tx_type != TransactionType::Classic {
            return Err(encode::Error::ParseFailed("special transactions require version 3"));
        }
        let input = Vec::<TxIn>::consensus_decode(r)?;
        let output = Vec::<TxOut>::consensus_decode(r)?;
        let lock_time = u32::consensus_decode(r)?;
        let special_transaction_payload = match tx_type {
            TransactionType::Classic => None,
            tx_type => Some(TransactionPayload::from_bytes(tx_type, read_var_bytes(r)?)?),
        };

        Ok(Transaction {
            version,
            input,
            output,
            lock_time,
            special_transaction_payload,
        })
    }
}
