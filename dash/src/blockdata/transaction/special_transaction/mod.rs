// Rust Dash Library
// Written for Dash in 2022 by
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

//! Dash Special Transactions.
//!
//! Special transactions are defined in DIP2. They carry a transaction type and an
//! extra payload after the lock time. Only the coinbase payload is interpreted
//! here; every other payload is kept as raw bytes so it re-encodes unchanged.

pub mod coinbase;

use std::fmt;

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::blockdata::transaction::special_transaction::coinbase::CoinbasePayload;
use crate::consensus::encode;

/// The type of a Dash transaction, as found in the high 16 bits of its version field.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
#[repr(u16)]
pub enum TransactionType {
    Classic = 0,
    ProviderRegistration = 1,
    ProviderUpdateService = 2,
    ProviderUpdateRegistrar = 3,
    ProviderUpdateRevocation = 4,
    Coinbase = 5,
    QuorumCommitment = 6,
    MnhfSignal = 7,
    AssetLock = 8,
    AssetUnlock = 9,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TransactionType::Classic => write!(f, "Classic"),
            TransactionType::ProviderRegistration => write!(f, "Provider Registration"),
            TransactionType::ProviderUpdateService => write!(f, "Provider Update Service"),
            TransactionType::ProviderUpdateRegistrar => write!(f, "Provider Update Registrar"),
            TransactionType::ProviderUpdateRevocation => write!(f, "Provider Update Revocation"),
            TransactionType::Coinbase => write!(f, "Coinbase"),
            TransactionType::QuorumCommitment => write!(f, "Quorum Commitment"),
            TransactionType::MnhfSignal => write!(f, "Masternode Hard Fork Signal"),
            TransactionType::AssetLock => write!(f, "Asset Lock"),
            TransactionType::AssetUnlock => write!(f, "Asset Unlock"),
        }
    }
}

impl TryFrom<u16> for TransactionType {
    type Error = encode::Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => TransactionType::Classic,
            1 => TransactionType::ProviderRegistration,
            2 => TransactionType::ProviderUpdateService,
            3 => TransactionType::ProviderUpdateRegistrar,
            4 => TransactionType::ProviderUpdateRevocation,
            5 => TransactionType::Coinbase,
            6 => TransactionType::QuorumCommitment,
            7 => TransactionType::MnhfSignal,
            8 => TransactionType::AssetLock,
            9 => TransactionType::AssetUnlock,
            _ => return Err(encode::Error::ParseFailed("unknown special transaction type")),
        })
    }
}

/// The extra payload of a special transaction.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub enum TransactionPayload {
    /// A decoded coinbase payload.
    CoinbasePayloadType(CoinbasePayload),
    /// Any other payload, kept verbatim.
    Raw {
        tx_type: TransactionType,
        payload: Vec<u8>,
    },
}

impl TransactionPayload {
    /// The transaction type this payload belongs to.
    pub fn get_type(&self) -> TransactionType {
        match self {
            TransactionPayload::CoinbasePayloadType(_) => TransactionType::Coinbase,
            TransactionPayload::Raw { tx_type, .. } => *tx_type,
        }
    }

    /// Decodes the payload bytes of a transaction of the given type.
    pub fn from_bytes(tx_type: TransactionType, payload: Vec<u8>) -> Result<Self, encode::Error> {
        match tx_type {
            TransactionType::Coinbase => {
                Ok(TransactionPayload::CoinbasePayloadType(encode::deserialize(&payload)?))
            }
            tx_type => Ok(TransactionPayload::Raw { tx_type, payload }),
        }
    }

    /// The payload bytes, without their length prefix.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            TransactionPayload::CoinbasePayloadType(payload) => encode::serialize(payload),
            TransactionPayload::Raw { payload, .. } => payload.clone(),
        }
    }
}
