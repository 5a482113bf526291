// Rust Dash Library
// Originally written in 2014 by
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

//! Dash network constants.
//!
//! The networks a masternode list can belong to, and the protocol
//! constants lock verification relies on.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};
use thiserror::Error;

/// How many blocks before a lock's height its signing quorum was selected.
pub const LLMQ_SIGN_HEIGHT_OFFSET: u32 = 8;

/// Request id prefix of chain locks.
pub const CLSIG_REQUESTID_PREFIX: &str = "clsig";

/// Request id prefix of instant send locks.
pub const ISLOCK_REQUESTID_PREFIX: &str = "islock";

/// The cryptocurrency network to act on.
#[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde", rename_all = "lowercase"))]
#[non_exhaustive]
pub enum Network {
    /// Classic Dash Core Payment Chain
    #[default]
    Dash,
    /// Dash's testnet network.
    Testnet,
    /// Dash's devnet network.
    Devnet,
    /// Dash's regtest network.
    Regtest,
}

impl Network {
    /// Creates a `Network` from the magic bytes.
    pub fn from_magic(magic: u32) -> Option<Network> {
        match magic {
            0xBD6B0CBF => Some(Network::Dash),
            0xFFCAE2CE => Some(Network::Testnet),
            0xCEFFCAE2 => Some(Network::Devnet),
            0xDAB5BFFA => Some(Network::Regtest),
            _ => None,
        }
    }

    /// Returns the magic bytes of the network.
    pub fn magic(self) -> u32 {
        match self {
            Network::Dash => 0xBD6B0CBF,
            Network::Testnet => 0xFFCAE2CE,
            Network::Devnet => 0xCEFFCAE2,
            Network::Regtest => 0xDAB5BFFA,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Network::Dash => "dash",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Regtest => "regtest",
        })
    }
}

/// An error in parsing a network string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown network: {0}")]
pub struct ParseNetworkError(pub String);

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dash" | "mainnet" | "livenet" => Ok(Network::Dash),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            "regtest" => Ok(Network::Regtest),
            _ => Err(ParseNetworkError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_round_trip() {
        for network in [Network::Dash, Network::Testnet, Network::Devnet, Network::Regtest] {
            assert_eq!(Network::from_magic(network.magic()), Some(network));
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
        assert_eq!(Network::from_magic(0xFFFFFFFF), None);
    }

    #[test]
    fn livenet_alias() {
        assert_eq!("livenet".parse::<Network>().unwrap(), Network::Dash);
        assert!("bitcoin".parse::<Network>().is_err());
    }
}
