pub mod hash;
pub mod qualified_masternode_list_entry;
pub mod score;

use std::io;

use hashes::Hash;

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::bls_sig_utils::BLSPublicKey;
use crate::consensus::{Decodable, Encodable, encode};
use crate::hash_types::{ConfirmedHash, ProTxHash};
use crate::sml::address::ServiceAddress;

/// A masternode as it appears in a simplified masternode list.
///
/// A masternode that is registered but not yet confirmed carries a null
/// confirmed hash on the wire, which is represented as `None` here.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct MasternodeListEntry {
    pub pro_reg_tx_hash: ProTxHash,
    pub confirmed_hash: Option<ConfirmedHash>,
    pub service_address: ServiceAddress,
    pub operator_public_key: BLSPublicKey,
    pub key_id_voting: [u8; 20],
    pub is_valid: bool,
}

impl Encodable for MasternodeListEntry {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.pro_reg_tx_hash.consensus_encode(w)?;
        len += self.confirmed_hash.unwrap_or_else(ConfirmedHash::all_zeros).consensus_encode(w)?;
        len += self.service_address.consensus_encode(w)?;
        len += self.operator_public_key.consensus_encode(w)?;
        len += self.key_id_voting.consensus_encode(w)?;
        len += self.is_valid.consensus_encode(w)?;
        Ok(len)
    }
}

impl Decodable for MasternodeListEntry {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let pro_reg_tx_hash = ProTxHash::consensus_decode(r)?;
        let confirmed_hash = ConfirmedHash::consensus_decode(r)?;
        Ok(MasternodeListEntry {
            pro_reg_tx_hash,
            confirmed_hash: (confirmed_hash != ConfirmedHash::all_zeros()).then_some(confirmed_hash),
            service_address: ServiceAddress::consensus_decode(r)?,
            operator_public_key: BLSPublicKey::consensus_decode(r)?,
            key_id_voting: <[u8; 20]>::consensus_decode(r)?,
            is_valid: bool::consensus_decode(r)?,
        })
    }
}
