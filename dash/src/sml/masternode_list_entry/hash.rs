use hashes::Hash;

use crate::consensus::encode;
use crate::hash_types::MnListEntryHash;
use crate::sml::masternode_list_entry::MasternodeListEntry;

impl MasternodeListEntry {
    /// Double SHA256 of the entry's wire encoding, the leaf of the masternode merkle tree.
    pub fn calculate_entry_hash(&self) -> MnListEntryHash {
        MnListEntryHash::hash(&encode::serialize(self))
    }
}
