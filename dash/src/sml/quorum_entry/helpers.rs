use crate::sml::quorum_entry::FullQuorumEntry;

/// Expands a bitset into one flag per member, least significant bit of the
/// first byte first.
pub fn bitset_to_bits(bitset: &[u8], size: usize) -> Vec<bool> {
    (0..size).map(|i| bitset.get(i / 8).is_some_and(|byte| (byte >> (i % 8)) & 1 == 1)).collect()
}

impl FullQuorumEntry {
    pub fn signers_bits(&self) -> Vec<bool> {
        bitset_to_bits(&self.signers, self.llmq_type.size() as usize)
    }

    pub fn valid_members_bits(&self) -> Vec<bool> {
        bitset_to_bits(&self.valid_members, self.llmq_type.size() as usize)
    }

    pub fn signers_count_from_bits(&self) -> usize {
        self.signers_bits().into_iter().filter(|bit| *bit).count()
    }
}
