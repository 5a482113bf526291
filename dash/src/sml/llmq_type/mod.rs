pub mod network;

use std::fmt::{Display, Formatter};
use std::io;

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::consensus::{Decodable, Encodable, encode};

#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Hash, Ord)]
pub struct LLMQParams {
    pub quorum_type: LLMQType,
    pub name: &'static str,
    pub size: u32,
    pub min_size: u32,
    pub threshold: u32,
    /// How many quorums of this type are kept active at once.
    pub signing_active_quorum_count: u32,
}

pub const LLMQ_50_60: LLMQParams = LLMQParams {
    quorum_type: LLMQType::Llmqtype50_60,
    name: "llmq_50_60",
    size: 50,
    min_size: 40,
    threshold: 30,
    signing_active_quorum_count: 24,
};
pub const LLMQ_400_60: LLMQParams = LLMQParams {
    quorum_type: LLMQType::Llmqtype400_60,
    name: "llmq_400_60",
    size: 400,
    min_size: 300,
    threshold: 240,
    signing_active_quorum_count: 4,
};
pub const LLMQ_400_85: LLMQParams = LLMQParams {
    quorum_type: LLMQType::Llmqtype400_85,
    name: "llmq_400_85",
    size: 400,
    min_size: 350,
    threshold: 340,
    signing_active_quorum_count: 4,
};
pub const LLMQ_100_67: LLMQParams = LLMQParams {
    quorum_type: LLMQType::Llmqtype100_67,
    name: "llmq_100_67",
    size: 100,
    min_size: 80,
    threshold: 67,
    signing_active_quorum_count: 24,
};
pub const LLMQ_60_75: LLMQParams = LLMQParams {
    quorum_type: LLMQType::Llmqtype60_75,
    name: "llmq_60_75",
    size: 60,
    min_size: 50,
    threshold: 45,
    signing_active_quorum_count: 32,
};
pub const LLMQ_25_67: LLMQParams = LLMQParams {
    quorum_type: LLMQType::Llmqtype25_67,
    name: "llmq_25_67",
    size: 25,
    min_size: 22,
    threshold: 17,
    signing_active_quorum_count: 24,
};
pub const LLMQ_TEST: LLMQParams = LLMQParams {
    quorum_type: LLMQType::LlmqtypeTest,
    name: "llmq_test",
    size: 3,
    min_size: 2,
    threshold: 2,
    signing_active_quorum_count: 2,
};
pub const LLMQ_DEVNET: LLMQParams = LLMQParams {
    quorum_type: LLMQType::LlmqtypeDevnet,
    name: "llmq_devnet",
    size: 10,
    min_size: 7,
    threshold: 6,
    signing_active_quorum_count: 3,
};
pub const LLMQ_V017: LLMQParams = LLMQParams {
    quorum_type: LLMQType::LlmqtypeTestV17,
    name: "llmq_test_v17",
    size: 3,
    min_size: 2,
    threshold: 2,
    signing_active_quorum_count: 2,
};
pub const LLMQ_TEST_DIP00024: LLMQParams = LLMQParams {
    quorum_type: LLMQType::LlmqtypeTestDIP0024,
    name: "llmq_test_dip0024",
    size: 4,
    min_size: 3,
    threshold: 2,
    signing_active_quorum_count: 2,
};
pub const LLMQ_TEST_INSTANT_SEND: LLMQParams = LLMQParams {
    quorum_type: LLMQType::LlmqtypeTestInstantSend,
    name: "llmq_test_instantsend",
    size: 3,
    min_size: 2,
    threshold: 2,
    signing_active_quorum_count: 2,
};
pub const LLMQ_0024: LLMQParams = LLMQParams {
    quorum_type: LLMQType::LlmqtypeDevnetDIP0024,
    name: "llmq_devnet_dip0024",
    size: 8,
    min_size: 6,
    threshold: 4,
    signing_active_quorum_count: 2,
};
pub const LLMQ_TEST_PLATFORM: LLMQParams = LLMQParams {
    quorum_type: LLMQType::LlmqtypeTestnetPlatform,
    name: "llmq_test_platform",
    size: 3,
    min_size: 2,
    threshold: 2,
    signing_active_quorum_count: 2,
};
pub const LLMQ_DEV_PLATFORM: LLMQParams = LLMQParams {
    quorum_type: LLMQType::LlmqtypeDevnetPlatform,
    name: "llmq_dev_platform",
    size: 12,
    min_size: 9,
    threshold: 8,
    signing_active_quorum_count: 4,
};

/// A long living masternode quorum type.
///
/// Each type fixes the member count, signing threshold and the number of
/// quorums of that type that are active at once.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Hash, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
#[repr(u8)]
pub enum LLMQType {
    Llmqtype50_60 = 1,  // 50 members,  30  (60%) threshold, 24 / day
    Llmqtype400_60 = 2, // 400 members, 240 (60%) threshold, 2  / day
    Llmqtype400_85 = 3, // 400 members, 340 (85%) threshold, 1  / day
    Llmqtype100_67 = 4, // 100 members, 67  (67%) threshold, 24 / day
    Llmqtype60_75 = 5,  // 60 members,  45  (75%) threshold, 2  / day
    Llmqtype25_67 = 6,  // 25 members,  17  (67%) threshold, 24 / day

    // dev-only
    LlmqtypeTest = 100,            // 3 members, 2 (66%) threshold, one per hour
    LlmqtypeDevnet = 101,          // 10 members, 6 (60%) threshold, one per hour
    LlmqtypeTestV17 = 102,         // 3 members, 2 (66%) threshold, one per hour
    LlmqtypeTestDIP0024 = 103,     // 4 members, 2 (66%) threshold, one per hour
    LlmqtypeTestInstantSend = 104, // 3 members, 2 (66%) threshold, one per hour
    LlmqtypeDevnetDIP0024 = 105,   // 8 members, 4 (50%) threshold, one per hour
    LlmqtypeTestnetPlatform = 106, // 3 members, 2 (66%) threshold
    LlmqtypeDevnetPlatform = 107,  // 12 members, 8 (67%) threshold
}

impl Display for LLMQType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LLMQType::Llmqtype50_60 => "1_50/60",
            LLMQType::Llmqtype400_60 => "2_400/60",
            LLMQType::Llmqtype400_85 => "3_400/85",
            LLMQType::Llmqtype100_67 => "4_100/67",
            LLMQType::Llmqtype60_75 => "5_60/75",
            LLMQType::Llmqtype25_67 => "6_25/67",
            LLMQType::LlmqtypeTest => "100_Test",
            LLMQType::LlmqtypeDevnet => "101_Dev",
            LLMQType::LlmqtypeTestV17 => "102_Test-v17",
            LLMQType::LlmqtypeTestDIP0024 => "103_Test-dip-24",
            LLMQType::LlmqtypeTestInstantSend => "104_Test-IS",
            LLMQType::LlmqtypeDevnetDIP0024 => "105_Dev-dip-24",
            LLMQType::LlmqtypeTestnetPlatform => "106_Test-Platform",
            LLMQType::LlmqtypeDevnetPlatform => "107_Dev-Platform",
        })
    }
}

impl LLMQType {
    pub fn params(&self) -> LLMQParams {
        match self {
            LLMQType::Llmqtype50_60 => LLMQ_50_60,
            LLMQType::Llmqtype400_60 => LLMQ_400_60,
            LLMQType::Llmqtype400_85 => LLMQ_400_85,
            LLMQType::Llmqtype100_67 => LLMQ_100_67,
            LLMQType::Llmqtype60_75 => LLMQ_60_75,
            LLMQType::Llmqtype25_67 => LLMQ_25_67,
            LLMQType::LlmqtypeTest => LLMQ_TEST,
            LLMQType::LlmqtypeDevnet => LLMQ_DEVNET,
            LLMQType::LlmqtypeTestV17 => LLMQ_V017,
            LLMQType::LlmqtypeTestDIP0024 => LLMQ_TEST_DIP00024,
            LLMQType::LlmqtypeTestInstantSend => LLMQ_TEST_INSTANT_SEND,
            LLMQType::LlmqtypeDevnetDIP0024 => LLMQ_0024,
            LLMQType::LlmqtypeTestnetPlatform => LLMQ_TEST_PLATFORM,
            LLMQType::LlmqtypeDevnetPlatform => LLMQ_DEV_PLATFORM,
        }
    }

    pub fn size(&self) -> u32 {
        self.params().size
    }

    pub fn threshold(&self) -> u32 {
        self.params().threshold
    }

    pub fn active_quorum_count(&self) -> u32 {
        self.params().signing_active_quorum_count
    }

    /// Number of bytes a member bitset of this type occupies on the wire.
    pub fn bitset_len(&self) -> usize {
        (self.size() as usize).div_ceil(8).max(1)
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for LLMQType {
    type Error = encode::Error;

    fn try_from(orig: u8) -> Result<Self, Self::Error> {
        Ok(match orig {
            1 => LLMQType::Llmqtype50_60,
            2 => LLMQType::Llmqtype400_60,
            3 => LLMQType::Llmqtype400_85,
            4 => LLMQType::Llmqtype100_67,
            5 => LLMQType::Llmqtype60_75,
            6 => LLMQType::Llmqtype25_67,
            100 => LLMQType::LlmqtypeTest,
            101 => LLMQType::LlmqtypeDevnet,
            102 => LLMQType::LlmqtypeTestV17,
            103 => LLMQType::LlmqtypeTestDIP0024,
            104 => LLMQType::LlmqtypeTestInstantSend,
            105 => LLMQType::LlmqtypeDevnetDIP0024,
            106 => LLMQType::LlmqtypeTestnetPlatform,
            107 => LLMQType::LlmqtypeDevnetPlatform,
            unknown => return Err(encode::Error::UnknownQuorumType(unknown)),
        })
    }
}

impl From<LLMQType> for u8 {
    fn from(value: LLMQType) -> Self {
        value.index()
    }
}

impl Encodable for LLMQType {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        self.index().consensus_encode(w)
    }
}

impl Decodable for LLMQType {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<LLMQType, encode::Error> {
        LLMQType::try_from(u8::consensus_decode(r)?)
    }
}
