use crate::network::constants::Network;
use crate::sml::llmq_type::LLMQType;

/// Extension trait for Network to add LLMQ-specific methods
pub trait NetworkLLMQExt {
    /// The quorum type signing instant send locks.
    fn is_llmq_type(&self) -> LLMQType;
    /// The quorum type signing chain locks.
    fn chain_locks_type(&self) -> LLMQType;
    /// The quorum types a masternode list on this network tracks.
    fn enabled_llmq_types(&self) -> &'static [LLMQType];
}

impl NetworkLLMQExt for Network {
    fn is_llmq_type(&self) -> LLMQType {
        match self {
            Network::Dash => LLMQType::Llmqtype50_60,
            Network::Testnet => LLMQType::Llmqtype50_60,
            Network::Devnet => LLMQType::LlmqtypeDevnet,
            Network::Regtest => LLMQType::LlmqtypeTest,
        }
    }

    fn chain_locks_type(&self) -> LLMQType {
        match self {
            Network::Dash => LLMQType::Llmqtype400_60,
            Network::Testnet => LLMQType::Llmqtype50_60,
            Network::Devnet => LLMQType::LlmqtypeDevnet,
            Network::Regtest => LLMQType::LlmqtypeTest,
        }
    }

    fn enabled_llmq_types(&self) -> &'static [LLMQType] {
        match self {
            Network::Dash | Network::Testnet => {
                &[LLMQType::Llmqtype50_60, LLMQType::Llmqtype400_60, LLMQType::Llmqtype400_85]
            }
            Network::Devnet => &[
                LLMQType::LlmqtypeDevnet,
                LLMQType::Llmqtype50_60,
                LLMQType::Llmqtype400_60,
                LLMQType::Llmqtype400_85,
            ],
            Network::Regtest => &[LLMQType::LlmqtypeTest, LLMQType::Llmqtype50_60],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signing_types_are_enabled() {
        for network in [Network::Dash, Network::Testnet, Network::Devnet, Network::Regtest] {
            assert!(network.enabled_llmq_types().contains(&network.chain_locks_type()));
            assert!(network.enabled_llmq_types().contains(&network.is_llmq_type()));
        }
    }
}
