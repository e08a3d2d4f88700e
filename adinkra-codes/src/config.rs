//! Limits for the brute-force code engine
//!
//! Minimum distance and codeword enumeration walk all 2^k messages, so the
//! message length accepted by [`LinearCode`](crate::LinearCode) is capped.

use serde::{Deserialize, Serialize};

/// Default cap on k. 2^16 codewords keep the pairwise distance search in
/// the low billions of word operations.
pub const DEFAULT_MAX_MESSAGE_BITS: usize = 16;

/// Hard ceiling on k regardless of configuration. Above it the 2^k codeword
/// table no longer fits in memory.
pub const MAX_ENUMERABLE_BITS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest message length k a code may be constructed with
    pub max_message_bits: usize,
}

impl EngineConfig {
    pub fn with_max_message_bits(max_message_bits: usize) -> Self {
        Self { max_message_bits }
    }

    /// Configured limit, capped at [`MAX_ENUMERABLE_BITS`]
    pub fn message_limit(&self) -> usize {
        self.max_message_bits.min(MAX_ENUMERABLE_BITS)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_message_bits: DEFAULT_MAX_MESSAGE_BITS,
        }
    }
}
