//! Timing constants for the cycle-cost model.
//!
//! Memory is modeled as a flat store that moves one 4-byte word per
//! `MEMORY_LATENCY` cycles; the cache itself answers in `CACHE_HIT_LATENCY`.

/// Cycles for a single cache read or write.
pub const CACHE_HIT_LATENCY: u64 = 1;

/// Cycles for one word transfer to or from main memory.
pub const MEMORY_LATENCY: u64 = 100;

/// Bytes moved per `MEMORY_LATENCY` transfer.
pub const WORD_BYTES: u64 = 4;

/// Smallest legal block size; every access is at most one word.
pub const MIN_BLOCK_SIZE: u64 = WORD_BYTES;
