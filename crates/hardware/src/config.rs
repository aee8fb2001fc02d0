//! Configuration for the cache simulator.
//!
//! This module defines the validated, immutable simulation parameters. It provides:
//! 1. **Defaults:** A baseline geometry used when a JSON config omits a field.
//! 2. **Policies:** Write-allocation, write, and eviction policy enums.
//! 3. **Validation:** [`Config::new`] is the only way to obtain a `Config`, so every
//!    instance satisfies the geometry and policy-pairing invariants.
//!
//! Configuration is supplied either positionally from the CLI (policy names parse via
//! [`FromStr`]) or as JSON, which goes through the same validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::common::constants::{MEMORY_LATENCY, MIN_BLOCK_SIZE, WORD_BYTES};
use crate::common::error::{ConfigError, ParsePolicyError};

/// Default configuration constants.
///
/// Used when a field is missing from a deserialized configuration and by
/// [`Config::default`].
mod defaults {
    /// Default number of sets.
    pub const NUM_SETS: u64 = 256;

    /// Default associativity (lines per set).
    pub const BLOCKS_PER_SET: u64 = 4;

    /// Default block size in bytes.
    pub const BLOCK_SIZE: u64 = 16;
}

/// What a store miss does with the missing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WriteAllocate {
    /// Fetch the block into the cache, then write it.
    #[default]
    #[serde(rename = "write-allocate", alias = "Allocate")]
    Allocate,
    /// Write straight to memory, leaving the cache untouched.
    #[serde(rename = "no-write-allocate", alias = "NoAllocate")]
    NoAllocate,
}

/// When stored data reaches main memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Every store also writes memory immediately.
    #[serde(alias = "WriteThrough")]
    WriteThrough,
    /// Stores only mark the line dirty; memory is updated on eviction.
    #[default]
    #[serde(alias = "WriteBack")]
    WriteBack,
}

/// Victim selection discipline for a full set.
///
/// Both policies evict the line with the smallest recency stamp. They differ only
/// in whether a hit refreshes that stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Least Recently Used.
    ///
    /// Hits refresh the stamp, so the victim is the line touched longest ago.
    #[default]
    #[serde(alias = "Lru", alias = "LRU")]
    Lru,
    /// First In First Out.
    ///
    /// Stamps are only written on install, so the victim is the oldest resident.
    #[serde(alias = "Fifo", alias = "FIFO")]
    Fifo,
}

impl EvictionPolicy {
    /// Returns `true` if a hit should refresh the line's recency stamp.
    #[inline(always)]
    pub const fn refreshes_on_hit(self) -> bool {
        matches!(self, Self::Lru)
    }
}

impl FromStr for WriteAllocate {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "write-allocate" => Ok(Self::Allocate),
            "no-write-allocate" => Ok(Self::NoAllocate),
            _ => Err(ParsePolicyError {
                kind: "write-allocation policy",
                value: s.to_owned(),
                expected: "write-allocate or no-write-allocate",
            }),
        }
    }
}

impl FromStr for WritePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "write-through" => Ok(Self::WriteThrough),
            "write-back" => Ok(Self::WriteBack),
            _ => Err(ParsePolicyError {
                kind: "write policy",
                value: s.to_owned(),
                expected: "write-through or write-back",
            }),
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lru" => Ok(Self::Lru),
            "fifo" => Ok(Self::Fifo),
            _ => Err(ParsePolicyError {
                kind: "eviction policy",
                value: s.to_owned(),
                expected: "lru or fifo",
            }),
        }
    }
}

impl fmt::Display for WriteAllocate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Allocate => "write-allocate",
            Self::NoAllocate => "no-write-allocate",
        })
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WriteThrough => "write-through",
            Self::WriteBack => "write-back",
        })
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lru => "lru",
            Self::Fifo => "fifo",
        })
    }
}

/// Validated cache simulation parameters.
///
/// Fields are private: the only constructors are [`Config::new`] and
/// deserialization, both of which enforce every invariant.
///
/// # Examples
///
/// Building a configuration directly:
///
/// ```
/// use csim_core::config::{Config, EvictionPolicy, WriteAllocate, WritePolicy};
///
/// let config = Config::new(
///     256,
///     4,
///     16,
///     WriteAllocate::Allocate,
///     WritePolicy::WriteBack,
///     EvictionPolicy::Lru,
/// )
/// .unwrap();
/// assert_eq!(config.block_transfer_latency(), 400);
/// ```
///
/// Deserializing from JSON, with omitted fields taking their defaults:
///
/// ```
/// use csim_core::config::{Config, EvictionPolicy, WritePolicy};
///
/// let json = r#"{
///     "num_sets": 1,
///     "blocks_per_set": 8,
///     "write_policy": "write-through",
///     "eviction": "fifo"
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.blocks_per_set(), 8);
/// assert_eq!(config.block_size(), 16);
/// assert_eq!(config.write_policy(), WritePolicy::WriteThrough);
/// assert_eq!(config.eviction(), EvictionPolicy::Fifo);
///
/// let bad = r#"{ "num_sets": 3 }"#;
/// assert!(serde_json::from_str::<Config>(bad).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Config {
    num_sets: u64,
    blocks_per_set: u64,
    block_size: u64,
    write_allocate: WriteAllocate,
    write_policy: WritePolicy,
    eviction: EvictionPolicy,
}

/// Unvalidated configuration as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
struct RawConfig {
    #[serde(default = "RawConfig::default_num_sets")]
    num_sets: u64,
    #[serde(default = "RawConfig::default_blocks_per_set")]
    blocks_per_set: u64,
    #[serde(default = "RawConfig::default_block_size")]
    block_size: u64,
    #[serde(default)]
    write_allocate: WriteAllocate,
    #[serde(default)]
    write_policy: WritePolicy,
    #[serde(default)]
    eviction: EvictionPolicy,
}

impl RawConfig {
    const fn default_num_sets() -> u64 {
        defaults::NUM_SETS
    }

    const fn default_blocks_per_set() -> u64 {
        defaults::BLOCKS_PER_SET
    }

    const fn default_block_size() -> u64 {
        defaults::BLOCK_SIZE
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawConfig::deserialize(deserializer)?;
        Self::new(
            raw.num_sets,
            raw.blocks_per_set,
            raw.block_size,
            raw.write_allocate,
            raw.write_policy,
            raw.eviction,
        )
        .map_err(de::Error::custom)
    }
}

impl Default for Config {
    /// Creates the default configuration.
    ///
    /// 256 sets of 4 lines, 16-byte blocks, write-allocate, write-back, LRU.
    fn default() -> Self {
        Self {
            num_sets: defaults::NUM_SETS,
            blocks_per_set: defaults::BLOCKS_PER_SET,
            block_size: defaults::BLOCK_SIZE,
            write_allocate: WriteAllocate::default(),
            write_policy: WritePolicy::default(),
            eviction: EvictionPolicy::default(),
        }
    }
}

impl Config {
    /// Validates and builds a configuration.
    ///
    /// # Arguments
    ///
    /// * `num_sets` - Number of sets; a positive power of two.
    /// * `blocks_per_set` - Lines per set; a positive power of two.
    /// * `block_size` - Bytes per line; a power of two, at least 4.
    /// * `write_allocate` - Store-miss behavior.
    /// * `write_policy` - Store-hit behavior.
    /// * `eviction` - Victim selection discipline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPowerOfTwo`] for the first geometry parameter that is
    /// zero or not a power of two, [`ConfigError::BlockTooSmall`] for blocks under 4
    /// bytes, [`ConfigError::BlockTooLarge`] when one block transfer would not fit in
    /// a `u64` cycle count, and [`ConfigError::NoAllocateWithWriteBack`] for the
    /// illegal policy pair.
    pub fn new(
        num_sets: u64,
        blocks_per_set: u64,
        block_size: u64,
        write_allocate: WriteAllocate,
        write_policy: WritePolicy,
        eviction: EvictionPolicy,
    ) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("number of sets", num_sets),
            ("blocks per set", blocks_per_set),
            ("block size", block_size),
        ] {
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo { field, value });
            }
        }
        if block_size < MIN_BLOCK_SIZE {
            return Err(ConfigError::BlockTooSmall(block_size));
        }
        if (block_size / WORD_BYTES).checked_mul(MEMORY_LATENCY).is_none() {
            return Err(ConfigError::BlockTooLarge(block_size));
        }
        if write_allocate == WriteAllocate::NoAllocate && write_policy == WritePolicy::WriteBack {
            return Err(ConfigError::NoAllocateWithWriteBack);
        }

        Ok(Self {
            num_sets,
            blocks_per_set,
            block_size,
            write_allocate,
            write_policy,
            eviction,
        })
    }

    /// Number of sets.
    #[inline]
    pub const fn num_sets(&self) -> u64 {
        self.num_sets
    }

    /// Lines per set.
    #[inline]
    pub const fn blocks_per_set(&self) -> u64 {
        self.blocks_per_set
    }

    /// Bytes per line.
    #[inline]
    pub const fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Store-miss behavior.
    #[inline]
    pub const fn write_allocate(&self) -> WriteAllocate {
        self.write_allocate
    }

    /// Store-hit behavior.
    #[inline]
    pub const fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// Victim selection discipline.
    #[inline]
    pub const fn eviction(&self) -> EvictionPolicy {
        self.eviction
    }

    /// Cycles to move one whole block between memory and the cache.
    ///
    /// Always fits in a `u64`; [`Config::new`] rejects block sizes where it would not.
    #[inline]
    pub const fn block_transfer_latency(&self) -> u64 {
        (self.block_size / WORD_BYTES).saturating_mul(MEMORY_LATENCY)
    }

    /// Total capacity in bytes.
    pub const fn capacity_bytes(&self) -> u64 {
        self.num_sets * self.blocks_per_set * self.block_size
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sets x {} ways x {} B ({}, {}, {})",
            self.num_sets,
            self.blocks_per_set,
            self.block_size,
            self.write_allocate,
            self.write_policy,
            self.eviction
        )
    }
}
