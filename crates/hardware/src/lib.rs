//! Trace-driven set-associative cache simulator library.
//!
//! This crate models a single cache level with exact hit/miss and cycle accounting:
//! 1. **Config:** Validated geometry (sets, ways, block size) and write/eviction policies.
//! 2. **Cache:** Array of sets with valid/dirty/tag/recency lines and single-pass lookup.
//! 3. **Simulation:** Per-access state transitions and cost model, plus trace decoding.
//! 4. **Statistics:** Hit/miss counts per access kind and total cycles.
//!
//! # Example
//!
//! ```
//! use csim_core::{Access, Config, Simulator};
//! use csim_core::config::{EvictionPolicy, WriteAllocate, WritePolicy};
//!
//! let config = Config::new(
//!     1,
//!     1,
//!     4,
//!     WriteAllocate::Allocate,
//!     WritePolicy::WriteBack,
//!     EvictionPolicy::Lru,
//! )
//! .unwrap();
//!
//! let mut sim = Simulator::new(config);
//! let stats = sim.run([Access::load(0x0), Access::load(0x0)]);
//! assert_eq!(stats.load_misses, 1);
//! assert_eq!(stats.load_hits, 1);
//! assert_eq!(stats.cycles, 102);
//! ```

/// Cache state (sets, lines, lookup).
pub mod cache;
/// Common types (address layout, accesses, constants, errors).
pub mod common;
/// Simulator configuration (geometry and policies).
pub mod config;
/// Simulation driver and trace decoding.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// A decoded memory access.
pub use crate::common::{Access, AccessKind};
/// Validated configuration; build with `Config::new` or deserialize from JSON.
pub use crate::config::Config;
/// Per-run simulation driver.
pub use crate::sim::Simulator;
/// Accumulated run statistics.
pub use crate::stats::SimStats;
