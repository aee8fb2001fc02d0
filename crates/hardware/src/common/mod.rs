//! Common types shared by the cache model and its front ends.
//!
//! This module provides the following:
//! 1. **Address Decomposition:** Splitting an address into set index and tag.
//! 2. **Constants:** Memory and cache timing used by the cost model.
//! 3. **Memory Access:** The decoded `(kind, address)` pairs the simulator consumes.
//! 4. **Error Handling:** Configuration, policy-parsing, and trace errors.

/// Address decomposition into set index and tag.
pub mod addr;

/// Timing constants for the cycle-cost model.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration, policy parsing, and trace decoding.
pub mod error;

pub use addr::AddressLayout;
pub use data::{Access, AccessKind};
pub use error::{ConfigError, ParsePolicyError, TraceError};
