//! Memory Access Types.
//!
//! A trace is a sequence of [`Access`] values. Data values are never modeled,
//! only the kind of access and the byte address it touches.

use std::fmt;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Data read access (`l` in a trace).
    Load,
    /// Data write access (`s` in a trace).
    Store,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::Store => write!(f, "store"),
        }
    }
}

/// A single decoded memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    /// Whether this access reads or writes.
    pub kind: AccessKind,
    /// Byte address touched by the access.
    pub addr: u64,
}

impl Access {
    /// Creates a load from `addr`.
    #[inline]
    pub const fn load(addr: u64) -> Self {
        Self {
            kind: AccessKind::Load,
            addr,
        }
    }

    /// Creates a store to `addr`.
    #[inline]
    pub const fn store(addr: u64) -> Self {
        Self {
            kind: AccessKind::Store,
            addr,
        }
    }
}
