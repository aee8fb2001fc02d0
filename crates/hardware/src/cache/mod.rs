//! Set-Associative Cache State.
//!
//! This module holds the array of sets and the address-to-set mapping. It does
//! not know about timing or write policies; the [`Simulator`] decides what to do
//! with each [`Lookup`] and calls back into the cache to mutate lines.
//!
//! [`Simulator`]: crate::sim::Simulator

/// Cache lines, sets, and the single-pass lookup.
pub mod set;

pub use self::set::{CacheLine, CacheSet, Lookup};

use crate::common::AddressLayout;
use crate::config::Config;

/// Result of resolving an address against the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Probe {
    /// Set the address maps to.
    pub set: usize,
    /// Tag of the address.
    pub tag: u64,
    /// Hit way or insertion target within `set`.
    pub lookup: Lookup,
}

/// The cache: `num_sets` sets of `blocks_per_set` lines each.
#[derive(Clone, Debug)]
pub struct Cache {
    sets: Vec<CacheSet>,
    layout: AddressLayout,
}

impl Cache {
    /// Creates an empty (all lines invalid) cache for `config`.
    pub fn new(config: &Config) -> Self {
        let ways = config.blocks_per_set() as usize;
        Self {
            sets: (0..config.num_sets()).map(|_| CacheSet::new(ways)).collect(),
            layout: AddressLayout::new(config),
        }
    }

    /// Address decomposition used by this cache.
    #[inline]
    pub const fn layout(&self) -> &AddressLayout {
        &self.layout
    }

    /// Number of sets.
    #[inline]
    pub const fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// All sets in index order.
    #[inline]
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Returns the set at `index`, if in range.
    #[inline]
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// Decomposes `addr` and looks its tag up in the corresponding set.
    pub fn probe(&self, addr: u64) -> Probe {
        let (set, tag) = self.layout.split(addr);
        // The index mask keeps `set` below `num_sets`.
        let lookup = self.sets[set].lookup(tag);
        Probe { set, tag, lookup }
    }

    /// Returns the resident line holding `addr`, if any.
    pub fn line_for(&self, addr: u64) -> Option<&CacheLine> {
        let probe = self.probe(addr);
        match probe.lookup {
            Lookup::Hit(way) => self.sets[probe.set].line(way),
            Lookup::Fill(_) | Lookup::Evict(_) => None,
        }
    }

    /// Returns `true` if the block containing `addr` is resident.
    pub fn contains(&self, addr: u64) -> bool {
        self.probe(addr).lookup.is_hit()
    }

    /// Number of valid lines across all sets.
    pub fn occupancy(&self) -> usize {
        self.sets.iter().map(CacheSet::occupancy).sum()
    }

    // Mutators take a `set` and `way` from a `Probe` of this cache.

    pub(crate) fn touch(&mut self, set: usize, way: usize, stamp: u64) {
        self.sets[set].touch(way, stamp);
    }

    pub(crate) fn mark_dirty(&mut self, set: usize, way: usize) {
        self.sets[set].mark_dirty(way);
    }

    pub(crate) fn install(
        &mut self,
        set: usize,
        way: usize,
        tag: u64,
        stamp: u64,
        dirty: bool,
    ) -> CacheLine {
        self.sets[set].install(way, tag, stamp, dirty)
    }
}
