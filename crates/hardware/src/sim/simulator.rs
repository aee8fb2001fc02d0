//! Simulator: owns the cache, the access counter, and the running statistics.
//!
//! Each access goes through three steps, in this order:
//! 1. **Probe:** decompose the address and look the tag up (hit way or insertion target).
//! 2. **Tick:** advance the access counter. The new value is the stamp written by
//!    this access, so installed lines always carry a stamp of at least 1.
//! 3. **Apply:** charge cycles and mutate the cache according to the write-allocate,
//!    write, and eviction policies.
//!
//! # Cost model
//!
//! With `T = 100 * (block_size / 4)` cycles per block transfer:
//!
//! | access | outcome                     | cycles                        |
//! |--------|-----------------------------|-------------------------------|
//! | load   | hit                         | 1                             |
//! | load   | miss                        | `T + 1` (+`T` dirty victim)   |
//! | store  | hit, write-through          | 1 + 100                       |
//! | store  | hit, write-back             | 1                             |
//! | store  | miss, allocate, through     | `T + 1 + 100` (+`T` victim)   |
//! | store  | miss, allocate, back        | `T + 1` (+`T` dirty victim)   |
//! | store  | miss, no-allocate           | 100                           |
//!
//! Per-access costs and the running total saturate at `u64::MAX` rather than wrap.

use std::io::BufRead;

use tracing::{debug, trace};

use crate::cache::{Cache, Lookup, Probe};
use crate::common::constants::{CACHE_HIT_LATENCY, MEMORY_LATENCY};
use crate::common::error::TraceError;
use crate::common::{Access, AccessKind};
use crate::config::{Config, WriteAllocate, WritePolicy};
use crate::sim::trace::TraceReader;
use crate::stats::SimStats;

/// What happened to a single access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Kind of the access.
    pub kind: AccessKind,
    /// Whether the block was resident.
    pub hit: bool,
    /// Cycles charged for this access.
    pub cycles: u64,
    /// Tag of the valid line displaced by this access, if any.
    pub evicted: Option<u64>,
    /// Whether the displaced line was dirty and written back.
    pub wrote_back: bool,
}

impl AccessOutcome {
    const fn new(kind: AccessKind, hit: bool, cycles: u64) -> Self {
        Self {
            kind,
            hit,
            cycles,
            evicted: None,
            wrote_back: false,
        }
    }
}

/// Trace-driven cache simulator for one run.
///
/// A fresh `Simulator` starts with every line invalid, the access counter at 0, and
/// zeroed statistics. Nothing is shared between instances.
#[derive(Clone, Debug)]
pub struct Simulator {
    config: Config,
    cache: Cache,
    clock: u64,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator with an empty cache for `config`.
    pub fn new(config: Config) -> Self {
        debug!(%config, capacity = config.capacity_bytes(), "cache simulator initialized");
        Self {
            cache: Cache::new(&config),
            config,
            clock: 0,
            stats: SimStats::default(),
        }
    }

    /// The configuration this simulator was built with.
    #[inline]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Current cache state.
    #[inline]
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Number of accesses processed so far.
    #[inline]
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// Statistics accumulated so far.
    #[inline]
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Consumes the simulator, returning its statistics.
    pub fn into_stats(self) -> SimStats {
        self.stats
    }

    /// Processes one access: classifies it, updates the cache, and charges cycles.
    ///
    /// # Arguments
    ///
    /// * `access` - The decoded access to simulate.
    ///
    /// # Returns
    ///
    /// The hit/miss classification, cycle cost, and any eviction caused.
    pub fn access(&mut self, access: Access) -> AccessOutcome {
        let probe = self.cache.probe(access.addr);
        self.clock += 1;
        let stamp = self.clock;

        let outcome = match access.kind {
            AccessKind::Load => self.load(probe, stamp),
            AccessKind::Store => self.store(probe, stamp),
        };
        self.stats.record(&outcome);
        outcome
    }

    /// Runs every access in order and returns the accumulated statistics.
    pub fn run<I>(&mut self, accesses: I) -> &SimStats
    where
        I: IntoIterator<Item = Access>,
    {
        for access in accesses {
            let _ = self.access(access);
        }
        debug!(
            accesses = self.stats.accesses(),
            cycles = self.stats.cycles,
            "trace complete"
        );
        &self.stats
    }

    /// Decodes a trace from `reader` and runs it.
    ///
    /// Accesses before a malformed line are still applied; the error reports the
    /// offending line.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError`] for the first malformed line or read failure.
    pub fn run_trace<R: BufRead>(&mut self, reader: R) -> Result<&SimStats, TraceError> {
        for access in TraceReader::new(reader) {
            let _ = self.access(access?);
        }
        debug!(
            accesses = self.stats.accesses(),
            cycles = self.stats.cycles,
            "trace complete"
        );
        Ok(&self.stats)
    }

    fn load(&mut self, probe: Probe, stamp: u64) -> AccessOutcome {
        if let Lookup::Hit(way) = probe.lookup {
            self.refresh(probe.set, way, stamp);
            return AccessOutcome::new(AccessKind::Load, true, CACHE_HIT_LATENCY);
        }

        let mut outcome = AccessOutcome::new(
            AccessKind::Load,
            false,
            self.config
                .block_transfer_latency()
                .saturating_add(CACHE_HIT_LATENCY),
        );
        self.allocate(probe, stamp, false, &mut outcome);
        outcome
    }

    fn store(&mut self, probe: Probe, stamp: u64) -> AccessOutcome {
        let write_back = self.config.write_policy() == WritePolicy::WriteBack;

        if let Lookup::Hit(way) = probe.lookup {
            let cycles = if write_back {
                self.cache.mark_dirty(probe.set, way);
                CACHE_HIT_LATENCY
            } else {
                CACHE_HIT_LATENCY + MEMORY_LATENCY
            };
            self.refresh(probe.set, way, stamp);
            return AccessOutcome::new(AccessKind::Store, true, cycles);
        }

        if self.config.write_allocate() == WriteAllocate::NoAllocate {
            return AccessOutcome::new(AccessKind::Store, false, MEMORY_LATENCY);
        }

        let mut outcome = AccessOutcome::new(
            AccessKind::Store,
            false,
            self.config.block_transfer_latency(),
        );
        self.allocate(probe, stamp, write_back, &mut outcome);
        outcome.cycles = outcome.cycles.saturating_add(if write_back {
            CACHE_HIT_LATENCY
        } else {
            CACHE_HIT_LATENCY + MEMORY_LATENCY
        });
        outcome
    }

    /// Refreshes the recency stamp of a hit line when the policy calls for it.
    fn refresh(&mut self, set: usize, way: usize, stamp: u64) {
        if self.config.eviction().refreshes_on_hit() {
            self.cache.touch(set, way, stamp);
        }
    }

    /// Installs the probed block at its insertion target, charging a write-back
    /// if a dirty victim is displaced under write-back.
    fn allocate(&mut self, probe: Probe, stamp: u64, dirty: bool, outcome: &mut AccessOutcome) {
        let way = probe.lookup.way();
        let victim = self.cache.install(probe.set, way, probe.tag, stamp, dirty);

        if let Lookup::Evict(_) = probe.lookup {
            outcome.evicted = Some(victim.tag);
            if self.config.write_policy() == WritePolicy::WriteBack && victim.dirty {
                outcome.wrote_back = true;
                outcome.cycles = outcome
                    .cycles
                    .saturating_add(self.config.block_transfer_latency());
            }
            trace!(
                set = probe.set,
                way,
                victim_tag = victim.tag,
                dirty = victim.dirty,
                "evicted line"
            );
        }
    }
}
