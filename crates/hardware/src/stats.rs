//! Simulation statistics collection and reporting.
//!
//! This module tallies the outcome of every access in a trace. It provides:
//! 1. **Counters:** Loads, stores, hits, and misses per access kind, plus total cycles.
//! 2. **Eviction tracking:** Evictions and dirty write-backs, as diagnostics.
//! 3. **Reporting:** The seven-line summary via `Display`, a sectioned breakdown via
//!    [`SimStats::detailed`], and JSON via [`SimStats::to_json`].

use std::fmt;

use serde::Serialize;

use crate::common::AccessKind;
use crate::sim::AccessOutcome;

/// Running totals for one simulation run.
///
/// Every counter only ever increases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Number of loads processed.
    pub total_loads: u64,
    /// Number of stores processed.
    pub total_stores: u64,
    /// Loads that found their block resident.
    pub load_hits: u64,
    /// Loads that had to fetch their block.
    pub load_misses: u64,
    /// Stores that found their block resident.
    pub store_hits: u64,
    /// Stores whose block was not resident.
    pub store_misses: u64,
    /// Total cycles charged across all accesses, saturating at `u64::MAX`.
    pub cycles: u64,

    /// Misses that displaced a valid line.
    pub evictions: u64,
    /// Evicted lines that were dirty and written back to memory.
    pub writebacks: u64,
}

impl SimStats {
    /// Folds one access outcome into the totals.
    pub const fn record(&mut self, outcome: &AccessOutcome) {
        match (outcome.kind, outcome.hit) {
            (AccessKind::Load, true) => self.load_hits += 1,
            (AccessKind::Load, false) => self.load_misses += 1,
            (AccessKind::Store, true) => self.store_hits += 1,
            (AccessKind::Store, false) => self.store_misses += 1,
        }
        match outcome.kind {
            AccessKind::Load => self.total_loads += 1,
            AccessKind::Store => self.total_stores += 1,
        }
        if outcome.evicted.is_some() {
            self.evictions += 1;
        }
        if outcome.wrote_back {
            self.writebacks += 1;
        }
        self.cycles = self.cycles.saturating_add(outcome.cycles);
    }

    /// Total accesses processed.
    pub const fn accesses(&self) -> u64 {
        self.total_loads + self.total_stores
    }

    /// Total hits across both access kinds.
    pub const fn hits(&self) -> u64 {
        self.load_hits + self.store_hits
    }

    /// Total misses across both access kinds.
    pub const fn misses(&self) -> u64 {
        self.load_misses + self.store_misses
    }

    /// Fraction of all accesses that hit, or 0.0 for an empty trace.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits(), self.accesses())
    }

    /// The counters in report order: total loads, total stores, load hits,
    /// load misses, store hits, store misses, total cycles.
    pub const fn summary(&self) -> [u64; 7] {
        [
            self.total_loads,
            self.total_stores,
            self.load_hits,
            self.load_misses,
            self.store_hits,
            self.store_misses,
            self.cycles,
        ]
    }

    /// Serializes every counter as a JSON object.
    ///
    /// # Errors
    ///
    /// Propagates any `serde_json` serialization failure.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Returns a sectioned breakdown with hit rates and eviction counts.
    pub const fn detailed(&self) -> Detailed<'_> {
        Detailed(self)
    }
}

/// Report labels, in the same order as [`SimStats::summary`].
pub const SUMMARY_LABELS: [&str; 7] = [
    "Total loads",
    "Total stores",
    "Load hits",
    "Load misses",
    "Store hits",
    "Store misses",
    "Total cycles",
];

impl fmt::Display for SimStats {
    /// Writes the seven-line summary, one `Label: value` per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in SUMMARY_LABELS.iter().zip(self.summary()) {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

/// Sectioned statistics breakdown; see [`SimStats::detailed`].
#[derive(Debug)]
pub struct Detailed<'a>(&'a SimStats);

impl fmt::Display for Detailed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        let pct = |part: u64, total: u64| ratio(part, total) * 100.0;

        writeln!(f, "==========================================================")?;
        writeln!(f, "CACHE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_accesses             {}", s.accesses())?;
        writeln!(f, "sim_cycles               {}", s.cycles)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(
            f,
            "  loads   accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
            s.total_loads,
            s.load_hits,
            pct(s.load_misses, s.total_loads)
        )?;
        writeln!(
            f,
            "  stores  accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
            s.total_stores,
            s.store_hits,
            pct(s.store_misses, s.total_stores)
        )?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "  evictions              {}", s.evictions)?;
        writeln!(f, "  writebacks             {}", s.writebacks)?;
        writeln!(f, "==========================================================")
    }
}

/// `num / den`, or 0.0 when `den` is zero.
#[allow(clippy::cast_precision_loss)]
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
