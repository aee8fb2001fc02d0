use csim_core::cache::CacheLine;
use csim_core::config::{Config, EvictionPolicy, WriteAllocate, WritePolicy};
use csim_core::sim::AccessOutcome;
use csim_core::{Access, SimStats, Simulator};

/// Builds a configuration that is known to be valid.
pub fn config(
    num_sets: u64,
    blocks_per_set: u64,
    block_size: u64,
    write_allocate: WriteAllocate,
    write_policy: WritePolicy,
    eviction: EvictionPolicy,
) -> Config {
    Config::new(
        num_sets,
        blocks_per_set,
        block_size,
        write_allocate,
        write_policy,
        eviction,
    )
    .unwrap()
}

pub struct TestContext {
    pub sim: Simulator,
}

impl TestContext {
    pub fn new(config: Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("csim_core=trace")
            .try_init();
        Self {
            sim: Simulator::new(config),
        }
    }

    /// One set, one line, 4-byte blocks, write-allocate, write-back, LRU.
    pub fn single_line() -> Self {
        Self::new(config(
            1,
            1,
            4,
            WriteAllocate::Allocate,
            WritePolicy::WriteBack,
            EvictionPolicy::Lru,
        ))
    }

    /// One set of `ways` lines, 4-byte blocks, write-allocate, write-back.
    ///
    /// With one set and 4-byte blocks, the tag of an address is `addr >> 2`.
    pub fn fully_associative(ways: u64, eviction: EvictionPolicy) -> Self {
        Self::new(config(
            1,
            ways,
            4,
            WriteAllocate::Allocate,
            WritePolicy::WriteBack,
            eviction,
        ))
    }

    pub fn load(&mut self, addr: u64) -> AccessOutcome {
        self.sim.access(Access::load(addr))
    }

    pub fn store(&mut self, addr: u64) -> AccessOutcome {
        self.sim.access(Access::store(addr))
    }

    pub fn stats(&self) -> &SimStats {
        self.sim.stats()
    }

    pub fn resident(&self, addr: u64) -> bool {
        self.sim.cache().contains(addr)
    }

    /// The resident line holding `addr`.
    pub fn line(&self, addr: u64) -> CacheLine {
        *self.sim.cache().line_for(addr).unwrap()
    }
}
