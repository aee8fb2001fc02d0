//! Cache simulator CLI.
//!
//! This binary wires the simulator to the outside world. It performs:
//! 1. **Configuration:** Six positional arguments become a validated `Config`.
//! 2. **Trace input:** Accesses are streamed from stdin, or from `--trace FILE`.
//! 3. **Reporting:** Prints the seven summary counters, a detailed breakdown, or JSON.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (e.g. `RUST_LOG=csim_core=trace`).

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use csim_core::config::{EvictionPolicy, WriteAllocate, WritePolicy};
use csim_core::{Config, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Simulate a set-associative cache over a memory trace and report hit/miss counts and total cycles.\n\nTrace lines have the form `<l|s> <hex address> <size>`.\n\nExamples:\n  csim 256 4 16 write-allocate write-back lru < traces/gcc.trace\n  csim 1 1 4 no-write-allocate write-through fifo --trace small.trace --json"
)]
struct Cli {
    /// Number of sets (power of 2).
    num_sets: u64,

    /// Blocks per set (power of 2).
    blocks_per_set: u64,

    /// Bytes per block (power of 2, at least 4).
    block_size: u64,

    /// write-allocate or no-write-allocate.
    write_allocate: WriteAllocate,

    /// write-through or write-back.
    write_policy: WritePolicy,

    /// lru or fifo.
    eviction: EvictionPolicy,

    /// Read the trace from this file instead of stdin.
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Print statistics as JSON.
    #[arg(long, conflicts_with = "detailed")]
    json: bool,

    /// Print a sectioned breakdown including evictions and write-backs.
    #[arg(long)]
    detailed: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::new(
        cli.num_sets,
        cli.blocks_per_set,
        cli.block_size,
        cli.write_allocate,
        cli.write_policy,
        cli.eviction,
    )
    .unwrap_or_else(|e| fail(&e));

    let reader: Box<dyn BufRead> = match &cli.trace {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => fail(&format!("could not open trace '{}': {e}", path.display())),
        },
        None => Box::new(io::stdin().lock()),
    };

    let mut sim = Simulator::new(config);
    let stats = sim.run_trace(reader).unwrap_or_else(|e| fail(&e));

    if cli.json {
        match stats.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => fail(&e),
        }
    } else if cli.detailed {
        print!("{}", stats.detailed());
    } else {
        print!("{stats}");
    }
}

/// Prints `Error: {err}` to stderr and exits with status 1.
fn fail(err: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {err}");
    process::exit(1);
}
