//! Example: Import a Keysight/Rigol BIN capture
//!
//! Loads every waveform of a BIN file into an offline oscilloscope and prints
//! a summary of each imported channel.
//!
//! Usage:
//!   cargo run --release --example bin_import -- --file capture.bin
//!
//! With saved channel configuration and autoscale:
//!   cargo run --release --example bin_import -- \
//!       --file capture.bin \
//!       --config scope.json \
//!       --autoscale

use clap::Parser;
use scopecore::{IdTable, MockOscilloscope, Oscilloscope, ScopeConfig, WaveformData};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to BIN file
    #[arg(short, long)]
    file: String,

    /// Channel configuration (JSON) applied before the import
    #[arg(short, long)]
    config: Option<String>,

    /// Fit the vertical range of every channel to its samples
    #[arg(long)]
    autoscale: bool,

    /// Number of samples to print per channel
    #[arg(short, long, default_value_t = 0)]
    n: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("=== BIN Import Example ===");
    info!("File: {}", args.file);

    let mut scope = MockOscilloscope::new("offline", "", "");

    if let Some(path) = &args.config {
        let config = ScopeConfig::from_json(&std::fs::read_to_string(path)?)?;
        let mut ids = IdTable::new();
        scope.load_configuration(&config, &mut ids);
        info!("Configured {} channels from {}", ids.len(), path);
    }

    scope.load_bin(&args.file)?;
    if args.autoscale {
        scope.autoscale_vertical();
    }

    println!("Instrument: {} {} (serial {})", scope.vendor(), scope.name(), scope.serial());

    for i in 0..scope.channel_count() {
        let Some(chan) = scope.channel(i) else {
            continue;
        };

        let samples = match chan.data(0) {
            Some(WaveformData::Analog(w)) => Some(w),
            _ => None,
        };
        let count = samples.map(|w| w.len()).unwrap_or(0);
        let timescale = samples.map(|w| w.timescale).unwrap_or(0);

        println!(
            "  [{}] {:<16} {:?}  {} samples @ {} fs  range {:.4} {}  offset {:.4} {}",
            i,
            chan.display_name(),
            chan.channel_type(),
            count,
            timescale,
            scope.channel_voltage_range(i, 0),
            chan.y_unit(),
            scope.channel_offset(i, 0),
            chan.y_unit(),
        );

        if let Some(w) = samples {
            for k in 0..args.n.min(w.len()) {
                println!("      {:>12} fs  {}", w.offset_fs(k), w.samples[k]);
            }
        }
    }

    Ok(())
}
