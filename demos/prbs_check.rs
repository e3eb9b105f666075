//! Example: PRBS bit error checking
//!
//! Generates a clocked PRBS pattern, optionally corrupts some bits, and runs
//! the checker over it.
//!
//! Usage:
//!   cargo run --release --example prbs_check -- --polynomial 15 --bits 10000
//!
//! With injected errors:
//!   cargo run --release --example prbs_check -- \
//!       --polynomial 7 --bits 500 \
//!       --flip 100 --flip 250

use clap::Parser;
use scopecore::{
    Channel, ChannelType, DigitalWaveform, Filter, Polynomial, PrbsChecker, StreamDescriptor,
    WaveformData, generate,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Polynomial degree (7, 9, 11, 15, 23 or 31)
    #[arg(short, long, default_value_t = 7)]
    polynomial: i64,

    /// Number of bits to generate
    #[arg(short, long, default_value_t = 1000)]
    bits: usize,

    /// LFSR seed
    #[arg(long, default_value_t = 0x1)]
    seed: u32,

    /// Unit interval in picoseconds
    #[arg(long, default_value_t = 100)]
    ui_ps: i64,

    /// Bit positions to invert before checking
    #[arg(long)]
    flip: Vec<usize>,
}

/// Build data and clock channels; the clock toggles once per bit, mid-bit
fn build_inputs(bits: &[bool], ui_ps: i64) -> (Channel, Channel) {
    let mut data = DigitalWaveform::with_capacity(bits.len());
    data.timescale = 1_000;
    for (k, &b) in bits.iter().enumerate() {
        data.push(k as i64 * ui_ps, ui_ps, b);
    }

    let mut clock = DigitalWaveform::with_capacity(bits.len() + 1);
    clock.timescale = 1_000;
    clock.push(0, ui_ps / 2, false);
    for k in 0..bits.len() {
        clock.push(k as i64 * ui_ps + ui_ps / 2, ui_ps, k % 2 == 0);
    }

    let mut dchan = Channel::new("DATA", ChannelType::Digital, "#00ff00", 0, true);
    dchan.set_data(Some(data.into()), 0);
    let mut cchan = Channel::new("CLK", ChannelType::Digital, "#ffff00", 1, true);
    cchan.set_data(Some(clock.into()), 0);
    (dchan, cchan)
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

    let Some(poly) = Polynomial::from_code(args.polynomial) else {
        return Err(format!("unsupported polynomial degree {}", args.polynomial).into());
    };

    info!("=== PRBS Check Example ===");
    info!("Polynomial: {}, {} bits, seed 0x{:X}", poly.label(), args.bits, args.seed);

    let mut bits = generate(poly, args.seed, args.bits);
    for &pos in &args.flip {
        match bits.get_mut(pos) {
            Some(b) => *b = !*b,
            None => warn!("Flip position {} is past the end of the pattern", pos),
        }
    }

    let (dchan, cchan) = build_inputs(&bits, args.ui_ps);
    let inputs = [StreamDescriptor::new(&dchan, 0), StreamDescriptor::new(&cchan, 0)];

    let mut checker = PrbsChecker::new("#ff0000").with_polynomial(poly);
    checker.set_default_name(&inputs);
    checker.refresh(&inputs);

    let Some(WaveformData::Digital(errors)) = checker.data(0) else {
        println!("{}: not enough bits to seed {}", checker.name(), poly.label());
        return Ok(());
    };

    let positions: Vec<usize> = errors
        .samples
        .iter()
        .enumerate()
        .filter_map(|(i, &e)| e.then_some(i))
        .collect();

    println!(
        "{}: {} bits checked, {} errors",
        checker.name(),
        errors.len() - poly.degree(),
        positions.len()
    );
    for i in positions {
        println!("  bit {:>8} at {:>14} fs", i, errors.offsets[i]);
    }

    Ok(())
}
