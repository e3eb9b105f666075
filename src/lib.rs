//! Oscilloscope waveform model with offline capture import and PRBS checking
//!
//! This library models timestamped analog and digital waveforms, loads
//! Keysight/Rigol BIN captures into an offline oscilloscope, and verifies
//! clocked bit streams against standard PRBS polynomials.
//!
//! # Architecture
//!
//! - **Waveform**: Sparse or dense-packed time series with femtosecond timing
//! - **MockOscilloscope**: Offline instrument fed from BIN files or configuration
//! - **Filter**: Processing stage over channel streams
//! - **PrbsChecker**: Flags bits that do not match the expected PRBS sequence
//!
//! # Example
//!
//! ```no_run
//! use scopecore::{MockOscilloscope, Oscilloscope};
//!
//! let mut scope = MockOscilloscope::new("offline", "", "");
//! scope.load_bin("capture.bin")?;
//! scope.autoscale_vertical();
//! for i in 0..scope.channel_count() {
//!     println!("{:?}", scope.channel(i).map(|c| c.display_name()));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;

pub mod nodes;
pub mod runtime;

// Re-export checker types
pub use nodes::decoders::{Polynomial, PrbsChecker, generate};

// Re-export instruments and configuration
pub use nodes::{ChannelConfig, IdTable, MockOscilloscope, ScopeConfig};

// Re-export waveform model and runtime components
pub use runtime::{
    AnalogWaveform, Channel, ChannelType, CouplingType, DigitalWaveform, FS_PER_SECOND, Filter,
    FilterParameter, Oscilloscope, ParameterType, PortDirection, PortSchema, StreamDescriptor,
    TriggerMode, Unit, Waveform, WaveformData, sample_on_any_edges,
};

#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown file signature: 0x{0:02x}")]
    UnknownSignature(u8),

    #[error("Truncated data at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Format error: {0}")]
    Format(String),
}

pub type Result<T> = std::result::Result<T, ScopeError>;
