//! Instruments, importers and filters
//!
//! - **MockOscilloscope**: Offline instrument that holds imported captures
//! - **bin_file**: Keysight/Rigol BIN capture layout
//! - **config**: Saved instrument configuration documents
//! - **Decoders**: Filters over digital streams (PRBS checking)
//!
//! # Examples
//!
//! ```no_run
//! use scopecore::MockOscilloscope;
//!
//! let mut scope = MockOscilloscope::new("offline", "", "");
//! scope.load_bin("capture.bin")?;
//! scope.autoscale_vertical();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bin_file;
pub mod config;
pub mod decoders;
mod mock_scope;

pub use config::{ChannelConfig, IdTable, ScopeConfig};
pub use mock_scope::MockOscilloscope;
