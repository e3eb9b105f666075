//! Runtime support: waveforms, channels, instruments and filters

pub mod channel;
pub mod instrument;
pub mod node;
pub mod parameter;
pub mod ports;
pub mod resample;
pub mod waveform;

pub use channel::{Channel, ChannelType, StreamDescriptor, Unit, default_channel_color};
pub use instrument::{CouplingType, InterleaveConflict, Oscilloscope, TriggerMode};
pub use node::Filter;
pub use parameter::{FilterParameter, ParameterType};
pub use ports::{PortDirection, PortSchema};
pub use resample::sample_on_any_edges;
pub use waveform::{AnalogWaveform, DigitalWaveform, FS_PER_SECOND, Waveform, WaveformData};
