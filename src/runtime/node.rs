//! Filter trait for analysis stages
//!
//! A filter consumes one or more input streams and publishes waveforms on its own
//! output streams. The caller decides when `refresh()` runs; each call recomputes
//! the outputs from whatever the inputs hold at that moment.

use super::channel::StreamDescriptor;
use super::ports::PortSchema;
use super::waveform::WaveformData;

/// An analysis stage that transforms input waveforms into output waveforms
/// - Inputs are passed per call as [`StreamDescriptor`]s
/// - Outputs are held by the filter until taken or overwritten
pub trait Filter {
    /// Hardware name of this filter instance
    fn name(&self) -> &str;

    /// Name shown to the user
    fn display_name(&self) -> &str {
        self.name()
    }

    /// Human-readable protocol/analysis name
    fn protocol_name(&self) -> &str;

    /// Number of input ports this filter requires
    fn num_inputs(&self) -> usize;

    /// Get schema for all input ports (name + type + index)
    fn input_schema(&self) -> Vec<PortSchema> {
        Vec::new()
    }

    /// Get schema for all output ports (name + type + index)
    fn output_schema(&self) -> Vec<PortSchema> {
        Vec::new()
    }

    /// Whether the stream may be connected to input `i`
    fn validate_channel(&self, i: usize, stream: &StreamDescriptor<'_>) -> bool;

    /// Whether the filter must be configured before it produces anything useful
    fn needs_config(&self) -> bool {
        false
    }

    /// Whether every input is connected, valid and holding data
    fn verify_all_inputs_ok(&self, inputs: &[StreamDescriptor<'_>]) -> bool {
        inputs.len() == self.num_inputs()
            && inputs
                .iter()
                .enumerate()
                .all(|(i, s)| self.validate_channel(i, s) && s.data().is_some())
    }

    /// Derive the default name from the configuration and the inputs
    fn set_default_name(&mut self, inputs: &[StreamDescriptor<'_>]);

    /// Recompute all outputs from the inputs
    fn refresh(&mut self, inputs: &[StreamDescriptor<'_>]);

    /// Waveform currently published on output `stream`
    fn data(&self, stream: usize) -> Option<&WaveformData>;

    /// Hand the waveform on output `stream` to the caller
    fn take_data(&mut self, stream: usize) -> Option<WaveformData>;
}
