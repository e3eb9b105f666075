//! Oscilloscope instrument contract
//!
//! Acquisition drivers implement [`Oscilloscope`]. Channels are addressed by
//! zero-based index; vertical settings are per (channel, stream).

use super::channel::Channel;

/// Trigger state reported by [`Oscilloscope::poll_trigger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    Run,
    Stop,
    Triggered,
    Wait,
    Auto,
}

/// Front-end coupling of an input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CouplingType {
    #[default]
    Dc1M,
    Ac1M,
    Dc50,
    Ac50,
    Gnd,
    Synthetic,
}

/// Pair of channels that cannot both be enabled while interleaving
pub type InterleaveConflict = (usize, usize);

/// An instrument that produces waveforms on channels
pub trait Oscilloscope {
    // ── Identity ───────────────────────────────────────────────────────

    fn name(&self) -> &str;
    fn vendor(&self) -> &str;
    fn serial(&self) -> &str;
    fn driver_name(&self) -> &str;
    fn transport_name(&self) -> &str;
    fn transport_connection_string(&self) -> &str;

    /// Identification string returned by the hardware
    fn id_ping(&self) -> String;

    /// True if no hardware is attached
    fn is_offline(&self) -> bool;

    // ── Channels ───────────────────────────────────────────────────────

    fn channel_count(&self) -> usize;
    fn channel(&self, i: usize) -> Option<&Channel>;
    fn channel_mut(&mut self, i: usize) -> Option<&mut Channel>;
    fn external_trigger(&self) -> Option<&Channel>;

    fn is_channel_enabled(&self, i: usize) -> bool;
    fn enable_channel(&mut self, i: usize);
    fn disable_channel(&mut self, i: usize);

    fn available_couplings(&self, i: usize) -> Vec<CouplingType>;
    fn channel_coupling(&self, i: usize) -> CouplingType;
    fn set_channel_coupling(&mut self, i: usize, coupling: CouplingType);
    fn channel_attenuation(&self, i: usize) -> f64;
    fn set_channel_attenuation(&mut self, i: usize, atten: f64);
    fn channel_bandwidth_limit(&self, i: usize) -> u32;
    fn set_channel_bandwidth_limit(&mut self, i: usize, limit_mhz: u32);
    fn channel_voltage_range(&self, i: usize, stream: usize) -> f32;
    fn set_channel_voltage_range(&mut self, i: usize, stream: usize, range: f32);
    fn channel_offset(&self, i: usize, stream: usize) -> f32;
    fn set_channel_offset(&mut self, i: usize, stream: usize, offset: f32);

    // ── Triggering ─────────────────────────────────────────────────────

    fn poll_trigger(&mut self) -> TriggerMode;

    /// Pull pending waveforms into the channels. Returns true if new data arrived.
    fn acquire_data(&mut self) -> bool;

    fn arm_trigger(&mut self);
    fn start_single_trigger(&mut self);
    fn start(&mut self);
    fn stop(&mut self);
    fn force_trigger(&mut self);
    fn is_trigger_armed(&self) -> bool;
    fn push_trigger(&mut self);
    fn pull_trigger(&mut self);
    fn trigger_offset(&self) -> i64;
    fn set_trigger_offset(&mut self, offset: i64);

    // ── Timebase ───────────────────────────────────────────────────────

    fn sample_rates_non_interleaved(&self) -> Vec<u64>;
    fn sample_rates_interleaved(&self) -> Vec<u64>;
    fn sample_depths_non_interleaved(&self) -> Vec<u64>;
    fn sample_depths_interleaved(&self) -> Vec<u64>;
    fn interleave_conflicts(&self) -> Vec<InterleaveConflict>;
    fn sample_rate(&self) -> u64;
    fn set_sample_rate(&mut self, rate: u64);
    fn sample_depth(&self) -> u64;
    fn set_sample_depth(&mut self, depth: u64);
    fn is_interleaving(&self) -> bool;

    /// Request interleaving. Returns the resulting interleave state.
    fn set_interleaving(&mut self, combine: bool) -> bool;
}
