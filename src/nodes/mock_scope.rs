//! Offline oscilloscope
//!
//! Provides `MockOscilloscope` - an [`Oscilloscope`] with no hardware behind it. It never
//! triggers and never acquires; its channels come either from a saved configuration or
//! from importing a vendor BIN capture file.
//!
//! BIN imports are decoded completely into a staging capture before anything is committed,
//! so a failed import leaves the instrument exactly as it was.

use super::bin_file::{BinReader, DataHeader, FileHeader, WaveHeader, read_samples};
use super::config::{IdTable, ScopeConfig};
use crate::runtime::channel::{Channel, ChannelType, Unit, default_channel_color};
use crate::runtime::instrument::{CouplingType, InterleaveConflict, Oscilloscope, TriggerMode};
use crate::runtime::waveform::{AnalogWaveform, WaveformData};
use crate::{Result, ScopeError};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error, info, trace};

/// Offline instrument standing in for real hardware
///
/// # Example
/// ```ignore
/// let mut scope = MockOscilloscope::new("", "", "");
/// scope.load_bin("capture.bin")?;
/// scope.autoscale_vertical();
/// ```
#[derive(Debug, Default)]
pub struct MockOscilloscope {
    name: String,
    vendor: String,
    serial: String,

    // Indexed by channel number; configuration may leave holes
    channels: Vec<Option<Channel>>,

    // Per-channel settings
    channels_enabled: HashMap<usize, bool>,
    channel_coupling: HashMap<usize, CouplingType>,
    channel_attenuation: HashMap<usize, f64>,
    channel_bandwidth: HashMap<usize, u32>,
    channel_voltage_range: HashMap<(usize, usize), f32>,
    channel_offset: HashMap<(usize, usize), f32>,
}

/// One decoded waveform waiting to be committed
struct StagedWaveform {
    channel: Channel,
    /// (range, offset) for stream 0, if any sample was decoded
    vertical: Option<(f32, f32)>,
}

/// A fully decoded capture file
struct StagedCapture {
    vendor: &'static str,
    identity: Option<(String, String)>,
    waveforms: Vec<StagedWaveform>,
}

impl MockOscilloscope {
    pub fn new(
        name: impl Into<String>,
        vendor: impl Into<String>,
        serial: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vendor: vendor.into(),
            serial: serial.into(),
            ..Self::default()
        }
    }

    /// Set custom name (builder pattern)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a channel, returning its index
    pub fn add_channel(&mut self, channel: Channel) -> usize {
        self.channels.push(Some(channel));
        self.channels.len() - 1
    }

    /// Iterate over the channels that exist
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter().flatten()
    }

    /// Create channels from the `channels` section of a saved configuration
    ///
    /// The channel list grows to hold the highest index seen. Each configured id is
    /// recorded in `table` so other sections can refer to the channel.
    pub fn load_configuration(&mut self, config: &ScopeConfig, table: &mut IdTable) {
        for cnode in config.channels.values() {
            let index = cnode.index;
            if self.channels.len() < index + 1 {
                self.channels.resize_with(index + 1, || None);
            }

            let channel_type = ChannelType::from_config_str(&cnode.channel_type);
            debug!(
                "Config channel {} ({:?}) at index {}, id {}",
                cnode.name, channel_type, index, cnode.id
            );
            self.channels[index] = Some(Channel::new(
                cnode.name.clone(),
                channel_type,
                cnode.color.clone(),
                index,
                true,
            ));

            table.insert(cnode.id, index);
        }
    }

    /// Import waveforms from an Agilent/Keysight/Rigol BIN capture file
    ///
    /// The file is read into memory in one go and decoded with [`Self::load_bin_bytes`].
    pub fn load_bin<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        trace!("Importing BIN file \"{}\"", path.display());

        let data = std::fs::read(path)?;
        self.load_bin_bytes(&data)
    }

    /// Import waveforms from an in-memory BIN capture
    ///
    /// Each waveform becomes a new analog channel. The vendor comes from the file
    /// signature; name and serial come from the first waveform's hardware id. On
    /// error nothing is changed.
    pub fn load_bin_bytes(&mut self, data: &[u8]) -> Result<()> {
        let capture = match Self::decode_bin(data, self.channels.len()) {
            Ok(capture) => capture,
            Err(e) => {
                error!("BIN import failed: {}", e);
                return Err(e);
            }
        };

        self.vendor = capture.vendor.to_string();
        if let Some((name, serial)) = capture.identity {
            self.name = name;
            self.serial = serial;
        }

        let count = capture.waveforms.len();
        for staged in capture.waveforms {
            let index = staged.channel.index();
            if let Some((range, offset)) = staged.vertical {
                self.set_channel_voltage_range(index, 0, range);
                self.set_channel_offset(index, 0, offset);
            }
            self.channels.push(Some(staged.channel));
        }

        info!(
            "Imported {} waveforms from {} capture ({} {})",
            count, self.vendor, self.name, self.serial
        );
        Ok(())
    }

    /// Fit each analog channel's vertical range and offset to its current data
    ///
    /// Range is 105% of peak-to-peak and the offset centers the waveform. Channels
    /// without analog data on stream 0 are skipped.
    pub fn autoscale_vertical(&mut self) {
        let mut updates = Vec::new();
        for chan in self.channels.iter().flatten() {
            let Some(wfm) = chan.data(0).and_then(WaveformData::as_analog) else {
                continue;
            };
            let Some(&first) = wfm.samples.first() else {
                continue;
            };

            let (vmin, vmax) = wfm
                .samples
                .iter()
                .fold((first, first), |(lo, hi), &s| (lo.min(s), hi.max(s)));

            let range = (vmax - vmin) * 1.05;
            let offset = -((vmax - vmin) / 2.0 + vmin);
            updates.push((chan.index(), range, offset));
        }

        for (index, range, offset) in updates {
            debug!("Autoscale ch{}: range={} offset={}", index, range, offset);
            self.set_channel_voltage_range(index, 0, range);
            self.set_channel_offset(index, 0, offset);
        }
    }

    // ── Associated Functions (Helpers) ──────────────────────────────────

    /// Decode a whole BIN capture. New channels are numbered from `first_index`.
    fn decode_bin(data: &[u8], first_index: usize) -> Result<StagedCapture> {
        let mut reader = BinReader::new(data);

        let fh = FileHeader::read(&mut reader)?;
        let vendor = fh
            .vendor()
            .ok_or(ScopeError::UnknownSignature(fh.magic[0]))?;

        debug!("Vendor:    {}", vendor);
        debug!("Waveforms: {}", fh.count);

        let mut identity: Option<(String, String)> = None;
        let mut waveforms = Vec::new();

        for i in 0..fh.count as usize {
            debug!("Waveform {}:", i + 1);

            let wh = WaveHeader::read(&mut reader)?;
            if i == 0 {
                identity = Some(wh.split_hardware());
            }
            let (frame, serial) = identity
                .as_ref()
                .map(|(n, s)| (n.as_str(), s.as_str()))
                .unwrap_or_default();

            debug!("  Samples:      {}", wh.samples);
            debug!("  Buffers:      {}", wh.buffers);
            debug!("  Type:         {}", wh.wave_type);
            debug!("  Duration:     {:.2} us", wh.duration as f64 * 1e6);
            debug!("  Start:        {:.2} us", wh.start * 1e6);
            debug!("  Interval:     {:.2} ns", wh.interval * 1e9);
            debug!("  Origin:       {:.2} us", wh.origin * 1e6);
            debug!("  Holdoff:      {:.2} ms", wh.holdoff * 1e3);
            debug!("  Sample Rate:  {:.2} Msps", (1.0 / wh.interval) / 1e6);
            debug!("  Frame:        {}", frame);
            debug!("  Serial:       {}", serial);

            let index = first_index + i;
            let mut channel = Channel::new(
                wh.label(),
                ChannelType::Analog,
                default_channel_color(i),
                index,
                true,
            )
            .with_units(Unit::from_bin_code(wh.x_unit), Unit::from_bin_code(wh.y_unit));
            channel.set_default_display_name();

            // Captures are already time-zeroed
            let mut wfm = AnalogWaveform::new();
            wfm.timescale = wh.timescale_fs();
            wfm.start_timestamp = 0;
            wfm.start_femtoseconds = 0;
            wfm.trigger_phase = 0;

            let mut vmin = f32::MAX;
            let mut vmax = -f32::MAX;
            for j in 0..wh.buffers {
                let dh = DataHeader::read(&mut reader)?;
                debug!("  Buffer {}:", j + 1);
                debug!("    Data Type:      {}", dh.data_type);
                debug!("    Sample depth:   {} bits", dh.depth as i32 * 8);
                debug!("    Buffer length:  {} KB", dh.length / 1024);

                read_samples(&mut reader, &dh, wh.samples as usize, |_, value| {
                    let offset = wfm.len() as i64;
                    wfm.push(offset, 1, value);
                    vmax = vmax.max(value);
                    vmin = vmin.min(value);
                })?;
            }

            // Legacy import heuristic: not centered, kept for compatibility
            let vertical = (!wfm.is_empty())
                .then(|| ((vmax - vmin) * 1.5, -((vmax - vmin.abs()) / 2.0)));

            channel.set_data(Some(wfm.into()), 0);
            waveforms.push(StagedWaveform { channel, vertical });
        }

        Ok(StagedCapture {
            vendor,
            identity,
            waveforms,
        })
    }
}

impl Oscilloscope for MockOscilloscope {
    fn name(&self) -> &str {
        &self.name
    }

    fn vendor(&self) -> &str {
        &self.vendor
    }

    fn serial(&self) -> &str {
        &self.serial
    }

    fn driver_name(&self) -> &str {
        "mock"
    }

    fn transport_name(&self) -> &str {
        "null"
    }

    fn transport_connection_string(&self) -> &str {
        ""
    }

    fn id_ping(&self) -> String {
        String::new()
    }

    fn is_offline(&self) -> bool {
        true
    }

    fn channel_count(&self) -> usize {
        self.channels.len()
    }

    fn channel(&self, i: usize) -> Option<&Channel> {
        self.channels.get(i).and_then(Option::as_ref)
    }

    fn channel_mut(&mut self, i: usize) -> Option<&mut Channel> {
        self.channels.get_mut(i).and_then(Option::as_mut)
    }

    fn external_trigger(&self) -> Option<&Channel> {
        None
    }

    fn is_channel_enabled(&self, i: usize) -> bool {
        self.channels_enabled.get(&i).copied().unwrap_or_default()
    }

    fn enable_channel(&mut self, i: usize) {
        self.channels_enabled.insert(i, true);
    }

    fn disable_channel(&mut self, i: usize) {
        self.channels_enabled.insert(i, false);
    }

    fn available_couplings(&self, _i: usize) -> Vec<CouplingType> {
        vec![
            CouplingType::Dc1M,
            CouplingType::Ac1M,
            CouplingType::Dc50,
            CouplingType::Gnd,
        ]
    }

    fn channel_coupling(&self, i: usize) -> CouplingType {
        self.channel_coupling.get(&i).copied().unwrap_or_default()
    }

    fn set_channel_coupling(&mut self, i: usize, coupling: CouplingType) {
        self.channel_coupling.insert(i, coupling);
    }

    fn channel_attenuation(&self, i: usize) -> f64 {
        self.channel_attenuation.get(&i).copied().unwrap_or_default()
    }

    fn set_channel_attenuation(&mut self, i: usize, atten: f64) {
        self.channel_attenuation.insert(i, atten);
    }

    fn channel_bandwidth_limit(&self, i: usize) -> u32 {
        self.channel_bandwidth.get(&i).copied().unwrap_or_default()
    }

    fn set_channel_bandwidth_limit(&mut self, i: usize, limit_mhz: u32) {
        self.channel_bandwidth.insert(i, limit_mhz);
    }

    fn channel_voltage_range(&self, i: usize, stream: usize) -> f32 {
        self.channel_voltage_range
            .get(&(i, stream))
            .copied()
            .unwrap_or_default()
    }

    fn set_channel_voltage_range(&mut self, i: usize, stream: usize, range: f32) {
        self.channel_voltage_range.insert((i, stream), range);
    }

    fn channel_offset(&self, i: usize, stream: usize) -> f32 {
        self.channel_offset
            .get(&(i, stream))
            .copied()
            .unwrap_or_default()
    }

    fn set_channel_offset(&mut self, i: usize, stream: usize, offset: f32) {
        self.channel_offset.insert((i, stream), offset);
    }

    fn poll_trigger(&mut self) -> TriggerMode {
        // We never trigger
        TriggerMode::Stop
    }

    fn acquire_data(&mut self) -> bool {
        false
    }

    fn arm_trigger(&mut self) {}

    fn start_single_trigger(&mut self) {}

    fn start(&mut self) {}

    fn stop(&mut self) {}

    fn force_trigger(&mut self) {}

    fn is_trigger_armed(&self) -> bool {
        false
    }

    fn push_trigger(&mut self) {}

    fn pull_trigger(&mut self) {}

    fn trigger_offset(&self) -> i64 {
        0
    }

    fn set_trigger_offset(&mut self, _offset: i64) {}

    fn sample_rates_non_interleaved(&self) -> Vec<u64> {
        Vec::new()
    }

    fn sample_rates_interleaved(&self) -> Vec<u64> {
        Vec::new()
    }

    fn sample_depths_non_interleaved(&self) -> Vec<u64> {
        Vec::new()
    }

    fn sample_depths_interleaved(&self) -> Vec<u64> {
        Vec::new()
    }

    fn interleave_conflicts(&self) -> Vec<InterleaveConflict> {
        Vec::new()
    }

    fn sample_rate(&self) -> u64 {
        1
    }

    fn set_sample_rate(&mut self, _rate: u64) {}

    fn sample_depth(&self) -> u64 {
        1
    }

    fn set_sample_depth(&mut self, _depth: u64) {}

    fn is_interleaving(&self) -> bool {
        false
    }

    fn set_interleaving(&mut self, _combine: bool) -> bool {
        false
    }
}
