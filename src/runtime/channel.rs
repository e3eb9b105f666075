//! Channels, streams and units

use super::waveform::WaveformData;
use std::fmt;

/// Kind of data a channel carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelType {
    Analog,
    Digital,
    Trigger,
    /// Anything else (protocol events, buses, ...)
    #[default]
    Complex,
}

impl ChannelType {
    /// Map a configuration type string; unrecognised strings become `Complex`
    pub fn from_config_str(s: &str) -> Self {
        match s {
            "analog" => ChannelType::Analog,
            "digital" => ChannelType::Digital,
            "trigger" => ChannelType::Trigger,
            _ => ChannelType::Complex,
        }
    }
}

/// Unit of measure for a channel axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Counts,
    Volts,
    Femtoseconds,
    Amps,
    Decibels,
    Hertz,
}

impl Unit {
    /// Unit code as stored in BIN capture headers. Unknown codes read as counts.
    pub fn from_bin_code(code: u32) -> Self {
        match code {
            1 => Unit::Volts,
            2 => Unit::Femtoseconds,
            4 => Unit::Amps,
            5 => Unit::Decibels,
            6 => Unit::Hertz,
            _ => Unit::Counts,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Unit::Counts => "counts",
            Unit::Volts => "V",
            Unit::Femtoseconds => "fs",
            Unit::Amps => "A",
            Unit::Decibels => "dB",
            Unit::Hertz => "Hz",
        };
        f.write_str(s)
    }
}

const DEFAULT_COLORS: [&str; 8] = [
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
];

/// Palette color for the `i`th channel
pub fn default_channel_color(i: usize) -> &'static str {
    DEFAULT_COLORS[i % DEFAULT_COLORS.len()]
}

/// A named source of waveforms with one or more output streams
#[derive(Debug, Clone)]
pub struct Channel {
    hwname: String,
    display_name: String,
    channel_type: ChannelType,
    color: String,
    index: usize,
    physical: bool,
    x_unit: Unit,
    y_unit: Unit,
    streams: Vec<Option<WaveformData>>,
}

impl Channel {
    /// Create a channel with a single, empty stream
    pub fn new(
        hwname: impl Into<String>,
        channel_type: ChannelType,
        color: impl Into<String>,
        index: usize,
        physical: bool,
    ) -> Self {
        let hwname = hwname.into();
        Self {
            display_name: hwname.clone(),
            hwname,
            channel_type,
            color: color.into(),
            index,
            physical,
            x_unit: Unit::Femtoseconds,
            y_unit: Unit::Volts,
            streams: vec![None],
        }
    }

    /// Set axis units (builder pattern)
    pub fn with_units(mut self, x_unit: Unit, y_unit: Unit) -> Self {
        self.x_unit = x_unit;
        self.y_unit = y_unit;
        self
    }

    pub fn hwname(&self) -> &str {
        &self.hwname
    }

    /// Set both the hardware and display name
    pub fn rename(&mut self, name: impl Into<String>) {
        self.hwname = name.into();
        self.display_name = self.hwname.clone();
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.display_name = name.into();
    }

    /// Reset the display name to the hardware name
    pub fn set_default_display_name(&mut self) {
        self.display_name = self.hwname.clone();
    }

    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_physical(&self) -> bool {
        self.physical
    }

    pub fn x_unit(&self) -> Unit {
        self.x_unit
    }

    pub fn y_unit(&self) -> Unit {
        self.y_unit
    }

    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /// Waveform currently held by `stream`, if any
    pub fn data(&self, stream: usize) -> Option<&WaveformData> {
        self.streams.get(stream).and_then(Option::as_ref)
    }

    /// Replace the waveform on `stream`, growing the stream list if needed
    pub fn set_data(&mut self, data: Option<WaveformData>, stream: usize) {
        if self.streams.len() <= stream {
            self.streams.resize(stream + 1, None);
        }
        self.streams[stream] = data;
    }

    /// Remove and return the waveform on `stream`
    pub fn take_data(&mut self, stream: usize) -> Option<WaveformData> {
        self.streams.get_mut(stream).and_then(Option::take)
    }
}

/// Reference to one stream of a channel, used as a filter input
#[derive(Debug, Clone, Copy)]
pub struct StreamDescriptor<'a> {
    pub channel: Option<&'a Channel>,
    pub stream: usize,
}

impl<'a> StreamDescriptor<'a> {
    pub fn new(channel: &'a Channel, stream: usize) -> Self {
        Self {
            channel: Some(channel),
            stream,
        }
    }

    /// Descriptor with no upstream source
    pub fn none() -> Self {
        Self {
            channel: None,
            stream: 0,
        }
    }

    pub fn data(&self) -> Option<&'a WaveformData> {
        self.channel.and_then(|c| c.data(self.stream))
    }

    pub fn channel_type(&self) -> Option<ChannelType> {
        self.channel.map(Channel::channel_type)
    }

    /// Display name of the source, empty when unconnected
    pub fn display_name(&self) -> &'a str {
        self.channel.map(Channel::display_name).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::waveform::DigitalWaveform;

    #[test]
    fn test_channel_type_from_config_str() {
        assert_eq!(ChannelType::from_config_str("analog"), ChannelType::Analog);
        assert_eq!(ChannelType::from_config_str("digital"), ChannelType::Digital);
        assert_eq!(ChannelType::from_config_str("trigger"), ChannelType::Trigger);
        assert_eq!(ChannelType::from_config_str("Analog"), ChannelType::Complex);
        assert_eq!(ChannelType::from_config_str("eye"), ChannelType::Complex);
    }

    #[test]
    fn test_unit_codes() {
        assert_eq!(Unit::from_bin_code(0), Unit::Counts);
        assert_eq!(Unit::from_bin_code(1), Unit::Volts);
        assert_eq!(Unit::from_bin_code(2), Unit::Femtoseconds);
        assert_eq!(Unit::from_bin_code(3), Unit::Counts);
        assert_eq!(Unit::from_bin_code(4), Unit::Amps);
        assert_eq!(Unit::from_bin_code(5), Unit::Decibels);
        assert_eq!(Unit::from_bin_code(6), Unit::Hertz);
        assert_eq!(Unit::from_bin_code(99), Unit::Counts);
    }

    #[test]
    fn test_default_color_wraps() {
        assert_eq!(default_channel_color(0), default_channel_color(8));
        assert_ne!(default_channel_color(0), default_channel_color(1));
    }

    #[test]
    fn test_set_data_grows_streams() {
        let mut chan = Channel::new("CH1", ChannelType::Digital, "#ffffff", 0, true);
        assert_eq!(chan.stream_count(), 1);
        assert!(chan.data(0).is_none());

        chan.set_data(Some(DigitalWaveform::new().into()), 2);
        assert_eq!(chan.stream_count(), 3);
        assert!(chan.data(2).is_some());
        assert!(chan.data(1).is_none());

        assert!(chan.take_data(2).is_some());
        assert!(chan.data(2).is_none());
    }

    #[test]
    fn test_stream_descriptor() {
        let mut chan = Channel::new("D0", ChannelType::Digital, "#ffffff", 0, true);
        chan.set_display_name("data");
        chan.set_data(Some(DigitalWaveform::new().into()), 0);

        let desc = StreamDescriptor::new(&chan, 0);
        assert_eq!(desc.display_name(), "data");
        assert_eq!(desc.channel_type(), Some(ChannelType::Digital));
        assert!(desc.data().is_some());

        let none = StreamDescriptor::none();
        assert!(none.data().is_none());
        assert_eq!(none.display_name(), "");
    }
}
