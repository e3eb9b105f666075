//! Core waveform types
//!
//! A waveform is three parallel sequences (offsets, durations, samples). Sample `i`
//! spans `[offset[i], offset[i] + duration[i])` in units of `timescale` femtoseconds.
//! Dense-packed waveforms leave offsets/durations implicit (offset = index, duration = 1)
//! when read through [`Waveform::offset`] and [`Waveform::duration`].

use std::fmt;

/// Femtoseconds per second
pub const FS_PER_SECOND: i64 = 1_000_000_000_000_000;

/// Time series of samples of type `T`
#[derive(Clone, Debug, PartialEq)]
pub struct Waveform<T> {
    /// Duration of one offset unit, in femtoseconds
    pub timescale: i64,
    /// Whole seconds since the epoch at sample 0
    pub start_timestamp: i64,
    /// Sub-second remainder of the start time, `0 <= value < 1e15`
    pub start_femtoseconds: i64,
    /// Offset of the trigger instant relative to sample 0, in femtoseconds
    pub trigger_phase: i64,
    /// Offsets/durations are implicit (offset = index, duration = 1)
    pub dense_packed: bool,
    pub offsets: Vec<i64>,
    pub durations: Vec<i64>,
    pub samples: Vec<T>,
}

/// Analog sample series
pub type AnalogWaveform = Waveform<f32>;

/// Digital sample series
pub type DigitalWaveform = Waveform<bool>;

impl<T> Default for Waveform<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Waveform<T> {
    /// Create an empty waveform with a 1 fs timescale
    pub fn new() -> Self {
        Self {
            timescale: 1,
            start_timestamp: 0,
            start_femtoseconds: 0,
            trigger_phase: 0,
            dense_packed: false,
            offsets: Vec::new(),
            durations: Vec::new(),
            samples: Vec::new(),
        }
    }

    /// Create an empty waveform with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            offsets: Vec::with_capacity(capacity),
            durations: Vec::with_capacity(capacity),
            samples: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Append one sample
    pub fn push(&mut self, offset: i64, duration: i64, value: T) {
        self.offsets.push(offset);
        self.durations.push(duration);
        self.samples.push(value);
    }

    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the waveform holds no samples
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples, keeping timing metadata
    pub fn clear(&mut self) {
        self.offsets.clear();
        self.durations.clear();
        self.samples.clear();
    }

    /// Offset of sample `i` in timescale units
    #[inline]
    pub fn offset(&self, i: usize) -> i64 {
        if self.dense_packed {
            i as i64
        } else {
            self.offsets[i]
        }
    }

    /// Duration of sample `i` in timescale units
    #[inline]
    pub fn duration(&self, i: usize) -> i64 {
        if self.dense_packed { 1 } else { self.durations[i] }
    }

    /// Absolute time of sample `i` relative to the trigger, in femtoseconds
    ///
    /// Computed in 128 bits; never overflows for any offset and timescale.
    #[inline]
    pub fn offset_fs_wide(&self, i: usize) -> i128 {
        i128::from(self.offset(i)) * i128::from(self.timescale) + i128::from(self.trigger_phase)
    }

    /// Absolute time of sample `i` in femtoseconds, saturated to the `i64` range
    #[inline]
    pub fn offset_fs(&self, i: usize) -> i64 {
        saturate_fs(self.offset_fs_wide(i))
    }

    /// Set the absolute start time, normalising femtoseconds into `[0, 1e15)`
    pub fn set_start_time(&mut self, seconds: i64, femtoseconds: i64) {
        self.start_timestamp = seconds + femtoseconds.div_euclid(FS_PER_SECOND);
        self.start_femtoseconds = femtoseconds.rem_euclid(FS_PER_SECOND);
    }
}

/// Clamp a 128-bit femtosecond time into `i64`
#[inline]
pub fn saturate_fs(fs: i128) -> i64 {
    i64::try_from(fs).unwrap_or(if fs < 0 { i64::MIN } else { i64::MAX })
}

impl<T: Clone + Default> Waveform<T> {
    /// Grow or shrink to `len` samples; new samples are zeroed
    pub fn resize(&mut self, len: usize) {
        self.offsets.resize(len, 0);
        self.durations.resize(len, 0);
        self.samples.resize(len, T::default());
    }
}

/// A waveform stored on a stream, tagged by sample kind
#[derive(Clone, Debug, PartialEq)]
pub enum WaveformData {
    Analog(AnalogWaveform),
    Digital(DigitalWaveform),
}

impl WaveformData {
    pub fn len(&self) -> usize {
        match self {
            WaveformData::Analog(w) => w.len(),
            WaveformData::Digital(w) => w.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_analog(&self) -> Option<&AnalogWaveform> {
        match self {
            WaveformData::Analog(w) => Some(w),
            WaveformData::Digital(_) => None,
        }
    }

    pub fn as_digital(&self) -> Option<&DigitalWaveform> {
        match self {
            WaveformData::Digital(w) => Some(w),
            WaveformData::Analog(_) => None,
        }
    }

}

impl From<AnalogWaveform> for WaveformData {
    fn from(w: AnalogWaveform) -> Self {
        WaveformData::Analog(w)
    }
}

impl From<DigitalWaveform> for WaveformData {
    fn from(w: DigitalWaveform) -> Self {
        WaveformData::Digital(w)
    }
}

impl fmt::Display for WaveformData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (kind, timescale) = match self {
            WaveformData::Analog(w) => ("analog", w.timescale),
            WaveformData::Digital(w) => ("digital", w.timescale),
        };
        write!(
            f,
            "Waveform[{}, samples={}, timescale={}fs]",
            kind,
            self.len(),
            timescale
        )
    }
}
