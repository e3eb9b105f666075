//! PRBS checker: compares a clocked bit stream against a local LFSR
//!
//! Flow per refresh:
//!   1. Resample Data on every Clock edge into one bit per unit interval
//!   2. Load the first `degree` bits into the shift register as the seed
//!   3. For each following bit, advance the register and flag a mismatch
//!
//! Once seeded the register follows its own prediction, so a single corrupted
//! bit produces a single error instead of a burst.

use super::types::Polynomial;
use crate::runtime::channel::{Channel, ChannelType, StreamDescriptor, Unit};
use crate::runtime::node::Filter;
use crate::runtime::parameter::{FilterParameter, ParameterType};
use crate::runtime::ports::{PortDirection, PortSchema};
use crate::runtime::resample::sample_on_any_edges;
use crate::runtime::waveform::{DigitalWaveform, WaveformData};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Name of the polynomial parameter
pub const POLYNOMIAL_PARAM: &str = "Polynomial";

/// PRBS checker filter
///
/// Inputs: data and clock, both digital streams
/// Output: dense-packed digital stream, true where a bit did not match
pub struct PrbsChecker {
    output: Channel,
    parameters: BTreeMap<String, FilterParameter>,
}

impl PrbsChecker {
    /// Create a checker for PRBS-7
    pub fn new(color: impl Into<String>) -> Self {
        let mut poly = FilterParameter::new(ParameterType::Enum, Unit::Counts);
        for p in Polynomial::ALL {
            poly.add_enum_value(p.label(), p.code());
        }
        poly.set_int_val(Polynomial::Prbs7.code());

        let mut parameters = BTreeMap::new();
        parameters.insert(POLYNOMIAL_PARAM.to_string(), poly);

        Self {
            output: Channel::new("PRBSCheck", ChannelType::Digital, color, 0, false),
            parameters,
        }
    }

    /// With custom name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.output.rename(name);
        self
    }

    /// Select the polynomial (builder pattern)
    pub fn with_polynomial(mut self, poly: Polynomial) -> Self {
        self.set_polynomial(poly);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&FilterParameter> {
        self.parameters.get(name)
    }

    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut FilterParameter> {
        self.parameters.get_mut(name)
    }

    /// Selected polynomial. Codes without a polynomial fall back to PRBS-31.
    pub fn polynomial(&self) -> Polynomial {
        self.parameters
            .get(POLYNOMIAL_PARAM)
            .and_then(|p| Polynomial::from_code(p.int_val()))
            .unwrap_or(Polynomial::Prbs31)
    }

    pub fn set_polynomial(&mut self, poly: Polynomial) {
        if let Some(p) = self.parameters.get_mut(POLYNOMIAL_PARAM) {
            p.set_int_val(poly.code());
        }
    }

    /// Output channel holding the error stream
    pub fn channel(&self) -> &Channel {
        &self.output
    }

    /// Resample and check. Returns None when there is nothing to check yet.
    fn check(&mut self, din: &DigitalWaveform, clkin: &DigitalWaveform) -> Option<DigitalWaveform> {
        let data = sample_on_any_edges(din, clkin);

        let poly = self.polynomial();
        let statesize = poly.degree();

        // Need the seed plus at least one bit to check
        let len = data.len();
        if len <= statesize {
            trace!(
                "{}: {} bits is not enough to seed {}",
                self.output.hwname(),
                len,
                poly.label()
            );
            return None;
        }

        let mut dout = match self.output.take_data(0) {
            Some(WaveformData::Digital(w)) => w,
            _ => DigitalWaveform::new(),
        };
        dout.timescale = 1;
        dout.trigger_phase = 0;
        dout.start_timestamp = data.start_timestamp;
        dout.start_femtoseconds = data.start_femtoseconds;
        dout.dense_packed = true;
        dout.resize(len);

        // Read the first N bits of state into the seed
        let mut prbs: u32 = 0;
        for i in 0..statesize {
            prbs = (prbs << 1) | u32::from(data.samples[i]);

            dout.offsets[i] = data.offsets[i];
            dout.durations[i] = data.durations[i];
            dout.samples[i] = false;
        }

        let mut errors = 0usize;
        for i in statesize..len {
            dout.offsets[i] = data.offsets[i];
            dout.durations[i] = data.durations[i];

            let expected = poly.run(&mut prbs);
            let mismatch = expected != data.samples[i];
            dout.samples[i] = mismatch;
            errors += usize::from(mismatch);
        }

        debug!(
            "{}: checked {} bits against {}, {} errors",
            self.output.hwname(),
            len - statesize,
            poly.label(),
            errors
        );
        Some(dout)
    }
}

impl Filter for PrbsChecker {
    fn name(&self) -> &str {
        self.output.hwname()
    }

    fn display_name(&self) -> &str {
        self.output.display_name()
    }

    fn protocol_name(&self) -> &str {
        "PRBS Checker"
    }

    fn num_inputs(&self) -> usize {
        2
    }

    fn input_schema(&self) -> Vec<PortSchema> {
        vec![
            PortSchema::new("Data", ChannelType::Digital, 0, PortDirection::Input),
            PortSchema::new("Clock", ChannelType::Digital, 1, PortDirection::Input),
        ]
    }

    fn output_schema(&self) -> Vec<PortSchema> {
        vec![PortSchema::new(
            "errors",
            ChannelType::Digital,
            0,
            PortDirection::Output,
        )]
    }

    fn validate_channel(&self, i: usize, stream: &StreamDescriptor<'_>) -> bool {
        i < 2 && stream.channel_type() == Some(ChannelType::Digital)
    }

    fn needs_config(&self) -> bool {
        true
    }

    fn set_default_name(&mut self, inputs: &[StreamDescriptor<'_>]) {
        let source = inputs.first().map(StreamDescriptor::display_name).unwrap_or("");
        let name = format!("{}Check({})", self.polynomial().short_name(), source);
        self.output.rename(name);
    }

    fn refresh(&mut self, inputs: &[StreamDescriptor<'_>]) {
        if !self.verify_all_inputs_ok(inputs) {
            self.output.set_data(None, 0);
            return;
        }

        let din = inputs[0].data().and_then(WaveformData::as_digital);
        let clkin = inputs[1].data().and_then(WaveformData::as_digital);
        let result = match (din, clkin) {
            (Some(din), Some(clkin)) => self.check(din, clkin),
            _ => None,
        };

        self.output.set_data(result.map(WaveformData::from), 0);
    }

    fn data(&self, stream: usize) -> Option<&WaveformData> {
        self.output.data(stream)
    }

    fn take_data(&mut self, stream: usize) -> Option<WaveformData> {
        self.output.take_data(stream)
    }
}
