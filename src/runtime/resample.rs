//! Edge-based resampling of digital signals
//!
//! Produces one sample per clock transition (rising or falling), holding the
//! data value in effect just before that transition. Output offsets are
//! absolute femtoseconds (timescale 1) so inputs with different timescales
//! can be combined.

use super::waveform::{DigitalWaveform, saturate_fs};
use tracing::trace;

/// Sample `data` on every edge of `clock`
///
/// A data transition that lands exactly on a clock edge is not yet visible
/// at that edge. Each output sample lasts until the next one; the last
/// sample has duration 1.
///
/// Edges are compared in 128-bit femtoseconds, so captures of any length
/// latch correctly. Output times past the `i64` range saturate.
pub fn sample_on_any_edges(data: &DigitalWaveform, clock: &DigitalWaveform) -> DigitalWaveform {
    let mut out = DigitalWaveform::with_capacity(clock.len());
    out.timescale = 1;
    out.trigger_phase = 0;
    out.start_timestamp = clock.start_timestamp;
    out.start_femtoseconds = clock.start_femtoseconds;

    if data.is_empty() {
        return out;
    }

    let dlen = data.len();
    let mut ndata = 0;
    for i in 1..clock.len() {
        if clock.samples[i] == clock.samples[i - 1] {
            continue;
        }

        let clkstart = clock.offset_fs_wide(i);
        while ndata + 1 < dlen && data.offset_fs_wide(ndata + 1) < clkstart {
            ndata += 1;
        }

        let offset = saturate_fs(clkstart);
        if let Some(last) = out.len().checked_sub(1) {
            out.durations[last] = offset.saturating_sub(out.offsets[last]);
        }
        out.push(offset, 1, data.samples[ndata]);
    }

    trace!(
        "Resampled {} data samples on {} clock samples -> {} bits",
        dlen,
        clock.len(),
        out.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(timescale: i64, points: &[(i64, bool)]) -> DigitalWaveform {
        let mut w = DigitalWaveform::new();
        w.timescale = timescale;
        for (k, &(offset, value)) in points.iter().enumerate() {
            let next = points.get(k + 1).map(|p| p.0).unwrap_or(offset + 1);
            w.push(offset, next - offset, value);
        }
        w
    }

    #[test]
    fn test_samples_on_both_edges() {
        let data = wave(1, &[(0, true), (25, false), (45, true)]);
        let clock = wave(1, &[(0, false), (10, true), (20, false), (30, true), (40, false), (50, true)]);

        let out = sample_on_any_edges(&data, &clock);
        assert_eq!(out.samples, vec![true, true, false, false, true]);
        assert_eq!(out.offsets, vec![10, 20, 30, 40, 50]);
        assert_eq!(out.durations, vec![10, 10, 10, 10, 1]);
        assert_eq!(out.timescale, 1);
    }

    #[test]
    fn test_transition_on_edge_not_yet_visible() {
        let data = wave(1, &[(0, false), (10, true)]);
        let clock = wave(1, &[(0, false), (10, true), (20, false)]);

        let out = sample_on_any_edges(&data, &clock);
        assert_eq!(out.samples, vec![false, true]);
    }

    #[test]
    fn test_no_edges_means_no_samples() {
        let data = wave(1, &[(0, true)]);
        let clock = wave(1, &[(0, true), (10, true), (20, true)]);
        assert!(sample_on_any_edges(&data, &clock).is_empty());
    }

    #[test]
    fn test_empty_data() {
        let data = DigitalWaveform::new();
        let clock = wave(1, &[(0, false), (10, true)]);
        assert!(sample_on_any_edges(&data, &clock).is_empty());
    }

    #[test]
    fn test_mixed_timescales() {
        // Data in picoseconds, clock in nanoseconds
        let data = wave(1_000, &[(0, false), (1_500, true)]);
        let clock = wave(1_000_000, &[(0, false), (1, true), (2, false)]);

        let out = sample_on_any_edges(&data, &clock);
        assert_eq!(out.offsets, vec![1_000_000, 2_000_000]);
        assert_eq!(out.samples, vec![false, true]);
    }

    #[test]
    fn test_start_time_from_clock() {
        let data = wave(1, &[(0, true)]);
        let mut clock = wave(1, &[(0, false), (10, true)]);
        clock.start_timestamp = 42;
        clock.start_femtoseconds = 7;

        let out = sample_on_any_edges(&data, &clock);
        assert_eq!(out.start_timestamp, 42);
        assert_eq!(out.start_femtoseconds, 7);
    }

    #[test]
    fn test_multi_hour_capture_latches_correctly() {
        // 1 ns timescale, three hours in: absolute fs no longer fits in i64
        let base = 10_800_000_000_000;
        let data = wave(1_000_000, &[(base, false), (base + 15, true), (base + 25, false)]);
        let clock = wave(
            1_000_000,
            &[(base, false), (base + 10, true), (base + 20, false), (base + 30, true)],
        );

        let out = sample_on_any_edges(&data, &clock);
        assert_eq!(out.samples, vec![false, true, false]);
        assert_eq!(out.offsets, vec![i64::MAX; 3]);
        assert_eq!(out.durations, vec![0, 0, 1]);
    }
}
