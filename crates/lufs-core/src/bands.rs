//! Band-energy reducers over a frequency snapshot.
//!
//! A snapshot of length `n` is split at `floor(0.2n)` and `floor(0.6n)` into
//! bass, mid and high ranges. The three ranges are contiguous and partition
//! `[0, n)`. Each energy is the mean magnitude of its range divided by 255.

use crate::constants::{BASS_CUT, MID_CUT};
use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BandRanges {
    pub bass: Range<usize>,
    pub mid: Range<usize>,
    pub high: Range<usize>,
}

impl BandRanges {
    pub fn for_len(n: usize) -> Self {
        let mid_start = (n as f32 * BASS_CUT).floor() as usize;
        let high_start = ((n as f32 * MID_CUT).floor() as usize).max(mid_start);
        Self {
            bass: 0..mid_start,
            mid: mid_start..high_start,
            high: high_start..n,
        }
    }
}

#[inline]
fn mean_energy(values: &[u8]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u32 = values.iter().map(|&v| v as u32).sum();
    sum as f32 / (values.len() as f32 * 255.0)
}

pub fn average_energy(snapshot: &[u8]) -> f32 {
    mean_energy(snapshot)
}

pub fn bass_energy(snapshot: &[u8]) -> f32 {
    mean_energy(&snapshot[BandRanges::for_len(snapshot.len()).bass])
}

pub fn mid_energy(snapshot: &[u8]) -> f32 {
    mean_energy(&snapshot[BandRanges::for_len(snapshot.len()).mid])
}

pub fn high_energy(snapshot: &[u8]) -> f32 {
    mean_energy(&snapshot[BandRanges::for_len(snapshot.len()).high])
}

/// All four energies of one snapshot, computed from a single read.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandEnergies {
    pub average: f32,
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
}

impl BandEnergies {
    pub fn from_snapshot(snapshot: &[u8]) -> Self {
        let ranges = BandRanges::for_len(snapshot.len());
        Self {
            average: mean_energy(snapshot),
            bass: mean_energy(&snapshot[ranges.bass]),
            mid: mean_energy(&snapshot[ranges.mid]),
            high: mean_energy(&snapshot[ranges.high]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_partition_snapshot_without_gaps() {
        for n in 5..600 {
            let r = BandRanges::for_len(n);
            assert_eq!(r.bass.start, 0);
            assert_eq!(r.bass.end, r.mid.start, "gap at n={n}");
            assert_eq!(r.mid.end, r.high.start, "gap at n={n}");
            assert_eq!(r.high.end, n);
            assert!(!r.bass.is_empty() && !r.mid.is_empty() && !r.high.is_empty());
            assert_eq!(r.bass.len() + r.mid.len() + r.high.len(), n);
        }
    }

    #[test]
    fn ranges_use_floor_cut_points() {
        let r = BandRanges::for_len(512);
        assert_eq!(r.bass, 0..102);
        assert_eq!(r.mid, 102..307);
        assert_eq!(r.high, 307..512);

        let r = BandRanges::for_len(128);
        assert_eq!(r.bass, 0..25);
        assert_eq!(r.mid, 25..76);
        assert_eq!(r.high, 76..128);
    }

    #[test]
    fn average_of_extremes() {
        assert_eq!(average_energy(&[0u8; 128]), 0.0);
        assert_eq!(average_energy(&[255u8; 128]), 1.0);
    }

    #[test]
    fn bands_pick_their_own_ranges() {
        let mut snap = vec![0u8; 100];
        for v in &mut snap[0..20] {
            *v = 255;
        }
        assert_eq!(bass_energy(&snap), 1.0);
        assert_eq!(mid_energy(&snap), 0.0);
        assert_eq!(high_energy(&snap), 0.0);
        assert!((average_energy(&snap) - 0.2).abs() < 1e-6);

        let e = BandEnergies::from_snapshot(&snap);
        assert_eq!(e.bass, 1.0);
        assert_eq!(e.mid, 0.0);
        assert_eq!(e.high, 0.0);
    }

    #[test]
    fn tiny_snapshots_do_not_produce_nan() {
        for n in 0..5 {
            let snap = vec![200u8; n];
            let e = BandEnergies::from_snapshot(&snap);
            for v in [e.average, e.bass, e.mid, e.high] {
                assert!(v.is_finite());
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
