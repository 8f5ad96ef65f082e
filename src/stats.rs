//! Statistical helpers for the panel renderers.
//!
//! Extents run through trueno's SIMD reductions; binning is plain count
//! accumulation. The marginal panels and the joint density panel share the
//! same axis domains, so binning always happens over a caller-supplied
//! domain rather than the data's own extent.

use crate::error::{Error, Result};
use trueno::Vector;

/// Fraction of the data range added on each side of an axis domain.
pub const DOMAIN_PADDING: f32 = 0.05;

/// Minimum and maximum of a data slice.
///
/// # Errors
///
/// Returns an error if the slice is empty.
pub fn extent(data: &[f32]) -> Result<(f32, f32)> {
    if data.is_empty() {
        return Err(Error::EmptyData);
    }

    let vec = Vector::from_vec(data.to_vec());
    let min = vec.min().unwrap_or(data[0]);
    let max = vec.max().unwrap_or(data[0]);

    Ok((min, max))
}

/// Pad a domain by a fraction of its width.
///
/// A degenerate domain (min == max) is widened by half a unit per side so
/// constant data still spans a drawable range.
#[must_use]
pub fn padded_domain(min: f32, max: f32, padding: f32) -> (f32, f32) {
    if (max - min).abs() < f32::EPSILON {
        return (min - 0.5, max + 0.5);
    }

    let pad = (max - min) * padding;
    (min - pad, max + pad)
}

/// Bin count by Sturges' rule: `ceil(log2(n) + 1)`.
#[must_use]
pub fn sturges_bins(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    (((n as f32).log2().ceil() + 1.0) as usize).max(1)
}

/// Count values into `bins` equal-width bins over `domain`.
///
/// Values outside the domain are skipped, which is what an explicit axis
/// range override means for a histogram.
#[must_use]
pub fn histogram_counts(data: &[f32], domain: (f32, f32), bins: usize) -> Vec<usize> {
    let bins = bins.max(1);
    let mut counts = vec![0usize; bins];

    let width = domain.1 - domain.0;
    if width <= 0.0 {
        return counts;
    }

    let bin_width = width / bins as f32;
    for &value in data {
        if value < domain.0 || value > domain.1 {
            continue;
        }
        let bin = ((value - domain.0) / bin_width).floor() as usize;
        counts[bin.min(bins - 1)] += 1;
    }

    counts
}

/// Count (x, y) pairs into a `gridsize` x `gridsize` matrix over the given
/// domains.
///
/// The matrix is row-major with row 0 at the low end of the y domain; the
/// renderer flips rows when mapping to screen coordinates. Pairs outside
/// either domain are skipped.
#[must_use]
pub fn bin2d_counts(
    xs: &[f32],
    ys: &[f32],
    domain_x: (f32, f32),
    domain_y: (f32, f32),
    gridsize: usize,
) -> Vec<usize> {
    let gridsize = gridsize.max(1);
    let mut counts = vec![0usize; gridsize * gridsize];

    let width = domain_x.1 - domain_x.0;
    let height = domain_y.1 - domain_y.0;
    if width <= 0.0 || height <= 0.0 {
        return counts;
    }

    let cell_w = width / gridsize as f32;
    let cell_h = height / gridsize as f32;

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        if x < domain_x.0 || x > domain_x.1 || y < domain_y.0 || y > domain_y.1 {
            continue;
        }
        let gx = (((x - domain_x.0) / cell_w).floor() as usize).min(gridsize - 1);
        let gy = (((y - domain_y.0) / cell_h).floor() as usize).min(gridsize - 1);
        counts[gy * gridsize + gx] += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent() {
        let (min, max) = extent(&[3.0, 1.0, 4.0, 1.5, 9.0]).unwrap();
        assert!((min - 1.0).abs() < f32::EPSILON);
        assert!((max - 9.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_extent_empty() {
        assert!(extent(&[]).is_err());
    }

    #[test]
    fn test_extent_single() {
        let (min, max) = extent(&[2.5]).unwrap();
        assert!((min - 2.5).abs() < f32::EPSILON);
        assert!((max - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_padded_domain() {
        let (min, max) = padded_domain(0.0, 10.0, 0.05);
        assert!((min + 0.5).abs() < 0.001);
        assert!((max - 10.5).abs() < 0.001);
    }

    #[test]
    fn test_padded_domain_degenerate() {
        let (min, max) = padded_domain(5.0, 5.0, 0.05);
        assert!((min - 4.5).abs() < 0.001);
        assert!((max - 5.5).abs() < 0.001);
    }

    #[test]
    fn test_sturges_bins() {
        // log2(100) + 1 = 7.64 -> ceil -> 8
        assert_eq!(sturges_bins(100), 8);
        assert_eq!(sturges_bins(1), 1);
        assert_eq!(sturges_bins(0), 1);
    }

    #[test]
    fn test_histogram_counts_sum() {
        let data = vec![0.5, 1.5, 2.5, 3.5, 2.0, 2.2];
        let counts = histogram_counts(&data, (0.0, 4.0), 4);
        assert_eq!(counts.iter().sum::<usize>(), 6);
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[2], 3); // 2.5, 2.0, 2.2
    }

    #[test]
    fn test_histogram_counts_skips_outside() {
        let data = vec![-1.0, 0.5, 5.0];
        let counts = histogram_counts(&data, (0.0, 1.0), 2);
        assert_eq!(counts.iter().sum::<usize>(), 1);
    }

    #[test]
    fn test_histogram_counts_max_value_in_last_bin() {
        let data = vec![4.0];
        let counts = histogram_counts(&data, (0.0, 4.0), 4);
        assert_eq!(counts[3], 1);
    }

    #[test]
    fn test_bin2d_counts_sum() {
        let xs = vec![0.1, 0.9, 0.5, 0.5];
        let ys = vec![0.1, 0.9, 0.5, 0.6];
        let counts = bin2d_counts(&xs, &ys, (0.0, 1.0), (0.0, 1.0), 5);
        assert_eq!(counts.len(), 25);
        assert_eq!(counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn test_bin2d_counts_corner_placement() {
        let xs = vec![0.0, 1.0];
        let ys = vec![0.0, 1.0];
        let counts = bin2d_counts(&xs, &ys, (0.0, 1.0), (0.0, 1.0), 2);
        // (0,0) lands in the low-y low-x cell, (1,1) in the high-y high-x cell
        assert_eq!(counts[0], 1);
        assert_eq!(counts[3], 1);
    }

    #[test]
    fn test_bin2d_counts_skips_outside() {
        let xs = vec![2.0, 0.5];
        let ys = vec![0.5, 0.5];
        let counts = bin2d_counts(&xs, &ys, (0.0, 1.0), (0.0, 1.0), 3);
        assert_eq!(counts.iter().sum::<usize>(), 1);
    }
}
