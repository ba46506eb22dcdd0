//! Display normalization for SAR backscatter intensities.
//!
//! Intensities are clipped to their 0.1st/99.9th percentiles and linearly
//! rescaled into a target range, typically `[0, 255]` for an 8-bit image.

use crate::readers::Raster;

/// Lower percentile used for the display clip.
pub const LOWER_PERCENTILE: f64 = 0.1;
/// Upper percentile used for the display clip.
pub const UPPER_PERCENTILE: f64 = 99.9;

/// Percentile `q` (0..=100) of the finite values, with linear interpolation
/// between the closest ranks. Returns `NaN` when no finite value exists.
pub fn nan_percentile(values: &[f32], q: f64) -> f64 {
    let mut finite: Vec<f64> = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|&v| v as f64)
        .collect();

    if finite.is_empty() {
        return f64::NAN;
    }

    finite.sort_by(|a, b| a.total_cmp(b));

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (finite.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    finite[lower] + (finite[upper] - finite[lower]) * weight
}

/// Clips `raster` to its percentile range and rescales it into
/// `[new_min, new_max]`.
///
/// `NaN` cells are skipped by the percentile computation but are not
/// touched by the clip, so they come out as `NaN`. A raster whose finite
/// values are all equal divides zero by zero and yields `NaN` everywhere.
pub fn normalize(mut raster: Raster, new_min: f32, new_max: f32) -> Raster {
    let x_min = nan_percentile(&raster.buffer, LOWER_PERCENTILE);
    let x_max = nan_percentile(&raster.buffer, UPPER_PERCENTILE);

    let span = x_max - x_min;
    let target_span = new_max as f64 - new_min as f64;

    log::debug!(
        "normalizing {}x{} raster, clip range [{}, {}]",
        raster.width,
        raster.height,
        x_min,
        x_max
    );

    for value in raster.buffer.iter_mut() {
        let mut v = *value as f64;
        if v < x_min {
            v = x_min;
        }
        if v > x_max {
            v = x_max;
        }
        *value = ((v - x_min) / span * target_span + new_min as f64) as f32;
    }

    raster
}
