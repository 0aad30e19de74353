use ndarray::ArrayView1;

use crate::error::{Result, ScrawlError};

/// Below this standard deviation, relative to the magnitude of the mean (or 1
/// for small means), an input is treated as carrying no signal.
pub const VARIANCE_EPSILON: f64 = 1e-12;

/// Rescale `x` to zero mean and unit (population) standard deviation.
///
/// A uniform input, such as a blank canvas, yields the zero vector instead of
/// non-finite values.
pub fn normalize(x: &[f64]) -> Result<Vec<f64>> {
    let view = ArrayView1::from(x);
    let mu = view.mean().ok_or(ScrawlError::EmptyInput)?;
    let sigma = view.std(0.);

    if sigma < VARIANCE_EPSILON * mu.abs().max(1.) {
        return Ok(vec![0.; x.len()]);
    }

    Ok(view.iter().map(|v| (v - mu) / sigma).collect())
}
