use ndarray::ArrayView1;
use ndarray_stats::errors::MinMaxError;
use ndarray_stats::QuantileExt;

use crate::error::{Result, ScrawlError};

/// Index and value of the first maximum in `d`.
pub fn arg_max(d: &[f64]) -> Result<(usize, f64)> {
    let view = ArrayView1::from(d);
    let ix = view.argmax().map_err(|e| match e {
        MinMaxError::EmptyInput => ScrawlError::EmptyInput,
        MinMaxError::UndefinedOrder => ScrawlError::UndefinedOrder,
    })?;

    Ok((ix, d[ix]))
}
