use ndarray::{Array2, ArrayView2};

use crate::error::Result;

pub trait Layer {
    /// Feed a batch of activation rows through the layer. `ix` is this
    /// layer's position in the stack, reported in shape errors.
    fn forward(&self, ix: usize, x: ArrayView2<f64>) -> Result<Array2<f64>>;
    fn width_in(&self) -> usize;
    fn width_out(&self) -> usize;
}
