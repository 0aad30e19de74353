use core::fmt::Debug;

use ndarray::{s, Array2, ArrayView2};
use serde::{self, Deserialize, Serialize};

use crate::error::{Result, ScrawlError};
use crate::f::Activations;
use crate::matrix::WeightMatrix;

use super::types::Layer;

/// Fully connected layer whose weight matrix carries the bias in column 0.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Dense {
    pub w: WeightMatrix,
    pub activation: Activations,
}

impl Dense {
    pub fn new(w: WeightMatrix, activation: Activations) -> Dense {
        Dense { w, activation }
    }
}

/// Prepend a constant 1 column to every row of `x`.
pub fn bias_augment(x: ArrayView2<f64>) -> Array2<f64> {
    let (m, n) = x.dim();
    let mut augmented = Array2::ones((m, n + 1));
    augmented.slice_mut(s![.., 1..]).assign(&x);
    augmented
}

/// Width check, bias column, `a . W^T`, then the activation.
fn feed(
    ix: usize,
    w: &WeightMatrix,
    activation: Activations,
    x: ArrayView2<f64>,
) -> Result<Array2<f64>> {
    if x.ncols() != w.inputs() {
        return Err(ScrawlError::ShapeMismatch {
            layer: ix,
            expected: w.inputs(),
            actual: x.ncols(),
        });
    }

    let z = bias_augment(x).dot(&w.view().reversed_axes());
    Ok(activation.wake().a(z))
}

impl Layer for Dense {
    fn forward(&self, ix: usize, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        feed(ix, &self.w, self.activation, x)
    }

    fn width_in(&self) -> usize {
        self.w.inputs()
    }

    fn width_out(&self) -> usize {
        self.w.outputs()
    }
}

/// A bare weight matrix is a sigmoid layer.
impl Layer for WeightMatrix {
    fn forward(&self, ix: usize, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        feed(ix, self, Activations::Sigmoid, x)
    }

    fn width_in(&self) -> usize {
        self.inputs()
    }

    fn width_out(&self) -> usize {
        self.outputs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::f::sigmoid;
    use ndarray::array;

    #[test]
    fn bias_augment_prepends_ones() {
        let x = array![[2., 3.], [4., 5.]];
        assert_eq!(bias_augment(x.view()), array![[1., 2., 3.], [1., 4., 5.]]);
    }

    #[test]
    fn forward_applies_bias_and_sigmoid() {
        // z0 = 1 + 2*1 - 1*2 = 1, z1 = -1 + 0 + 0.5*2 = 0
        let w = WeightMatrix::from_array(array![[1., 2., -1.], [-1., 0., 0.5]]).unwrap();
        let layer = Dense::new(w, Activations::Sigmoid);

        let a = layer.forward(0, array![[1., 2.]].view()).unwrap();
        assert_eq!(a.dim(), (1, 2));
        assert!((a[[0, 0]] - sigmoid(1.)).abs() < 1e-15);
        assert_eq!(a[[0, 1]], 0.5);
    }

    #[test]
    fn forward_rejects_wrong_width() {
        let w = WeightMatrix::from_array(Array2::zeros((3, 5))).unwrap();
        let layer = Dense::new(w, Activations::Sigmoid);

        let err = layer.forward(1, Array2::zeros((1, 5)).view()).unwrap_err();
        assert!(matches!(
            err,
            ScrawlError::ShapeMismatch {
                layer: 1,
                expected: 4,
                actual: 5
            }
        ));
    }

    #[test]
    fn bare_matrix_matches_sigmoid_dense() {
        let w = WeightMatrix::from_array(array![[0.5, -1., 2.], [0., 1., 1.]]).unwrap();
        let x = array![[0.25, -0.75]];

        let dense = Dense::new(w.clone(), Activations::Sigmoid);
        assert_eq!(w.forward(0, x.view()).unwrap(), dense.forward(0, x.view()).unwrap());
        assert!(matches!(
            w.forward(2, array![[1.]].view()),
            Err(ScrawlError::ShapeMismatch { layer: 2, expected: 2, actual: 1 })
        ));
    }
}
