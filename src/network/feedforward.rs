use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::{self, Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScrawlError};
use crate::f::Activations;
use crate::layers::{Dense, Layer};
use crate::matrix::WeightMatrix;
use crate::prediction::Prediction;

pub type Web = Vec<Dense>;

/// A validated stack of sigmoid layers. Serialized as its weight matrices in
/// layer order; deserializing re-runs the checks of [`Network::new`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(try_from = "Vec<WeightMatrix>", into = "Vec<WeightMatrix>")]
pub struct Network {
    web: Web,
}

impl Network {
    /// Build a network from weight matrices in layer order. Each matrix's
    /// input width must equal the previous matrix's output count.
    pub fn new(weights: Vec<WeightMatrix>) -> Result<Network> {
        if weights.is_empty() {
            return Err(ScrawlError::EmptyNetwork);
        }

        for (ix, pair) in weights.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.inputs() != prev.outputs() {
                return Err(ScrawlError::ShapeMismatch {
                    layer: ix + 1,
                    expected: next.inputs(),
                    actual: prev.outputs(),
                });
            }
        }

        let web = weights
            .into_iter()
            .map(|w| Dense::new(w, Activations::Sigmoid))
            .collect::<Web>();

        debug!(
            "wove network {:?}",
            web.iter().map(|l| l.w.shape()).collect::<Vec<_>>()
        );

        Ok(Network { web })
    }

    pub fn depth(&self) -> usize {
        self.web.len()
    }

    pub fn input_width(&self) -> usize {
        self.web[0].width_in()
    }

    pub fn output_width(&self) -> usize {
        self.web[self.web.len() - 1].width_out()
    }

    pub fn layers(&self) -> &[Dense] {
        &self.web
    }

    /// Forward pass over a batch, one feature vector per row.
    pub fn predict_batch(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        forward(&self.web, x)
    }

    pub fn predict(&self, x: &[f64]) -> Result<Prediction> {
        predict_row(&self.web, x)
    }

    pub fn dump(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Restore a dumped network, re-running the shape checks of [`Network::new`].
    pub fn load(serialized: &[u8]) -> Result<Network> {
        Ok(bincode::deserialize(serialized)?)
    }
}

impl TryFrom<Vec<WeightMatrix>> for Network {
    type Error = ScrawlError;

    fn try_from(weights: Vec<WeightMatrix>) -> Result<Network> {
        Network::new(weights)
    }
}

impl From<Network> for Vec<WeightMatrix> {
    fn from(nn: Network) -> Vec<WeightMatrix> {
        nn.web.into_iter().map(|l| l.w).collect()
    }
}

fn forward<L: Layer>(web: &[L], x: ArrayView2<f64>) -> Result<Array2<f64>> {
    let mut a = x.to_owned();
    for (ix, layer) in web.iter().enumerate() {
        a = layer.forward(ix, a.view())?;
    }
    Ok(a)
}

fn predict_row<L: Layer>(web: &[L], x: &[f64]) -> Result<Prediction> {
    if x.is_empty() {
        return Err(ScrawlError::EmptyInput);
    }

    let row = ArrayView1::from(x).insert_axis(Axis(0));
    let a = forward(web, row)?;

    Ok(Prediction::new(a.index_axis(Axis(0), 0).to_vec()))
}

/// One-shot forward pass over borrowed weight matrices, without building a
/// [`Network`]. Widths are checked layer by layer as the row flows through.
pub fn predict(x: &[f64], weights: &[WeightMatrix]) -> Result<Prediction> {
    if weights.is_empty() {
        return Err(ScrawlError::EmptyNetwork);
    }

    predict_row(weights, x)
}
