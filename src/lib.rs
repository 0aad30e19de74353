//! Handwritten digit recognition: a drawn raster is reduced to a feature grid
//! and run through a pre-trained stack of sigmoid layers.

pub mod config;
pub mod dataset;
pub mod error;
pub mod f;
pub mod layers;
pub mod matrix;
pub mod model;
pub mod network;
pub mod prediction;
pub mod raster;
mod recognizer;

pub use config::RecognizerConfig;
pub use error::{Result, ScrawlError};
pub use f::{arg_max, normalize, sigmoid, Activations};
pub use matrix::{parse_matrix, WeightMatrix};
pub use model::{ModelCatalog, ModelLoader, PendingModel};
pub use network::{predict, Network};
pub use prediction::{Guess, LabelScheme, Prediction};
pub use raster::{extract, Extraction, Raster};
pub use recognizer::Recognizer;

pub type FeatureVector = Vec<f64>;
