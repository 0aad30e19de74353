mod dense;
pub mod types;

pub use dense::{bias_augment, Dense};
pub use types::Layer;
