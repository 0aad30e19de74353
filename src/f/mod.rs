pub mod activation;
pub mod scale;
pub mod shape;

pub use activation::*;
pub use scale::*;
pub use shape::*;
