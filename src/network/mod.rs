mod feedforward;

pub use feedforward::{predict, Network, Web};
