use std::fmt::Debug;
use std::rc::Rc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub fn sigmoid(x: f64) -> f64 {
    1. / (1. + (-x).exp())
}

pub trait Activation {
    fn a(&self, x: Array2<f64>) -> Array2<f64>;
}

impl Debug for dyn Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ActivationFn")
    }
}

pub struct Sigmoid;

impl Sigmoid {
    pub fn new() -> Rc<Sigmoid> {
        Rc::new(Sigmoid)
    }
}

impl Activation for Sigmoid {
    fn a(&self, x: Array2<f64>) -> Array2<f64> {
        x.mapv_into(sigmoid)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activations {
    #[default]
    Sigmoid,
}

impl Activations {
    pub fn wake(&self) -> Rc<dyn Activation> {
        match self {
            Activations::Sigmoid => Sigmoid::new(),
        }
    }
}
