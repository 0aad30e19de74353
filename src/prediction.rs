use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::f::arg_max;

/// How output unit indices map onto digits.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LabelScheme {
    /// Unit `i` is digit `(i + 1) % 10`; the last unit stands for zero.
    #[default]
    OneBased,
    ZeroBased,
}

impl LabelScheme {
    pub fn digit(&self, unit: usize) -> usize {
        match self {
            LabelScheme::OneBased => (unit + 1) % 10,
            LabelScheme::ZeroBased => unit,
        }
    }
}

/// Per-class confidences from the output layer. Independent sigmoids, so the
/// values need not sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    activations: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guess {
    pub digit: usize,
    pub confidence: f64,
    pub confident: bool,
}

impl Prediction {
    pub fn new(activations: Vec<f64>) -> Prediction {
        Prediction { activations }
    }

    pub fn activations(&self) -> &[f64] {
        &self.activations
    }

    pub fn len(&self) -> usize {
        self.activations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activations.is_empty()
    }

    /// Output unit with the highest activation, and that activation.
    pub fn arg_max(&self) -> Result<(usize, f64)> {
        arg_max(&self.activations)
    }

    pub fn digit(&self, labels: LabelScheme) -> Result<usize> {
        let (unit, _) = self.arg_max()?;
        Ok(labels.digit(unit))
    }

    /// One guess per output unit, in unit order.
    pub fn guesses(&self, labels: LabelScheme, threshold: f64) -> Vec<Guess> {
        self.activations
            .iter()
            .enumerate()
            .map(|(unit, &confidence)| Guess {
                digit: labels.digit(unit),
                confidence,
                confident: confidence > threshold,
            })
            .collect()
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.confident { "*" } else { "" };
        write!(f, "{}: {:.2}{}", self.digit, self.confidence, marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrawlError;

    #[test]
    fn one_based_last_unit_is_zero() {
        let labels = LabelScheme::OneBased;
        assert_eq!(labels.digit(0), 1);
        assert_eq!(labels.digit(8), 9);
        assert_eq!(labels.digit(9), 0);
        assert_eq!(LabelScheme::ZeroBased.digit(9), 9);
    }

    #[test]
    fn digit_follows_label_scheme() {
        let mut a = vec![0.1; 10];
        a[9] = 0.95;
        let p = Prediction::new(a);
        assert_eq!(p.arg_max().unwrap(), (9, 0.95));
        assert_eq!(p.digit(LabelScheme::OneBased).unwrap(), 0);
        assert_eq!(p.digit(LabelScheme::ZeroBased).unwrap(), 9);
    }

    #[test]
    fn confident_is_strictly_above_threshold() {
        let p = Prediction::new(vec![0.5, 0.51, 0.2]);
        let guesses = p.guesses(LabelScheme::ZeroBased, 0.5);
        assert_eq!(guesses.len(), 3);
        assert!(!guesses[0].confident);
        assert!(guesses[1].confident);
        assert!(!guesses[2].confident);
        assert_eq!(guesses[1].to_string(), "1: 0.51*");
    }

    #[test]
    fn empty_prediction_has_no_digit() {
        let p = Prediction::new(vec![]);
        assert!(p.is_empty());
        assert!(matches!(
            p.digit(LabelScheme::OneBased),
            Err(ScrawlError::EmptyInput)
        ));
    }
}
