//! Labelled drawings collected for later training, exported as
//! `pixel_0,...,pixel_N,label` rows.

use std::fs;
use std::path::Path;

use ndarray::s;
use serde::{self, Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScrawlError};
use crate::matrix::parse_matrix;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub pixels: Vec<f64>,
    pub label: u8,
}

impl Sample {
    pub fn new(pixels: Vec<f64>, label: u8) -> Sample {
        Sample { pixels, label }
    }

    pub fn to_csv_row(&self) -> String {
        let mut fields = self
            .pixels
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<String>>();
        fields.push(self.label.to_string());
        fields.join(",")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Sample>", into = "Vec<Sample>")]
pub struct Collection {
    samples: Vec<Sample>,
}

impl Collection {
    pub fn new() -> Collection {
        Collection { samples: vec![] }
    }

    /// Add a sample. All samples must share one pixel count and every pixel
    /// must be finite so the export reads back.
    pub fn insert(&mut self, sample: Sample) -> Result<&mut Self> {
        if let Some(ix) = sample.pixels.iter().position(|v| !v.is_finite()) {
            return Err(ScrawlError::malformed(
                self.samples.len(),
                ix,
                "non-finite pixel",
            ));
        }
        if let Some(first) = self.samples.first() {
            if first.pixels.len() != sample.pixels.len() {
                return Err(ScrawlError::ShapeMismatch {
                    layer: 0,
                    expected: first.pixels.len(),
                    actual: sample.pixels.len(),
                });
            }
        }

        self.samples.push(sample);
        Ok(self)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for sample in self.samples.iter() {
            out.push_str(&sample.to_csv_row());
            out.push('\n');
        }
        out
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_csv())?;
        debug!("wrote {} samples to {}", self.len(), path.display());
        Ok(())
    }

    pub fn dump(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn load(serialized: &[u8]) -> Result<Collection> {
        Ok(bincode::deserialize(serialized)?)
    }
}

impl TryFrom<Vec<Sample>> for Collection {
    type Error = ScrawlError;

    fn try_from(samples: Vec<Sample>) -> Result<Collection> {
        let mut collection = Collection::new();
        for sample in samples {
            collection.insert(sample)?;
        }
        Ok(collection)
    }
}

impl From<Collection> for Vec<Sample> {
    fn from(c: Collection) -> Vec<Sample> {
        c.samples
    }
}

/// Read back an exported collection. The last column of each row is the label.
pub fn parse_collection(text: &str) -> Result<Collection> {
    if text.trim().is_empty() {
        return Ok(Collection::new());
    }

    let table = parse_matrix(text)?.into_array();
    let label_col = table.ncols() - 1;

    let mut collection = Collection::new();
    for (i, row) in table.rows().into_iter().enumerate() {
        let raw = row[label_col];
        if raw.fract() != 0. || !(0. ..=u8::MAX as f64).contains(&raw) {
            return Err(ScrawlError::malformed(
                i,
                label_col,
                format!("label `{}` is not a class tag", raw),
            ));
        }

        let pixels = row.slice(s![..label_col]).to_vec();
        collection.insert(Sample::new(pixels, raw as u8))?;
    }

    Ok(collection)
}
