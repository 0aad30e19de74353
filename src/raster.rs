//! Turning a drawn raster into a feature vector.
//!
//! Two layouts exist and they are not interchangeable: a network trained on
//! one silently mispredicts on the other. The layout is part of a model's
//! configuration.

use ndarray::{s, Array2, Array3, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrawlError};
use crate::f::normalize;
use crate::FeatureVector;

/// Side of the square grid drawings are reduced to.
pub const DEFAULT_GRID: usize = 20;

/// Divisor mapping an 8-bit channel to `[0, 1]`.
pub const INTENSITY_SCALE: f64 = 255.;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Extraction {
    /// Alpha channel over 255, raster (row-major) order.
    #[default]
    Alpha,
    /// Mean of R, G and B over 255 in column-major order, then normalized.
    Grayscale,
}

/// An RGBA8 image, indexed `(row, column, channel)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: Array3<u8>,
}

impl Raster {
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Raster> {
        if width == 0 || height == 0 {
            return Err(ScrawlError::invalid_raster("raster has no pixels"));
        }

        let expected = width * height * 4;
        if data.len() != expected {
            return Err(ScrawlError::invalid_raster(format!(
                "expected {} bytes for {}x{} rgba, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }

        let pixels = Array3::from_shape_vec((height, width, 4), data)
            .map_err(|e| ScrawlError::invalid_raster(e.to_string()))?;
        Ok(Raster { pixels })
    }

    /// A fully transparent white raster. Zero-sized rasters are allowed here
    /// and rejected when downsampled.
    pub fn blank(width: usize, height: usize) -> Raster {
        let mut pixels = Array3::from_elem((height, width, 4), 255u8);
        pixels.slice_mut(s![.., .., 3]).fill(0);
        Raster { pixels }
    }

    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn put(&mut self, row: usize, col: usize, rgba: [u8; 4]) {
        if row < self.height() && col < self.width() {
            for (c, v) in rgba.iter().enumerate() {
                self.pixels[[row, col, c]] = *v;
            }
        }
    }

    /// Area-average down (or nearest-sample up) to a `size x size` grid of
    /// channel values in `[0, 255]`.
    pub fn downsample(&self, size: usize) -> Result<Array3<f64>> {
        let (h, w) = (self.height(), self.width());
        if h == 0 || w == 0 {
            return Err(ScrawlError::invalid_raster("raster has no pixels"));
        }
        if size == 0 {
            return Err(ScrawlError::EmptyInput);
        }

        let mut out = Array3::zeros((size, size, 4));

        for ty in 0..size {
            let (y0, y1) = span(ty, size, h);
            for tx in 0..size {
                let (x0, x1) = span(tx, size, w);
                let block = self.pixels.slice(s![y0..y1, x0..x1, ..]);
                let count = ((y1 - y0) * (x1 - x0)) as f64;

                for c in 0..4 {
                    let total: f64 = block
                        .index_axis(Axis(2), c)
                        .iter()
                        .map(|v| *v as f64)
                        .sum();
                    out[[ty, tx, c]] = total / count;
                }
            }
        }

        Ok(out)
    }
}

/// Source index range covered by target cell `t` of `size` over `len` pixels.
fn span(t: usize, size: usize, len: usize) -> (usize, usize) {
    let start = (t * len / size).min(len - 1);
    let end = ((t + 1) * len / size).max(start + 1).min(len);
    (start, end)
}

/// Alpha over 255 in raster order.
fn alpha_features(grid: &Array3<f64>) -> FeatureVector {
    grid.index_axis(Axis(2), 3)
        .iter()
        .map(|a| a / INTENSITY_SCALE)
        .collect()
}

/// RGB mean over 255, transposed so columns are emitted first, normalized.
fn grayscale_features(grid: &Array3<f64>) -> Result<FeatureVector> {
    let gray: Array2<f64> = grid
        .slice(s![.., .., 0..3])
        .mean_axis(Axis(2))
        .ok_or(ScrawlError::EmptyInput)?
        .mapv(|v| v / INTENSITY_SCALE);

    let column_major = gray.t().iter().copied().collect::<Vec<f64>>();
    normalize(&column_major)
}

/// Reduce `raster` to a `grid x grid` feature vector using `extraction`.
pub fn extract(raster: &Raster, extraction: Extraction, grid: usize) -> Result<FeatureVector> {
    let cells = raster.downsample(grid)?;
    match extraction {
        Extraction::Alpha => Ok(alpha_features(&cells)),
        Extraction::Grayscale => grayscale_features(&cells),
    }
}

/// Render a square feature grid as text, lowest values blank and highest solid.
pub fn render_ascii(features: &[f64], grid: usize) -> String {
    const CHARS: [char; 5] = [' ', '░', '▒', '▓', '█'];

    let lo = features.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = features.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = if hi > lo { hi - lo } else { 1. };

    let mut result = String::new();
    for row in features.chunks(grid.max(1)) {
        for v in row {
            let level = ((v - lo) / range * (CHARS.len() - 1) as f64).round() as usize;
            result.push(CHARS[level.min(CHARS.len() - 1)]);
        }
        result.push('\n');
    }
    result
}
