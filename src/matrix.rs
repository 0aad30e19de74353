use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScrawlError};

/// One layer's parameters, shape `(outputs, inputs + 1)`.
///
/// Column 0 holds the bias term. Row and column order are the parameter
/// indices the network was trained with and are never rearranged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<f64>", into = "Array2<f64>")]
pub struct WeightMatrix {
    w: Array2<f64>,
}

impl WeightMatrix {
    pub fn from_array(w: Array2<f64>) -> Result<WeightMatrix> {
        if w.nrows() == 0 || w.ncols() == 0 {
            return Err(ScrawlError::malformed(0, 0, "matrix has no entries"));
        }
        if let Some((ix, _)) = w.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ScrawlError::malformed(ix.0, ix.1, "non-finite value"));
        }

        Ok(WeightMatrix { w })
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<WeightMatrix> {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let height = rows.len();

        let mut flat = Vec::with_capacity(width * height);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(ScrawlError::malformed(
                    i,
                    row.len().min(width),
                    format!("row has {} fields, expected {}", row.len(), width),
                ));
            }
            flat.extend(row);
        }

        let w = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| ScrawlError::malformed(0, 0, e.to_string()))?;
        WeightMatrix::from_array(w)
    }

    /// Number of units this layer produces.
    pub fn outputs(&self) -> usize {
        self.w.nrows()
    }

    /// Width of the activation row this layer accepts, bias excluded.
    pub fn inputs(&self) -> usize {
        self.w.ncols() - 1
    }

    pub fn shape(&self) -> (usize, usize) {
        self.w.dim()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.w.view()
    }

    pub fn into_array(self) -> Array2<f64> {
        self.w
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for row in self.w.rows() {
            let line = row
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<String>>()
                .join(",");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

impl TryFrom<Array2<f64>> for WeightMatrix {
    type Error = ScrawlError;

    fn try_from(w: Array2<f64>) -> Result<WeightMatrix> {
        WeightMatrix::from_array(w)
    }
}

impl From<WeightMatrix> for Array2<f64> {
    fn from(m: WeightMatrix) -> Array2<f64> {
        m.w
    }
}

/// Parse a comma-separated table of numbers, one matrix row per line.
pub fn parse_matrix(text: &str) -> Result<WeightMatrix> {
    let mut rows: Vec<Vec<f64>> = vec![];

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let row_ix = rows.len();
        let row = line
            .split(',')
            .enumerate()
            .map(|(col_ix, field)| parse_field(field, row_ix, col_ix))
            .collect::<Result<Vec<f64>>>()?;

        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ScrawlError::malformed(0, 0, "no rows"));
    }

    let m = WeightMatrix::from_rows(rows)?;
    debug!("parsed {} rows, matrix shape {:?}", m.outputs(), m.shape());
    Ok(m)
}

fn parse_field(field: &str, row: usize, column: usize) -> Result<f64> {
    let field = field.trim();
    let v: f64 = field
        .parse()
        .map_err(|_| ScrawlError::malformed(row, column, format!("`{}` is not a number", field)))?;

    if !v.is_finite() {
        return Err(ScrawlError::malformed(
            row,
            column,
            format!("`{}` is not finite", field),
        ));
    }

    Ok(v)
}
