//! Plan document codec.
//!
//! A saved plan is a JSON object:
//!
//! ```json
//! {
//!   "colors": [{ "color": "#1e293b", "label": "Slate" }],
//!   "grid": [[0, 0], [0, 0]],
//!   "x": 2,
//!   "y": 2
//! }
//! ```
//!
//! `x` is the column count and `y` the row count. Import checks the shape of
//! the top-level fields and nothing more: the grid is not compared against
//! `x`/`y`, rows may be ragged, and (under [`ImportPolicy::Lenient`]) cells
//! may reference palette indices that do not exist.
//!
//! Numbers are read by value, so `2.0` is the same cell or dimension as `2`.
//! A numeric cell that is negative or fractional can never name a palette
//! entry and is loaded as [`UNMAPPED_CELL`].

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ImportPolicy;
use crate::doc::{ColorEntry, GridState, Palette};

/// Cell value for an imported number that is not a palette position.
pub const UNMAPPED_CELL: usize = usize::MAX;

/// Error returned by [`decode_document`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The bytes are not JSON at all.
    #[error("failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The JSON does not have the plan document shape.
    #[error("invalid document format: {0}")]
    InvalidFormat(String),
    /// Strict import found a cell that names a missing palette entry.
    #[error("cell ({row}, {col}) references color {index} but the palette has {len} entries")]
    OutOfRange { row: usize, col: usize, index: usize, len: usize },
}

impl CodecError {
    /// Short notification text for the user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Parse(_) => "Failed to import file.",
            Self::InvalidFormat(_) | Self::OutOfRange { .. } => "Invalid file format.",
        }
    }
}

/// A complete plan as saved to and loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Palette entries in index order.
    pub colors: Vec<ColorEntry>,
    /// Rows of column values.
    pub grid: Vec<Vec<usize>>,
    /// Column count.
    pub x: usize,
    /// Row count.
    pub y: usize,
}

impl Document {
    /// Snapshot the given palette and grid.
    #[must_use]
    pub fn capture(palette: &Palette, grid: &GridState) -> Self {
        Self {
            colors: palette.entries().to_vec(),
            grid: grid.cells().to_vec(),
            x: grid.cols(),
            y: grid.rows(),
        }
    }

    /// Split into the palette and grid the document describes.
    #[must_use]
    pub fn into_parts(self) -> (Palette, GridState) {
        (Palette::from_entries(self.colors), GridState::from_raw(self.x, self.y, self.grid))
    }
}

/// Encode a document as pretty-printed JSON bytes.
#[must_use]
pub fn encode_document(doc: &Document) -> Vec<u8> {
    // Strings, integers and vectors of them always serialize; the only
    // failure mode serde_json has here is a non-string map key.
    serde_json::to_vec_pretty(doc).unwrap_or_default()
}

/// Decode and validate document bytes.
///
/// # Errors
///
/// Returns [`CodecError::Parse`] when the bytes are not JSON,
/// [`CodecError::InvalidFormat`] when the shape check fails, and
/// [`CodecError::OutOfRange`] when `policy` is strict and a cell names a
/// missing palette entry.
pub fn decode_document(bytes: &[u8], policy: ImportPolicy) -> Result<Document, CodecError> {
    let value: Value = serde_json::from_slice(bytes)?;
    check_shape(&value)?;

    let doc = Document {
        colors: typed_field(&value, "colors")?,
        grid: grid_cells(&value)?,
        x: dimension(&value, "x")?,
        y: dimension(&value, "y")?,
    };

    if policy == ImportPolicy::Strict {
        let len = doc.colors.len();
        for (row, cells) in doc.grid.iter().enumerate() {
            if let Some((col, index)) = cells.iter().enumerate().find(|(_, index)| **index >= len) {
                return Err(CodecError::OutOfRange { row, col, index: *index, len });
            }
        }
    }

    Ok(doc)
}

/// `colors` and `grid` are lists, `x` and `y` are numbers.
fn check_shape(value: &Value) -> Result<(), CodecError> {
    let is = |key: &str, pred: fn(&Value) -> bool| value.get(key).is_some_and(pred);
    if !is("colors", Value::is_array) {
        return Err(CodecError::InvalidFormat("`colors` must be a list".into()));
    }
    if !is("grid", Value::is_array) {
        return Err(CodecError::InvalidFormat("`grid` must be a list".into()));
    }
    if !is("x", Value::is_number) || !is("y", Value::is_number) {
        return Err(CodecError::InvalidFormat("`x` and `y` must be numbers".into()));
    }
    Ok(())
}

fn typed_field<T>(value: &Value, key: &str) -> Result<T, CodecError>
where
    T: for<'de> Deserialize<'de>,
{
    let field = value.get(key).cloned().unwrap_or(Value::Null);
    serde_json::from_value(field).map_err(|e| CodecError::InvalidFormat(format!("`{key}`: {e}")))
}

fn grid_cells(value: &Value) -> Result<Vec<Vec<usize>>, CodecError> {
    let rows = value.get("grid").and_then(Value::as_array).map_or(&[][..], Vec::as_slice);
    rows.iter()
        .enumerate()
        .map(|(row, cells)| -> Result<Vec<usize>, CodecError> {
            let cells = cells
                .as_array()
                .ok_or_else(|| CodecError::InvalidFormat(format!("`grid` row {row} must be a list")))?;
            cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    if !cell.is_number() {
                        return Err(CodecError::InvalidFormat(format!("`grid` cell ({row}, {col}) must be a number")));
                    }
                    Ok(whole_number(cell).and_then(|n| usize::try_from(n).ok()).unwrap_or(UNMAPPED_CELL))
                })
                .collect()
        })
        .collect()
}

fn dimension(value: &Value, key: &str) -> Result<usize, CodecError> {
    let invalid = || CodecError::InvalidFormat(format!("`{key}` must be a non-negative whole number"));
    let raw = value.get(key).and_then(whole_number).ok_or_else(invalid)?;
    usize::try_from(raw).map_err(|_| invalid())
}

/// A JSON number with no fractional part and no sign, in either integer or
/// float representation.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss, clippy::float_cmp)]
fn whole_number(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    (f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64).then_some(f as u64)
}
