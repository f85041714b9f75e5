//! Document model: palette entries, the palette itself, and the cell grid.
//!
//! This module defines the data that makes up a plan. `Palette` is an ordered
//! list of `ColorEntry` values whose positions form the index space used by
//! the grid. `GridState` is the matrix of those indices. Both types enforce
//! their own mutation rules (dense palette indices, top-left preserving
//! resize, deletion remap); the cascades between them live in
//! [`crate::engine::PlannerCore`].
//!
//! Grid rows are stored as `Vec<Vec<usize>>` rather than a flat buffer because
//! an imported document may carry ragged rows, and those must survive a
//! round-trip untouched.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_COLS, DEFAULT_ROWS, NEW_ENTRY_LABEL, PRESET_COLORS};
use crate::input::CellRect;

/// Error returned by palette mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    /// The index does not name an existing entry.
    #[error("palette index {index} out of range (palette has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
    /// Removing the entry would leave the palette empty.
    #[error("cannot delete the last palette entry")]
    LastEntry,
}

/// Error returned by grid mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A resize asked for zero columns or zero rows.
    #[error("grid dimensions must be at least 1x1 (got {cols}x{rows})")]
    EmptyDimension { cols: usize, rows: usize },
}

/// One palette entry as stored in the document and on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    /// CSS color string, e.g. `"#f87171"`. Treated as opaque.
    pub color: String,
    /// Display label shown next to the swatch.
    pub label: String,
}

impl ColorEntry {
    #[must_use]
    pub fn new(color: impl Into<String>, label: impl Into<String>) -> Self {
        Self { color: color.into(), label: label.into() }
    }

    /// Build an entry from the "add color" form inputs.
    ///
    /// A label that is blank after trimming becomes `"New Color"`.
    #[must_use]
    pub fn from_form(color: &str, label: &str) -> Self {
        let label = label.trim();
        let label = if label.is_empty() { NEW_ENTRY_LABEL } else { label };
        Self::new(color, label)
    }
}

/// Ordered list of color entries. Position is identity: grid cells refer to
/// entries by index, so indices are always dense `0..len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<ColorEntry>,
}

impl Palette {
    /// Wrap an existing list of entries.
    #[must_use]
    pub fn from_entries(entries: Vec<ColorEntry>) -> Self {
        Self { entries }
    }

    /// The preset palette a new session starts with.
    #[must_use]
    pub fn preset() -> Self {
        Self::from_entries(
            PRESET_COLORS
                .iter()
                .map(|(color, label)| ColorEntry::new(*color, *label))
                .collect(),
        )
    }

    /// Entry at `index`, or `None` when the index is dangling.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ColorEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry, returning its index.
    pub fn append(&mut self, entry: ColorEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Replace the label of an existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::IndexOutOfRange`] if `index` is not an entry.
    pub fn edit_label(&mut self, index: usize, label: impl Into<String>) -> Result<(), PaletteError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(PaletteError::IndexOutOfRange { index, len })?;
        entry.label = label.into();
        Ok(())
    }

    /// Remove the entry at `index`, shifting later entries down by one.
    ///
    /// Grid cells are not touched here; callers must follow up with
    /// [`GridState::remap_on_palette_deletion`].
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::IndexOutOfRange`] for a bad index and
    /// [`PaletteError::LastEntry`] when only one entry remains.
    pub fn remove(&mut self, index: usize) -> Result<ColorEntry, PaletteError> {
        self.check_index(index)?;
        if self.entries.len() == 1 {
            return Err(PaletteError::LastEntry);
        }
        Ok(self.entries.remove(index))
    }

    /// Move the entry at `from` so that it ends up at `to`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::IndexOutOfRange`] if either index is not an entry.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), PaletteError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from != to {
            let moved = self.entries.remove(from);
            self.entries.insert(to, moved);
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), PaletteError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(PaletteError::IndexOutOfRange { index, len: self.entries.len() })
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::preset()
    }
}

/// Where the selected-color pointer lands after the entry at `from` is moved
/// to `to`. The pointer follows the moved entry; entries between the two
/// positions shift by one toward the gap the move closed.
#[must_use]
pub fn pointer_after_move(pointer: usize, from: usize, to: usize) -> usize {
    if pointer == from {
        to
    } else if from < pointer && pointer <= to {
        pointer - 1
    } else if to <= pointer && pointer < from {
        pointer + 1
    } else {
        pointer
    }
}

/// Where the selected-color pointer lands after the entry at `deleted` is
/// removed. A pointer to the deleted entry falls back to `0`.
#[must_use]
pub fn pointer_after_delete(pointer: usize, deleted: usize) -> usize {
    match pointer.cmp(&deleted) {
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => pointer - 1,
        std::cmp::Ordering::Less => pointer,
    }
}

/// A cell that refers to a palette index that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DanglingCell {
    pub row: usize,
    pub col: usize,
    pub index: usize,
}

/// The cell matrix plus its nominal dimensions.
///
/// `cols`/`rows` normally match the matrix shape; after a lenient import they
/// carry whatever the document said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl GridState {
    /// An all-zero grid. Zero dimensions are clamped to one.
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self { cols, rows, cells: vec![vec![0; cols]; rows] }
    }

    /// Adopt an imported matrix as-is, without checking that it matches the
    /// given dimensions or that rows share a length.
    #[must_use]
    pub fn from_raw(cols: usize, rows: usize, cells: Vec<Vec<usize>>) -> Self {
        Self { cols, rows, cells }
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row-major cell matrix.
    #[must_use]
    pub fn cells(&self) -> &[Vec<usize>] {
        &self.cells
    }

    /// Palette index stored at `(row, col)`, if that cell exists.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Rebuild the matrix at the new size, keeping the overlapping top-left
    /// block and filling everything else with index `0`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyDimension`] if either dimension is zero.
    pub fn resize(&mut self, cols: usize, rows: usize) -> Result<(), GridError> {
        if cols == 0 || rows == 0 {
            return Err(GridError::EmptyDimension { cols, rows });
        }
        let cells = (0..rows)
            .map(|r| (0..cols).map(|c| self.get(r, c).unwrap_or(0)).collect())
            .collect();
        debug!(from_cols = self.cols, from_rows = self.rows, cols, rows, "grid resized");
        self.cells = cells;
        self.cols = cols;
        self.rows = rows;
        Ok(())
    }

    /// Set every existing cell inside `rect` (inclusive) to `color`.
    ///
    /// Returns the number of cells written.
    pub fn fill_rectangle(&mut self, rect: CellRect, color: usize) -> usize {
        let mut written = 0;
        for row in self.cells.iter_mut().take(rect.max_row.saturating_add(1)).skip(rect.min_row) {
            for cell in row.iter_mut().take(rect.max_col.saturating_add(1)).skip(rect.min_col) {
                *cell = color;
                written += 1;
            }
        }
        written
    }

    /// Adjust indices after the palette entry at `deleted` was removed.
    ///
    /// Cells that pointed at the deleted entry fall back to `0`; cells past it
    /// shift down by one.
    pub fn remap_on_palette_deletion(&mut self, deleted: usize) {
        for cell in self.cells.iter_mut().flatten() {
            *cell = pointer_after_delete(*cell, deleted);
        }
    }

    /// Cells whose index is not below `palette_len`.
    ///
    /// Only an imported document can produce these.
    #[must_use]
    pub fn dangling_cells(&self, palette_len: usize) -> Vec<DanglingCell> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(move |(_, index)| **index >= palette_len)
                    .map(move |(col, index)| DanglingCell { row, col, index: *index })
            })
            .collect()
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}
