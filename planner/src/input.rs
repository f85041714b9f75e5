//! Input model: cell positions, input events, and the rectangle gesture.
//!
//! `InputEvent` is everything the host can deliver to the planner. The
//! pointer events feed `SelectionState`, a two-state machine that tracks one
//! rectangle gesture from pointer-down until the pointer is released or leaves
//! the surface. Every exit from `Selecting` yields the rectangle to commit;
//! there is no way to abandon a gesture without painting it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use tracing::debug;

use crate::doc::ColorEntry;

/// A cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Inclusive, normalized cell rectangle (`min_* <= max_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl CellRect {
    /// The rectangle spanned by two corners given in any order.
    #[must_use]
    pub fn spanning(a: CellPos, b: CellPos) -> Self {
        Self {
            min_row: a.row.min(b.row),
            max_row: a.row.max(b.row),
            min_col: a.col.min(b.col),
            max_col: a.col.max(b.col),
        }
    }

    /// Whether `(row, col)` lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.min_row..=self.max_row).contains(&row) && (self.min_col..=self.max_col).contains(&col)
    }
}

/// A discrete event from the host's input channel.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed on a cell.
    PointerDown(CellPos),
    /// Pointer moved onto a cell.
    PointerEnter(CellPos),
    /// Pointer released anywhere on the surface.
    PointerUp,
    /// Pointer left the drawing surface.
    PointerLeave,
    /// Palette swatch clicked.
    SelectColor(usize),
    /// Palette label edited.
    EditLabel { index: usize, label: String },
    /// Palette entry dragged from one slot onto another.
    MoveColor { from: usize, to: usize },
    /// "Add color" submitted.
    AddColor(ColorEntry),
    /// Palette entry deleted.
    DeleteColor(usize),
    /// Grid size changed.
    Resize { cols: usize, rows: usize },
    /// Reset to the preset palette and empty grid.
    Reset,
    /// Load a document.
    Import(Vec<u8>),
    /// Save the current document.
    Export,
}

/// State of the rectangle gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging out a rectangle.
    Selecting {
        /// Cell where the pointer went down.
        start: CellPos,
        /// Most recent cell the pointer entered.
        end: CellPos,
    },
}

impl SelectionState {
    /// Begin a gesture at `pos`.
    ///
    /// A pointer-down during an active gesture is ignored; one pointer owns
    /// the gesture until it commits.
    pub fn pointer_down(&mut self, pos: CellPos) {
        match self {
            Self::Idle => {
                debug!(row = pos.row, col = pos.col, "selection started");
                *self = Self::Selecting { start: pos, end: pos };
            }
            Self::Selecting { .. } => {
                debug!(row = pos.row, col = pos.col, "pointer down during selection ignored");
            }
        }
    }

    /// Extend the active gesture to `pos`. No effect when idle.
    pub fn pointer_enter(&mut self, pos: CellPos) {
        if let Self::Selecting { end, .. } = self {
            *end = pos;
        }
    }

    /// Finish the gesture, returning the rectangle to paint.
    ///
    /// Pointer-up and pointer-leave both end here. Returns `None` when idle.
    pub fn finish(&mut self) -> Option<CellRect> {
        let rect = self.highlight();
        *self = Self::Idle;
        rect
    }

    /// The rectangle to highlight while selecting.
    #[must_use]
    pub fn highlight(&self) -> Option<CellRect> {
        match self {
            Self::Idle => None,
            Self::Selecting { start, end } => Some(CellRect::spanning(*start, *end)),
        }
    }

    #[must_use]
    pub fn is_selecting(&self) -> bool {
        matches!(self, Self::Selecting { .. })
    }
}
