use tracing::{debug, info, warn};

use crate::codec::{self, CodecError, Document};
use crate::config::{ImportPolicy, PlannerConfig};
use crate::doc::{self, ColorEntry, GridError, GridState, Palette, PaletteError};
use crate::input::{CellPos, CellRect, InputEvent, SelectionState};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    /// The highlighted rectangle changed; redraw the overlay.
    SelectionChanged(CellRect),
    /// A gesture committed and painted `rect` with `color`.
    CellsPainted { rect: CellRect, color: usize },
    /// The selected paint color changed.
    ColorSelected(usize),
    /// Palette entries or their order changed.
    PaletteChanged,
    /// Grid dimensions changed.
    GridResized { cols: usize, rows: usize },
    /// Everything was replaced (reset or import).
    DocumentReplaced,
    /// Serialized document ready to hand to the persistence channel.
    Exported { file_name: &'static str, bytes: Vec<u8> },
    /// Show a notification to the user.
    Notify(String),
}

/// Session state: palette, grid, selected color and the active gesture.
///
/// Every handler runs to completion; there is no partially applied mutation
/// for a later event to observe.
pub struct PlannerCore {
    palette: Palette,
    grid: GridState,
    selected: usize,
    selection: SelectionState,
    config: PlannerConfig,
}

impl Default for PlannerCore {
    fn default() -> Self {
        Self::with_config(PlannerConfig::default())
    }
}

impl PlannerCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session using `config` for the default grid size and import policy.
    #[must_use]
    pub fn with_config(config: PlannerConfig) -> Self {
        Self {
            palette: Palette::preset(),
            grid: GridState::new(config.cols, config.rows),
            selected: 0,
            selection: SelectionState::Idle,
            config,
        }
    }

    // --- Event dispatch ---

    /// Route one input event to its handler.
    ///
    /// Rejected palette and grid operations become [`Action::Notify`]; the
    /// state is unchanged in that case.
    pub fn handle(&mut self, event: InputEvent) -> Action {
        let result = match event {
            InputEvent::PointerDown(pos) => Ok(self.on_pointer_down(pos)),
            InputEvent::PointerEnter(pos) => Ok(self.on_pointer_enter(pos)),
            InputEvent::PointerUp => Ok(self.on_pointer_up()),
            InputEvent::PointerLeave => Ok(self.on_pointer_leave()),
            InputEvent::SelectColor(index) => self.select_color(index).map_err(|e| e.to_string()),
            InputEvent::EditLabel { index, label } => self.edit_label(index, label).map_err(|e| e.to_string()),
            InputEvent::MoveColor { from, to } => self.move_color(from, to).map_err(|e| e.to_string()),
            InputEvent::AddColor(entry) => Ok(self.add_color(entry)),
            InputEvent::DeleteColor(index) => self.delete_color(index).map_err(|e| e.to_string()),
            InputEvent::Resize { cols, rows } => self.resize(cols, rows).map_err(|e| e.to_string()),
            InputEvent::Reset => Ok(self.reset()),
            InputEvent::Import(bytes) => self.import(&bytes).map_err(|e| e.user_message().to_owned()),
            InputEvent::Export => Ok(self.export()),
        };
        result.unwrap_or_else(Action::Notify)
    }

    // --- Rectangle gesture ---

    pub fn on_pointer_down(&mut self, pos: CellPos) -> Action {
        self.selection.pointer_down(pos);
        self.highlight_action()
    }

    pub fn on_pointer_enter(&mut self, pos: CellPos) -> Action {
        if !self.selection.is_selecting() {
            return Action::None;
        }
        self.selection.pointer_enter(pos);
        self.highlight_action()
    }

    /// Commit the active gesture, painting it with the selected color.
    pub fn on_pointer_up(&mut self) -> Action {
        let Some(rect) = self.selection.finish() else {
            return Action::None;
        };
        let color = self.selected;
        let painted = self.grid.fill_rectangle(rect, color);
        info!(
            min_row = rect.min_row,
            max_row = rect.max_row,
            min_col = rect.min_col,
            max_col = rect.max_col,
            color,
            painted,
            "rectangle painted"
        );
        Action::CellsPainted { rect, color }
    }

    /// Leaving the surface commits exactly like releasing the pointer.
    pub fn on_pointer_leave(&mut self) -> Action {
        self.on_pointer_up()
    }

    fn highlight_action(&self) -> Action {
        self.selection.highlight().map_or(Action::None, Action::SelectionChanged)
    }

    // --- Palette ---

    /// Make `index` the paint color for subsequent gestures.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::IndexOutOfRange`] if `index` is not an entry.
    pub fn select_color(&mut self, index: usize) -> Result<Action, PaletteError> {
        if index >= self.palette.len() {
            return Err(PaletteError::IndexOutOfRange { index, len: self.palette.len() });
        }
        self.selected = index;
        debug!(index, "color selected");
        Ok(Action::ColorSelected(index))
    }

    /// Append an entry to the palette.
    pub fn add_color(&mut self, entry: ColorEntry) -> Action {
        let index = self.palette.append(entry);
        info!(index, "palette entry added");
        Action::PaletteChanged
    }

    /// # Errors
    ///
    /// Returns [`PaletteError::IndexOutOfRange`] if `index` is not an entry.
    pub fn edit_label(&mut self, index: usize, label: impl Into<String>) -> Result<Action, PaletteError> {
        self.palette.edit_label(index, label)?;
        Ok(Action::PaletteChanged)
    }

    /// Delete a palette entry, remapping grid cells and the selected color so
    /// they keep pointing into the shorter palette.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError`] if `index` is not an entry or is the only one.
    pub fn delete_color(&mut self, index: usize) -> Result<Action, PaletteError> {
        let removed = self.palette.remove(index)?;
        self.grid.remap_on_palette_deletion(index);
        self.selected = doc::pointer_after_delete(self.selected, index);
        info!(index, label = %removed.label, selected = self.selected, "palette entry deleted");
        Ok(Action::PaletteChanged)
    }

    /// Move a palette entry from `from` to `to`.
    ///
    /// Grid cells keep their raw indices, so cells that referenced any of the
    /// shifted slots now show whichever entry occupies that slot. The selected
    /// color follows the entry it pointed at.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::IndexOutOfRange`] if either index is not an entry.
    pub fn move_color(&mut self, from: usize, to: usize) -> Result<Action, PaletteError> {
        self.palette.move_entry(from, to)?;
        if from == to {
            return Ok(Action::None);
        }
        self.selected = doc::pointer_after_move(self.selected, from, to);
        info!(from, to, selected = self.selected, "palette entry moved");
        Ok(Action::PaletteChanged)
    }

    // --- Grid ---

    /// # Errors
    ///
    /// Returns [`GridError::EmptyDimension`] if either dimension is zero.
    pub fn resize(&mut self, cols: usize, rows: usize) -> Result<Action, GridError> {
        self.grid.resize(cols, rows)?;
        info!(cols, rows, "grid resized");
        Ok(Action::GridResized { cols, rows })
    }

    /// Restore the preset palette, an all-zero grid of the configured size,
    /// and selected color `0`.
    pub fn reset(&mut self) -> Action {
        self.palette = Palette::preset();
        self.grid = GridState::new(self.config.cols, self.config.rows);
        self.selected = 0;
        self.selection = SelectionState::Idle;
        info!(cols = self.grid.cols(), rows = self.grid.rows(), "planner reset");
        Action::DocumentReplaced
    }

    // --- Persistence ---

    /// The current plan as a document.
    #[must_use]
    pub fn document(&self) -> Document {
        Document::capture(&self.palette, &self.grid)
    }

    /// Encoded bytes of the current plan.
    #[must_use]
    pub fn export_bytes(&self) -> Vec<u8> {
        codec::encode_document(&self.document())
    }

    /// Serialize the current plan.
    pub fn export(&self) -> Action {
        let bytes = self.export_bytes();
        info!(bytes = bytes.len(), "document exported");
        Action::Exported { file_name: crate::consts::EXPORT_FILE_NAME, bytes }
    }

    /// Replace the whole plan with the document in `bytes`.
    ///
    /// Nothing changes unless the document decodes and passes the shape check.
    /// The selected color is kept if the new palette still has that index.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] describing why the document was rejected.
    pub fn import(&mut self, bytes: &[u8]) -> Result<Action, CodecError> {
        let doc = match codec::decode_document(bytes, self.config.import_policy) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "import rejected");
                return Err(e);
            }
        };
        let (palette, grid) = doc.into_parts();
        let dangling = grid.dangling_cells(palette.len()).len();
        if dangling > 0 {
            warn!(dangling, "imported grid references missing palette entries");
        }
        self.palette = palette;
        self.grid = grid;
        if self.selected >= self.palette.len() {
            self.selected = 0;
        }
        self.selection = SelectionState::Idle;
        info!(
            colors = self.palette.len(),
            cols = self.grid.cols(),
            rows = self.grid.rows(),
            "document imported"
        );
        Ok(Action::DocumentReplaced)
    }

    // --- Queries ---

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Index of the current paint color.
    #[must_use]
    pub fn selected_color(&self) -> usize {
        self.selected
    }

    /// Rectangle to highlight, while a gesture is in progress.
    #[must_use]
    pub fn highlight(&self) -> Option<CellRect> {
        self.selection.highlight()
    }

    /// Whether `(row, col)` is inside the in-progress gesture.
    #[must_use]
    pub fn is_cell_highlighted(&self, row: usize, col: usize) -> bool {
        self.highlight().is_some_and(|rect| rect.contains(row, col))
    }

    /// The palette entry a cell should be drawn with.
    ///
    /// `None` for cells outside the grid or that reference a missing entry.
    #[must_use]
    pub fn cell_color(&self, row: usize, col: usize) -> Option<&ColorEntry> {
        self.grid.get(row, col).and_then(|index| self.palette.get(index))
    }

    #[must_use]
    pub fn import_policy(&self) -> ImportPolicy {
        self.config.import_policy
    }
}
