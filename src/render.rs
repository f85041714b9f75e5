//! Plain-text rendering of a plan for the terminal.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use planner::engine::PlannerCore;

/// Glyph for a cell index: `0-9`, then `a-z`, then `#` for anything larger.
fn glyph(index: usize) -> char {
    match u32::try_from(index) {
        Ok(i @ 0..=35) => char::from_digit(i, 36).unwrap_or('#'),
        _ => '#',
    }
}

/// Render the grid as rows of glyphs, followed by a palette legend.
///
/// Cells that reference a missing palette entry are drawn as `?`.
#[must_use]
pub fn render_plan(core: &PlannerCore) -> String {
    let mut out = String::new();
    let grid = core.grid();
    let palette = core.palette();

    writeln!(out, "{} x {} (columns x rows)", grid.cols(), grid.rows()).unwrap_or_default();
    for row in grid.cells() {
        let line: String = row
            .iter()
            .map(|index| if palette.get(*index).is_some() { glyph(*index) } else { '?' })
            .collect();
        writeln!(out, "  {line}").unwrap_or_default();
    }

    writeln!(out).unwrap_or_default();
    for (index, entry) in palette.entries().iter().enumerate() {
        let marker = if index == core.selected_color() { '*' } else { ' ' };
        writeln!(out, "{marker} {} {:<9} {}", glyph(index), entry.color, entry.label).unwrap_or_default();
    }

    let dangling = grid.dangling_cells(palette.len()).len();
    if dangling > 0 {
        writeln!(out, "\n{dangling} cell(s) reference missing colors").unwrap_or_default();
    }
    out
}
