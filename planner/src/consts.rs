//! Shared constants for the planner crate.

// ── Session defaults ────────────────────────────────────────────

/// Column count of a fresh plan.
pub const DEFAULT_COLS: usize = 16;

/// Row count of a fresh plan.
pub const DEFAULT_ROWS: usize = 13;

/// Preset palette as `(color, label)` pairs, in index order.
pub const PRESET_COLORS: [(&str, &str); 6] = [
    ("#1e293b", "Slate"),
    ("#f87171", "Red"),
    ("#60a5fa", "Blue"),
    ("#34d399", "Green"),
    ("#fbbf24", "Yellow"),
    ("#a78bfa", "Purple"),
];

/// Color offered by the "add entry" form before the user picks one.
pub const NEW_ENTRY_COLOR: &str = "#ffffff";

/// Label used when a new entry is added with a blank label.
pub const NEW_ENTRY_LABEL: &str = "New Color";

/// Suggested file name for exported documents.
pub const EXPORT_FILE_NAME: &str = "gridfinity-export.json";

// ── Unit conversion ─────────────────────────────────────────────

/// Grid pitch of one drawer cell in millimetres.
pub const CELL_PITCH_MM: f64 = 42.0;

/// Wall clearance added to a measured drawer length before dividing.
pub const CLEARANCE_MM: f64 = 10.0;

/// Number of cells needed to span `mm` millimetres of drawer.
///
/// Display-only helper: `ceil((mm + 10) / 42)`, clamped at zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn mm_to_cells(mm: f64) -> u32 {
    let cells = ((mm + CLEARANCE_MM) / CELL_PITCH_MM).ceil();
    if cells.is_nan() || cells <= 0.0 {
        return 0;
    }
    cells as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mm_to_cells_matches_one_cell_pitch() {
        assert_eq!(mm_to_cells(32.0), 1);
        assert_eq!(mm_to_cells(42.0), 2);
    }

    #[test]
    fn mm_to_cells_rounds_up() {
        assert_eq!(mm_to_cells(33.0), 2);
        assert_eq!(mm_to_cells(0.0), 1);
    }

    #[test]
    fn mm_to_cells_clamps_negative_lengths() {
        assert_eq!(mm_to_cells(-10.0), 0);
        assert_eq!(mm_to_cells(-500.0), 0);
        assert_eq!(mm_to_cells(f64::NAN), 0);
    }
}
