use planner::config::PlannerConfig;
use planner::input::CellPos;

use super::*;

fn core(cols: usize, rows: usize) -> PlannerCore {
    PlannerCore::with_config(PlannerConfig { cols, rows, ..Default::default() })
}

#[test]
fn glyphs_cover_digits_then_letters() {
    assert_eq!(glyph(0), '0');
    assert_eq!(glyph(9), '9');
    assert_eq!(glyph(10), 'a');
    assert_eq!(glyph(35), 'z');
    assert_eq!(glyph(36), '#');
}

#[test]
fn renders_grid_rows_and_legend() {
    let mut core = core(3, 2);
    core.select_color(2).expect("select");
    core.on_pointer_down(CellPos::new(0, 1));
    core.on_pointer_enter(CellPos::new(1, 2));
    core.on_pointer_up();

    let text = render_plan(&core);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "3 x 2 (columns x rows)");
    assert_eq!(lines[1], "  022");
    assert_eq!(lines[2], "  022");
    assert!(text.contains("* 2 #60a5fa   Blue"));
    assert!(text.contains("  0 #1e293b   Slate"));
    assert!(!text.contains("missing"));
}

#[test]
fn dangling_cells_are_marked() {
    let mut core = core(1, 1);
    core.import(br##"{"colors":[{"color":"#fff","label":"A"}],"grid":[[0,4]],"x":2,"y":1}"##)
        .expect("import");
    let text = render_plan(&core);
    assert!(text.contains("  0?"));
    assert!(text.contains("1 cell(s) reference missing colors"));
}
