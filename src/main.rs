mod render;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use planner::codec::CodecError;
use planner::config::{ImportPolicy, PlannerConfig};
use planner::consts::{EXPORT_FILE_NAME, NEW_ENTRY_COLOR, mm_to_cells};
use planner::doc::ColorEntry;
use planner::engine::{Action, PlannerCore};
use planner::input::{CellPos, InputEvent};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("could not open plan: {0}")]
    Import(#[from] CodecError),
    #[error("{0}")]
    Rejected(String),
}

#[derive(Parser, Debug)]
#[command(name = "drawer-planner", about = "Plan drawer grid layouts from the terminal")]
struct Cli {
    /// Plan document to read and update.
    #[arg(long, short, env = "PLANNER_FILE", default_value = EXPORT_FILE_NAME)]
    file: PathBuf,

    /// Reject documents whose grid references missing palette entries.
    #[arg(long, env = "PLANNER_STRICT_IMPORT")]
    strict_import: bool,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a fresh plan, replacing the document.
    New {
        #[arg(long, env = "PLANNER_COLS")]
        cols: Option<usize>,
        #[arg(long, env = "PLANNER_ROWS")]
        rows: Option<usize>,
    },
    /// Print the plan.
    Show,
    /// Paint the rectangle between two cells.
    Paint {
        /// First corner as `ROW,COL`.
        #[arg(long, value_parser = parse_cell)]
        from: CellPos,
        /// Opposite corner as `ROW,COL`; defaults to `--from`.
        #[arg(long, value_parser = parse_cell)]
        to: Option<CellPos>,
        /// Palette index to paint with.
        #[arg(long, default_value_t = 0)]
        color: usize,
    },
    /// Change the grid size, keeping the top-left cells.
    Resize {
        #[arg(long)]
        cols: usize,
        #[arg(long)]
        rows: usize,
    },
    /// Edit the palette.
    Palette(PaletteCommand),
    /// Restore the preset palette and an empty grid.
    Reset,
    /// Convert a drawer length in millimetres to a cell count.
    Cells { mm: f64 },
}

#[derive(Args, Debug)]
struct PaletteCommand {
    #[command(subcommand)]
    command: PaletteSubcommand,
}

#[derive(Subcommand, Debug)]
enum PaletteSubcommand {
    Add {
        #[arg(long, default_value = NEW_ENTRY_COLOR)]
        color: String,
        #[arg(long, default_value = "")]
        label: String,
    },
    Label {
        index: usize,
        label: String,
    },
    Delete {
        index: usize,
    },
    Move {
        from: usize,
        to: usize,
    },
}

fn parse_cell(s: &str) -> Result<CellPos, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got `{s}`"))?;
    let row = row.trim().parse().map_err(|e| format!("bad row `{row}`: {e}"))?;
    let col = col.trim().parse().map_err(|e| format!("bad column `{col}`: {e}"))?;
    Ok(CellPos::new(row, col))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = PlannerConfig::from_env();
    if cli.strict_import {
        config.import_policy = ImportPolicy::Strict;
    }

    match cli.command {
        Command::Cells { mm } => {
            println!("{mm} mm = {} cells", mm_to_cells(mm));
            Ok(())
        }
        Command::New { cols, rows } => {
            config.cols = cols.unwrap_or(config.cols);
            config.rows = rows.unwrap_or(config.rows);
            let core = PlannerCore::with_config(config);
            save(&core, &cli.file)?;
            print!("{}", render::render_plan(&core));
            Ok(())
        }
        Command::Show => {
            let core = load(&cli.file, config)?;
            print!("{}", render::render_plan(&core));
            Ok(())
        }
        command => {
            let mut core = load(&cli.file, config)?;
            for event in events_for(command) {
                if let Action::Notify(message) = core.handle(event) {
                    return Err(CliError::Rejected(message));
                }
            }
            save(&core, &cli.file)?;
            print!("{}", render::render_plan(&core));
            Ok(())
        }
    }
}

/// Translate one editing command into the input events a UI would send.
fn events_for(command: Command) -> Vec<InputEvent> {
    match command {
        Command::Paint { from, to, color } => vec![
            InputEvent::SelectColor(color),
            InputEvent::PointerDown(from),
            InputEvent::PointerEnter(to.unwrap_or(from)),
            InputEvent::PointerUp,
        ],
        Command::Resize { cols, rows } => vec![InputEvent::Resize { cols, rows }],
        Command::Reset => vec![InputEvent::Reset],
        Command::Palette(palette) => vec![match palette.command {
            PaletteSubcommand::Add { color, label } => InputEvent::AddColor(ColorEntry::from_form(&color, &label)),
            PaletteSubcommand::Label { index, label } => InputEvent::EditLabel { index, label },
            PaletteSubcommand::Delete { index } => InputEvent::DeleteColor(index),
            PaletteSubcommand::Move { from, to } => InputEvent::MoveColor { from, to },
        }],
        Command::New { .. } | Command::Show | Command::Cells { .. } => Vec::new(),
    }
}

/// Open the plan at `path`, or start a fresh one if the file does not exist yet.
fn load(path: &Path, config: PlannerConfig) -> Result<PlannerCore, CliError> {
    let mut core = PlannerCore::with_config(config);
    match fs::read(path) {
        Ok(bytes) => {
            core.import(&bytes)?;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no plan on disk; starting fresh");
        }
        Err(source) => return Err(CliError::Read { path: path.to_owned(), source }),
    }
    Ok(core)
}

fn save(core: &PlannerCore, path: &Path) -> Result<(), CliError> {
    fs::write(path, core.export_bytes()).map_err(|source| CliError::Write { path: path.to_owned(), source })?;
    tracing::info!(path = %path.display(), "plan saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cell_accepts_row_col() {
        assert_eq!(parse_cell("2,5"), Ok(CellPos::new(2, 5)));
        assert_eq!(parse_cell(" 0 , 1 "), Ok(CellPos::new(0, 1)));
    }

    #[test]
    fn parse_cell_rejects_malformed_input() {
        assert!(parse_cell("2").is_err());
        assert!(parse_cell("a,1").is_err());
        assert!(parse_cell("1,-1").is_err());
    }

    #[test]
    fn paint_becomes_a_full_gesture() {
        let events = events_for(Command::Paint { from: CellPos::new(0, 0), to: Some(CellPos::new(1, 1)), color: 2 });
        assert_eq!(
            events,
            vec![
                InputEvent::SelectColor(2),
                InputEvent::PointerDown(CellPos::new(0, 0)),
                InputEvent::PointerEnter(CellPos::new(1, 1)),
                InputEvent::PointerUp,
            ]
        );
    }

    #[test]
    fn paint_without_to_is_a_single_cell() {
        let events = events_for(Command::Paint { from: CellPos::new(3, 4), to: None, color: 0 });
        assert_eq!(events[2], InputEvent::PointerEnter(CellPos::new(3, 4)));
    }

    #[test]
    fn palette_add_uses_form_defaults() {
        let events = events_for(Command::Palette(PaletteCommand {
            command: PaletteSubcommand::Add { color: "#abcdef".into(), label: "  ".into() },
        }));
        assert_eq!(events, vec![InputEvent::AddColor(ColorEntry::new("#abcdef", "New Color"))]);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommands_parse() {
        let cli = Cli::try_parse_from(["drawer-planner", "--file", "plan.json", "paint", "--from", "1,2", "--color", "3"])
            .expect("parse");
        assert_eq!(cli.file, PathBuf::from("plan.json"));
        assert!(matches!(cli.command, Command::Paint { color: 3, to: None, .. }));

        let cli = Cli::try_parse_from(["drawer-planner", "palette", "move", "0", "2"]).expect("parse");
        assert!(matches!(
            cli.command,
            Command::Palette(PaletteCommand { command: PaletteSubcommand::Move { from: 0, to: 2 } })
        ));
    }
}
