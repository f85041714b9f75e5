//! State model and input engine for the drawer grid planner.
//!
//! A plan is a rectangular grid of drawer cells, each holding an index into an
//! editable color palette. This crate owns the full lifecycle of that state:
//! translating discrete input events (pointer gestures on cells, palette
//! clicks, label edits, drag-reorders) into mutations, keeping grid indices
//! consistent when the palette shrinks, and saving/restoring the whole plan as
//! a JSON document. Drawing the grid is left to the host; it reads the state
//! through [`engine::PlannerCore`] and redraws on the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session state and event dispatch ([`engine::PlannerCore`]) |
//! | [`doc`] | Palette and grid types with their mutation rules |
//! | [`input`] | Input events and the rectangle-gesture state machine |
//! | [`codec`] | Document export/import |
//! | [`config`] | Session defaults and environment overrides |
//! | [`consts`] | Preset palette, default dimensions, unit conversion |

pub mod codec;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod input;
