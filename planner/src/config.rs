//! Session configuration.
//!
//! Defaults come from [`crate::consts`]; each field can be overridden from the
//! environment. Unparseable values fall back to the default rather than
//! failing, matching how the rest of the host treats optional knobs.

use crate::consts::{DEFAULT_COLS, DEFAULT_ROWS};

/// How strictly imported documents are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportPolicy {
    /// Shape check only; grid indices may dangle.
    #[default]
    Lenient,
    /// Additionally reject grids that reference missing palette entries.
    Strict,
}

/// Startup knobs for a planner session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Columns of a fresh or reset grid.
    pub cols: usize,
    /// Rows of a fresh or reset grid.
    pub rows: usize,
    pub import_policy: ImportPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { cols: DEFAULT_COLS, rows: DEFAULT_ROWS, import_policy: ImportPolicy::Lenient }
    }
}

impl PlannerConfig {
    /// Read `PLANNER_COLS`, `PLANNER_ROWS` and `PLANNER_STRICT_IMPORT`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let strict = parse_or(&lookup, "PLANNER_STRICT_IMPORT", false);
        Self {
            cols: parse_or(&lookup, "PLANNER_COLS", defaults.cols).max(1),
            rows: parse_or(&lookup, "PLANNER_ROWS", defaults.rows).max(1),
            import_policy: if strict { ImportPolicy::Strict } else { ImportPolicy::Lenient },
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = PlannerConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.cols, 16);
        assert_eq!(config.rows, 13);
        assert_eq!(config.import_policy, ImportPolicy::Lenient);
    }

    #[test]
    fn overrides_are_applied() {
        let config = PlannerConfig::from_lookup(lookup_from(&[
            ("PLANNER_COLS", "8"),
            ("PLANNER_ROWS", " 5 "),
            ("PLANNER_STRICT_IMPORT", "true"),
        ]));
        assert_eq!(config.cols, 8);
        assert_eq!(config.rows, 5);
        assert_eq!(config.import_policy, ImportPolicy::Strict);
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let config = PlannerConfig::from_lookup(lookup_from(&[
            ("PLANNER_COLS", "wide"),
            ("PLANNER_STRICT_IMPORT", "yes please"),
        ]));
        assert_eq!(config.cols, 16);
        assert_eq!(config.import_policy, ImportPolicy::Lenient);
    }

    #[test]
    fn zero_dimensions_are_clamped() {
        let config = PlannerConfig::from_lookup(lookup_from(&[("PLANNER_COLS", "0"), ("PLANNER_ROWS", "0")]));
        assert_eq!(config.cols, 1);
        assert_eq!(config.rows, 1);
    }
}
