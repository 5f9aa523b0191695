//! ODB2 body columns that can be plotted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in plottable columns and their chart labels.
pub const COLUMN_LABELS: &[(&str, Option<&str>)] = &[
    ("obsvalue@body", None),
    ("corvalue@body", Some("Corrected")),
    ("an_depar@body", Some("O-A")),
    ("fg_depar@body", Some("O-B")),
];

/// A plottable column, obtained from a [`Catalog`](crate::Catalog) lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    name: String,
    label: Option<String>,
}

impl Column {
    pub(crate) fn new(name: impl Into<String>, label: Option<String>) -> Self {
        Self {
            name: name.into(),
            label,
        }
    }

    /// The raw field name used by ODB2, e.g. `an_depar@body`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Caption used by chart titles, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// True for the analysis and background departure columns.
    pub fn is_depar(&self) -> bool {
        self.name.contains("depar")
    }

    /// Field name without its `@table` suffix.
    pub fn short_name(&self) -> &str {
        self.name.split('@').next().unwrap_or(&self.name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
