//! Vertical coordinate types used to window observations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ODB2 `vertco_type` codes and their labels.
pub const VERTCO_LABELS: &[(i32, &str)] = &[
    (1, "Pressure"),
    (2, "Geopotential Height"),
    (3, "TOVS Channel"),
    (4, "Scatterometer Channel"),
    (5, "Model Level Number"),
    (6, "Impact Parameter"),
    (7, "Channel Number"),
    (8, "Channel Wavelength"),
    (9, "Channel Frequency"),
    (10, "Ocean Depth"),
    (11, "Derived Pressure"),
    (12, "Ambivalent Wind Number"),
    (13, "Tangent Height for SBUV"),
    (14, "Model Level Pressure"),
    (15, "Lidar Range"),
    (16, "Lane Number"),
];

/// A type of vertical coordinate, obtained from a [`Catalog`](crate::Catalog) lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertcoType {
    code: i32,
    label: String,
}

impl VertcoType {
    pub const PRESSURE: i32 = 1;
    pub const GEOPOTENTIAL_HEIGHT: i32 = 2;
    pub const TOVS_CHANNEL: i32 = 3;
    pub const MODEL_LEVEL_NUMBER: i32 = 5;
    pub const CHANNEL_NUMBER: i32 = 7;
    pub const OCEAN_DEPTH: i32 = 10;

    pub(crate) fn new(code: i32, label: impl Into<String>) -> Self {
        Self {
            code,
            label: label.into(),
        }
    }

    /// The integer value stored in `vertco_type@body`.
    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for VertcoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
