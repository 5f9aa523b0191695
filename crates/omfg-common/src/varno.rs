//! Observed variable numbers (varnos) and their rendering groups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Built-in varnos: (code, name, description, group).
pub const VARNO_TABLE: &[(i32, &str, &str, Option<&str>)] = &[
    (1, "z", "Geopotential", None),
    (2, "t", "Upper Air Temperature", Some(VarnoType::TEMPERATURE)),
    (3, "u", "Upper Air U Component", None),
    (4, "v", "Upper Air V Component", None),
    (7, "q", "Specific Humidity", None),
    (29, "rh", "Upper Air Relative Humidity", None),
    (39, "t2m", "2m Temperature", Some(VarnoType::TEMPERATURE)),
    (40, "td2m", "2m Dew Point", Some(VarnoType::TEMPERATURE)),
    (41, "u10m", "10m U Component", None),
    (42, "v10m", "10m V Component", None),
    (58, "rh2m", "2m Relative Humidity", None),
    (110, "ps", "Surface Pressure", Some(VarnoType::PRESSURE)),
    (111, "dd", "Wind Direction", None),
    (112, "ff", "Wind Force", None),
    (119, "rawbt", "Brightness Temperature", None),
    (162, "bend_angle", "Bending Angle", None),
    (215, "1dvar", "1D-Var Retrieval", None),
];

/// Unit conversion applied to observation values before plotting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    /// Values are plotted as stored.
    Identity,
    /// Pascals to hectopascals: value / 100
    PascalToHectopascal,
    /// Kelvin to Celsius: value - 273.15
    KelvinToCelsius,
}

impl Formula {
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Formula::Identity => value,
            Formula::PascalToHectopascal => value / 100.0,
            Formula::KelvinToCelsius => value - 273.15,
        }
    }

    /// Apply the conversion to every value.
    pub fn apply_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| self.apply(*v)).collect()
    }
}

/// A setting with separate departure and raw value variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ByKind<T> {
    pub depar: T,
    pub value: T,
}

impl<T> ByKind<T> {
    pub fn new(depar: T, value: T) -> Self {
        Self { depar, value }
    }

    /// Pick the departure or the value variant.
    pub fn get(&self, is_depar: bool) -> &T {
        if is_depar {
            &self.depar
        } else {
            &self.value
        }
    }
}

/// Rendering hints shared by a group of similar varnos.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VarnoType {
    pub name: String,
    /// Colormap id for departures and for raw values.
    pub cmap: Option<ByKind<String>>,
    pub formula: Option<ByKind<Formula>>,
    /// Fixed color bar boundaries, in converted units.
    pub levels: Option<ByKind<Vec<f64>>>,
    /// Units after the formula has been applied.
    pub units: Option<String>,
}

impl VarnoType {
    pub const PRESSURE: &'static str = "pressure";
    pub const TEMPERATURE: &'static str = "temperature";

    /// A group with no rendering hints at all.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn pressure() -> Self {
        Self {
            name: Self::PRESSURE.to_string(),
            cmap: Some(ByKind::new("bwr".to_string(), "jet".to_string())),
            formula: Some(ByKind::new(
                Formula::PascalToHectopascal,
                Formula::PascalToHectopascal,
            )),
            levels: Some(ByKind::new(
                departure_levels(),
                vec![850.0, 860.0, 870.0, 880.0, 890.0, 900.0, 910.0, 920.0, 930.0, 940.0],
            )),
            units: Some("hPa".to_string()),
        }
    }

    pub fn temperature() -> Self {
        Self {
            name: Self::TEMPERATURE.to_string(),
            cmap: Some(ByKind::new("bwr".to_string(), "jet".to_string())),
            formula: Some(ByKind::new(Formula::Identity, Formula::KelvinToCelsius)),
            levels: Some(ByKind::new(
                departure_levels(),
                vec![-70.0, -60.0, -50.0, -40.0, -30.0, -20.0, -10.0, 0.0, 10.0, 20.0, 30.0, 40.0],
            )),
            units: Some("Degrees Celsius".to_string()),
        }
    }

    /// All built-in groups.
    pub fn builtin() -> Vec<VarnoType> {
        vec![Self::pressure(), Self::temperature()]
    }
}

fn departure_levels() -> Vec<f64> {
    vec![-50.0, -20.0, -10.0, -5.0, -2.5, 0.0, 2.5, 5.0, 10.0, 20.0, 50.0]
}

/// An observed variable, obtained from a [`Catalog`](crate::Catalog) lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Varno {
    code: i32,
    name: String,
    desc: String,
    group: Option<Arc<VarnoType>>,
}

impl Varno {
    pub(crate) fn new(
        code: i32,
        name: impl Into<String>,
        desc: impl Into<String>,
        group: Option<Arc<VarnoType>>,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            desc: desc.into(),
            group,
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// The rendering group, if the varno belongs to one.
    pub fn varno_type(&self) -> Option<&VarnoType> {
        self.group.as_deref()
    }

    pub fn cmap(&self) -> Option<&ByKind<String>> {
        self.group.as_ref().and_then(|g| g.cmap.as_ref())
    }

    pub fn formula(&self) -> Option<&ByKind<Formula>> {
        self.group.as_ref().and_then(|g| g.formula.as_ref())
    }

    pub fn levels(&self) -> Option<&ByKind<Vec<f64>>> {
        self.group.as_ref().and_then(|g| g.levels.as_ref())
    }

    pub fn units(&self) -> Option<&str> {
        self.group.as_ref().and_then(|g| g.units.as_deref())
    }
}

impl fmt::Display for Varno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
