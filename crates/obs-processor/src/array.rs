//! Columnar observation arrays.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use omfg_common::{OmfgError, OmfgResult};

/// Field names used by the selection and aggregation paths.
pub mod fields {
    pub const LAT: &str = "lat@hdr";
    pub const LON: &str = "lon@hdr";
    pub const VERTCO_REFERENCE_1: &str = "vertco_reference_1@body";
    pub const VERTCO_TYPE: &str = "vertco_type@body";
    pub const AN_DEPAR: &str = "an_depar@body";
    pub const FG_DEPAR: &str = "fg_depar@body";
    pub const OBSVALUE: &str = "obsvalue@body";
    pub const CORVALUE: &str = "corvalue@body";
}

/// One cycle's observations for a single obs group and varno.
///
/// Every field has the same length; missing values are NaN.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationArray {
    len: usize,
    fields: HashMap<String, Vec<f64>>,
}

impl ObservationArray {
    /// Build an array from named columns of equal length.
    pub fn from_fields<I, K>(columns: I) -> OmfgResult<Self>
    where
        I: IntoIterator<Item = (K, Vec<f64>)>,
        K: Into<String>,
    {
        let mut fields = HashMap::new();
        let mut len = None;

        for (name, values) in columns {
            let name = name.into();
            match len {
                None => len = Some(values.len()),
                Some(expected) if expected != values.len() => {
                    return Err(OmfgError::DataReadError(format!(
                        "field '{}' has {} values, expected {}",
                        name,
                        values.len(),
                        expected
                    )));
                }
                Some(_) => {}
            }
            fields.insert(name, values);
        }

        Ok(Self {
            len: len.unwrap_or(0),
            fields,
        })
    }

    /// Parse the columnar JSON form. `null` entries become NaN.
    pub fn from_json(json: &str) -> OmfgResult<Self> {
        let raw: HashMap<String, Vec<Option<f64>>> = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_reader<R: Read>(reader: R) -> OmfgResult<Self> {
        let raw: HashMap<String, Vec<Option<f64>>> = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    pub fn from_file(path: &Path) -> OmfgResult<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| OmfgError::DataReadError(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(std::io::BufReader::new(file))
            .map_err(|e| OmfgError::DataReadError(format!("{}: {}", path.display(), e)))
    }

    fn from_raw(raw: HashMap<String, Vec<Option<f64>>>) -> OmfgResult<Self> {
        Self::from_fields(raw.into_iter().map(|(name, values)| {
            let values = values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
            (name, values)
        }))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Values of a named field.
    pub fn field(&self, name: &str) -> OmfgResult<&[f64]> {
        self.fields
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| OmfgError::MissingField(name.to_string()))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Values at the positions where `mask` is true.
pub fn select(values: &[f64], mask: &[bool]) -> Vec<f64> {
    values
        .iter()
        .zip(mask)
        .filter_map(|(value, keep)| keep.then_some(*value))
        .collect()
}
