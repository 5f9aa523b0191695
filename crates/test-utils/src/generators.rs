//! Synthetic observation data and on-disk datasets.
//!
//! Generated values are predictable so tests can check exact selections:
//! record `i` sits at latitude `i - 45`, longitude `2 * i - 90`, with
//! `an_depar = i / 10` and `fg_depar = i / 5`.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Column builder for one observation file.
#[derive(Debug, Clone, Default)]
pub struct ObservationBuilder {
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl ObservationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column from plain values; NaN is written as `null`.
    pub fn column(mut self, name: &str, values: &[f64]) -> Self {
        let values = values
            .iter()
            .map(|v| if v.is_nan() { None } else { Some(*v) })
            .collect();
        self.columns.insert(name.to_string(), values);
        self
    }

    /// `n` records on one vertical coordinate type, with levels cycling
    /// through `levels`.
    pub fn synthetic(n: usize, vertco_type: i32, levels: &[f64]) -> Self {
        let index: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let level = |i: usize| {
            if levels.is_empty() {
                f64::NAN
            } else {
                levels[i % levels.len()]
            }
        };

        Self::new()
            .column("lat@hdr", &index.iter().map(|i| i - 45.0).collect::<Vec<_>>())
            .column("lon@hdr", &index.iter().map(|i| 2.0 * i - 90.0).collect::<Vec<_>>())
            .column("obsvalue@body", &index.iter().map(|i| 273.15 + i).collect::<Vec<_>>())
            .column("corvalue@body", &index.iter().map(|i| 273.15 + i).collect::<Vec<_>>())
            .column("an_depar@body", &index.iter().map(|i| i / 10.0).collect::<Vec<_>>())
            .column("fg_depar@body", &index.iter().map(|i| i / 5.0).collect::<Vec<_>>())
            .column("vertco_reference_1@body", &(0..n).map(level).collect::<Vec<_>>())
            .column("vertco_type@body", &vec![f64::from(vertco_type); n])
    }

    /// Number of records in the first column.
    pub fn len(&self) -> usize {
        self.columns.values().next().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .columns
            .iter()
            .map(|(name, values)| {
                let values = values
                    .iter()
                    .map(|v| v.map(Value::from).unwrap_or(Value::Null))
                    .collect();
                (name.clone(), Value::Array(values))
            })
            .collect();
        Value::Object(map)
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

/// A temporary `<root>/<cycle>/<obs_group>_<varno>.json` tree.
///
/// The directory is removed when the dataset is dropped.
pub struct TestDataset {
    dir: tempfile::TempDir,
}

impl TestDataset {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Root path as a string, ready for a request's `data_path`.
    pub fn data_path(&self) -> String {
        self.root().display().to_string()
    }

    /// Write one observation file; an absent obs group is spelled `None`.
    pub fn write(
        &self,
        cycle: &str,
        obs_group: Option<&str>,
        varno: i32,
        observations: &ObservationBuilder,
    ) -> PathBuf {
        let dir = self.root().join(cycle);
        std::fs::create_dir_all(&dir).expect("failed to create cycle dir");
        let path = dir.join(format!("{}_{}.json", obs_group.unwrap_or("None"), varno));
        std::fs::write(&path, observations.to_json()).expect("failed to write observations");
        path
    }

    /// Write a raw file into a cycle directory.
    pub fn write_raw(&self, cycle: &str, name: &str, content: &str) -> PathBuf {
        let dir = self.root().join(cycle);
        std::fs::create_dir_all(&dir).expect("failed to create cycle dir");
        let path = dir.join(name);
        std::fs::write(&path, content).expect("failed to write file");
        path
    }
}

impl Default for TestDataset {
    fn default() -> Self {
        Self::new()
    }
}
