//! Where per-cycle observation arrays come from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use omfg_common::{Cycle, OmfgResult};

use crate::array::ObservationArray;

/// Loads the observation array for an (obs group, varno, cycle) triple.
pub trait ObservationSource {
    /// `Ok(None)` when no array exists for the triple.
    fn load(
        &self,
        obs_group: Option<&str>,
        varno_code: i32,
        cycle: Cycle,
    ) -> OmfgResult<Option<ObservationArray>>;

    /// Human-readable location of the triple, used in error messages.
    fn describe(&self, obs_group: Option<&str>, varno_code: i32, cycle: Cycle) -> String;
}

/// File name of a per-cycle array: `<obs_group>_<varno>.json`.
///
/// An absent obs group is spelled `None`.
pub fn observation_file_name(obs_group: Option<&str>, varno_code: i32) -> String {
    format!("{}_{}.json", obs_group.unwrap_or("None"), varno_code)
}

/// Reads `<root>/<cycle>/<obs_group>_<varno>.json`.
#[derive(Debug, Clone)]
pub struct FileObservationSource {
    root: PathBuf,
}

impl FileObservationSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the array for a triple.
    pub fn path_for(&self, obs_group: Option<&str>, varno_code: i32, cycle: Cycle) -> PathBuf {
        self.root
            .join(cycle.to_string())
            .join(observation_file_name(obs_group, varno_code))
    }
}

impl ObservationSource for FileObservationSource {
    fn load(
        &self,
        obs_group: Option<&str>,
        varno_code: i32,
        cycle: Cycle,
    ) -> OmfgResult<Option<ObservationArray>> {
        let path = self.path_for(obs_group, varno_code, cycle);
        if !path.is_file() {
            debug!(path = %path.display(), "Observation file not present");
            return Ok(None);
        }
        ObservationArray::from_file(&path).map(Some)
    }

    fn describe(&self, obs_group: Option<&str>, varno_code: i32, cycle: Cycle) -> String {
        self.path_for(obs_group, varno_code, cycle)
            .display()
            .to_string()
    }
}

/// In-memory arrays keyed by triple.
#[derive(Debug, Clone, Default)]
pub struct MemoryObservationSource {
    arrays: HashMap<(Option<String>, i32, Cycle), ObservationArray>,
}

impl MemoryObservationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        obs_group: Option<&str>,
        varno_code: i32,
        cycle: Cycle,
        array: ObservationArray,
    ) {
        self.arrays
            .insert((obs_group.map(str::to_string), varno_code, cycle), array);
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}

impl ObservationSource for MemoryObservationSource {
    fn load(
        &self,
        obs_group: Option<&str>,
        varno_code: i32,
        cycle: Cycle,
    ) -> OmfgResult<Option<ObservationArray>> {
        Ok(self
            .arrays
            .get(&(obs_group.map(str::to_string), varno_code, cycle))
            .cloned())
    }

    fn describe(&self, obs_group: Option<&str>, varno_code: i32, cycle: Cycle) -> String {
        format!(
            "memory:{}/{}",
            cycle,
            observation_file_name(obs_group, varno_code)
        )
    }
}
