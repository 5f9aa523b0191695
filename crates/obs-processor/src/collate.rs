//! Index of the per-cycle observation files in one cycle directory.
//!
//! The index lets the front end offer only the obs groups, varnos, vertical
//! coordinate types and channels that actually have data.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use omfg_common::{Catalog, OmfgError, OmfgResult, VertcoType};

use crate::array::{fields, ObservationArray};

/// Name of the index file written into the cycle directory.
pub const COLLATED_FILE_NAME: &str = "collated.json";

/// Metadata for one `<obs_group>_<varno>.json` file.
///
/// Fields are declared in key order so the written JSON is key-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollatedEntry {
    /// Channel numbers, present when any record uses the channel number
    /// vertical coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<i64>>,
    pub length: usize,
    pub source_file: PathBuf,
    pub varno_desc: String,
    pub varno_name: String,
    pub vertco_types: Vec<i64>,
}

/// Obs group to varno code to entry.
///
/// Varno codes sort numerically; JSON writes them as string keys.
pub type CollatedIndex = BTreeMap<String, BTreeMap<i32, CollatedEntry>>;

/// Split `<obs_group>_<varno>` at the last underscore.
pub fn parse_stem(stem: &str) -> Option<(&str, i32)> {
    let (obs_group, varno) = stem.rsplit_once('_')?;
    if obs_group.is_empty() {
        return None;
    }
    Some((obs_group, varno.parse().ok()?))
}

/// Sorted unique integer values, ignoring NaN.
fn unique_codes<'a>(values: impl Iterator<Item = &'a f64>) -> Vec<i64> {
    values
        .filter(|v| !v.is_nan())
        .map(|v| *v as i64)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn describe(path: &Path, array: &ObservationArray, catalog: &Catalog, varno_code: i32) -> OmfgResult<CollatedEntry> {
    let vertco_type = array.field(fields::VERTCO_TYPE)?;
    let vertco_types = unique_codes(vertco_type.iter());
    let channel_code = i64::from(VertcoType::CHANNEL_NUMBER);

    let channels = if vertco_types.contains(&channel_code) {
        let reference = array.field(fields::VERTCO_REFERENCE_1)?;
        let channel_type = f64::from(VertcoType::CHANNEL_NUMBER);
        Some(unique_codes(
            reference
                .iter()
                .zip(vertco_type)
                .filter(|(_, kind)| **kind == channel_type)
                .map(|(level, _)| level),
        ))
    } else {
        None
    };

    let varno_name = catalog.varno_name(varno_code).to_string();
    Ok(CollatedEntry {
        channels,
        length: array.len(),
        source_file: path.to_path_buf(),
        varno_desc: catalog.varno_desc(&varno_name).to_string(),
        varno_name,
        vertco_types,
    })
}

/// Build the index for every observation file in `cycle_dir`.
///
/// Empty arrays are left out. Files whose names do not parse are skipped
/// with a warning; unreadable files are an error.
pub fn collate(cycle_dir: &Path, catalog: &Catalog) -> OmfgResult<CollatedIndex> {
    if !cycle_dir.is_dir() {
        return Err(OmfgError::MissingArtifact(cycle_dir.display().to_string()));
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(cycle_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
        .filter(|path| path.file_name().map(|n| n != COLLATED_FILE_NAME).unwrap_or(false))
        .collect();
    paths.sort();

    info!(dir = %cycle_dir.display(), files = paths.len(), "Collating observation files");

    let mut index = CollatedIndex::new();
    for path in paths {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let Some((obs_group, varno_code)) = parse_stem(stem) else {
            warn!(path = %path.display(), "Skipping file with unexpected name");
            continue;
        };

        debug!(path = %path.display(), "Examining observation file");
        let array = ObservationArray::from_file(&path)?;
        if array.is_empty() {
            continue;
        }

        let entry = describe(&path, &array, catalog, varno_code)?;
        index
            .entry(obs_group.to_string())
            .or_default()
            .insert(varno_code, entry);
    }

    Ok(index)
}

/// Write `collated.json` (four-space indent, sorted keys) into `cycle_dir`.
pub fn write_collated(cycle_dir: &Path, index: &CollatedIndex) -> OmfgResult<PathBuf> {
    let path = cycle_dir.join(COLLATED_FILE_NAME);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    index.serialize(&mut serializer)?;

    std::fs::write(&path, buf)
        .map_err(|e| OmfgError::StorageError(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), groups = index.len(), "Wrote collated index");
    Ok(path)
}
