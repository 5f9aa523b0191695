//! File-based chart cache keyed by the request filestem.
//!
//! The check is purely path based and takes no lock: two processes asking
//! for the same uncached chart may both generate it, and the last rename wins.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use omfg_common::{OmfgError, OmfgResult};

use crate::chart::ChartGenerator;
use crate::config::ChartConfig;

/// Extension of cached chart files.
pub const CHART_EXTENSION: &str = "png";

/// Wraps a generator with a lookup in `output_root`.
pub struct CacheGate<G> {
    generator: G,
    output_root: PathBuf,
}

impl<G: ChartGenerator> CacheGate<G> {
    pub fn new(generator: G, output_root: impl Into<PathBuf>) -> Self {
        Self {
            generator,
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// `<output_root>/<filestem>.png`
    pub fn artifact_path(&self, config: &ChartConfig) -> PathBuf {
        self.output_root
            .join(format!("{}.{}", config.output_filestem(), CHART_EXTENSION))
    }

    /// Return the chart path, generating the chart unless caching is enabled
    /// and the file already exists.
    pub fn produce(&self, config: &ChartConfig) -> OmfgResult<PathBuf> {
        std::fs::create_dir_all(&self.output_root).map_err(|e| {
            OmfgError::StorageError(format!("{}: {}", self.output_root.display(), e))
        })?;

        let path = self.artifact_path(config);
        if config.use_cache() && path.is_file() {
            info!(path = %path.display(), "Using cached chart");
            return Ok(path);
        }

        debug!(
            path = %path.display(),
            use_cache = config.use_cache(),
            "Generating chart"
        );
        self.generator.generate_into(config, &path)?;
        Ok(path)
    }
}
