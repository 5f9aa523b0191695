//! End-to-end tests: request resolution, selection, aggregation and caching
//! against per-cycle files on disk.

use std::cell::Cell;
use std::path::Path;

use obs_processor::{
    collate, write_collated, CacheGate, ChartConfig, ChartGenerator, CollatedIndex,
    DataSelector, FileObservationSource, ObsChartGenerator, RawRequest, TimeseriesAggregator,
    COLLATED_FILE_NAME,
};
use omfg_common::{Catalog, OmfgError, OmfgResult};
use serde_json::{json, Value};
use test_utils::{
    assert_all_approx_eq, assert_approx_eq, cycles, planview_request, timeseries_request,
    varnos, with_field, ObservationBuilder, TestDataset,
};

// ============================================================================
// Helper functions
// ============================================================================

fn resolve(request: Value) -> OmfgResult<ChartConfig> {
    ChartConfig::resolve(&RawRequest::from_value(request)?, &Catalog::standard())
}

fn on_dataset(request: Value, dataset: &TestDataset) -> ChartConfig {
    resolve(with_field(&request, "data_path", json!(dataset.data_path()))).unwrap()
}

/// Counts calls and writes a marker file.
struct CountingGenerator {
    calls: Cell<usize>,
}

impl CountingGenerator {
    fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

impl ChartGenerator for CountingGenerator {
    fn generate_into(&self, _config: &ChartConfig, target: &Path) -> OmfgResult<()> {
        self.calls.set(self.calls.get() + 1);
        std::fs::write(target, b"chart")?;
        Ok(())
    }
}

/// Fails without writing anything.
struct FailingGenerator;

impl ChartGenerator for FailingGenerator {
    fn generate_into(&self, _config: &ChartConfig, _target: &Path) -> OmfgResult<()> {
        Err(OmfgError::RenderError("boom".to_string()))
    }
}

// ============================================================================
// Request resolution
// ============================================================================

#[test]
fn test_filestem_example() {
    let config = resolve(timeseries_request()).unwrap();
    assert_eq!(
        config.output_filestem(),
        "timeseries_39_7_20190830T0000Z_20190830T1200Z_1.0_2.0"
    );
}

#[test]
fn test_equal_requests_share_filestem() {
    let a = resolve(planview_request()).unwrap();
    let b = resolve(with_field(&planview_request(), "vertco_min", json!("1"))).unwrap();
    assert_eq!(a.output_filestem(), b.output_filestem());

    let c = resolve(with_field(&planview_request(), "column", json!("fg_depar@body"))).unwrap();
    assert_ne!(a.output_filestem(), c.output_filestem());
}

#[test]
fn test_validation_happens_before_io() {
    let request = with_field(&planview_request(), "data_path", json!("/does/not/exist"));
    let request = with_field(&request, "cycle1", json!("not-a-cycle"));
    let err = resolve(request).unwrap_err();
    assert!(err.is_validation());
}

// ============================================================================
// Plan view selection
// ============================================================================

#[test]
fn test_planview_from_disk() {
    let dataset = TestDataset::new();
    let observations = ObservationBuilder::synthetic(6, 7, &[1.0, 2.0, 3.0]);
    dataset.write(cycles::FIRST, None, varnos::T2M, &observations);

    let config = on_dataset(planview_request(), &dataset);
    let source = FileObservationSource::new(config.data_path());
    let data = DataSelector::new().load_and_select(&config, &source).unwrap();

    // Levels 1, 2, 3, 1, 2, 3 keep records 0, 1, 3, 4.
    assert_eq!(data.latitudes, vec![-45.0, -44.0, -42.0, -41.0]);
    assert_eq!(data.longitudes, vec![-90.0, -88.0, -84.0, -82.0]);
    assert_all_approx_eq!(data.values, [0.0, 0.1, 0.3, 0.4], 1e-12);
    assert_eq!(data.stats.count, 4);
    assert_approx_eq!(data.stats.mean, 0.2, 1e-12);
    assert_eq!(data.palette, "bwr");
}

#[test]
fn test_planview_missing_file_is_fatal() {
    let dataset = TestDataset::new();
    let config = on_dataset(planview_request(), &dataset);
    let source = FileObservationSource::new(config.data_path());
    let err = DataSelector::new().load_and_select(&config, &source).unwrap_err();
    assert!(matches!(err, OmfgError::MissingArtifact(ref p) if p.ends_with("None_39.json")));
}

#[test]
fn test_planview_pressure_conversion() {
    let dataset = TestDataset::new();
    let observations = ObservationBuilder::new()
        .column("lat@hdr", &[0.0, 1.0])
        .column("lon@hdr", &[0.0, 1.0])
        .column("obsvalue@body", &[101325.0, 90000.0])
        .column("vertco_reference_1@body", &[1.0, 1.0])
        .column("vertco_type@body", &[7.0, 7.0]);
    dataset.write(cycles::FIRST, Some("surface"), varnos::PS, &observations);

    let request = with_field(&planview_request(), "column", json!("obsvalue@body"));
    let request = with_field(&request, "varno_code", json!(varnos::PS));
    let request = with_field(&request, "obs_group", json!("surface"));
    let config = on_dataset(request, &dataset);

    let source = FileObservationSource::new(config.data_path());
    let data = DataSelector::new().load_and_select(&config, &source).unwrap();
    assert_all_approx_eq!(data.values, [1013.25, 900.0], 1e-9);
    assert_eq!(data.units.as_deref(), Some("hPa"));
    assert_eq!(data.boundaries.first(), Some(&850.0));
}

// ============================================================================
// Time series aggregation
// ============================================================================

#[test]
fn test_timeseries_k_of_n_cycles() {
    let dataset = TestDataset::new();
    let observations = ObservationBuilder::synthetic(4, 7, &[1.0, 2.0]);
    dataset.write(cycles::FIRST, None, varnos::T2M, &observations);
    dataset.write(cycles::THIRD, None, varnos::T2M, &observations);
    // Outside the requested range.
    dataset.write(cycles::FOURTH, None, varnos::T2M, &observations);

    let config = on_dataset(timeseries_request(), &dataset);
    let source = FileObservationSource::new(config.data_path());
    let data = TimeseriesAggregator::new(&source).aggregate(&config).unwrap();

    assert_eq!(data.len(), 2);
    assert!(data.cycle_dates.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(data.obscount, vec![4, 4]);
    assert_approx_eq!(data.an_depar_mean[0], 0.15, 1e-12);
    assert_approx_eq!(data.fg_depar_mean[1], 0.3, 1e-12);
}

#[test]
fn test_timeseries_no_files_is_empty() {
    let dataset = TestDataset::new();
    let config = on_dataset(timeseries_request(), &dataset);
    let source = FileObservationSource::new(config.data_path());
    let data = TimeseriesAggregator::new(&source).aggregate(&config).unwrap();
    assert!(data.is_empty());
}

// ============================================================================
// Cache gate
// ============================================================================

#[test]
fn test_cache_miss_then_hit() {
    let output = tempfile::tempdir().unwrap();
    let gate = CacheGate::new(CountingGenerator::new(), output.path().join("charts"));
    let config = resolve(with_field(&timeseries_request(), "cache", json!(1))).unwrap();

    let first = gate.produce(&config).unwrap();
    let second = gate.produce(&config).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first,
        output
            .path()
            .join("charts")
            .join("timeseries_39_7_20190830T0000Z_20190830T1200Z_1.0_2.0.png")
    );
    assert_eq!(gate.generator().calls.get(), 1);
}

#[test]
fn test_cache_disabled_always_generates() {
    let output = tempfile::tempdir().unwrap();
    let gate = CacheGate::new(CountingGenerator::new(), output.path());
    let config = resolve(timeseries_request()).unwrap();
    assert!(!config.use_cache());

    gate.produce(&config).unwrap();
    gate.produce(&config).unwrap();
    assert_eq!(gate.generator().calls.get(), 2);
}

#[test]
fn test_generator_error_propagates() {
    let output = tempfile::tempdir().unwrap();
    let gate = CacheGate::new(FailingGenerator, output.path());
    let config = resolve(timeseries_request()).unwrap();
    assert!(matches!(gate.produce(&config), Err(OmfgError::RenderError(_))));
    assert!(!gate.artifact_path(&config).exists());
}

#[test]
fn test_obs_chart_generator_writes_png() {
    let dataset = TestDataset::new();
    let observations = ObservationBuilder::synthetic(8, 7, &[1.0, 2.0]);
    dataset.write(cycles::FIRST, None, varnos::T2M, &observations);
    dataset.write(cycles::SECOND, None, varnos::T2M, &observations);

    let output = tempfile::tempdir().unwrap();
    let gate = CacheGate::new(ObsChartGenerator::new(320, 200), output.path());

    for request in [planview_request(), timeseries_request()] {
        let config = on_dataset(request, &dataset);
        let path = gate.produce(&config).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}

// ============================================================================
// Collation
// ============================================================================

#[test]
fn test_collate_cycle_directory() {
    let dataset = TestDataset::new();
    dataset.write(cycles::FIRST, Some("sonde"), 2, &ObservationBuilder::synthetic(3, 1, &[85000.0]));
    dataset.write(
        cycles::FIRST,
        Some("atovs"),
        varnos::RAWBT,
        &ObservationBuilder::synthetic(4, 7, &[5.0, 3.0]),
    );
    dataset.write(cycles::FIRST, Some("empty"), 39, &ObservationBuilder::synthetic(0, 7, &[]));
    dataset.write_raw(cycles::FIRST, "notes.json", "{}");

    let cycle_dir = dataset.root().join(cycles::FIRST);
    let index = collate(&cycle_dir, &Catalog::standard()).unwrap();

    assert_eq!(index.keys().collect::<Vec<_>>(), vec!["atovs", "sonde"]);
    let sonde = &index["sonde"][&2];
    assert_eq!(sonde.length, 3);
    assert_eq!(sonde.varno_name, "t");
    assert_eq!(sonde.vertco_types, vec![1]);
    assert!(sonde.channels.is_none());
    assert_eq!(index["atovs"][&varnos::RAWBT].channels, Some(vec![3, 5]));

    let path = write_collated(&cycle_dir, &index).unwrap();
    assert!(path.ends_with(COLLATED_FILE_NAME));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n    \"atovs\""));
    let parsed: CollatedIndex = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, index);

    // The index itself is not collated on a second run.
    assert_eq!(collate(&cycle_dir, &Catalog::standard()).unwrap(), index);
}

#[test]
fn test_collate_missing_directory() {
    let dataset = TestDataset::new();
    let result = collate(&dataset.root().join("20000101T0000Z"), &Catalog::standard());
    assert!(matches!(result, Err(OmfgError::MissingArtifact(_))));
}
