//! Observation selection, aggregation and chart caching.
//!
//! This crate turns a chart request into a PNG of observation departures:
//!
//! - **Resolution**: a raw JSON request is validated against the
//!   [`Catalog`](omfg_common::Catalog) into an immutable [`ChartConfig`]
//! - **Selection**: one cycle's observations are masked and converted for a
//!   plan view
//! - **Aggregation**: per-cycle departure statistics are collected for a
//!   time series
//! - **Caching**: charts are stored under a filestem derived from the request
//!
//! # Architecture
//!
//! ```text
//! request.json
//!      │
//!      ▼
//! ChartConfig::resolve(raw, catalog)
//!      │
//!      ▼
//! CacheGate::produce(config)
//!      │
//!      ├─► use_cache and <output_root>/<filestem>.png exists: return it
//!      │
//!      └─► ChartGenerator::generate_into(config, path)
//!               │
//!               ├─► planview:   DataSelector (one cycle, missing file fatal)
//!               │
//!               └─► timeseries: TimeseriesAggregator (cycle1..=cycle2,
//!                                missing cycles skipped)
//!                        │
//!                        ▼
//!                   renderer → PNG
//! ```
//!
//! # Example
//!
//! ```ignore
//! use obs_processor::{CacheGate, ChartConfig, GeneratorSettings, ObsChartGenerator};
//! use omfg_common::Catalog;
//!
//! let catalog = Catalog::standard();
//! let config = ChartConfig::load("request.json", &catalog)?;
//!
//! let settings = GeneratorSettings::from_env();
//! let gate = CacheGate::new(ObsChartGenerator::from_settings(&settings), &settings.output_dir);
//! let path = gate.produce(&config)?;
//! ```

pub mod array;
pub mod cache;
pub mod chart;
pub mod collate;
pub mod config;
pub mod filter;
pub mod selector;
pub mod settings;
pub mod source;
pub mod stats;
pub mod timeseries;

// Re-export commonly used types at crate root
pub use array::{fields, ObservationArray};
pub use cache::CacheGate;
pub use chart::{ChartGenerator, ObsChartGenerator};
pub use collate::{collate, write_collated, CollatedEntry, CollatedIndex, COLLATED_FILE_NAME};
pub use config::{ChartConfig, ChartType, RawRequest};
pub use filter::ObservationFilter;
pub use selector::{DataSelector, PlanviewData, DEFAULT_PALETTE};
pub use settings::GeneratorSettings;
pub use source::{
    observation_file_name, FileObservationSource, MemoryObservationSource, ObservationSource,
};
pub use stats::SummaryStats;
pub use timeseries::{TimeseriesAggregator, TimeseriesData};
