//! Multi-cycle departure statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use omfg_common::OmfgResult;

use crate::array::{fields, select, ObservationArray};
use crate::config::ChartConfig;
use crate::filter::ObservationFilter;
use crate::source::ObservationSource;
use crate::stats::{mean, std_dev};

/// Per-cycle series, one entry per cycle that had data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeseriesData {
    /// Strictly ascending.
    pub cycle_dates: Vec<DateTime<Utc>>,
    pub an_depar_mean: Vec<f64>,
    pub an_depar_std: Vec<f64>,
    pub fg_depar_mean: Vec<f64>,
    pub fg_depar_std: Vec<f64>,
    pub obscount: Vec<usize>,
}

impl TimeseriesData {
    pub fn len(&self) -> usize {
        self.cycle_dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycle_dates.is_empty()
    }

    fn push(&mut self, date: DateTime<Utc>, array: &ObservationArray, mask: &[bool]) -> OmfgResult<()> {
        let an_depar = select(array.field(fields::AN_DEPAR)?, mask);
        let fg_depar = select(array.field(fields::FG_DEPAR)?, mask);

        self.cycle_dates.push(date);
        self.an_depar_mean.push(mean(&an_depar));
        self.an_depar_std.push(std_dev(&an_depar));
        self.fg_depar_mean.push(mean(&fg_depar));
        self.fg_depar_std.push(std_dev(&fg_depar));
        self.obscount.push(an_depar.len());
        Ok(())
    }
}

/// Walks `cycle1..=cycle2` in six-hour steps, reducing each existing array.
pub struct TimeseriesAggregator<'a, S: ObservationSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: ObservationSource + ?Sized> TimeseriesAggregator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Cycles with no array are skipped. An empty range yields empty series.
    pub fn aggregate(&self, config: &ChartConfig) -> OmfgResult<TimeseriesData> {
        let filter = ObservationFilter::for_obsvalue(
            config.vertco_type().code(),
            config.vertco_min(),
            config.vertco_max(),
        );
        let varno_code = config.varno().code();
        let mut data = TimeseriesData::default();
        let mut skipped = 0usize;

        for cycle in config.cycle1().range_to(config.cycle2()) {
            let Some(array) = self.source.load(config.obs_group(), varno_code, cycle)? else {
                debug!(cycle = %cycle, "No observations for cycle, skipping");
                skipped += 1;
                continue;
            };

            let mask = filter.mask(&array)?;
            data.push(cycle.datetime(), &array, &mask)?;
            debug!(cycle = %cycle, count = data.obscount.last().copied().unwrap_or(0), "Aggregated cycle");
        }

        info!(
            cycles = data.len(),
            skipped,
            from = %config.cycle1(),
            to = %config.cycle2(),
            "Time series data ready"
        );
        Ok(data)
    }
}
