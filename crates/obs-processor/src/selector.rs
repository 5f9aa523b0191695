//! Single-cycle observation selection for plan views.

use serde::Serialize;
use tracing::{debug, info};

use omfg_common::{OmfgError, OmfgResult};

use crate::array::{fields, select, ObservationArray};
use crate::config::ChartConfig;
use crate::filter::ObservationFilter;
use crate::source::ObservationSource;
use crate::stats::{linspace, SummaryStats};

/// Palette used when a varno has no colormap of its own.
pub const DEFAULT_PALETTE: &str = "jet";

/// Number of generated color bar boundaries when a varno has no fixed levels.
pub const GENERATED_BOUNDARY_COUNT: usize = 10;

/// Everything a plan view needs, index-aligned across the three series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanviewData {
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
    /// Plotted values after unit conversion.
    pub values: Vec<f64>,
    /// Color bar boundaries, ascending.
    pub boundaries: Vec<f64>,
    pub palette: String,
    pub units: Option<String>,
    pub stats: SummaryStats,
}

impl PlanviewData {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Reduces one cycle's array to the points of a plan view.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataSelector;

impl DataSelector {
    pub fn new() -> Self {
        Self
    }

    /// Select, convert and summarise the plotted column of `array`.
    pub fn select(&self, config: &ChartConfig, array: &ObservationArray) -> OmfgResult<PlanviewData> {
        let column = config
            .column()
            .ok_or_else(|| OmfgError::MissingParameter("column".to_string()))?;
        let is_depar = config.is_depar();
        let varno = config.varno();

        let filter = ObservationFilter::new(
            column.name(),
            config.vertco_type().code(),
            config.vertco_min(),
            config.vertco_max(),
        );
        let mask = filter.mask(array)?;

        let latitudes = select(array.field(fields::LAT)?, &mask);
        let longitudes = select(array.field(fields::LON)?, &mask);
        let mut values = select(array.field(column.name())?, &mask);

        if let Some(formula) = varno.formula() {
            values = formula.get(is_depar).apply_all(&values);
        }

        let stats = SummaryStats::from_values(&values);

        let boundaries = match varno.levels() {
            Some(levels) => levels.get(is_depar).clone(),
            None if values.is_empty() => Vec::new(),
            None => linspace(stats.min, stats.max, GENERATED_BOUNDARY_COUNT),
        };

        let palette = varno
            .cmap()
            .map(|cmap| cmap.get(is_depar).clone())
            .unwrap_or_else(|| DEFAULT_PALETTE.to_string());

        debug!(
            selected = values.len(),
            total = array.len(),
            palette = %palette,
            "Selected plan view observations"
        );

        Ok(PlanviewData {
            latitudes,
            longitudes,
            values,
            boundaries,
            palette,
            units: varno.units().map(str::to_string),
            stats,
        })
    }

    /// Load `cycle1` for the request and select from it.
    ///
    /// A missing array is an error here, unlike the time-series path.
    pub fn load_and_select<S: ObservationSource + ?Sized>(
        &self,
        config: &ChartConfig,
        source: &S,
    ) -> OmfgResult<PlanviewData> {
        let varno_code = config.varno().code();
        let array = source
            .load(config.obs_group(), varno_code, config.cycle1())?
            .ok_or_else(|| {
                OmfgError::MissingArtifact(source.describe(
                    config.obs_group(),
                    varno_code,
                    config.cycle1(),
                ))
            })?;

        let data = self.select(config, &array)?;
        info!(
            cycle = %config.cycle1(),
            points = data.len(),
            "Plan view data ready"
        );
        Ok(data)
    }
}
