//! Chart generators: selected data in, PNG file out.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use omfg_common::{OmfgError, OmfgResult};
use renderer::{BoundaryNorm, Canvas, Color, Colormap, LinePanels, RenderError, ScatterMap, Series};

use crate::config::{ChartConfig, ChartType};
use crate::selector::{DataSelector, PlanviewData};
use crate::settings::GeneratorSettings;
use crate::source::{FileObservationSource, ObservationSource};
use crate::timeseries::{TimeseriesAggregator, TimeseriesData};

const AN_DEPAR_COLOR: Color = Color::rgb(214, 39, 40);
const FG_DEPAR_COLOR: Color = Color::rgb(31, 119, 180);
const COUNT_COLOR: Color = Color::rgb(0, 0, 0);

/// Produces the chart file for a request.
pub trait ChartGenerator {
    /// Write the chart for `config` to `target`.
    fn generate_into(&self, config: &ChartConfig, target: &Path) -> OmfgResult<()>;
}

/// Renders plan views and time series from per-cycle observation files
/// under the request's `data_path`.
#[derive(Debug, Clone, Copy)]
pub struct ObsChartGenerator {
    width: usize,
    height: usize,
}

impl ObsChartGenerator {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        Self::new(settings.image_width, settings.image_height)
    }

    /// Render the chart for `config` from `source` as PNG bytes.
    pub fn render<S: ObservationSource + ?Sized>(
        &self,
        config: &ChartConfig,
        source: &S,
    ) -> OmfgResult<Vec<u8>> {
        match config.chart_type() {
            ChartType::Planview => {
                let data = DataSelector::new().load_and_select(config, source)?;
                self.render_planview(config, &data)
            }
            ChartType::Timeseries => {
                let data = TimeseriesAggregator::new(source).aggregate(config)?;
                self.render_timeseries(config, &data)
            }
        }
    }

    pub fn render_planview(&self, config: &ChartConfig, data: &PlanviewData) -> OmfgResult<Vec<u8>> {
        let norm = BoundaryNorm::new(data.boundaries.clone());
        let canvas = ScatterMap::new(self.width, self.height)
            .render(
                &data.latitudes,
                &data.longitudes,
                &data.values,
                &norm,
                Colormap::from_id(&data.palette),
            )
            .map_err(render_error)?;

        let title = config.planview_title();
        let caption = data.stats.caption();
        let units = data.units.as_deref().unwrap_or_default();
        encode(
            &canvas,
            &[
                ("Title", title.as_str()),
                ("Description", caption.as_str()),
                ("Units", units),
            ],
        )
    }

    pub fn render_timeseries(
        &self,
        config: &ChartConfig,
        data: &TimeseriesData,
    ) -> OmfgResult<Vec<u8>> {
        let x: Vec<f64> = data
            .cycle_dates
            .iter()
            .map(|date| date.timestamp() as f64)
            .collect();
        let counts: Vec<f64> = data.obscount.iter().map(|c| *c as f64).collect();

        let panels = vec![
            vec![
                Series { values: &data.an_depar_mean, color: AN_DEPAR_COLOR },
                Series { values: &data.fg_depar_mean, color: FG_DEPAR_COLOR },
            ],
            vec![
                Series { values: &data.an_depar_std, color: AN_DEPAR_COLOR },
                Series { values: &data.fg_depar_std, color: FG_DEPAR_COLOR },
            ],
            vec![Series { values: &counts, color: COUNT_COLOR }],
        ];

        let canvas = LinePanels::new(self.width, self.height)
            .render(&x, &panels)
            .map_err(render_error)?;
        let title = config.timeseries_title();
        encode(&canvas, &[("Title", title.as_str())])
    }
}

impl ChartGenerator for ObsChartGenerator {
    fn generate_into(&self, config: &ChartConfig, target: &Path) -> OmfgResult<()> {
        let source = FileObservationSource::new(config.data_path());
        let png = self.render(config, &source)?;
        write_atomic(target, &png)?;
        info!(path = %target.display(), bytes = png.len(), "Chart written");
        Ok(())
    }
}

fn encode(canvas: &Canvas, text: &[(&str, &str)]) -> OmfgResult<Vec<u8>> {
    canvas.to_png(text).map_err(render_error)
}

fn render_error(err: RenderError) -> OmfgError {
    OmfgError::RenderError(err.to_string())
}

/// Write to a uniquely named temp file beside `target`, then rename it over
/// `target`. Concurrent writers never share a temp file; the last rename wins.
fn write_atomic(target: &Path, bytes: &[u8]) -> OmfgResult<()> {
    let storage_error =
        |e: std::io::Error| OmfgError::StorageError(format!("{}: {}", target.display(), e));
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".chart-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(storage_error)?;
    tmp.write_all(bytes).map_err(storage_error)?;
    tmp.persist(target).map_err(|e| storage_error(e.error))?;
    debug!(path = %target.display(), "Renamed temporary chart file");
    Ok(())
}
