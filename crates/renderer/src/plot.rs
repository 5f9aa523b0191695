//! Chart layouts: scatter map and stacked line panels.

use tracing::debug;

use crate::canvas::Canvas;
use crate::colormap::{BoundaryNorm, Color, Colormap};
use crate::error::{RenderError, Result};

/// Margin around plot areas, in pixels.
const MARGIN: i64 = 20;

/// Fraction of the width given to the color bar.
const COLORBAR_FRACTION: f64 = 0.06;

/// Equirectangular world map with observations drawn as colored discs.
#[derive(Debug, Clone, Copy)]
pub struct ScatterMap {
    pub width: usize,
    pub height: usize,
    pub marker_radius: i64,
}

impl ScatterMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            marker_radius: 2,
        }
    }

    /// Draw points colored by bin, with a vertical color bar on the right.
    ///
    /// Points whose value has no bin are drawn in black.
    pub fn render(
        &self,
        latitudes: &[f64],
        longitudes: &[f64],
        values: &[f64],
        norm: &BoundaryNorm,
        colormap: Colormap,
    ) -> Result<Canvas> {
        for series in [longitudes, values] {
            if series.len() != latitudes.len() {
                return Err(RenderError::LengthMismatch {
                    expected: latitudes.len(),
                    actual: series.len(),
                });
            }
        }

        let mut canvas = Canvas::new(self.width, self.height, Color::WHITE)?;
        let bar_width = ((self.width as f64 * COLORBAR_FRACTION) as i64).max(1);
        let map_x = MARGIN;
        let map_y = MARGIN;
        let map_w = (self.width as i64 - bar_width - 3 * MARGIN).max(1);
        let map_h = (self.height as i64 - 2 * MARGIN).max(1);

        canvas.fill_rect(map_x, map_y, map_w, map_h, Color::LAND);
        for lon in (-180..=180).step_by(30) {
            let x = map_x + ((lon as f64 + 180.0) / 360.0 * (map_w - 1) as f64).round() as i64;
            canvas.draw_line(x, map_y, x, map_y + map_h - 1, Color::GRID);
        }
        for lat in (-90..=90).step_by(30) {
            let y = map_y + ((90.0 - lat as f64) / 180.0 * (map_h - 1) as f64).round() as i64;
            canvas.draw_line(map_x, y, map_x + map_w - 1, y, Color::GRID);
        }
        canvas.stroke_rect(map_x, map_y, map_w, map_h, Color::BLACK);

        let colors = norm.bin_colors(colormap);
        let mut drawn = 0usize;
        for ((lat, lon), value) in latitudes.iter().zip(longitudes).zip(values) {
            if lat.is_nan() || lon.is_nan() {
                continue;
            }
            let lon = normalize_longitude(*lon);
            let x = map_x + ((lon + 180.0) / 360.0 * (map_w - 1) as f64).round() as i64;
            let y = map_y + ((90.0 - lat.clamp(-90.0, 90.0)) / 180.0 * (map_h - 1) as f64).round() as i64;
            let color = norm
                .bin(*value)
                .and_then(|bin| colors.get(bin).copied())
                .unwrap_or(Color::BLACK);
            canvas.fill_disc(x, y, self.marker_radius, color);
            drawn += 1;
        }

        let bar_x = map_x + map_w + MARGIN;
        draw_colorbar(&mut canvas, bar_x, map_y, bar_width, map_h, &colors);

        debug!(points = drawn, bins = colors.len(), "Rendered scatter map");
        Ok(canvas)
    }
}

fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if lon == 180.0 {
        180.0
    } else {
        wrapped
    }
}

/// Bins stacked bottom to top, lowest bin at the bottom.
fn draw_colorbar(canvas: &mut Canvas, x: i64, y: i64, w: i64, h: i64, colors: &[Color]) {
    if colors.is_empty() {
        return;
    }
    let n = colors.len() as i64;
    for (i, color) in colors.iter().enumerate() {
        let i = i as i64;
        let top = y + h - (i + 1) * h / n;
        let bottom = y + h - i * h / n;
        canvas.fill_rect(x, top, w, bottom - top, *color);
    }
    canvas.stroke_rect(x, y, w, h, Color::BLACK);
}

/// One line of a panel.
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    pub values: &'a [f64],
    pub color: Color,
}

/// Stacked line panels sharing one x axis.
#[derive(Debug, Clone, Copy)]
pub struct LinePanels {
    pub width: usize,
    pub height: usize,
}

impl LinePanels {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Draw each panel's series against `x`. Each panel scales its own y axis
    /// and NaN values break the line.
    pub fn render(&self, x: &[f64], panels: &[Vec<Series<'_>>]) -> Result<Canvas> {
        for series in panels.iter().flatten() {
            if series.values.len() != x.len() {
                return Err(RenderError::LengthMismatch {
                    expected: x.len(),
                    actual: series.values.len(),
                });
            }
        }

        let mut canvas = Canvas::new(self.width, self.height, Color::WHITE)?;
        if panels.is_empty() {
            return Ok(canvas);
        }

        let x_range = finite_range(x.iter().copied());
        let plot_x = MARGIN;
        let plot_w = (self.width as i64 - 2 * MARGIN).max(1);
        let slot = (self.height as i64 - MARGIN) / panels.len() as i64;

        for (index, panel) in panels.iter().enumerate() {
            let plot_y = MARGIN + index as i64 * slot;
            let plot_h = (slot - MARGIN).max(1);
            canvas.stroke_rect(plot_x, plot_y, plot_w, plot_h, Color::BLACK);

            let y_range = finite_range(panel.iter().flat_map(|s| s.values.iter().copied()));
            let (Some(x_range), Some(y_range)) = (x_range, y_range) else {
                continue;
            };

            let to_px = |xv: f64, yv: f64| {
                let px = plot_x + 1 + (scale(xv, x_range) * (plot_w - 3) as f64).round() as i64;
                let py = plot_y + plot_h - 2 - (scale(yv, y_range) * (plot_h - 3) as f64).round() as i64;
                (px, py)
            };

            if y_range.0 < 0.0 && y_range.1 > 0.0 {
                let (_, zero) = to_px(x_range.0, 0.0);
                canvas.draw_line(plot_x, zero, plot_x + plot_w - 1, zero, Color::GRID);
            }

            for series in panel {
                let mut previous: Option<(i64, i64)> = None;
                for (xv, yv) in x.iter().zip(series.values) {
                    if !xv.is_finite() || !yv.is_finite() {
                        previous = None;
                        continue;
                    }
                    let point = to_px(*xv, *yv);
                    if let Some((px, py)) = previous {
                        canvas.draw_line(px, py, point.0, point.1, series.color);
                    }
                    canvas.fill_disc(point.0, point.1, 2, series.color);
                    previous = Some(point);
                }
            }
        }

        debug!(panels = panels.len(), points = x.len(), "Rendered line panels");
        Ok(canvas)
    }
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Position of `value` in `range` as a fraction; a flat range maps to the middle.
fn scale(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        (value - lo) / (hi - lo)
    } else {
        0.5
    }
}
