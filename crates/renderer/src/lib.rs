//! Raster rendering for observation charts.
//!
//! Provides:
//! - Named colormaps and boundary normalization
//! - Scatter maps (equirectangular) with a color bar
//! - Stacked line panels for time series
//! - PNG encoding (indexed or RGBA) with text metadata

pub mod canvas;
pub mod colormap;
pub mod error;
pub mod plot;
pub mod png;

pub use canvas::Canvas;
pub use colormap::{interpolate_color, BoundaryNorm, Color, Colormap};
pub use error::{RenderError, Result};
pub use plot::{LinePanels, ScatterMap, Series};
