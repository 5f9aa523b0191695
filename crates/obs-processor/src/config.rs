//! Chart requests: the raw JSON form and the resolved configuration.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use omfg_common::{Catalog, Column, Cycle, OmfgError, OmfgResult, Varno, VertcoType};

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    /// Map scatter plot of a single cycle.
    Planview,
    /// Per-cycle statistics over a cycle range.
    Timeseries,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planview => "planview",
            Self::Timeseries => "timeseries",
        }
    }
}

impl FromStr for ChartType {
    type Err = OmfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planview" => Ok(Self::Planview),
            "timeseries" => Ok(Self::Timeseries),
            other => Err(OmfgError::UnknownChartType(other.to_string())),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chart request as written by the web front end.
///
/// Every value is kept as text; JSON numbers are accepted wherever a
/// string is expected and converted with their JSON spelling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRequest {
    #[serde(deserialize_with = "scalar")]
    pub cache: String,
    #[serde(deserialize_with = "scalar")]
    pub chart_type: String,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub column: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub cycle1: String,
    #[serde(deserialize_with = "scalar")]
    pub cycle2: String,
    #[serde(deserialize_with = "scalar")]
    pub data_path: String,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub obs_group: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub varno_code: String,
    #[serde(deserialize_with = "scalar")]
    pub vertco_max: String,
    #[serde(deserialize_with = "scalar")]
    pub vertco_min: String,
    #[serde(deserialize_with = "scalar")]
    pub vertco_type_code: String,
}

impl RawRequest {
    /// Load a request from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> OmfgResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            OmfgError::StorageError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse a request from a JSON string.
    pub fn from_json(json: &str) -> OmfgResult<Self> {
        serde_json::from_str(json).map_err(request_error)
    }

    /// Convert an already parsed JSON value.
    pub fn from_value(value: Value) -> OmfgResult<Self> {
        serde_json::from_value(value).map_err(request_error)
    }
}

/// Missing fields map to `MissingParameter`; anything else is an invalid request.
fn request_error(err: serde_json::Error) -> OmfgError {
    let message = err.to_string();
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());
    match missing {
        Some(field) => OmfgError::MissingParameter(field.to_string()),
        None => OmfgError::invalid_parameter("request", message),
    }
}

fn scalar_to_string<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(E::custom(format!("expected a string or number, found {}", other))),
    }
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_to_string::<D::Error>(Value::deserialize(deserializer)?)?
        .ok_or_else(|| de::Error::custom("expected a string or number, found null"))
}

fn optional_scalar<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    scalar_to_string::<D::Error>(Value::deserialize(deserializer)?)
}

/// A fully validated chart request.
///
/// Built only through [`ChartConfig::resolve`]; every lookup and parse has
/// succeeded by the time a value exists, and nothing changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    use_cache: bool,
    chart_type: ChartType,
    column: Option<Column>,
    cycle1: Cycle,
    cycle2: Cycle,
    data_path: PathBuf,
    obs_group: Option<String>,
    varno: Varno,
    vertco_max: f64,
    vertco_min: f64,
    vertco_type: VertcoType,
}

impl ChartConfig {
    /// Validate a raw request against the catalog.
    ///
    /// No ordering check is made between `vertco_min` and `vertco_max`; a
    /// reversed window simply selects nothing.
    pub fn resolve(raw: &RawRequest, catalog: &Catalog) -> OmfgResult<Self> {
        let use_cache = parse_cache_flag(&raw.cache)?;
        let chart_type: ChartType = raw.chart_type.parse()?;

        let column = match raw.column.as_deref() {
            Some(name) if !name.is_empty() => Some(catalog.column(name)?),
            _ => None,
        };

        let cycle1 = Cycle::parse(&raw.cycle1)?;
        let cycle2 = Cycle::parse(&raw.cycle2)?;

        let varno_code = parse_code(&raw.varno_code)
            .ok_or_else(|| OmfgError::UnknownVarno(raw.varno_code.clone()))?;
        let varno = catalog.varno(varno_code)?;

        let vertco_code = parse_code(&raw.vertco_type_code)
            .ok_or_else(|| OmfgError::InvalidVertcoType(raw.vertco_type_code.clone()))?;
        let vertco_type = catalog.vertco_type(vertco_code)?;

        Ok(Self {
            use_cache,
            chart_type,
            column,
            cycle1,
            cycle2,
            data_path: PathBuf::from(&raw.data_path),
            obs_group: raw.obs_group.clone().filter(|group| !group.is_empty()),
            varno,
            vertco_max: parse_bound("vertco_max", &raw.vertco_max)?,
            vertco_min: parse_bound("vertco_min", &raw.vertco_min)?,
            vertco_type,
        })
    }

    /// Load and resolve a JSON request file.
    pub fn load(path: impl AsRef<Path>, catalog: &Catalog) -> OmfgResult<Self> {
        Self::resolve(&RawRequest::from_file(path)?, catalog)
    }

    /// Reuse an existing chart file when one is present.
    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    /// The plotted column; `None` for time series.
    pub fn column(&self) -> Option<&Column> {
        self.column.as_ref()
    }

    pub fn cycle1(&self) -> Cycle {
        self.cycle1
    }

    /// Last cycle of the range. Same as `cycle1` for plan views.
    pub fn cycle2(&self) -> Cycle {
        self.cycle2
    }

    /// Root directory of the per-cycle observation files.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn obs_group(&self) -> Option<&str> {
        self.obs_group.as_deref()
    }

    pub fn varno(&self) -> &Varno {
        &self.varno
    }

    /// Inclusive upper bound of the vertical window.
    pub fn vertco_max(&self) -> f64 {
        self.vertco_max
    }

    /// Inclusive lower bound of the vertical window.
    pub fn vertco_min(&self) -> f64 {
        self.vertco_min
    }

    pub fn vertco_type(&self) -> &VertcoType {
        &self.vertco_type
    }

    /// True when the plotted column is a departure.
    pub fn is_depar(&self) -> bool {
        self.column.as_ref().map(Column::is_depar).unwrap_or(false)
    }

    /// File name stem identifying this request.
    ///
    /// Fields are joined with `_` in a fixed order and absent fields are
    /// skipped. Two requests with the same stem are treated as the same chart.
    pub fn output_filestem(&self) -> String {
        let mut parts = vec![self.chart_type.to_string()];
        if let Some(column) = &self.column {
            parts.push(column.to_string());
        }
        if let Some(obs_group) = &self.obs_group {
            parts.push(obs_group.clone());
        }
        parts.push(self.varno.to_string());
        parts.push(self.vertco_type.to_string());
        parts.push(self.cycle1.to_string());
        parts.push(self.cycle2.to_string());
        parts.push(format_bound(self.vertco_min));
        parts.push(format_bound(self.vertco_max));
        parts.join("_")
    }

    /// Caption for the vertical window, e.g. `Channel Number: 1 - 2`.
    pub fn vertco_label(&self) -> String {
        let mut label = format!("{}: {}", self.vertco_type.label(), self.vertco_min as i64);
        if self.vertco_min != self.vertco_max {
            label.push_str(&format!(" - {}", self.vertco_max as i64));
        }
        label
    }

    /// Varno description, followed by the column label when there is one.
    pub fn varno_description(&self) -> String {
        match self.column.as_ref().and_then(Column::label) {
            Some(label) => format!("{} ({})", self.varno.desc(), label),
            None => self.varno.desc().to_string(),
        }
    }

    pub fn planview_title(&self) -> String {
        format!(
            "Obs Group: {:<25}{:>46}\n{:<68}{}",
            self.obs_group().unwrap_or("None"),
            self.vertco_label(),
            self.varno_description(),
            self.cycle1
        )
    }

    pub fn timeseries_title(&self) -> String {
        format!(
            "Obs Group: {:<25}{:>46}\n{:<51}{} - {}",
            self.obs_group().unwrap_or("None"),
            self.vertco_label(),
            self.varno.desc(),
            self.cycle1,
            self.cycle2
        )
    }
}

fn parse_cache_flag(value: &str) -> OmfgResult<bool> {
    value
        .trim()
        .parse::<i64>()
        .map(|flag| flag != 0)
        .map_err(|_| OmfgError::invalid_parameter("cache", format!("not an integer: {}", value)))
}

fn parse_code(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

fn parse_bound(param: &str, value: &str) -> OmfgResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| OmfgError::invalid_parameter(param, format!("not a number: {}", value)))
}

/// Bounds are spelled the way the chart front end spells floats, so `1`
/// and `1.0` give the same stem: positional between `1e-4` and `1e16` with
/// at least one decimal place, otherwise `<mantissa>e<sign><two+ digits>`.
fn format_bound(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Shortest round-trip digits, used for both layouts.
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if value == 0.0 || (-4..16).contains(&exponent) {
        let positional = value.to_string();
        if positional.contains('.') {
            positional
        } else {
            format!("{}.0", positional)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn timeseries_request() -> Value {
        json!({
            "cache": 0,
            "chart_type": "timeseries",
            "column": "",
            "cycle1": "20190830T0000Z",
            "cycle2": "20190830T1200Z",
            "data_path": "/data",
            "obs_group": null,
            "varno_code": 39,
            "vertco_max": 2.0,
            "vertco_min": 1.0,
            "vertco_type_code": 7
        })
    }

    fn planview_request() -> Value {
        let mut request = timeseries_request();
        request["chart_type"] = json!("planview");
        request["column"] = json!("an_depar@body");
        request["cycle2"] = json!("20190830T0000Z");
        request
    }

    fn resolve(value: Value) -> OmfgResult<ChartConfig> {
        ChartConfig::resolve(&RawRequest::from_value(value)?, &Catalog::standard())
    }

    #[test]
    fn test_timeseries_accessors() {
        let config = resolve(timeseries_request()).unwrap();
        assert!(!config.use_cache());
        assert_eq!(config.chart_type(), ChartType::Timeseries);
        assert!(config.column().is_none());
        assert_eq!(config.cycle1().to_string(), "20190830T0000Z");
        assert_eq!(config.cycle2().to_string(), "20190830T1200Z");
        assert_eq!(config.data_path().file_name().unwrap(), "data");
        assert!(config.obs_group().is_none());
        assert_eq!(config.varno().name(), "t2m");
        assert_eq!(config.vertco_max() as i64, 2);
        assert_eq!(config.vertco_min() as i64, 1);
        assert_eq!(config.vertco_type().label(), "Channel Number");
        assert!(!config.is_depar());
    }

    #[test]
    fn test_is_depar() {
        assert!(resolve(planview_request()).unwrap().is_depar());
    }

    #[test]
    fn test_output_filestem() {
        assert_eq!(
            resolve(timeseries_request()).unwrap().output_filestem(),
            "timeseries_39_7_20190830T0000Z_20190830T1200Z_1.0_2.0"
        );
        assert_eq!(
            resolve(planview_request()).unwrap().output_filestem(),
            "planview_an_depar_39_7_20190830T0000Z_20190830T0000Z_1.0_2.0"
        );
    }

    #[test]
    fn test_output_filestem_with_obs_group() {
        let mut request = planview_request();
        request["obs_group"] = json!("sonde");
        request["vertco_min"] = json!("850");
        request["vertco_max"] = json!("925.5");
        assert_eq!(
            resolve(request).unwrap().output_filestem(),
            "planview_an_depar_sonde_39_7_20190830T0000Z_20190830T0000Z_850.0_925.5"
        );
    }

    #[test]
    fn test_string_values() {
        let config = resolve(json!({
            "cache": "1",
            "chart_type": "planview",
            "column": "fg_depar@body",
            "obs_group": "surface",
            "vertco_max": "1",
            "varno_code": "39",
            "vertco_type_code": 5,
            "cycle2": "20191029T1000Z",
            "vertco_min": "1",
            "cycle1": "20191027T0000Z",
            "data_path": "/home/user/data/valid"
        }))
        .unwrap();
        assert!(config.use_cache());
        assert_eq!(config.obs_group(), Some("surface"));
        assert_eq!(config.varno().code(), 39);
        assert!(config.is_depar());
    }

    #[test]
    fn test_cache_flag() {
        for (flag, expected) in [("0", false), ("1", true), ("2", true), ("-1", true)] {
            let mut request = timeseries_request();
            request["cache"] = json!(flag);
            assert_eq!(resolve(request).unwrap().use_cache(), expected, "cache={}", flag);
        }

        let mut request = timeseries_request();
        request["cache"] = json!("yes");
        assert!(matches!(
            resolve(request),
            Err(OmfgError::InvalidParameter { ref param, .. }) if param == "cache"
        ));
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            ("column", json!("lat@hdr")),
            ("varno_code", json!(-1)),
            ("varno_code", json!("t2m")),
            ("vertco_type_code", json!(99)),
            ("vertco_type_code", json!("x")),
            ("cycle1", json!("2019-08-30")),
            ("cycle2", json!("20190830T12Z")),
            ("chart_type", json!("histogram")),
            ("vertco_min", json!("low")),
        ];
        for (field, value) in cases {
            let mut request = planview_request();
            request[field] = value;
            let err = resolve(request).unwrap_err();
            assert!(err.is_validation(), "{} should fail validation, got {}", field, err);
        }
    }

    #[test]
    fn test_specific_error_kinds() {
        let mut request = planview_request();
        request["column"] = json!("lat@hdr");
        assert!(matches!(resolve(request), Err(OmfgError::UnknownColumn(_))));

        let mut request = planview_request();
        request["varno_code"] = json!(-1);
        assert!(matches!(resolve(request), Err(OmfgError::UnknownVarno(_))));

        let mut request = planview_request();
        request["vertco_type_code"] = json!(0);
        assert!(matches!(resolve(request), Err(OmfgError::InvalidVertcoType(_))));

        let mut request = planview_request();
        request["cycle1"] = json!("foo");
        assert!(matches!(resolve(request), Err(OmfgError::InvalidCycleFormat(_))));

        let mut request = planview_request();
        request["chart_type"] = json!("histogram");
        assert!(matches!(resolve(request), Err(OmfgError::UnknownChartType(_))));
    }

    #[test]
    fn test_reversed_bounds_are_accepted() {
        let mut request = timeseries_request();
        request["vertco_min"] = json!(5);
        request["vertco_max"] = json!(1);
        let config = resolve(request).unwrap();
        assert!(config.vertco_min() > config.vertco_max());
    }

    #[test]
    fn test_missing_field() {
        let mut request = timeseries_request();
        request.as_object_mut().unwrap().remove("cycle1");
        assert!(matches!(resolve(request), Err(OmfgError::MissingParameter(ref f)) if f == "cycle1"));

        let mut request = timeseries_request();
        request["varno_code"] = json!([39]);
        assert!(matches!(resolve(request), Err(OmfgError::InvalidParameter { .. })));
    }

    #[test]
    fn test_vertco_label() {
        let config = resolve(timeseries_request()).unwrap();
        assert_eq!(config.vertco_label(), "Channel Number: 1 - 2");

        let mut request = timeseries_request();
        request["vertco_min"] = json!(3.0);
        request["vertco_max"] = json!(3.0);
        assert_eq!(resolve(request).unwrap().vertco_label(), "Channel Number: 3");
    }

    #[test]
    fn test_titles() {
        let planview = resolve(planview_request()).unwrap();
        assert_eq!(planview.varno_description(), "2m Temperature (O-A)");
        let title = planview.planview_title();
        assert!(title.starts_with("Obs Group: None"));
        assert!(title.ends_with("20190830T0000Z"));
        assert!(title.contains("Channel Number: 1 - 2\n2m Temperature (O-A)"));

        let timeseries = resolve(timeseries_request()).unwrap();
        assert_eq!(timeseries.varno_description(), "2m Temperature");
        assert!(timeseries
            .timeseries_title()
            .ends_with("20190830T0000Z - 20190830T1200Z"));
    }

    #[test]
    fn test_format_bound() {
        assert_eq!(format_bound(1.0), "1.0");
        assert_eq!(format_bound(-50.0), "-50.0");
        assert_eq!(format_bound(2.5), "2.5");
        assert_eq!(format_bound(0.125), "0.125");
        assert_eq!(format_bound(-0.0), "-0.0");
        assert_eq!(format_bound(0.0001), "0.0001");
        assert_eq!(format_bound(1e15), "1000000000000000.0");
    }

    #[test]
    fn test_format_bound_exponent_form() {
        assert_eq!(format_bound(1e-7), "1e-07");
        assert_eq!(format_bound(1.5e-5), "1.5e-05");
        assert_eq!(format_bound(-2.5e-10), "-2.5e-10");
        assert_eq!(format_bound(1e16), "1e+16");
        assert_eq!(format_bound(1.25e100), "1.25e+100");
        assert_eq!(format_bound(f64::NAN), "nan");
        assert_eq!(format_bound(f64::INFINITY), "inf");
        assert_eq!(format_bound(f64::NEG_INFINITY), "-inf");
    }
}
