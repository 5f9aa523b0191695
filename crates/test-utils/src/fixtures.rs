//! Common chart request fixtures.
//!
//! Requests are plain JSON values so tests can tweak single fields before
//! handing them to the resolver.

use serde_json::{json, Value};

/// Cycles used throughout the fixtures.
pub mod cycles {
    pub const FIRST: &str = "20190830T0000Z";
    pub const SECOND: &str = "20190830T0600Z";
    pub const THIRD: &str = "20190830T1200Z";
    pub const FOURTH: &str = "20190830T1800Z";
}

/// Varno codes used by the fixtures.
pub mod varnos {
    /// 2m temperature, temperature group.
    pub const T2M: i32 = 39;
    /// Surface pressure, pressure group.
    pub const PS: i32 = 110;
    /// Brightness temperature, no group.
    pub const RAWBT: i32 = 119;
}

/// Channel number vertical coordinate type.
pub const CHANNEL_NUMBER: i32 = 7;

/// A time series over the first half of the fixture day.
pub fn timeseries_request() -> Value {
    json!({
        "cache": 0,
        "chart_type": "timeseries",
        "column": "",
        "cycle1": cycles::FIRST,
        "cycle2": cycles::THIRD,
        "data_path": "/data",
        "obs_group": null,
        "varno_code": varnos::T2M,
        "vertco_max": 2.0,
        "vertco_min": 1.0,
        "vertco_type_code": CHANNEL_NUMBER
    })
}

/// An O-A plan view of the first fixture cycle.
pub fn planview_request() -> Value {
    json!({
        "cache": 0,
        "chart_type": "planview",
        "column": "an_depar@body",
        "cycle1": cycles::FIRST,
        "cycle2": cycles::FIRST,
        "data_path": "/data",
        "obs_group": null,
        "varno_code": varnos::T2M,
        "vertco_max": 2.0,
        "vertco_min": 1.0,
        "vertco_type_code": CHANNEL_NUMBER
    })
}

/// Copy of `request` with `field` replaced.
pub fn with_field(request: &Value, field: &str, value: Value) -> Value {
    let mut request = request.clone();
    request[field] = value;
    request
}
