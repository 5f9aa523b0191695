//! Record masks over an observation array.

use omfg_common::OmfgResult;

use crate::array::{fields, ObservationArray};

/// Selects records that have a value, lie on the requested vertical
/// coordinate type, and fall inside the inclusive `[min, max]` window.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationFilter {
    presence_field: String,
    vertco_type: i32,
    min: f64,
    max: f64,
}

impl ObservationFilter {
    pub fn new(presence_field: impl Into<String>, vertco_type: i32, min: f64, max: f64) -> Self {
        Self {
            presence_field: presence_field.into(),
            vertco_type,
            min,
            max,
        }
    }

    /// Filter keyed on `obsvalue@body`, as used by time series.
    pub fn for_obsvalue(vertco_type: i32, min: f64, max: f64) -> Self {
        Self::new(fields::OBSVALUE, vertco_type, min, max)
    }

    pub fn presence_field(&self) -> &str {
        &self.presence_field
    }

    /// One entry per record.
    ///
    /// A window with `min > max` matches nothing.
    pub fn mask(&self, array: &ObservationArray) -> OmfgResult<Vec<bool>> {
        let present = array.field(&self.presence_field)?;
        let vertco = array.field(fields::VERTCO_REFERENCE_1)?;
        let vertco_type = array.field(fields::VERTCO_TYPE)?;
        let wanted_type = f64::from(self.vertco_type);

        Ok(present
            .iter()
            .zip(vertco)
            .zip(vertco_type)
            .map(|((value, level), kind)| {
                !value.is_nan()
                    && !level.is_nan()
                    && *kind == wanted_type
                    && *level >= self.min
                    && *level <= self.max
            })
            .collect())
    }

    /// Number of matching records.
    pub fn count(&self, array: &ObservationArray) -> OmfgResult<usize> {
        Ok(self.mask(array)?.into_iter().filter(|keep| *keep).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f64 = f64::NAN;

    fn array() -> ObservationArray {
        ObservationArray::from_fields([
            (fields::OBSVALUE, vec![1.0, NAN, 3.0, 4.0, 5.0, 6.0]),
            (fields::VERTCO_REFERENCE_1, vec![1.0, 1.0, NAN, 2.0, 3.0, 2.0]),
            (fields::VERTCO_TYPE, vec![7.0, 7.0, 7.0, 7.0, 7.0, 5.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_four_clauses() {
        let filter = ObservationFilter::for_obsvalue(7, 1.0, 2.0);
        assert_eq!(
            filter.mask(&array()).unwrap(),
            vec![true, false, false, true, false, false]
        );
        assert_eq!(filter.count(&array()).unwrap(), 2);
    }

    #[test]
    fn test_reversed_window_selects_nothing() {
        let filter = ObservationFilter::for_obsvalue(7, 2.0, 1.0);
        assert_eq!(filter.count(&array()).unwrap(), 0);
    }

    #[test]
    fn test_single_level_window() {
        let filter = ObservationFilter::for_obsvalue(7, 3.0, 3.0);
        assert_eq!(
            filter.mask(&array()).unwrap(),
            vec![false, false, false, false, true, false]
        );
    }

    #[test]
    fn test_missing_presence_field() {
        let filter = ObservationFilter::new(fields::AN_DEPAR, 7, 1.0, 2.0);
        assert!(filter.mask(&array()).is_err());
    }
}
