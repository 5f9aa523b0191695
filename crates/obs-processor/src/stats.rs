//! Summary statistics over selected values.

use serde::Serialize;

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; NaN for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mean = mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// `n` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Count, extremes, mean and standard deviation of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl SummaryStats {
    /// Every field except `count` is NaN when `values` is empty.
    pub fn from_values(values: &[f64]) -> Self {
        let (min, max) = if values.is_empty() {
            (f64::NAN, f64::NAN)
        } else {
            values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(*v), hi.max(*v))
                })
        };

        Self {
            count: values.len(),
            min,
            max,
            mean: mean(values),
            std_dev: std_dev(values),
        }
    }

    /// Caption lines shown beside a plan view, one decimal place.
    pub fn caption(&self) -> String {
        format!(
            "Obs Count: {}\nMax: {:.1}\nMin: {:.1}\nMean: {:.1}\nStDev: {:.1}",
            self.count, self.max, self.min, self.mean, self.std_dev
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), 5.0);
        assert_eq!(std_dev(&values), 2.0);
    }

    #[test]
    fn test_empty_is_nan() {
        assert!(mean(&[]).is_nan());
        assert!(std_dev(&[]).is_nan());
        let stats = SummaryStats::from_values(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.min.is_nan() && stats.max.is_nan());
    }

    #[test]
    fn test_summary() {
        let stats = SummaryStats::from_values(&[3.0, -1.0, 1.0]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.mean, 1.0);
        assert_eq!(
            stats.caption(),
            "Obs Count: 3\nMax: 3.0\nMin: -1.0\nMean: 1.0\nStDev: 1.6"
        );
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 9.0, 10), (0..10).map(f64::from).collect::<Vec<_>>());
        assert_eq!(linspace(1.0, 1.0, 3), vec![1.0, 1.0, 1.0]);
        assert_eq!(linspace(5.0, 6.0, 1), vec![5.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
