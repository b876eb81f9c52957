use crate::series;

/// Why a metric could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("not enough data points")]
    InsufficientData,
    #[error("first price is zero, variation is undefined")]
    ArithmeticFailure,
}

/// Summary of a price window.
///
/// `variation_pct` and `volatility` carry their own outcome so a single
/// point still reports max/min/variation.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub variation_pct: Result<f64, StatsError>,
    pub max: f64,
    pub min: f64,
    pub volatility: Result<f64, StatsError>,
}

/// Single-pass accumulator for extrema, mean and variance (Welford).
///
/// Points may be pushed one at a time, so a sliding or growing window can
/// keep one of these instead of rescanning.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    /// Bessel-corrected standard deviation.
    pub fn sample_std_dev(&self) -> Result<f64, StatsError> {
        if self.count < 2 {
            return Err(StatsError::InsufficientData);
        }
        Ok((self.m2 / (self.count - 1) as f64).sqrt())
    }
}

/// Percentage change from the first to the last price.
pub fn variation_pct(first: f64, last: f64) -> Result<f64, StatsError> {
    if first == 0.0 {
        return Err(StatsError::ArithmeticFailure);
    }
    Ok(100.0 * (last - first) / first)
}

/// Computes the four summary metrics over `points`.
///
/// Works the same for a filtered range, the full series or the daily
/// snapshot. Pure: identical input gives identical output.
///
/// # Arguments
/// * `points` - Price points, first and last taken in slice order.
///
/// # Returns
/// * `Result<Statistics, StatsError>` - Metrics; variation and volatility
///   carry their own failure when only those are undefined.
///
/// # Errors
/// * `StatsError::InsufficientData` if `points` is empty.
pub fn compute(points: &[series::PricePoint]) -> Result<Statistics, StatsError> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Err(StatsError::InsufficientData);
    };

    let mut acc = RunningStats::new();
    for p in points {
        acc.push(p.price);
    }

    Ok(Statistics {
        variation_pct: variation_pct(first.price, last.price),
        max: acc.max().ok_or(StatsError::InsufficientData)?,
        min: acc.min().ok_or(StatsError::InsufficientData)?,
        volatility: acc.sample_std_dev(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::tests::series;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_three_point_scenario() {
        let s = series(&[
            ("2023-05-01", 0, 0, 100.0),
            ("2023-05-01", 0, 5, 110.0),
            ("2023-05-01", 0, 10, 90.0),
        ]);
        let st = compute(s.points()).unwrap();
        assert!(approx(st.variation_pct.unwrap(), -10.0));
        assert_eq!(st.max, 110.0);
        assert_eq!(st.min, 90.0);
        assert!(approx(st.volatility.unwrap(), 10.0));
    }

    #[test]
    fn test_empty_is_insufficient() {
        assert_eq!(compute(&[]), Err(StatsError::InsufficientData));
    }

    #[test]
    fn test_single_point_has_no_volatility() {
        let s = series(&[("2023-05-01", 0, 0, 42.5)]);
        let st = compute(s.points()).unwrap();
        assert_eq!(st.variation_pct, Ok(0.0));
        assert_eq!(st.max, 42.5);
        assert_eq!(st.min, 42.5);
        assert_eq!(st.volatility, Err(StatsError::InsufficientData));
    }

    #[test]
    fn test_zero_first_price_is_arithmetic_failure() {
        let s = series(&[("2023-05-01", 0, 0, 0.0), ("2023-05-01", 0, 5, 1.0)]);
        let st = compute(s.points()).unwrap();
        assert_eq!(st.variation_pct, Err(StatsError::ArithmeticFailure));
        assert_eq!(st.max, 1.0);
        assert!(st.volatility.is_ok());
    }

    #[test]
    fn test_compute_is_deterministic() {
        let s = series(&[
            ("2023-05-01", 0, 0, 0.5123),
            ("2023-05-01", 0, 5, 0.5207),
            ("2023-05-01", 0, 10, 0.4988),
            ("2023-05-01", 0, 15, 0.5311),
        ]);
        let a = compute(s.points()).unwrap();
        let b = compute(&s.points().to_vec()).unwrap();
        assert_eq!(a.volatility.unwrap().to_bits(), b.volatility.unwrap().to_bits());
        assert_eq!(a.variation_pct.unwrap().to_bits(), b.variation_pct.unwrap().to_bits());
    }

    #[test]
    fn test_running_stats_matches_two_pass() {
        let values = [3.2, 7.9, 1.4, 5.5, 9.1, 2.2];
        let mut acc = RunningStats::new();
        values.iter().for_each(|v| acc.push(*v));

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
        assert!(approx(acc.sample_std_dev().unwrap(), var.sqrt()));
        assert_eq!(acc.min(), Some(1.4));
        assert_eq!(acc.max(), Some(9.1));
    }

    #[test]
    fn test_running_stats_empty() {
        let acc = RunningStats::new();
        assert_eq!(acc.min(), None);
        assert_eq!(acc.sample_std_dev(), Err(StatsError::InsufficientData));
    }
}
