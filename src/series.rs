use chrono::Timelike;

/// A single observed price.
///
/// Timestamps are wall-clock UTC as written by the feed; no zone conversion
/// happens anywhere in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp: chrono::NaiveDateTime,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: chrono::NaiveDateTime, price: f64) -> Self {
        PricePoint { timestamp, price }
    }
}

/// Ordered, non-empty price series.
///
/// Ascending timestamp order is expected but not enforced: first/last based
/// metrics silently assume it. Instances are never mutated after creation,
/// a refresh builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    points: Vec<PricePoint>,
}

impl TimeSeries {
    /// Wraps already-ordered points.
    ///
    /// # Errors
    /// * If `points` is empty.
    pub fn new(points: Vec<PricePoint>) -> anyhow::Result<Self> {
        anyhow::ensure!(!points.is_empty(), "Time series must contain at least one point");
        anyhow::Ok(TimeSeries { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    /// Price of the most recent point.
    pub fn latest_price(&self) -> f64 {
        self.last().price
    }

    /// True when timestamps never decrease.
    pub fn is_sorted(&self) -> bool {
        self.points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
    }

    /// Smallest and largest hour-of-day present in the series.
    ///
    /// These seed the hour selection when the user gives none.
    pub fn hour_bounds(&self) -> (u32, u32) {
        self.points.iter().fold((23, 0), |(lo, hi), p| {
            let h = p.timestamp.hour();
            (lo.min(h), hi.max(h))
        })
    }

    /// Calendar dates of the earliest and latest points.
    pub fn date_bounds(&self) -> (chrono::NaiveDate, chrono::NaiveDate) {
        let lo = self.points.iter().map(|p| p.timestamp).min().unwrap_or(self.first().timestamp);
        let hi = self.points.iter().map(|p| p.timestamp).max().unwrap_or(self.last().timestamp);
        (lo.date(), hi.date())
    }
}
