use crate::series;

/// User's current date-range and hour-range criteria.
///
/// Hours are offsets from midnight in `0..=23`; the CLI rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub hour_lo: u32,
    pub hour_hi: u32,
}

/// Inclusive instant-to-instant interval a selection resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub lower: chrono::NaiveDateTime,
    pub upper: chrono::NaiveDateTime,
}

impl Window {
    pub fn contains(&self, ts: chrono::NaiveDateTime) -> bool {
        self.lower <= ts && ts <= self.upper
    }
}

/// Outcome of resolving a selection against the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowResolution {
    /// At least one date is missing: the whole series is used, hours ignored.
    Unset,
    /// Hours or bounds are inverted: nothing can match.
    Degenerate,
    Window(Window),
}

impl Selection {
    pub fn new(
        start_date: Option<chrono::NaiveDate>,
        end_date: Option<chrono::NaiveDate>,
        hour_lo: u32,
        hour_hi: u32,
    ) -> Self {
        Selection { start_date, end_date, hour_lo, hour_hi }
    }

    pub fn has_dates(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// Resolves the selection into its effective window.
    ///
    /// The hour range only trims the first day (from `hour_lo`) and the last
    /// day (up to `hour_hi`). Days in between are kept whole; hours are not
    /// applied per day.
    pub fn resolve(&self) -> WindowResolution {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return WindowResolution::Unset;
        };
        if self.hour_lo > self.hour_hi {
            return WindowResolution::Degenerate;
        }

        let lower = start.and_time(chrono::NaiveTime::MIN) + chrono::Duration::hours(self.hour_lo as i64);
        let upper = end.and_time(chrono::NaiveTime::MIN) + chrono::Duration::hours(self.hour_hi as i64);
        if lower > upper {
            return WindowResolution::Degenerate;
        }

        WindowResolution::Window(Window { lower, upper })
    }

    /// The concrete window, if the selection resolves to one.
    ///
    /// `None` covers both the unset and the degenerate case; use
    /// [`Selection::resolve`] to tell them apart.
    pub fn effective_window(&self) -> Option<Window> {
        match self.resolve() {
            WindowResolution::Window(window) => Some(window),
            WindowResolution::Unset | WindowResolution::Degenerate => None,
        }
    }
}

/// Returns the points of `series` falling inside the selection's window.
///
/// Input order is kept. Without both dates the whole series comes back and
/// the hours are ignored; a degenerate selection gives an empty result.
///
/// # Arguments
/// * `series` - Points in ascending timestamp order.
/// * `selection` - Date and hour criteria.
///
/// # Returns
/// * `Vec<series::PricePoint>` - Matching points, possibly empty.
pub fn filter(series: &[series::PricePoint], selection: &Selection) -> Vec<series::PricePoint> {
    match selection.resolve() {
        WindowResolution::Unset => series.to_vec(),
        WindowResolution::Degenerate => {
            tracing::debug!(?selection, "degenerate selection, empty range");
            Vec::new()
        }
        WindowResolution::Window(window) => {
            tracing::debug!(lower = %window.lower, upper = %window.upper, "resolved window");
            series
                .iter()
                .filter(|p| window.contains(p.timestamp))
                .copied()
                .collect()
        }
    }
}
