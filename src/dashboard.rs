use crate::chart;
use crate::filter;
use crate::stats;
use crate::store;

/// Which branch of the update cycle produced a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeState {
    DateRangeSelected,
    DateRangeUnset,
}

/// Everything one interaction hands to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub state: RangeState,
    pub version: u64,
    pub chart: chart::ChartModel,
    pub selected: Result<stats::Statistics, stats::StatsError>,
    pub daily: Result<stats::Statistics, stats::StatsError>,
    pub latest_price: f64,
}

/// Runs one update cycle against a single snapshot.
///
/// The selection only drives the chart and the selected-range panel; the
/// daily panel always covers the whole daily series and the latest price
/// always comes from the full series.
pub fn update(
    snapshot: &store::SeriesSnapshot,
    selection: &filter::Selection,
    labels: &chart::ChartLabels,
) -> DashboardView {
    let state = if selection.has_dates() {
        RangeState::DateRangeSelected
    } else {
        RangeState::DateRangeUnset
    };

    let filtered = filter::filter(snapshot.full.points(), selection);
    let selected = stats::compute(&filtered);
    if let Err(e) = &selected {
        tracing::info!(?state, "selected range has no statistics: {}", e);
    }

    DashboardView {
        state,
        version: snapshot.version,
        chart: chart::project(&filtered, labels),
        selected,
        daily: stats::compute(snapshot.daily.points()),
        latest_price: snapshot.full.latest_price(),
    }
}
