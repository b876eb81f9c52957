use crate::series;

/// Static chart captions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        ChartLabels {
            title: "Graph du Sandbox (mis à jour toutes les 5 minutes)".to_string(),
            x_label: "Date (UTC)".to_string(),
            y_label: "Prix en $".to_string(),
        }
    }
}

/// Renderer-agnostic line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub points: Vec<(chrono::NaiveDateTime, f64)>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl ChartModel {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Maps points to chart coordinates, order preserved. Never fails.
///
/// # Arguments
/// * `points` - Filtered series to plot.
/// * `labels` - Title and axis captions.
///
/// # Returns
/// * `ChartModel` - Chart data, empty when `points` is.
pub fn project(points: &[series::PricePoint], labels: &ChartLabels) -> ChartModel {
    ChartModel {
        points: points.iter().map(|p| (p.timestamp, p.price)).collect(),
        title: labels.title.clone(),
        x_label: labels.x_label.clone(),
        y_label: labels.y_label.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::tests::{at, series};

    #[test]
    fn test_project_keeps_order_and_labels() {
        let s = series(&[("2023-05-01", 9, 0, 1.5), ("2023-05-01", 9, 5, 1.25)]);
        let model = project(s.points(), &ChartLabels::default());
        assert_eq!(model.points, vec![(at("2023-05-01", 9, 0), 1.5), (at("2023-05-01", 9, 5), 1.25)]);
        assert_eq!(model.title, "Graph du Sandbox (mis à jour toutes les 5 minutes)");
        assert_eq!(model.x_label, "Date (UTC)");
        assert_eq!(model.y_label, "Prix en $");
    }

    #[test]
    fn test_project_empty() {
        let model = project(&[], &ChartLabels::default());
        assert!(model.is_empty());
        assert_eq!(model.x_label, "Date (UTC)");
    }
}
