use crate::chart;
use crate::dashboard;
use crate::stats;

pub const SELECTED_PANEL_TITLE: &str = "Statistiques de la Plage selectionnée";
pub const DAILY_PANEL_TITLE: &str = "Statistiques de la journée (maj à 18h)";
pub const PRICE_PANEL_TITLE: &str = "Prix Actuel";
const NO_DATA: &str = "Aucune donnée pour cette plage";
const PLACEHOLDER: &str = "-";

/// Semantic colour hint for a variation; the renderer picks the colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Negative,
    NonNegative,
}

impl Tone {
    pub fn of(value: f64) -> Self {
        if value < 0.0 { Tone::Negative } else { Tone::NonNegative }
    }

    fn marker(self) -> &'static str {
        match self {
            Tone::Negative => "▼",
            Tone::NonNegative => "▲",
        }
    }
}

/// Display-ready text of one statistics panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsPanel {
    pub title: String,
    pub lines: Vec<String>,
    pub tone: Option<Tone>,
}

/// Formats a variation with two decimals, e.g. `-10.00 %`.
pub fn format_variation(value: f64) -> String {
    format!("{:.2} %", value)
}

/// Formats a volatility with five decimals.
pub fn format_volatility(value: f64) -> String {
    format!("{:.5}", value)
}

/// Formats a raw currency value as the feed reports it.
pub fn format_price(value: f64) -> String {
    format!("{} $", value)
}

/// Formats a timestamp for console output: `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(ts: chrono::NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Builds the text of a statistics panel, with placeholders for every
/// metric that could not be computed.
///
/// # Arguments
/// * `title` - Panel heading.
/// * `outcome` - Statistics or the reason they are missing.
///
/// # Returns
/// * `StatsPanel` - Lines ready to print.
pub fn stats_panel(title: &str, outcome: &Result<stats::Statistics, stats::StatsError>) -> StatsPanel {
    let Ok(st) = outcome else {
        return StatsPanel {
            title: title.to_string(),
            lines: vec![
                NO_DATA.to_string(),
                format!("Variation de prix: {}", PLACEHOLDER),
                format!("Maximum: {}", PLACEHOLDER),
                format!("Minimum: {}", PLACEHOLDER),
                format!("Volatilité: {}", PLACEHOLDER),
            ],
            tone: None,
        };
    };

    let (variation, tone) = match st.variation_pct {
        Ok(v) => (format_variation(v), Some(Tone::of(v))),
        Err(_) => (PLACEHOLDER.to_string(), None),
    };
    let volatility = st
        .volatility
        .map(format_volatility)
        .unwrap_or_else(|_| PLACEHOLDER.to_string());

    StatsPanel {
        title: title.to_string(),
        lines: vec![
            format!("Variation de prix: {}", variation),
            format!("Maximum: {}", format_price(st.max)),
            format!("Minimum: {}", format_price(st.min)),
            format!("Volatilité: {}", volatility),
        ],
        tone,
    }
}

fn print_panel(panel: &StatsPanel) {
    let marker = panel.tone.map(Tone::marker).unwrap_or(" ");
    println!("── {} ──", panel.title);
    for (i, line) in panel.lines.iter().enumerate() {
        // The tone marker goes next to the variation line only.
        if i == 0 && panel.tone.is_some() {
            println!("  {} {}", marker, line);
        } else {
            println!("    {}", line);
        }
    }
}

/// Prints the three panels of a dashboard view.
pub fn print_view(view: &dashboard::DashboardView) {
    println!("📊 {} (snapshot v{}, {:?})", view.chart.title, view.version, view.state);
    print_panel(&stats_panel(SELECTED_PANEL_TITLE, &view.selected));
    print_panel(&stats_panel(DAILY_PANEL_TITLE, &view.daily));
    println!("── {} ──", PRICE_PANEL_TITLE);
    println!("    {}", format_price(view.latest_price));
}

/// Prints the first `count` points of a chart model.
///
/// # Example Output
/// ```text
///  - 2023-05-01 09:00:00, 0.5123
///  - 2023-05-01 09:05:00, 0.5207
/// ```
pub fn print_chart_preview(model: &chart::ChartModel, count: usize) {
    if model.is_empty() {
        println!("📉 {}", NO_DATA);
        return;
    }
    println!("📈 {} | {} / {}", model.title, model.x_label, model.y_label);
    for (ts, price) in model.points.iter().take(count) {
        println!(" - {}, {}", format_timestamp(*ts), price);
    }
}
