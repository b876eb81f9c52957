mod cli;
mod utils;
mod chart;
mod stats;
mod store;
mod filter;
mod series;
mod dashboard;
mod csv_processor;

/// Builds the selection from CLI arguments, seeding missing hours from the
/// hour bounds of the full series.
fn build_selection(args: &cli::Args, full: &series::TimeSeries) -> filter::Selection {
    let (lo, hi) = full.hour_bounds();
    filter::Selection::new(
        args.start_date,
        args.end_date,
        args.hour_lo.unwrap_or(lo),
        args.hour_hi.unwrap_or(hi),
    )
}

/// Runs one update cycle on the current snapshot and prints it.
fn render(store: &store::SeriesStore, args: &cli::Args, labels: &chart::ChartLabels) {
    let snapshot = store.current();
    let selection = build_selection(args, &snapshot.full);
    if let Some(window) = selection.effective_window() {
        tracing::info!(lower = %window.lower, upper = %window.upper, "effective window");
    }
    let view = dashboard::update(&snapshot, &selection, labels);
    utils::print_chart_preview(&view.chart, args.preview);
    utils::print_view(&view);
}

/// Main entry point of the application.
///
/// This function orchestrates the entire workflow:
/// 1. Parses command-line arguments.
/// 2. Loads the full and daily series into the store.
/// 3. Renders the dashboard for the requested selection.
/// 4. With `--refresh`, reloads both files on that period and renders again.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Success or an error if the initial load fails.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("price_range_dashboard=info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();
    let sources = store::SeriesSources {
        full: args.full.clone(),
        daily: args.snapshot.clone(),
        date_format: args.date_format.clone(),
    };

    let start = std::time::Instant::now();
    let store = store::SeriesStore::open(&sources)?;
    let (first_day, last_day) = store.current().full.date_bounds();
    tracing::info!(%first_day, %last_day, "full series date range");
    println!("✅ Data loaded in {:?} seconds", start.elapsed().as_secs_f64());

    let labels = chart::ChartLabels::default();
    render(&store, &args, &labels);

    let Some(period) = args.refresh else {
        return Ok(());
    };
    loop {
        std::thread::sleep(std::time::Duration::from_secs(period));
        match store.reload(&sources) {
            Ok(version) => tracing::info!(version, "series refreshed"),
            Err(e) => tracing::warn!("refresh failed, keeping previous data: {:#}", e),
        }
        render(&store, &args, &labels);
    }
}
