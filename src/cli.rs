/// Structure representing command-line arguments.
#[derive(Debug)]
pub struct Args {
    pub full: std::path::PathBuf,
    pub snapshot: std::path::PathBuf,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub hour_lo: Option<u32>,
    pub hour_hi: Option<u32>,
    pub date_format: String,
    pub preview: usize,
    pub refresh: Option<u64>,
}

/// Command-line arguments parser using Clap.
///
/// Hours left unset default to the hour bounds of the loaded series.
impl Args {
    /// Parses command-line arguments using `clap`.
    ///
    /// # Returns
    /// * `Args` - Struct containing parsed arguments.
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    fn from_matches(matches: &clap::ArgMatches) -> Self {
        Args {
            full: matches.get_one::<std::path::PathBuf>("full").cloned().unwrap_or_default(),
            snapshot: matches.get_one::<std::path::PathBuf>("snapshot").cloned().unwrap_or_default(),
            start_date: matches.get_one::<chrono::NaiveDate>("start-date").copied(),
            end_date: matches.get_one::<chrono::NaiveDate>("end-date").copied(),
            hour_lo: matches.get_one::<u32>("hour-lo").copied(),
            hour_hi: matches.get_one::<u32>("hour-hi").copied(),
            date_format: matches
                .get_one::<String>("date-format")
                .cloned()
                .unwrap_or_else(|| crate::csv_processor::DEFAULT_DATE_FORMAT.to_string()),
            preview: matches.get_one::<usize>("preview").copied().unwrap_or(5),
            refresh: matches.get_one::<u64>("refresh").copied(),
        }
    }
}

fn command() -> clap::Command {
    clap::Command::new("price_range_dashboard")
        .version("0.1.0")
        .about("Filter a price series by date and hour range and print its statistics")
        .arg(
            clap::Arg::new("full")
                .short('f')
                .long("full")
                .help("Path to the full price history CSV (date,price)")
                .required(true)
                .num_args(1)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::Arg::new("snapshot")
                .short('s')
                .long("snapshot")
                .help("Path to the daily snapshot CSV (date,price)")
                .required(true)
                .num_args(1)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::Arg::new("start-date")
                .long("start-date")
                .help("First day of the range (YYYY-MM-DD)")
                .num_args(1)
                .value_parser(clap::builder::ValueParser::new(parse_date)),
        )
        .arg(
            clap::Arg::new("end-date")
                .long("end-date")
                .help("Last day of the range (YYYY-MM-DD)")
                .num_args(1)
                .value_parser(clap::builder::ValueParser::new(parse_date)),
        )
        .arg(
            clap::Arg::new("hour-lo")
                .long("hour-lo")
                .help("Hour offset applied to the start day (0-23, default: earliest hour in data)")
                .num_args(1)
                .value_parser(clap::builder::ValueParser::new(parse_hour)),
        )
        .arg(
            clap::Arg::new("hour-hi")
                .long("hour-hi")
                .help("Hour offset applied to the end day (0-23, default: latest hour in data)")
                .num_args(1)
                .value_parser(clap::builder::ValueParser::new(parse_hour)),
        )
        .arg(
            clap::Arg::new("date-format")
                .long("date-format")
                .help("chrono format of the date column")
                .default_value(crate::csv_processor::DEFAULT_DATE_FORMAT)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("preview")
                .short('p')
                .long("preview")
                .help("Number of chart points to print")
                .default_value("5")
                .num_args(1)
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            clap::Arg::new("refresh")
                .short('r')
                .long("refresh")
                .help("Reload both files every N seconds and re-render")
                .num_args(1)
                .value_parser(clap::builder::ValueParser::new(parse_u64_positive)),
        )
}

/// Parses a `YYYY-MM-DD` calendar date.
fn parse_date(s: &str) -> Result<chrono::NaiveDate, String> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("Not a valid date (YYYY-MM-DD): {}", e))
}

/// Validates an hour of day in `0..=23`.
fn parse_hour(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(h) if h <= 23 => Ok(h),
        Ok(h) => Err(format!("Hour must be between 0 and 23, got {}", h)),
        Err(e) => Err(format!("Not a valid number: {}", e)),
    }
}

/// Validates that the refresh period is a positive integer.
fn parse_u64_positive(s: &str) -> Result<u64, String> {
    match s.parse::<u64>() {
        Ok(0) => Err("Must be a positive integer".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("Not a valid number: {}", e)),
    }
}
