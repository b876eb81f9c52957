use crate::series;

/// Default timestamp layout of the price feed, e.g. `01/05/23-18:00:00`.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%y-%H:%M:%S";

/// Layouts tried when the configured one does not match.
const FALLBACK_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Represents a single row of a header-less `date,price` file.
#[derive(Debug, serde::Deserialize)]
pub struct CsvRecord {
    date: String,
    price: String,
}

/// Parses a price cell, dropping any `$` and surrounding whitespace.
///
/// # Arguments
/// * `raw` - Cell content such as `$0.5123`.
///
/// # Returns
/// * `anyhow::Result<f64>` - Parsed price or an error if the cell is not a finite number.
pub fn parse_price(raw: &str) -> anyhow::Result<f64> {
    let cleaned = raw.replace('$', "");
    let value = cleaned
        .trim()
        .parse::<f64>()
        .map_err(|e| anyhow::anyhow!("Invalid price '{}': {}", raw, e))?;
    anyhow::ensure!(value.is_finite(), "Invalid price '{}': not finite", raw);
    anyhow::Ok(value)
}

/// Parses a timestamp cell with `date_format`, then the ISO fallbacks.
///
/// # Arguments
/// * `raw` - Cell content.
/// * `date_format` - Preferred `chrono` format string.
///
/// # Returns
/// * `anyhow::Result<chrono::NaiveDateTime>` - Parsed timestamp.
pub fn parse_timestamp(raw: &str, date_format: &str) -> anyhow::Result<chrono::NaiveDateTime> {
    let raw = raw.trim();
    std::iter::once(date_format)
        .chain(FALLBACK_DATE_FORMATS)
        .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| anyhow::anyhow!("Failed to parse datetime '{}' with format '{}'", raw, date_format))
}

/// Reads a price series from any CSV source.
///
/// Rows are kept in file order. A decreasing timestamp is reported but not
/// corrected.
///
/// # Arguments
/// * `reader` - Source of header-less `date,price` rows.
/// * `date_format` - `chrono` format of the date column.
///
/// # Returns
/// * `anyhow::Result<series::TimeSeries>` - Loaded series.
///
/// # Errors
/// * If a row cannot be deserialized or parsed (row number is reported).
/// * If the source holds no rows.
pub fn read_series<R: std::io::Read>(reader: R, date_format: &str) -> anyhow::Result<series::TimeSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for (row, result) in reader.deserialize::<CsvRecord>().enumerate() {
        let record = result.map_err(|e| anyhow::anyhow!("Row {}: {}", row + 1, e))?;
        let timestamp = parse_timestamp(&record.date, date_format)
            .map_err(|e| anyhow::anyhow!("Row {}: {}", row + 1, e))?;
        let price = parse_price(&record.price).map_err(|e| anyhow::anyhow!("Row {}: {}", row + 1, e))?;
        points.push(series::PricePoint::new(timestamp, price));
    }

    let series = series::TimeSeries::new(points)?;
    if !series.is_sorted() {
        tracing::warn!("series is not sorted by timestamp, first/last metrics may be wrong");
    }
    anyhow::Ok(series)
}

/// Loads a price series from a file on disk.
///
/// # Arguments
/// * `path` - Path to the CSV file.
/// * `date_format` - `chrono` format of the date column.
///
/// # Returns
/// * `anyhow::Result<series::TimeSeries>` - Loaded series.
pub fn load_series<P: AsRef<std::path::Path>>(path: P, date_format: &str) -> anyhow::Result<series::TimeSeries> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", path.display(), e))?;
    let series = read_series(file, date_format)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
    tracing::info!(path = %path.display(), points = series.len(), "loaded series");
    anyhow::Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::tests::at;

    #[test]
    fn test_read_feed_format() {
        let data = "01/05/23-09:00:00,$0.5123\n01/05/23-09:05:00,$0.5207\n";
        let s = read_series(data.as_bytes(), DEFAULT_DATE_FORMAT).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.first().timestamp, at("2023-05-01", 9, 0));
        assert_eq!(s.first().price, 0.5123);
        assert_eq!(s.latest_price(), 0.5207);
    }

    #[test]
    fn test_read_iso_fallback_and_plain_price() {
        let data = "2023-05-01 18:00:00,0.61\n2023-05-02 18:00:00, 0.64 $\n";
        let s = read_series(data.as_bytes(), DEFAULT_DATE_FORMAT).unwrap();
        assert_eq!(s.last().timestamp, at("2023-05-02", 18, 0));
        assert_eq!(s.last().price, 0.64);
    }

    #[test]
    fn test_bad_row_reports_row_number() {
        let data = "01/05/23-09:00:00,$0.5\n01/05/23-09:05:00,abc\n";
        let err = read_series(data.as_bytes(), DEFAULT_DATE_FORMAT).unwrap_err();
        assert!(err.to_string().contains("Row 2"));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(read_series("".as_bytes(), DEFAULT_DATE_FORMAT).is_err());
    }

    #[test]
    fn test_unsorted_input_kept_as_is() {
        let data = "01/05/23-10:00:00,2\n01/05/23-09:00:00,1\n";
        let s = read_series(data.as_bytes(), DEFAULT_DATE_FORMAT).unwrap();
        assert!(!s.is_sorted());
        assert_eq!(s.first().price, 2.0);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("$1.25").unwrap(), 1.25);
        assert!(parse_price("$").is_err());
    }

    #[test]
    fn test_non_finite_prices_rejected() {
        for cell in ["NaN", "inf", "-inf", "$NaN"] {
            assert!(parse_price(cell).is_err(), "{} should be rejected", cell);
            let data = format!("01/05/23-09:00:00,$0.5\n01/05/23-09:05:00,{}\n01/05/23-09:10:00,$0.6\n", cell);
            let err = read_series(data.as_bytes(), DEFAULT_DATE_FORMAT).unwrap_err();
            assert!(err.to_string().contains("Row 2"));
            assert!(err.to_string().contains("not finite"));
        }
    }
}
