//! Price data source collaborator: timestamped market prices loaded from
//! tabular storage. The core consumes only the numeric values, aligned
//! one-to-one with the period index.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One market price for one delivery period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Load an ordered price series from a CSV file with `timestamp,price`
/// columns (RFC 3339 timestamps).
pub fn load_price_series(path: &Path) -> Result<Vec<PricePoint>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening price file {}", path.display()))?;
    let mut points = Vec::new();
    for record in reader.deserialize() {
        let point: PricePoint =
            record.with_context(|| format!("parsing price row in {}", path.display()))?;
        points.push(point);
    }
    Ok(points)
}

/// Strip timestamps for the core solve call.
pub fn price_values(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.price).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timestamped_rows() {
        let data = "timestamp,price\n\
                    2024-01-01T00:00:00Z,42.5\n\
                    2024-01-01T00:30:00Z,55.0\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let points: Vec<PricePoint> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("valid csv");

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].price, 42.5);
        assert_eq!(price_values(&points), vec![42.5, 55.0]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_price_series(Path::new("/nonexistent/prices.csv")).unwrap_err();
        assert!(err.to_string().contains("prices.csv"));
    }
}
