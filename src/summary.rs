use crate::dataset::Dataset;
use crate::engine::aggregate_by_year;
use crate::errors::DashboardError;
use crate::models::{IndicatorLabel, SECTORS};

/// Sector totals of the selected countries for one year, as eight labels.
pub fn summarize(
    dataset: &Dataset,
    countries: &[String],
    year: i32,
) -> Result<Vec<IndicatorLabel>, DashboardError> {
    let totals = aggregate_by_year(dataset, countries);
    let sums = totals.get(&year).ok_or_else(|| DashboardError::MissingData {
        year,
        countries: countries.to_vec(),
    })?;

    Ok(SECTORS
        .iter()
        .map(|&metric| {
            let value = round2(sums[metric.index()]);
            IndicatorLabel {
                metric,
                value,
                label: format!("{}: {}", metric.label(), display_value(value)),
            }
        })
        .collect())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Shortest decimal form, always with a fractional part: `54.0`, `12.35`.
fn display_value(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}
