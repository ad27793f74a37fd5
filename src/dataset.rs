use crate::errors::DashboardError;
use crate::models::{EnergyRecord, Metric};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Read;
use std::{env, fs::File, path::Path, path::PathBuf};
use tracing::info;

const ENTITY_COLUMN: &str = "Entity";
const YEAR_COLUMN: &str = "Year";

/// The energy table, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<EnergyRecord>,
    available_countries: Vec<String>,
    year_range: (i32, i32),
}

impl Dataset {
    /// Build a dataset from already-parsed rows. `None` for an empty table.
    pub fn from_records(records: Vec<EnergyRecord>) -> Option<Self> {
        let min = records.iter().map(|r| r.year).min()?;
        let max = records.iter().map(|r| r.year).max()?;

        let available_countries = {
            let mut seen = HashSet::new();
            records
                .iter()
                .filter(|r| seen.insert(r.entity.as_str()))
                .map(|r| r.entity.clone())
                .collect()
        };

        Some(Self {
            records,
            available_countries,
            year_range: (min, max),
        })
    }

    /// Parse CSV text with an `Entity`, a `Year` and every metric column.
    pub fn from_reader<R: Read>(source: &Path, reader: R) -> Result<Self, DashboardError> {
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|e| DashboardError::data_load(source, e))?
            .clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| {
                    DashboardError::data_load(source, format!("missing column '{name}'"))
                })
        };
        let entity_idx = column(ENTITY_COLUMN)?;
        let year_idx = column(YEAR_COLUMN)?;
        let mut metric_idx = [0usize; Metric::COUNT];
        for metric in Metric::ALL {
            metric_idx[metric.index()] = column(metric.name())?;
        }

        let mut records = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            // Header is line 1.
            let line = i + 2;
            let row = result.map_err(|e| DashboardError::data_load(source, e))?;

            let entity = row.get(entity_idx).unwrap_or("").to_string();
            if entity.is_empty() {
                return Err(DashboardError::data_load(
                    source,
                    format!("line {line}: empty '{ENTITY_COLUMN}'"),
                ));
            }
            let year_cell = row.get(year_idx).unwrap_or("");
            let year = year_cell.parse::<i32>().map_err(|_| {
                DashboardError::data_load(
                    source,
                    format!("line {line}: '{YEAR_COLUMN}' is not an integer: '{year_cell}'"),
                )
            })?;

            let mut values = [None; Metric::COUNT];
            for metric in Metric::ALL {
                let cell = row.get(metric_idx[metric.index()]).unwrap_or("");
                values[metric.index()] = parse_metric(cell).ok_or_else(|| {
                    DashboardError::data_load(
                        source,
                        format!("line {line}: '{}' is not numeric: '{cell}'", metric.name()),
                    )
                })?;
            }

            records.push(EnergyRecord {
                entity,
                year,
                values,
            });
        }

        Self::from_records(records)
            .ok_or_else(|| DashboardError::data_load(source, "no data rows"))
    }

    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    /// Unique entities in first-appearance order.
    pub fn available_countries(&self) -> &[String] {
        &self.available_countries
    }

    pub fn year_range(&self) -> (i32, i32) {
        self.year_range
    }
}

/// Parse one metric cell. `Some(None)` is a missing value, `None` a malformed cell.
///
/// - Empty cells and `NaN` are missing.
/// - Alphabetic text (including `inf`) is rejected.
/// - Commas are only accepted as well-formed thousands separators (`1,234.5`);
///   a decimal comma such as `1,5` is rejected.
fn parse_metric(cell: &str) -> Option<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Some(None);
    }
    if cell.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    let value = if cell.contains(',') {
        strip_thousands(cell)?.parse::<f64>().ok()?
    } else {
        cell.parse::<f64>().ok()?
    };
    value.is_finite().then_some(Some(value))
}

/// Remove `,` thousands separators, requiring groups of exactly three digits.
fn strip_thousands(cell: &str) -> Option<String> {
    let (int_part, frac) = match cell.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (cell, None),
    };
    let digits = int_part.strip_prefix('-').unwrap_or(int_part);
    let mut groups = digits.split(',');
    let lead = groups.next()?;
    if lead.is_empty() || lead.len() > 3 || !lead.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut plain = String::with_capacity(cell.len());
    if digits.len() != int_part.len() {
        plain.push('-');
    }
    plain.push_str(lead);
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        plain.push_str(group);
    }
    if let Some(frac) = frac {
        if frac.contains(',') {
            return None;
        }
        plain.push('.');
        plain.push_str(frac);
    }
    Some(plain)
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("ENERGY_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/energy.csv")
}

pub fn load_dataset(path: &Path) -> Result<Dataset, DashboardError> {
    let file = File::open(path).map_err(|e| DashboardError::data_load(path, e))?;
    let dataset = Dataset::from_reader(path, file)?;
    let (min, max) = dataset.year_range();
    info!(
        rows = dataset.records().len(),
        countries = dataset.available_countries().len(),
        "loaded {} ({min}..={max})",
        path.display()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Entity,Code,Year,Biofuels Production - TWh - Total,Electricity from hydro (TWh),Electricity from solar (TWh),Electricity from wind (TWh),Coal Consumption - TWh,Oil Consumption - TWh,Gas Consumption - TWh,Nuclear Consumption - TWh,Total Renewable,Total Not Renewable";

    fn parse(body: &str) -> Result<Dataset, DashboardError> {
        let text = format!("{HEADER}\n{body}");
        Dataset::from_reader(Path::new("test.csv"), text.as_bytes())
    }

    #[test]
    fn loads_rows_and_derives_countries_and_years() {
        let dataset = parse(
            "Spain,ESP,2016,1,30,8,48,120,600,300,56,87,1076\n\
             Portugal,PRT,2015,0.5,10,0.8,5,14,130,50,0,16.3,194\n\
             Spain,ESP,2015,1,28,8,49,140,590,280,57,86,1067\n",
        )
        .unwrap();

        assert_eq!(dataset.records().len(), 3);
        assert_eq!(dataset.available_countries(), ["Spain", "Portugal"]);
        assert_eq!(dataset.year_range(), (2015, 2016));
        let portugal = &dataset.records()[1];
        assert_eq!(portugal.value(Metric::Wind), Some(5.0));
        assert_eq!(portugal.value(Metric::TotalNotRenewable), Some(194.0));
    }

    #[test]
    fn empty_cells_stay_missing() {
        let dataset = parse("Portugal,PRT,1965,,2.1,,,8,40,,0,2.1,48\n").unwrap();
        let row = &dataset.records()[0];
        assert_eq!(row.value(Metric::Biofuels), None);
        assert_eq!(row.value(Metric::Gas), None);
        assert_eq!(row.value(Metric::Nuclear), Some(0.0));
    }

    #[test]
    fn missing_metric_column_is_a_load_error() {
        let text = "Entity,Year,Total Renewable\nPortugal,2015,16\n";
        let err = Dataset::from_reader(Path::new("short.csv"), text.as_bytes()).unwrap_err();
        match err {
            DashboardError::DataLoad { path, reason } => {
                assert_eq!(path, PathBuf::from("short.csv"));
                assert!(reason.contains("Biofuels Production - TWh - Total"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_cells_are_rejected_with_line_number() {
        let err = parse("Portugal,PRT,2015,lots,10,0.8,5,14,130,50,0,16.3,194\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 2"), "{message}");
        assert!(message.contains("Biofuels"), "{message}");

        let err = parse("Portugal,PRT,twenty,0.5,10,0.8,5,14,130,50,0,16.3,194\n").unwrap_err();
        assert!(err.to_string().contains("'Year' is not an integer"));
    }

    #[test]
    fn infinite_and_decimal_comma_cells_are_rejected() {
        let err = parse("Portugal,PRT,2015,inf,10,0.8,5,14,130,50,0,16.3,194\n").unwrap_err();
        assert!(err.to_string().contains("'inf'"), "{err}");

        let err = parse("Portugal,PRT,2015,-Infinity,10,0.8,5,14,130,50,0,16.3,194\n").unwrap_err();
        assert!(matches!(err, DashboardError::DataLoad { .. }));

        let err = parse("Portugal,PRT,2015,0.5,\"1,5\",0.8,5,14,130,50,0,16.3,194\n").unwrap_err();
        assert!(err.to_string().contains("'1,5'"), "{err}");
    }

    #[test]
    fn thousands_separators_and_exponents_parse() {
        assert_eq!(parse_metric("1,234.5"), Some(Some(1234.5)));
        assert_eq!(parse_metric("-12,000"), Some(Some(-12000.0)));
        assert_eq!(parse_metric("1.5e3"), Some(Some(1500.0)));
        assert_eq!(parse_metric(" NaN "), Some(None));
        assert_eq!(parse_metric("12,34"), None);
        assert_eq!(parse_metric("1234,567"), None);
        assert_eq!(parse_metric(",123"), None);
        assert_eq!(parse_metric("1e400"), None);
    }

    #[test]
    fn header_only_table_is_a_load_error() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, DashboardError::DataLoad { .. }));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_dataset(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::DataLoad { .. }));
    }

    #[test]
    fn bundled_sample_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/energy.csv");
        let dataset = load_dataset(&path).unwrap();
        assert!(dataset.available_countries().iter().any(|c| c == "Portugal"));
        let (min, max) = dataset.year_range();
        assert!(min <= max);
    }
}
