use crate::dataset::Dataset;
use crate::errors::DashboardError;
use crate::models::{
    Axis, BarChartSpec, ChartSpec, ChoroplethPoint, ChoroplethSpec, CountrySeries, Metric,
    ScatterSpec, SectorSeries, Selection,
};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Per-year sums of every metric across a set of countries.
pub type YearTotals = BTreeMap<i32, [f64; Metric::COUNT]>;

/// Per-country `(year, value)` pairs for the bar chart, in selection order.
/// Each country's points are in ascending year order.
pub fn build_bar_series(
    dataset: &Dataset,
    countries: &[String],
    metric: Metric,
) -> Vec<CountrySeries> {
    countries
        .iter()
        .map(|country| {
            let mut points: Vec<(i32, Option<f64>)> = dataset
                .records()
                .iter()
                .filter(|r| &r.entity == country)
                .map(|r| (r.year, r.value(metric)))
                .collect();
            points.sort_by_key(|&(year, _)| year);
            CountrySeries {
                country: country.clone(),
                points,
            }
        })
        .collect()
}

/// Every country's log-scaled value for one year, ignoring the country selection.
pub fn build_choropleth(dataset: &Dataset, year: i32, metric: Metric) -> Vec<ChoroplethPoint> {
    dataset
        .records()
        .iter()
        .filter(|r| r.year == year)
        .map(|r| {
            let value = r.value(metric);
            ChoroplethPoint {
                entity: r.entity.clone(),
                value,
                log_value: value.map_or(f64::NAN, f64::ln),
            }
        })
        .collect()
}

/// Group the selected countries' rows by year and sum each metric.
/// Missing cells count as zero, so every year with at least one row appears.
pub fn aggregate_by_year(dataset: &Dataset, countries: &[String]) -> YearTotals {
    let wanted: HashSet<&str> = countries.iter().map(String::as_str).collect();
    let mut totals = YearTotals::new();
    for record in dataset.records() {
        if !wanted.contains(record.entity.as_str()) {
            continue;
        }
        let sums = totals.entry(record.year).or_insert([0.0; Metric::COUNT]);
        for (sum, value) in sums.iter_mut().zip(record.values.iter()) {
            *sum += value.unwrap_or(0.0);
        }
    }
    totals
}

/// Per-sector `(year, total)` pairs summed across the selected countries.
pub fn build_aggregate_series(
    dataset: &Dataset,
    countries: &[String],
    sectors: &[Metric],
) -> Vec<SectorSeries> {
    let totals = aggregate_by_year(dataset, countries);
    sectors
        .iter()
        .map(|&sector| SectorSeries {
            sector,
            points: totals
                .iter()
                .map(|(&year, sums)| (year, sums[sector.index()]))
                .collect(),
        })
        .collect()
}

fn validate(dataset: &Dataset, selection: &Selection) -> Result<(), DashboardError> {
    if selection.countries.is_empty() {
        return Err(DashboardError::InvalidSelection(
            "select at least one country".to_string(),
        ));
    }
    if selection.sectors.is_empty() {
        return Err(DashboardError::InvalidSelection(
            "select at least one sector".to_string(),
        ));
    }
    let (min, max) = dataset.year_range();
    if !(min..=max).contains(&selection.year) {
        return Err(DashboardError::InvalidSelection(format!(
            "year {} outside {min}..={max}",
            selection.year
        )));
    }
    Ok(())
}

/// The three dashboard figures for one selection: bar, map, aggregate scatter.
pub fn build_figures(
    dataset: &Dataset,
    selection: &Selection,
) -> Result<Vec<ChartSpec>, DashboardError> {
    validate(dataset, selection)?;

    let energy = selection.energy.label();
    let (first_year, last_year) = dataset.year_range();

    let bar = BarChartSpec {
        title: format!("{energy} energy production from {first_year} until {last_year}"),
        y_axis: Axis {
            title: "Energy production".to_string(),
            axis_type: Some(selection.scale.axis_type()),
        },
        series: build_bar_series(dataset, &selection.countries, selection.energy),
    };

    let choropleth = ChoroplethSpec {
        title: format!("World {energy} Choropleth Map on the year {}", selection.year),
        location_mode: "country names",
        color_scale: "mint",
        colorbar_title: format!("{energy} (log scaled)"),
        hover_template: format!("Country: %{{text}} <br>{energy}: %{{z}}"),
        projection: selection.projection.map_type(),
        points: build_choropleth(dataset, selection.year, selection.energy),
    };

    let scatter = ScatterSpec {
        title: "Aggregate energy production by Sector".to_string(),
        x_axis: Axis {
            title: "Year".to_string(),
            axis_type: None,
        },
        y_axis: Axis {
            title: selection.scale.aggregate_axis_title().to_string(),
            axis_type: Some(selection.scale.axis_type()),
        },
        mode: "markers",
        series: build_aggregate_series(dataset, &selection.countries, &selection.sectors),
    };

    debug!(
        countries = selection.countries.len(),
        year = selection.year,
        map_points = choropleth.points.len(),
        "built figures"
    );

    Ok(vec![
        ChartSpec::Bar(bar),
        ChartSpec::Choropleth(choropleth),
        ChartSpec::Scatter(scatter),
    ])
}
