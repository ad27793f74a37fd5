use crate::dataset::Dataset;
use crate::engine::build_figures;
use crate::errors::AppError;
use crate::models::{
    ChoiceOption, FiguresResponse, IndicatorRequest, IndicatorsResponse, Metric, MetricOption,
    OptionsResponse, Projection, ScaleMode, Selection, ENERGY_TYPES, SECTORS,
};
use crate::state::AppState;
use crate::summary::summarize;
use crate::ui::render_index;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use tracing::{debug, warn};

const DEFAULT_COUNTRY: &str = "Portugal";

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn get_options(State(state): State<AppState>) -> Json<OptionsResponse> {
    Json(build_options(&state.dataset))
}

pub async fn figures(
    State(state): State<AppState>,
    payload: Result<Json<Selection>, JsonRejection>,
) -> Result<Json<FiguresResponse>, AppError> {
    let Json(selection) = payload.map_err(|rejection| {
        warn!("figures request rejected: {}", rejection.body_text());
        AppError::from(rejection)
    })?;
    let figures = build_figures(&state.dataset, &selection).map_err(|err| {
        warn!("figures rejected: {err}");
        AppError::from(err)
    })?;
    Ok(Json(FiguresResponse { figures }))
}

pub async fn indicators(
    State(state): State<AppState>,
    payload: Result<Json<IndicatorRequest>, JsonRejection>,
) -> Result<Json<IndicatorsResponse>, AppError> {
    let Json(payload) = payload?;
    let labels = summarize(&state.dataset, &payload.countries, payload.year).map_err(|err| {
        debug!("no indicators: {err}");
        AppError::from(err)
    })?;
    Ok(Json(IndicatorsResponse { labels }))
}

fn metric_options(metrics: &[Metric]) -> Vec<MetricOption> {
    metrics
        .iter()
        .map(|&metric| MetricOption {
            label: metric.label(),
            value: metric,
        })
        .collect()
}

/// Slider marks every five years from 1965 to 2020, clipped to the data.
fn year_marks(min: i32, max: i32) -> Vec<i32> {
    (1965..=2020).step_by(5).filter(|y| (min..=max).contains(y)).collect()
}

pub fn default_selection(dataset: &Dataset) -> Selection {
    let countries = dataset
        .available_countries()
        .iter()
        .find(|c| c.as_str() == DEFAULT_COUNTRY)
        .or_else(|| dataset.available_countries().first())
        .cloned()
        .into_iter()
        .collect();

    Selection {
        year: dataset.year_range().0,
        countries,
        energy: Metric::TotalRenewable,
        scale: ScaleMode::Linear,
        projection: Projection::Equirectangular,
        sectors: vec![Metric::Biofuels, Metric::Coal],
    }
}

pub fn build_options(dataset: &Dataset) -> OptionsResponse {
    let (year_min, year_max) = dataset.year_range();
    OptionsResponse {
        countries: dataset.available_countries().to_vec(),
        energy_types: metric_options(&ENERGY_TYPES),
        sectors: metric_options(&SECTORS),
        scales: ScaleMode::ALL
            .into_iter()
            .map(|mode| ChoiceOption {
                label: mode.label(),
                value: mode.into(),
            })
            .collect(),
        projections: Projection::ALL
            .into_iter()
            .map(|projection| ChoiceOption {
                label: projection.label(),
                value: projection.into(),
            })
            .collect(),
        year_min,
        year_max,
        year_marks: year_marks(year_min, year_max),
        defaults: default_selection(dataset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::sample;

    #[test]
    fn defaults_prefer_portugal() {
        let options = build_options(&sample());
        assert_eq!(options.defaults.countries, ["Portugal"]);
        assert_eq!(options.defaults.year, 2014);
        assert_eq!(options.defaults.sectors, [Metric::Biofuels, Metric::Coal]);
        assert_eq!(options.countries, ["Portugal", "Spain", "France"]);
        assert_eq!(options.energy_types.len(), 2);
        assert_eq!(options.sectors.len(), 8);
        let scales: Vec<(&str, u8)> = options.scales.iter().map(|c| (c.label, c.value)).collect();
        assert_eq!(scales, [("Linear", 0), ("log", 1)]);
        let projections: Vec<&str> = options.projections.iter().map(|c| c.label).collect();
        assert_eq!(projections, ["Equirectangular", "Orthographic"]);
    }

    #[test]
    fn defaults_fall_back_to_first_country() {
        let dataset = Dataset::from_records(vec![
            crate::engine::tests::record("Chile", 1990, &[]),
            crate::engine::tests::record("Peru", 1990, &[]),
        ])
        .unwrap();
        assert_eq!(default_selection(&dataset).countries, ["Chile"]);
    }

    #[test]
    fn year_marks_are_clipped_to_data() {
        assert_eq!(year_marks(1965, 2021).len(), 12);
        assert_eq!(year_marks(2003, 2016), [2005, 2010, 2015]);
        assert!(year_marks(2016, 2019).is_empty());
    }
}
