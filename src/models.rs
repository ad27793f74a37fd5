use crate::errors::DashboardError;
use serde::{Deserialize, Serialize, Serializer};

/// One numeric column of the energy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Metric {
    Biofuels,
    Hydro,
    Solar,
    Wind,
    Coal,
    Oil,
    Gas,
    Nuclear,
    TotalRenewable,
    TotalNotRenewable,
}

/// Energy-type choices for the bar chart and the map.
pub const ENERGY_TYPES: [Metric; 2] = [Metric::TotalRenewable, Metric::TotalNotRenewable];

/// Sector columns, in the order the indicator labels are laid out.
pub const SECTORS: [Metric; 8] = [
    Metric::Biofuels,
    Metric::Hydro,
    Metric::Solar,
    Metric::Wind,
    Metric::Coal,
    Metric::Oil,
    Metric::Gas,
    Metric::Nuclear,
];

impl Metric {
    pub const COUNT: usize = 10;

    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::Biofuels,
        Metric::Hydro,
        Metric::Solar,
        Metric::Wind,
        Metric::Coal,
        Metric::Oil,
        Metric::Gas,
        Metric::Nuclear,
        Metric::TotalRenewable,
        Metric::TotalNotRenewable,
    ];

    /// Column header in the source table.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Biofuels => "Biofuels Production - TWh - Total",
            Metric::Hydro => "Electricity from hydro (TWh)",
            Metric::Solar => "Electricity from solar (TWh)",
            Metric::Wind => "Electricity from wind (TWh)",
            Metric::Coal => "Coal Consumption - TWh",
            Metric::Oil => "Oil Consumption - TWh",
            Metric::Gas => "Gas Consumption - TWh",
            Metric::Nuclear => "Nuclear Consumption - TWh",
            Metric::TotalRenewable => "Total Renewable",
            Metric::TotalNotRenewable => "Total Not Renewable",
        }
    }

    /// Human label; underscores in column names read as spaces.
    pub fn label(self) -> String {
        self.name().replace('_', " ")
    }

    pub fn from_name(name: &str) -> Result<Self, DashboardError> {
        let name = name.trim();
        Metric::ALL
            .into_iter()
            .find(|metric| metric.name() == name)
            .ok_or_else(|| DashboardError::InvalidMetric(name.to_string()))
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<String> for Metric {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Metric::from_name(&value)
    }
}

impl From<Metric> for String {
    fn from(metric: Metric) -> Self {
        metric.name().to_string()
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyRecord {
    pub entity: String,
    pub year: i32,
    pub values: [Option<f64>; Metric::COUNT],
}

impl EnergyRecord {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values[metric.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ScaleMode {
    #[default]
    Linear,
    Log,
}

impl ScaleMode {
    pub const ALL: [ScaleMode; 2] = [ScaleMode::Linear, ScaleMode::Log];

    pub fn axis_type(self) -> &'static str {
        match self {
            ScaleMode::Linear => "linear",
            ScaleMode::Log => "log",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScaleMode::Linear => "Linear",
            ScaleMode::Log => "log",
        }
    }

    /// Y-axis title of the aggregate scatter plot.
    pub fn aggregate_axis_title(self) -> &'static str {
        match self {
            ScaleMode::Linear => "Total energy",
            ScaleMode::Log => "Total energy(log scaled)",
        }
    }
}

impl TryFrom<u8> for ScaleMode {
    type Error = DashboardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ScaleMode::Linear),
            1 => Ok(ScaleMode::Log),
            other => Err(DashboardError::InvalidSelection(format!(
                "scale must be 0 or 1, got {other}"
            ))),
        }
    }
}

impl From<ScaleMode> for u8 {
    fn from(mode: ScaleMode) -> Self {
        match mode {
            ScaleMode::Linear => 0,
            ScaleMode::Log => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Projection {
    #[default]
    Equirectangular,
    Orthographic,
}

impl Projection {
    pub const ALL: [Projection; 2] = [Projection::Equirectangular, Projection::Orthographic];

    /// Projection type understood by the map renderer.
    pub fn map_type(self) -> &'static str {
        match self {
            Projection::Equirectangular => "equirectangular",
            Projection::Orthographic => "orthographic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Projection::Equirectangular => "Equirectangular",
            Projection::Orthographic => "Orthographic",
        }
    }
}

impl TryFrom<u8> for Projection {
    type Error = DashboardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Projection::Equirectangular),
            1 => Ok(Projection::Orthographic),
            other => Err(DashboardError::InvalidSelection(format!(
                "projection must be 0 or 1, got {other}"
            ))),
        }
    }
}

impl From<Projection> for u8 {
    fn from(projection: Projection) -> Self {
        match projection {
            Projection::Equirectangular => 0,
            Projection::Orthographic => 1,
        }
    }
}

/// Current values of every control; also the body of `POST /api/figures`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub year: i32,
    pub countries: Vec<String>,
    pub energy: Metric,
    #[serde(default)]
    pub scale: ScaleMode,
    #[serde(default)]
    pub projection: Projection,
    pub sectors: Vec<Metric>,
}

#[derive(Debug, Deserialize)]
pub struct IndicatorRequest {
    pub countries: Vec<String>,
    pub year: i32,
}

// ---------------------------------------------------------------------------
// Chart output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySeries {
    pub country: String,
    pub points: Vec<(i32, Option<f64>)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorSeries {
    pub sector: Metric,
    pub points: Vec<(i32, f64)>,
}

/// One country on the map. `log_value` is `ln(value)`: `-inf` for zero,
/// `NaN` for negative or missing values. Non-finite values serialize as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethPoint {
    pub entity: String,
    pub value: Option<f64>,
    #[serde(serialize_with = "finite_or_null")]
    pub log_value: f64,
}

fn finite_or_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub title: String,
    pub y_axis: Axis,
    pub series: Vec<CountrySeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethSpec {
    pub title: String,
    pub location_mode: &'static str,
    pub color_scale: &'static str,
    pub colorbar_title: String,
    pub hover_template: String,
    pub projection: &'static str,
    pub points: Vec<ChoroplethPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub mode: &'static str,
    pub series: Vec<SectorSeries>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Bar(BarChartSpec),
    Choropleth(ChoroplethSpec),
    Scatter(ScatterSpec),
}

#[derive(Debug, Serialize)]
pub struct FiguresResponse {
    pub figures: Vec<ChartSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorLabel {
    pub metric: Metric,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct IndicatorsResponse {
    pub labels: Vec<IndicatorLabel>,
}

#[derive(Debug, Serialize)]
pub struct MetricOption {
    pub label: String,
    pub value: Metric,
}

/// A radio-button choice sent on the wire as its integer value.
#[derive(Debug, Serialize)]
pub struct ChoiceOption {
    pub label: &'static str,
    pub value: u8,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub countries: Vec<String>,
    pub energy_types: Vec<MetricOption>,
    pub sectors: Vec<MetricOption>,
    pub scales: Vec<ChoiceOption>,
    pub projections: Vec<ChoiceOption>,
    pub year_min: i32,
    pub year_max: i32,
    pub year_marks: Vec<i32>,
    pub defaults: Selection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_round_trip_through_from_name() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_name(metric.name()).unwrap(), metric);
        }
        assert!(matches!(
            Metric::from_name("Wood Burning - TWh"),
            Err(DashboardError::InvalidMetric(name)) if name == "Wood Burning - TWh"
        ));
    }

    #[test]
    fn sectors_and_energy_types_cover_all_metrics() {
        let mut all: Vec<Metric> = SECTORS.iter().chain(ENERGY_TYPES.iter()).copied().collect();
        all.sort();
        assert_eq!(all, Metric::ALL.to_vec());
    }

    #[test]
    fn scale_and_projection_accept_only_zero_or_one() {
        assert_eq!(ScaleMode::try_from(0).unwrap(), ScaleMode::Linear);
        assert_eq!(ScaleMode::try_from(1).unwrap(), ScaleMode::Log);
        assert!(ScaleMode::try_from(2).is_err());
        assert_eq!(Projection::try_from(1).unwrap(), Projection::Orthographic);
        assert!(Projection::try_from(7).is_err());
        assert_eq!(ScaleMode::Log.axis_type(), "log");
        assert_eq!(Projection::Orthographic.map_type(), "orthographic");
    }

    #[test]
    fn selection_deserializes_wire_format() {
        let selection: Selection = serde_json::from_value(serde_json::json!({
            "year": 2015,
            "countries": ["Portugal"],
            "energy": "Total Renewable",
            "scale": 1,
            "projection": 0,
            "sectors": ["Coal Consumption - TWh"]
        }))
        .unwrap();
        assert_eq!(selection.energy, Metric::TotalRenewable);
        assert_eq!(selection.scale, ScaleMode::Log);
        assert_eq!(selection.projection, Projection::Equirectangular);
        assert_eq!(selection.sectors, vec![Metric::Coal]);

        let bad = serde_json::from_value::<Selection>(serde_json::json!({
            "year": 2015,
            "countries": ["Portugal"],
            "energy": "Total Renewable",
            "scale": 3,
            "sectors": []
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn non_finite_log_values_serialize_as_null() {
        let point = ChoroplethPoint {
            entity: "Spain".to_string(),
            value: Some(0.0),
            log_value: f64::NEG_INFINITY,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert!(json["log_value"].is_null());
        assert_eq!(json["value"], serde_json::json!(0.0));
    }
}
