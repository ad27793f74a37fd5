use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the dataset loader, the engine and the label formatter.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to load dataset {}: {reason}", .path.display())]
    DataLoad { path: PathBuf, reason: String },

    #[error("unknown metric '{0}'")]
    InvalidMetric(String),

    #[error("no aggregated data for year {year} and countries [{}]", .countries.join(", "))]
    MissingData { year: i32, countries: Vec<String> },

    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

impl DashboardError {
    pub fn data_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::DataLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::InvalidMetric(_) | DashboardError::InvalidSelection(_) => {
                Self::bad_request(err.to_string())
            }
            DashboardError::MissingData { .. } => Self::not_found(err.to_string()),
            DashboardError::DataLoad { .. } => Self::internal(err),
        }
    }
}

/// Malformed request bodies (unknown metric, scale outside 0|1, missing
/// fields) are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_errors_map_to_http_status() {
        let missing = DashboardError::MissingData {
            year: 1965,
            countries: vec!["Atlantis".to_string()],
        };
        assert_eq!(AppError::from(missing).status, StatusCode::NOT_FOUND);

        let metric = DashboardError::InvalidMetric("Unobtainium".to_string());
        let err = AppError::from(metric);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("Unobtainium"));

        let load = DashboardError::data_load("data/energy.csv", "missing column 'Year'");
        assert_eq!(AppError::from(load).status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_data_message_lists_countries() {
        let err = DashboardError::MissingData {
            year: 2015,
            countries: vec!["Atlantis".to_string(), "Lemuria".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "no aggregated data for year 2015 and countries [Atlantis, Lemuria]"
        );
    }
}
