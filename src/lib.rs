pub mod app;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod summary;
pub mod ui;

pub use app::router;
pub use dataset::{load_dataset, resolve_data_path, Dataset};
pub use errors::DashboardError;
pub use state::AppState;
