pub mod app;
pub mod chart;
pub mod errors;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod renderer;
pub mod selection;
pub mod series;
pub mod state;
pub mod ui;
pub mod widget;

pub use app::router;
pub use loader::{fetch_stats, resolve_stats_source};
pub use state::AppState;
