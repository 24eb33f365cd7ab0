mod app;
mod config;
mod http;
mod schedule;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use schedule::ScheduleError;
