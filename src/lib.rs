// Library surface for the binary, headless tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod calculator;
pub mod config;
pub mod error;
pub mod logging;
pub mod points;
pub mod runtime;
pub mod selection;
pub mod ui;

pub use calculator::{minimum_position, Gaps, Outcome};
pub use points::{points_for, Position};
