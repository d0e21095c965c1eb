//! GUI shell (eframe)

pub mod app;
pub mod log;
pub mod theme;

pub use app::run;
pub use log::UiLog;
