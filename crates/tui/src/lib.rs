//! Terminal UI: a source menu, a paged grid of release cards, a detail
//! modal and a status footer.

pub mod app;
pub mod card;
pub mod grid;
pub mod loader;
pub mod runner;
pub mod status;
pub mod ui;

pub use app::App;
pub use runner::run;
