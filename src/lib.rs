pub mod aggregate;
pub mod args;
pub mod config;
pub mod decompose;
pub mod editor;
pub mod extract;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod utils;
pub mod views;

pub use args::Args;
pub use config::{init_default_config, load_settings, Settings};
pub use pipeline::{discover_inputs, Pipeline};
pub use stats::Report;
pub use views::parse_views;
