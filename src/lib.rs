pub mod aggregate;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod format;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod theme;

pub use aggregate::{Aggregator, Fetcher, HttpFetcher};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{ApiKeys, Config, load_config};
pub use ir::{Item, Section, UserRecord};
pub use layout::{layout_art, layout_text};
pub use render::{render_card, render_document, write_output_svg};
pub use theme::Theme;
