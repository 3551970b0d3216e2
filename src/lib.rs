pub mod color;
pub mod config;
pub mod dataset;
pub mod hierarchy;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod session;
pub mod theme;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::run;
pub use color::ColorScale;
pub use config::{Config, TreemapConfig, load_config};
pub use dataset::DatasetCatalog;
pub use hierarchy::{Hierarchy, build};
pub use ir::{DataNode, Dataset};
pub use layout::{LayoutRect, TreemapLayout, compute_layout};
pub use render::Stage;
pub use session::{Session, SessionError};
pub use theme::Theme;
