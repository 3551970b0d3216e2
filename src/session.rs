//! Dataset selection and the build → layout → render cycle.

use crate::color::ColorScale;
use crate::config::Config;
use crate::dataset::{DatasetCatalog, DatasetError};
use crate::hierarchy::{self, Hierarchy, HierarchyError};
use crate::layout::{TreemapLayout, compute_layout};
use crate::render::{HoverEvent, Mount, Stage};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown dataset `{key}`")]
    UnknownDataset { key: String },
    #[error("a render cycle is already running")]
    Busy,
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("invalid label pattern: {0}")]
    LabelPattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Building,
    LayingOut,
    Rendering,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub description: String,
}

#[derive(Debug)]
struct Active {
    key: String,
    hierarchy: Hierarchy,
    layout: TreemapLayout,
    mount: Mount,
}

#[derive(Debug)]
pub struct Session {
    catalog: DatasetCatalog,
    config: Config,
    stage: Stage,
    colors: ColorScale,
    phase: Phase,
    active: Option<Active>,
}

impl Session {
    pub fn new(catalog: DatasetCatalog, config: Config) -> Result<Self, SessionError> {
        let stage = Stage::from_config(&config)?;
        let colors = ColorScale::new(config.theme.palette.clone());
        Ok(Self {
            catalog,
            config,
            stage,
            colors,
            phase: Phase::Idle,
            active: None,
        })
    }

    pub fn with_bundled(config: Config) -> Result<Self, SessionError> {
        Self::new(DatasetCatalog::bundled()?, config)
    }

    /// Switches to the dataset registered under `key`.
    ///
    /// The previous visuals are only torn down once the new dataset has
    /// built and laid out; any error leaves them in place.
    pub fn select(&mut self, key: &str) -> Result<(), SessionError> {
        if self.phase != Phase::Idle {
            warn!(key, phase = ?self.phase, "ignoring selection while a cycle is running");
            return Err(SessionError::Busy);
        }
        let Some(dataset) = self.catalog.get(key) else {
            warn!(key, "ignoring selection of unknown dataset");
            return Err(SessionError::UnknownDataset {
                key: key.to_string(),
            });
        };

        self.phase = Phase::Building;
        let hierarchy = match hierarchy::build(&dataset.root) {
            Ok(hierarchy) => hierarchy,
            Err(err) => {
                self.phase = Phase::Idle;
                warn!(key, error = %err, "dataset failed to build");
                return Err(err.into());
            }
        };

        self.phase = Phase::LayingOut;
        let layout = compute_layout(&hierarchy, &self.config.treemap);

        self.phase = Phase::Rendering;
        if let Some(previous) = self.active.take() {
            if !self.stage.dispose(previous.mount) {
                warn!(
                    key,
                    previous = %previous.key,
                    "previous render pass was no longer mounted"
                );
            }
        }
        let mount = self.stage.render(&hierarchy, &layout, &mut self.colors);
        info!(
            key,
            title = %dataset.title,
            leaves = self.stage.tiles().len(),
            "selected dataset"
        );
        self.active = Some(Active {
            key: key.to_string(),
            hierarchy,
            layout,
            mount,
        });
        self.phase = Phase::Idle;
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.key.as_str())
    }

    pub fn header(&self) -> Option<Header> {
        let key = self.active_key()?;
        let dataset = self.catalog.get(key)?;
        Some(Header {
            title: dataset.title.clone(),
            description: dataset.description.clone(),
        })
    }

    /// `(key, title)` pairs for the selection links.
    pub fn links(&self) -> Vec<(String, String)> {
        self.catalog
            .iter()
            .map(|d| (d.key.clone(), d.title.clone()))
            .collect()
    }

    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn hierarchy(&self) -> Option<&Hierarchy> {
        self.active.as_ref().map(|active| &active.hierarchy)
    }

    pub fn layout(&self) -> Option<&TreemapLayout> {
        self.active.as_ref().map(|active| &active.layout)
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn colors(&self) -> &ColorScale {
        &self.colors
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, now: Duration) -> Vec<HoverEvent> {
        self.stage.pointer_move(x, y, now)
    }

    pub fn pointer_leave(&mut self, now: Duration) -> Option<HoverEvent> {
        self.stage.pointer_leave(now)
    }

    pub fn treemap_svg(&self) -> String {
        self.stage.treemap_svg()
    }

    pub fn legend_svg(&self) -> String {
        self.stage.legend_svg()
    }

    pub fn tooltip_html(&self, now: Duration) -> String {
        self.stage.tooltip_html(now)
    }
}
