mod label;
mod svg;
mod tooltip;

pub use label::{
    CapitalBoundary, LabelStrategy, PatternSplit, Whitespace, Whole, strategy_from_config,
};
pub use tooltip::{Tooltip, TooltipContent};

use crate::color::ColorScale;
use crate::config::{Config, LabelConfig, LegendConfig};
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::hierarchy::Hierarchy;
use crate::layout::{LayoutRect, TreemapLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Everything the stage needs besides the data: passed in explicitly rather
/// than kept in globals.
#[derive(Debug)]
pub struct RenderContext {
    pub theme: Theme,
    pub label: LabelConfig,
    pub legend: LegendConfig,
    pub labeler: Box<dyn LabelStrategy>,
}

impl RenderContext {
    pub fn from_config(config: &Config) -> Result<Self, regex::Error> {
        Ok(Self {
            theme: config.theme.clone(),
            label: config.label.clone(),
            legend: config.legend.clone(),
            labeler: strategy_from_config(&config.label)?,
        })
    }
}

/// One drawn leaf: the tile rectangle, its clipped label and its hover
/// binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub dom_id: String,
    pub name: String,
    pub category: String,
    pub value: f64,
    pub rect: LayoutRect,
    pub fill: String,
    pub lines: Vec<String>,
}

impl Tile {
    pub fn tooltip_content(&self) -> TooltipContent {
        TooltipContent {
            name: self.name.clone(),
            category: self.category.clone(),
            value: self.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub fill: String,
    pub x: f64,
    pub y: f64,
}

/// Disposer for one render pass. Handing it back to [`Stage::dispose`]
/// removes what that pass drew; a token from an older pass does nothing.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping the mount leaves its elements on the stage until the next render"]
pub struct Mount {
    generation: u64,
}

impl Mount {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    Enter(usize),
    Leave(usize),
}

/// Owns the drawn treemap and legend surfaces and the shared tooltip.
#[derive(Debug)]
pub struct Stage {
    context: RenderContext,
    width: f64,
    height: f64,
    tiles: Vec<Tile>,
    legend: Vec<LegendEntry>,
    tooltip: Tooltip,
    hovered: Option<usize>,
    generation: u64,
    mounted: Option<u64>,
}

impl Stage {
    pub fn new(context: RenderContext, tooltip: Tooltip) -> Self {
        Self {
            context,
            width: 0.0,
            height: 0.0,
            tiles: Vec::new(),
            legend: Vec::new(),
            tooltip,
            hovered: None,
            generation: 0,
            mounted: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, regex::Error> {
        Ok(Self::new(
            RenderContext::from_config(config)?,
            Tooltip::new(config.tooltip.clone()).with_background(&config.theme.tooltip_background),
        ))
    }

    /// Draws one tile per leaf and one legend entry per top-level category.
    /// Anything still mounted is cleared first.
    pub fn render(
        &mut self,
        hierarchy: &Hierarchy,
        layout: &TreemapLayout,
        colors: &mut ColorScale,
    ) -> Mount {
        self.clear();
        self.generation += 1;
        self.width = layout.width;
        self.height = layout.height;

        let mut used_ids = HashSet::new();
        for leaf in hierarchy.leaves() {
            let node = hierarchy.node(leaf);
            let category_id = hierarchy.category_of(leaf).unwrap_or(leaf);
            let category_name = hierarchy.node(category_id).name.as_str();
            let fill = colors.color(category_name).to_string();
            let category = node
                .category
                .clone()
                .unwrap_or_else(|| category_name.to_string());
            self.tiles.push(Tile {
                dom_id: unique_dom_id(&node.name, &mut used_ids),
                name: node.name.clone(),
                category,
                value: node.value,
                rect: layout.rect(leaf),
                fill,
                lines: self.context.labeler.lines(&node.name),
            });
        }

        let legend = &self.context.legend;
        let columns = legend.columns.max(1);
        for (index, &id) in hierarchy.top_level().iter().enumerate() {
            let name = hierarchy.node(id).name.clone();
            let fill = colors.color(&name).to_string();
            self.legend.push(LegendEntry {
                name,
                fill,
                x: (index % columns) as f64 * legend.column_width,
                y: (index / columns) as f64 * legend.row_height,
            });
        }

        self.mounted = Some(self.generation);
        debug!(
            generation = self.generation,
            tiles = self.tiles.len(),
            legend = self.legend.len(),
            "rendered treemap"
        );
        Mount {
            generation: self.generation,
        }
    }

    pub fn dispose(&mut self, mount: Mount) -> bool {
        if self.mounted != Some(mount.generation) {
            return false;
        }
        self.clear();
        true
    }

    fn clear(&mut self) {
        self.tiles.clear();
        self.legend.clear();
        self.hovered = None;
        self.tooltip.reset();
        self.mounted = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn tile_at(&self, x: f64, y: f64) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.rect.contains(x, y))
    }

    /// Routes a pointer position to the tile hover bindings: leaving a tile
    /// hides the tooltip, entering one shows it next to the pointer.
    pub fn pointer_move(&mut self, x: f64, y: f64, now: Duration) -> Vec<HoverEvent> {
        let target = self.tile_at(x, y);
        let mut events = Vec::new();
        if target == self.hovered {
            return events;
        }
        if let Some(previous) = self.hovered.take() {
            self.tooltip.hide(now);
            events.push(HoverEvent::Leave(previous));
        }
        if let Some(index) = target {
            self.tooltip
                .show(self.tiles[index].tooltip_content(), (x, y), now);
            self.hovered = Some(index);
            events.push(HoverEvent::Enter(index));
        }
        events
    }

    pub fn pointer_leave(&mut self, now: Duration) -> Option<HoverEvent> {
        let previous = self.hovered.take()?;
        self.tooltip.hide(now);
        Some(HoverEvent::Leave(previous))
    }

    pub fn hovered(&self) -> Option<&Tile> {
        self.hovered.map(|index| &self.tiles[index])
    }

    pub fn treemap_svg(&self) -> String {
        svg::treemap_svg(self.width, self.height, &self.tiles, &self.context)
    }

    pub fn legend_svg(&self) -> String {
        svg::legend_svg(&self.legend, &self.context)
    }

    pub fn tooltip_html(&self, now: Duration) -> String {
        self.tooltip.html(now)
    }
}

fn unique_dom_id(name: &str, used: &mut HashSet<String>) -> String {
    let base = name.split(' ').collect::<Vec<_>>().join("-");
    let mut candidate = base.clone();
    let mut suffix = 2;
    while used.contains(&candidate) {
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
    used.insert(candidate.clone());
    candidate
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = render_cfg.png_scale.max(0.01);
    let size = tree.size().to_int_size();
    let width = ((size.width() as f32) * scale).ceil() as u32;
    let height = ((size.height() as f32) * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
