use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Golden ratio, the default squarify target aspect ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tiling {
    #[default]
    Squarify,
    Binary,
    Slice,
    Dice,
    SliceDice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreemapConfig {
    pub width: f64,
    pub height: f64,
    pub padding_inner: f64,
    pub ratio: f64,
    pub tiling: Tiling,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 570.0,
            padding_inner: 1.0,
            ratio: PHI,
            tiling: Tiling::Squarify,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendConfig {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub columns: usize,
    pub swatch_size: f64,
    pub column_width: f64,
    pub row_height: f64,
    pub label_offset_x: f64,
    pub label_offset_y: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 200.0,
            offset_x: 391.0,
            offset_y: 25.0,
            columns: 3,
            swatch_size: 18.0,
            column_width: 75.0,
            row_height: 27.0,
            label_offset_x: 27.0,
            label_offset_y: 16.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TooltipConfig {
    pub visible_opacity: f64,
    pub hidden_opacity: f64,
    pub transition_ms: u64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            visible_opacity: 0.9,
            hidden_opacity: 0.0,
            transition_ms: 250,
            offset_x: 12.5,
            offset_y: -20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelStrategyKind {
    #[default]
    CapitalBoundary,
    Whitespace,
    Whole,
    Pattern,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    pub strategy: LabelStrategyKind,
    /// Split pattern for [`LabelStrategyKind::Pattern`].
    pub pattern: Option<String>,
    /// Names that are never split.
    pub unsplittable: Vec<String>,
    pub x: f64,
    pub y: f64,
    pub line_height: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            strategy: LabelStrategyKind::CapitalBoundary,
            pattern: None,
            unsplittable: vec!["LEGO Star Wars: The Complete Saga".to_string()],
            x: 4.0,
            y: 13.0,
            line_height: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub png_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            png_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub treemap: TreemapConfig,
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
    pub label: LabelConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            treemap: TreemapConfig::default(),
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
            label: LabelConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariablesFile {
    font_family: Option<String>,
    font_size: Option<f32>,
    legend_font_size: Option<f32>,
    text_color: Option<String>,
    legend_text_color: Option<String>,
    background: Option<String>,
    tooltip_background: Option<String>,
    palette: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TreemapConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    padding_inner: Option<f64>,
    ratio: Option<f64>,
    tiling: Option<Tiling>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LegendConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    offset_x: Option<f64>,
    offset_y: Option<f64>,
    columns: Option<usize>,
    swatch_size: Option<f64>,
    column_width: Option<f64>,
    row_height: Option<f64>,
    label_offset_x: Option<f64>,
    label_offset_y: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TooltipConfigFile {
    visible_opacity: Option<f64>,
    hidden_opacity: Option<f64>,
    transition_ms: Option<u64>,
    offset_x: Option<f64>,
    offset_y: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LabelConfigFile {
    strategy: Option<LabelStrategyKind>,
    pattern: Option<String>,
    unsplittable: Option<Vec<String>>,
    x: Option<f64>,
    y: Option<f64>,
    line_height: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariablesFile>,
    treemap: Option<TreemapConfigFile>,
    legend: Option<LegendConfigFile>,
    tooltip: Option<TooltipConfigFile>,
    label: Option<LabelConfigFile>,
    png_scale: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a JSON config document and merges it over the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    Ok(apply_config_file(Config::default(), parsed))
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> Config {
    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.legend_font_size {
            config.theme.legend_font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.legend_text_color {
            config.theme.legend_text_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.tooltip_background {
            config.theme.tooltip_background = v;
        }
        if let Some(v) = vars.palette {
            if !v.is_empty() {
                config.theme.palette = v;
            }
        }
    }

    if let Some(treemap) = parsed.treemap {
        if let Some(v) = treemap.width {
            config.treemap.width = v;
        }
        if let Some(v) = treemap.height {
            config.treemap.height = v;
        }
        if let Some(v) = treemap.padding_inner {
            config.treemap.padding_inner = v;
        }
        if let Some(v) = treemap.ratio {
            config.treemap.ratio = v;
        }
        if let Some(v) = treemap.tiling {
            config.treemap.tiling = v;
        }
    }

    if let Some(legend) = parsed.legend {
        if let Some(v) = legend.width {
            config.legend.width = v;
        }
        if let Some(v) = legend.height {
            config.legend.height = v;
        }
        if let Some(v) = legend.offset_x {
            config.legend.offset_x = v;
        }
        if let Some(v) = legend.offset_y {
            config.legend.offset_y = v;
        }
        if let Some(v) = legend.columns {
            config.legend.columns = v.max(1);
        }
        if let Some(v) = legend.swatch_size {
            config.legend.swatch_size = v;
        }
        if let Some(v) = legend.column_width {
            config.legend.column_width = v;
        }
        if let Some(v) = legend.row_height {
            config.legend.row_height = v;
        }
        if let Some(v) = legend.label_offset_x {
            config.legend.label_offset_x = v;
        }
        if let Some(v) = legend.label_offset_y {
            config.legend.label_offset_y = v;
        }
    }

    if let Some(tooltip) = parsed.tooltip {
        if let Some(v) = tooltip.visible_opacity {
            config.tooltip.visible_opacity = v;
        }
        if let Some(v) = tooltip.hidden_opacity {
            config.tooltip.hidden_opacity = v;
        }
        if let Some(v) = tooltip.transition_ms {
            config.tooltip.transition_ms = v;
        }
        if let Some(v) = tooltip.offset_x {
            config.tooltip.offset_x = v;
        }
        if let Some(v) = tooltip.offset_y {
            config.tooltip.offset_y = v;
        }
    }

    if let Some(label) = parsed.label {
        if let Some(v) = label.strategy {
            config.label.strategy = v;
        }
        if label.pattern.is_some() {
            config.label.pattern = label.pattern;
        }
        if let Some(v) = label.unsplittable {
            config.label.unsplittable = v;
        }
        if let Some(v) = label.x {
            config.label.x = v;
        }
        if let Some(v) = label.y {
            config.label.y = v;
        }
        if let Some(v) = label.line_height {
            config.label.line_height = v;
        }
    }

    if let Some(v) = parsed.png_scale {
        config.render.png_scale = v;
    }

    config
}
