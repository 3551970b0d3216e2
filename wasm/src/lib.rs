use serde::{Deserialize, Serialize};
use std::time::Duration;
use treemap_rs_renderer::config::{Config, parse_config};
use treemap_rs_renderer::render::HoverEvent;
use treemap_rs_renderer::session::Session;
use treemap_rs_renderer::theme::Theme;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewerOptions {
    theme: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    padding: Option<f64>,
    config: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct TooltipState {
    visible: bool,
    opacity: f64,
    left: f64,
    top: f64,
    background: Option<String>,
    html: String,
}

#[derive(Debug, Serialize)]
struct Link {
    key: String,
    title: String,
}

fn build_config(options: ViewerOptions) -> Result<Config, String> {
    let mut config = match options.config {
        Some(value) => parse_config(&value.to_string()).map_err(|error| error.to_string())?,
        None => Config::default(),
    };
    if options.theme.as_deref() == Some("modern") {
        config.theme = Theme::modern();
    }
    if let Some(width) = options.width {
        config.treemap.width = width;
    }
    if let Some(height) = options.height {
        config.treemap.height = height;
    }
    if let Some(padding) = options.padding {
        config.treemap.padding_inner = padding;
    }
    Ok(config)
}

/// NaN and negative timestamps read as zero; oversized ones saturate.
fn millis(now_ms: f64) -> Duration {
    if now_ms.is_nan() || now_ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(now_ms / 1000.0).unwrap_or(Duration::MAX)
}

fn hover_json(events: &[HoverEvent]) -> String {
    let items: Vec<serde_json::Value> = events
        .iter()
        .map(|event| match event {
            HoverEvent::Enter(tile) => serde_json::json!({ "type": "enter", "tile": tile }),
            HoverEvent::Leave(tile) => serde_json::json!({ "type": "leave", "tile": tile }),
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}

/// Browser-facing viewer: the host swaps `treemap_svg()` / `legend_svg()`
/// into its two surfaces after every `select` and forwards pointer events.
#[wasm_bindgen]
pub struct TreemapViewer {
    session: Session,
}

#[wasm_bindgen]
impl TreemapViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: Option<String>) -> Result<TreemapViewer, JsValue> {
        let options = match options_json {
            Some(raw) => serde_json::from_str::<ViewerOptions>(&raw)
                .map_err(|error| JsValue::from_str(&error.to_string()))?,
            None => ViewerOptions::default(),
        };
        let config = build_config(options).map_err(|error| JsValue::from_str(&error))?;
        let session =
            Session::with_bundled(config).map_err(|error| JsValue::from_str(&error.to_string()))?;
        Ok(Self { session })
    }

    pub fn select(&mut self, key: &str) -> Result<(), JsValue> {
        self.session
            .select(key)
            .map_err(|error| JsValue::from_str(&error.to_string()))
    }

    pub fn active_key(&self) -> Option<String> {
        self.session.active_key().map(str::to_string)
    }

    pub fn title(&self) -> String {
        self.session.header().map(|h| h.title).unwrap_or_default()
    }

    pub fn description(&self) -> String {
        self.session.header().map(|h| h.description).unwrap_or_default()
    }

    pub fn links_json(&self) -> String {
        let links: Vec<Link> = self
            .session
            .links()
            .into_iter()
            .map(|(key, title)| Link { key, title })
            .collect();
        serde_json::to_string(&links).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn treemap_svg(&self) -> String {
        self.session.treemap_svg()
    }

    pub fn legend_svg(&self) -> String {
        self.session.legend_svg()
    }

    /// Returns the fired hover events as JSON.
    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) -> String {
        let events = self.session.pointer_move(x, y, millis(now_ms));
        hover_json(&events)
    }

    pub fn pointer_leave(&mut self, now_ms: f64) -> String {
        let events: Vec<HoverEvent> = self.session.pointer_leave(millis(now_ms)).into_iter().collect();
        hover_json(&events)
    }

    pub fn tooltip_json(&self, now_ms: f64) -> String {
        let now = millis(now_ms);
        let tooltip = self.session.stage().tooltip();
        let (left, top) = tooltip.position();
        let state = TooltipState {
            visible: tooltip.is_visible(),
            opacity: tooltip.opacity_at(now),
            left,
            top,
            background: tooltip.background().map(str::to_string),
            html: tooltip.content().map(|c| c.html()).unwrap_or_default(),
        };
        serde_json::to_string(&state).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::{ViewerOptions, build_config, hover_json, millis};
    use std::time::Duration;
    use treemap_rs_renderer::render::HoverEvent;
    use treemap_rs_renderer::session::Session;

    #[test]
    fn options_override_canvas() {
        let options: ViewerOptions =
            serde_json::from_str(r#"{ "width": 400, "padding": 2, "config": { "legend": { "columns": 4 } } }"#)
                .unwrap();
        let config = build_config(options).unwrap();
        assert_eq!(config.treemap.width, 400.0);
        assert_eq!(config.treemap.height, 570.0);
        assert_eq!(config.treemap.padding_inner, 2.0);
        assert_eq!(config.legend.columns, 4);
    }

    #[test]
    fn renders_bundled_dataset() {
        let config = build_config(ViewerOptions::default()).unwrap();
        let mut session = Session::with_bundled(config).unwrap();
        session.select("movies").expect("movies should render");
        let svg = session.treemap_svg();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Avatar"));
    }

    #[test]
    fn bad_timestamps_do_not_panic() {
        assert_eq!(millis(1500.0), Duration::from_millis(1500));
        assert_eq!(millis(-3.0), Duration::ZERO);
        assert_eq!(millis(f64::NAN), Duration::ZERO);
        assert_eq!(millis(f64::INFINITY), Duration::MAX);
        assert_eq!(millis(f64::MAX), Duration::MAX);
    }

    #[test]
    fn hover_events_serialize() {
        let json = hover_json(&[HoverEvent::Leave(1), HoverEvent::Enter(2)]);
        assert_eq!(
            json,
            r#"[{"tile":1,"type":"leave"},{"tile":2,"type":"enter"}]"#
        );
    }
}
