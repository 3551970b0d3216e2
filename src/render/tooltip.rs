use crate::config::TooltipConfig;
use std::time::Duration;

use super::escape_xml;

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub name: String,
    pub category: String,
    pub value: f64,
}

impl TooltipContent {
    pub fn html(&self) -> String {
        format!(
            "Name: {}<br />Category: {}<br />Value: {}",
            escape_xml(&self.name),
            escape_xml(&self.category),
            self.value
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct OpacityTransition {
    from: f64,
    to: f64,
    start: Duration,
    duration: Duration,
}

impl OpacityTransition {
    fn settled(opacity: f64) -> Self {
        Self {
            from: opacity,
            to: opacity,
            start: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    fn sample(&self, now: Duration) -> f64 {
        if self.duration.is_zero() || now >= self.start + self.duration {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let t = (now - self.start).as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * cubic_in_out(t)
    }
}

fn cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// The single tooltip shared by every tile. Opacity is its only animated
/// property and only ever heads toward the visible or hidden target.
#[derive(Debug, Clone)]
pub struct Tooltip {
    config: TooltipConfig,
    content: Option<TooltipContent>,
    background: Option<String>,
    left: f64,
    top: f64,
    transition: OpacityTransition,
}

impl Tooltip {
    pub fn new(config: TooltipConfig) -> Self {
        let hidden = config.hidden_opacity;
        Self {
            config,
            content: None,
            background: None,
            left: 0.0,
            top: 0.0,
            transition: OpacityTransition::settled(hidden),
        }
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn show(&mut self, content: TooltipContent, pointer: (f64, f64), now: Duration) {
        self.content = Some(content);
        self.left = pointer.0 + self.config.offset_x;
        self.top = pointer.1 + self.config.offset_y;
        self.fade_to(self.config.visible_opacity, now);
    }

    /// Content stays in place while the tooltip fades out.
    pub fn hide(&mut self, now: Duration) {
        self.fade_to(self.config.hidden_opacity, now);
    }

    /// Drops the content and snaps to hidden with no transition.
    pub fn reset(&mut self) {
        self.content = None;
        self.transition = OpacityTransition::settled(self.config.hidden_opacity);
    }

    fn fade_to(&mut self, target: f64, now: Duration) {
        let current = self.transition.sample(now);
        self.transition = OpacityTransition {
            from: current,
            to: target,
            start: now,
            duration: Duration::from_millis(self.config.transition_ms),
        };
    }

    pub fn opacity_at(&self, now: Duration) -> f64 {
        self.transition.sample(now)
    }

    pub fn target_opacity(&self) -> f64 {
        self.transition.to
    }

    pub fn is_visible(&self) -> bool {
        self.transition.to == self.config.visible_opacity
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.left, self.top)
    }

    pub fn html(&self, now: Duration) -> String {
        let body = self.content.as_ref().map(TooltipContent::html).unwrap_or_default();
        let data_value = self
            .content
            .as_ref()
            .map(|c| format!(" data-value=\"{}\"", c.value))
            .unwrap_or_default();
        let background = self
            .background
            .as_deref()
            .map(|b| format!("background: {}; ", escape_xml(b)))
            .unwrap_or_default();
        format!(
            "<div id=\"tooltip\"{data_value} style=\"{background}opacity: {:.3}; left: {:.2}px; top: {:.2}px\">{body}</div>",
            self.opacity_at(now),
            self.left,
            self.top
        )
    }
}
