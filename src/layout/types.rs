use serde::Serialize;

use crate::hierarchy::NodeId;

/// Pixel bounds of one node, relative to the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LayoutRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl LayoutRect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Zero-size rectangle at a point.
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Half-open containment, so a point on a shared edge belongs to one
    /// rectangle only.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    pub fn intersection_area(&self, other: &LayoutRect) -> f64 {
        let w = self.x1.min(other.x1) - self.x0.max(other.x0);
        let h = self.y1.min(other.y1) - self.y0.max(other.y0);
        if w <= 0.0 || h <= 0.0 { 0.0 } else { w * h }
    }

    /// Shrinks every side by `amount`; an axis that would invert collapses
    /// to its midpoint.
    pub fn inset(self, amount: f64) -> Self {
        let (x0, x1) = collapse(self.x0 + amount, self.x1 - amount);
        let (y0, y1) = collapse(self.y0 + amount, self.y1 - amount);
        Self { x0, y0, x1, y1 }
    }
}

fn collapse(lo: f64, hi: f64) -> (f64, f64) {
    if hi < lo {
        let mid = (lo + hi) / 2.0;
        (mid, mid)
    } else {
        (lo, hi)
    }
}

/// Result of one layout pass: a rectangle per hierarchy node.
#[derive(Debug, Clone, PartialEq)]
pub struct TreemapLayout {
    pub width: f64,
    pub height: f64,
    pub padding_inner: f64,
    pub(crate) rects: Vec<LayoutRect>,
}

impl TreemapLayout {
    pub fn rect(&self, id: NodeId) -> LayoutRect {
        self.rects[id]
    }

    pub fn rects(&self) -> &[LayoutRect] {
        &self.rects
    }
}
