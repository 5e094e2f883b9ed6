// Bubble cluster layouter.
//
// Goals:
// - Deterministic: no randomness, stable largest-first ordering
// - Area-proportional: circle area tracks the weight, not the diameter
// - No overlap beyond the configured (signed) padding
// - Uniform fit: one scale factor for x, y and r, centered on the viewport
//
// Submodules:
// - radius: weight -> radius mapping
// - spatial_grid: candidate lookup for collision tests
// - packing: greedy spiral placement
// - viewport: bounding box, scale and centering
//
// Output:
// - One LayoutResult per input item, in input order, relative to the viewport center.

use serde::{Deserialize, Serialize};

mod radius;
mod spatial_grid;
mod packing;
mod viewport;

pub use radius::map_radii;
pub use packing::pack;
pub use viewport::{fit_to_viewport, compute_fit, content_bounds, ViewportFit};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl RectF {
    /// Bounding box of a circle, grown by `inflate` on every side.
    pub fn around_circle(center: PointF, radius: f64, inflate: f64) -> RectF {
        let half = radius + inflate;
        RectF { x: center.x - half, y: center.y - half, w: 2.0 * half, h: 2.0 * half }
    }

    pub fn right(&self) -> f64 { self.x + self.w }
    pub fn bottom(&self) -> f64 { self.y + self.h }

    pub fn center(&self) -> PointF {
        PointF { x: self.x + self.w / 2.0, y: self.y + self.h / 2.0 }
    }

    #[cfg(test)]
    pub fn overlaps(&self, other: &RectF) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn union(&self, other: &RectF) -> RectF {
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        RectF { x: x0, y: y0, w: x1 - x0, h: y1 - y0 }
    }
}

/// A category and its aggregated spend for the current period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    pub id: String,
    pub value: f64,
}

/// A weighted item with its mapped radius.
#[derive(Debug, Clone, PartialEq)]
pub struct SizedCircle {
    pub id: String,
    pub value: f64,
    pub radius: f64,
    /// Position of the item in the caller's input.
    pub order: usize,
}

/// A sized circle placed in the unscaled local frame (first circle at the origin).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCircle {
    pub id: String,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    pub order: usize,
}

impl PlacedCircle {
    pub fn center(&self) -> PointF {
        PointF { x: self.x, y: self.y }
    }

    pub fn bounds(&self) -> RectF {
        RectF::around_circle(self.center(), self.radius, 0.0)
    }
}

/// A circle ready for rendering: viewport pixels, relative to the viewport center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Visual mode of the bubble view. Each mode is only a parameter preset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleMode {
    /// Tight, slightly overlapping "gooey" cluster.
    #[default]
    Cluster,
    /// Loose layout with visible gaps between bubbles.
    Separated,
}

/// Spiral search tuning. Tuned for category counts up to about 15.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralConfig {
    /// Angle increment per sample, in radians.
    pub angle_step: f64,
    /// Radial growth per full revolution, in local pixels.
    pub step: f64,
    /// Sample budget per circle before falling back to the last sample.
    pub max_iterations: usize,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            angle_step: 0.1,
            step: 6.0,
            max_iterations: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Radius of the smallest weight.
    pub min_radius: f64,
    /// Radius of the largest weight.
    pub max_radius: f64,
    /// Gap between circle boundaries. Negative values allow overlap.
    pub padding: f64,
    /// Space kept free on every side of the viewport.
    pub margin: f64,
    /// Upper bound on the fit scale (1 = never enlarge).
    pub max_scale: f64,
    /// Final shrink applied to the fit scale so circles never touch the edge.
    pub safety_factor: f64,
    pub spiral: SpiralConfig,
}

impl LayoutConfig {
    pub fn cluster() -> Self {
        Self {
            min_radius: 40.0,
            max_radius: 70.0,
            padding: -8.0,
            margin: 20.0,
            max_scale: 1.0,
            safety_factor: 0.95,
            spiral: SpiralConfig::default(),
        }
    }

    pub fn separated() -> Self {
        Self {
            min_radius: 50.0,
            max_radius: 90.0,
            padding: 6.0,
            ..Self::cluster()
        }
    }

    pub fn for_mode(mode: BubbleMode) -> Self {
        match mode {
            BubbleMode::Cluster => Self::cluster(),
            BubbleMode::Separated => Self::separated(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::cluster()
    }
}

/// Run the full pipeline: radii, packing, viewport fit.
/// Returns one circle per item in input order; empty input gives empty output.
pub fn layout_bubbles(items: &[WeightedItem], viewport: SizeF, cfg: &LayoutConfig) -> Vec<LayoutResult> {
    if items.is_empty() {
        return Vec::new();
    }

    let sized = map_radii(items, cfg.min_radius, cfg.max_radius);
    let mut placed = pack(&sized, cfg.padding, &cfg.spiral);

    // Packing works largest-first; hand results back in the caller's order.
    placed.sort_by_key(|c| c.order);

    let fit = compute_fit(&placed, viewport, cfg.margin, cfg.max_scale, cfg.safety_factor);
    tracing::debug!(
        items = items.len(),
        content_w = fit.content_bounds.w,
        content_h = fit.content_bounds.h,
        scale = fit.scale,
        "bubble layout computed"
    );

    fit.apply(&placed)
}
