//! Viewport fitting.
//!
//! Scales a packed cluster uniformly so it fits inside the viewport minus a margin,
//! and recenters it on the viewport center. x, y and r always share one scale factor.

use super::{LayoutResult, PlacedCircle, PointF, RectF, SizeF};

/// Transform from the local packing frame to viewport-centered pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportFit {
    /// Bounding box of all circles in the local frame.
    pub content_bounds: RectF,
    /// Uniform scale factor, never negative.
    pub scale: f64,
}

impl ViewportFit {
    pub fn center(&self) -> PointF {
        self.content_bounds.center()
    }

    pub fn apply(&self, placed: &[PlacedCircle]) -> Vec<LayoutResult> {
        let c = self.center();
        placed
            .iter()
            .map(|p| LayoutResult {
                id: p.id.clone(),
                x: (p.x - c.x) * self.scale,
                y: (p.y - c.y) * self.scale,
                r: p.radius * self.scale,
            })
            .collect()
    }
}

/// Bounding box over all circle extents. `None` for an empty slice.
pub fn content_bounds(placed: &[PlacedCircle]) -> Option<RectF> {
    placed
        .iter()
        .map(PlacedCircle::bounds)
        .reduce(|acc, b| acc.union(&b))
}

/// Compute the fit transform without applying it.
pub fn compute_fit(
    placed: &[PlacedCircle],
    viewport: SizeF,
    margin: f64,
    max_scale: f64,
    safety_factor: f64,
) -> ViewportFit {
    let Some(bounds) = content_bounds(placed) else {
        return ViewportFit {
            content_bounds: RectF { x: 0.0, y: 0.0, w: 0.0, h: 0.0 },
            scale: 1.0,
        };
    };

    let container_w = viewport.width - 2.0 * margin;
    let container_h = viewport.height - 2.0 * margin;

    // A zero-size box would divide by zero; treat that axis as already fitting.
    let scale_x = if bounds.w > 0.0 { container_w / bounds.w } else { 1.0 };
    let scale_y = if bounds.h > 0.0 { container_h / bounds.h } else { 1.0 };

    let scale = (scale_x.min(scale_y).min(max_scale) * safety_factor).max(0.0);

    ViewportFit { content_bounds: bounds, scale }
}

/// Fit packed circles into a `viewport`, keeping `margin` free on every side.
pub fn fit_to_viewport(
    placed: &[PlacedCircle],
    viewport: SizeF,
    margin: f64,
    max_scale: f64,
    safety_factor: f64,
) -> Vec<LayoutResult> {
    compute_fit(placed, viewport, margin, max_scale, safety_factor).apply(placed)
}
