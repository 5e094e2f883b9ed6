// Greedy spiral circle packing.
//
// Circles are placed largest-first. The first one sits at the origin; every later
// circle walks an outward Archimedean spiral from the origin and takes the first
// sample that keeps `padding` (signed) clear of everything already placed.
//
// Properties:
// - Deterministic (stable sort, fixed spiral)
// - Larger circles end up near the center, smaller ones fill the rim
// - Bounded: the search stops after `max_iterations` samples and accepts the last one

use std::f64::consts::TAU;

use super::spatial_grid::SpatialGrid;
use super::{PlacedCircle, PointF, RectF, SizedCircle, SpiralConfig};

/// Above this many circles collision candidates come from a spatial grid;
/// below it a plain scan over the placed circles is cheaper.
const GRID_MIN_ITEMS: usize = 32;

/// Place circles without overlap beyond `padding`.
///
/// Returned circles are in placement order (largest radius first, ties in input order).
pub fn pack(circles: &[SizedCircle], padding: f64, spiral: &SpiralConfig) -> Vec<PlacedCircle> {
    pack_with(circles, padding, spiral, circles.len() > GRID_MIN_ITEMS)
}

fn pack_with(circles: &[SizedCircle], padding: f64, spiral: &SpiralConfig, use_grid: bool) -> Vec<PlacedCircle> {
    let mut order: Vec<&SizedCircle> = circles.iter().collect();
    order.sort_by(|a, b| b.radius.total_cmp(&a.radius));

    let Some(largest) = order.first() else {
        return Vec::new();
    };

    let grid = use_grid.then(|| SpatialGrid::new(2.0 * largest.radius + padding.max(0.0)));
    let mut placed = Placed { circles: Vec::with_capacity(order.len()), grid };

    for circle in order {
        let center = if placed.circles.is_empty() {
            PointF { x: 0.0, y: 0.0 }
        } else {
            find_free_spot(circle, padding, spiral, &placed).unwrap_or_else(|last| {
                tracing::warn!(
                    id = %circle.id,
                    radius = circle.radius,
                    max_iterations = spiral.max_iterations,
                    "spiral search exhausted, accepting overlapping position"
                );
                last
            })
        };

        placed.push(PlacedCircle {
            id: circle.id.clone(),
            radius: circle.radius,
            x: center.x,
            y: center.y,
            order: circle.order,
        });
    }

    placed.circles
}

/// Circles placed so far, with an optional grid over their bounding boxes.
struct Placed {
    circles: Vec<PlacedCircle>,
    grid: Option<SpatialGrid>,
}

impl Placed {
    fn push(&mut self, p: PlacedCircle) {
        if let Some(grid) = &mut self.grid {
            grid.insert(self.circles.len(), p.bounds());
        }
        self.circles.push(p);
    }

    /// True when a circle at `center` would come closer than `padding` to any placed circle.
    fn collides(&self, center: PointF, radius: f64, padding: f64) -> bool {
        let hit = |other: &PlacedCircle| {
            let d = (center.x - other.x).hypot(center.y - other.y);
            d < radius + other.radius + padding
        };

        match &self.grid {
            Some(grid) => {
                // Positive padding widens the reach; negative padding only shrinks it.
                let query = RectF::around_circle(center, radius, padding.max(0.0));
                grid.any_candidate(&query, |i| hit(&self.circles[i]))
            }
            None => self.circles.iter().any(hit),
        }
    }
}

/// Walk the spiral until a sample is collision-free.
/// `Err` carries the last sample when the budget runs out.
fn find_free_spot(
    circle: &SizedCircle,
    padding: f64,
    spiral: &SpiralConfig,
    placed: &Placed,
) -> Result<PointF, PointF> {
    let radial_step = spiral.step * spiral.angle_step / TAU;

    let mut angle = 0.0_f64;
    let mut distance = 0.0_f64;
    let mut candidate = PointF { x: 0.0, y: 0.0 };

    for _ in 0..spiral.max_iterations {
        candidate = PointF {
            x: angle.cos() * distance,
            y: angle.sin() * distance,
        };
        if !placed.collides(candidate, circle.radius, padding) {
            return Ok(candidate);
        }
        angle += spiral.angle_step;
        distance += radial_step;
    }

    Err(candidate)
}
