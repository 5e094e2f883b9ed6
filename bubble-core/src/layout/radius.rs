// Weight -> radius mapping.
//
// Square-root scale so that circle AREA is proportional to the weight.
// The heaviest item always gets max_radius; an all-zero set collapses to min_radius.

use super::{SizedCircle, WeightedItem};

/// Map weights into `[min_radius, max_radius]`.
///
/// Negative or non-finite weights count as zero.
pub fn map_radii(items: &[WeightedItem], min_radius: f64, max_radius: f64) -> Vec<SizedCircle> {
    let max_val = items
        .iter()
        .map(|item| sanitize(item.value))
        .fold(0.0_f64, f64::max);

    items
        .iter()
        .enumerate()
        .map(|(order, item)| {
            let radius = if max_val > 0.0 {
                let ratio = (sanitize(item.value) / max_val).sqrt();
                min_radius + (max_radius - min_radius) * ratio
            } else {
                min_radius
            };
            SizedCircle {
                id: item.id.clone(),
                value: item.value,
                radius,
                order,
            }
        })
        .collect()
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
