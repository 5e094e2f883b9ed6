//! Bubble cluster layout for category spending.
//!
//! Turns `(category, amount)` pairs into packed, non-overlapping circles fitted to a
//! viewport. The host page renders the returned geometry; this crate only does the math.

mod error;
pub mod layout;
mod output;
mod request;
mod wasm;

pub use error::{LayoutError, Result};
pub use layout::{
    BubbleMode, LayoutConfig, LayoutResult, PlacedCircle, SizedCircle, SizeF, SpiralConfig, WeightedItem,
    fit_to_viewport, layout_bubbles, map_radii, pack,
};
pub use output::{BubbleOutput, ErrorInfo};
pub use request::{ConfigOverrides, LayoutRequest, run_request, validate_config};
