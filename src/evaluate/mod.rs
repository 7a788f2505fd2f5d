//! The classification engine.
//!
//! Pure functions from metric bundles and thresholds to error codes. Two
//! independent tiers run over every page: the default tier covers size,
//! image, vector, text, and raster-cost rules against [`crate::BaseConfig`];
//! the advanced tier covers render/memory risk against the fixed
//! [`crate::AdvancedConfig`]. All rules within a tier run unconditionally —
//! no rule suppresses another — and a page is safe at a tier iff that
//! tier's error list is empty.

mod advanced_tier;
mod default_tier;

pub use advanced_tier::{evaluate_advanced, IMG_COMPOSITE_CODE, RENDER_MAX_DIM_CODE, RSS_WIDTH_CODE};
pub use default_tier::evaluate_default;
