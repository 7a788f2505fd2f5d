//! Page geometry metrics.

use serde::{Deserialize, Serialize};

/// Physical page geometry, in PDF points (1 pt = 1/72 inch).
///
/// Always populated: extraction falls back to defaults field by field, so
/// there is no degraded variant of this bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalMetrics {
    /// Visible page width in points, after rotation.
    pub width_pt: f64,

    /// Visible page height in points, after rotation.
    pub height_pt: f64,

    /// Visible page width in inches (`width_pt / 72`).
    pub width_in: f64,

    /// Visible page height in inches (`height_pt / 72`).
    pub height_in: f64,

    /// Raw MediaBox width in points, unrotated.
    pub mediabox_width: f64,

    /// Raw MediaBox height in points, unrotated.
    pub mediabox_height: f64,

    /// Page rotation in degrees. Nominally one of 0/90/180/270 but passed
    /// through as found.
    pub rotation: i32,

    /// UserUnit scale factor (1.0 when the page does not set one).
    pub user_unit: f64,
}

impl PhysicalMetrics {
    /// Build from point dimensions; the inch fields are derived.
    pub fn from_points(width_pt: f64, height_pt: f64) -> Self {
        Self {
            width_pt,
            height_pt,
            width_in: width_pt / 72.0,
            height_in: height_pt / 72.0,
            mediabox_width: width_pt,
            mediabox_height: height_pt,
            rotation: 0,
            user_unit: 1.0,
        }
    }

    /// The larger of the two visible dimensions, in points.
    pub fn max_dim_pt(&self) -> f64 {
        self.width_pt.max(self.height_pt)
    }
}

impl Default for PhysicalMetrics {
    fn default() -> Self {
        Self {
            width_pt: 0.0,
            height_pt: 0.0,
            width_in: 0.0,
            height_in: 0.0,
            mediabox_width: 0.0,
            mediabox_height: 0.0,
            rotation: 0,
            user_unit: 1.0,
        }
    }
}
