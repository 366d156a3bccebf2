//! Builder for creating Measurement objects from various detector outputs.

use super::IntoMeasurement;
use crate::tracker::Measurement;

/// Builder for creating `Measurement` objects from various input formats.
#[derive(Debug, Clone, Default)]
pub struct MeasurementBuilder {
    cx: f64,
    cy: f64,
    r: f64,
}

impl MeasurementBuilder {
    /// Create a new measurement builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a circle by center and radius.
    pub fn circle(mut self, cx: f64, cy: f64, r: f64) -> Self {
        self.cx = cx;
        self.cy = cy;
        self.r = r;
        self
    }

    /// Set from a bounding box in TLBR format (x1, y1, x2, y2).
    ///
    /// The radius is the mean of the half width and half height.
    pub fn tlbr(self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.xywh((x1 + x2) / 2.0, (y1 + y2) / 2.0, x2 - x1, y2 - y1)
    }

    /// Set from a bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f64, cy: f64, w: f64, h: f64) -> Self {
        self.cx = cx;
        self.cy = cy;
        self.r = (w.abs() + h.abs()) / 4.0;
        self
    }

    /// Set from a bounding box in TLWH format (top_left_x, top_left_y, width, height).
    pub fn tlwh(self, x: f64, y: f64, w: f64, h: f64) -> Self {
        self.xywh(x + w / 2.0, y + h / 2.0, w, h)
    }

    /// Build the measurement.
    pub fn build(self) -> Measurement {
        Measurement::new(self.cx, self.cy, self.r)
    }
}

impl IntoMeasurement for MeasurementBuilder {
    fn into_measurement(self) -> Measurement {
        self.build()
    }
}
