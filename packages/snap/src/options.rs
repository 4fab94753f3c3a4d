/// Tunables for alignment guide detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOptions {
    /// How close two edges/centers must be, in screen pixels
    pub tolerance_px: f64,

    /// Viewport zoom used to convert the pixel tolerance into document units
    pub zoom: f64,
}

pub const DEFAULT_TOLERANCE_PX: f64 = 5.0;

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            tolerance_px: DEFAULT_TOLERANCE_PX,
            zoom: 1.0,
        }
    }
}

impl SnapOptions {
    pub fn with_tolerance(tolerance_px: f64) -> Self {
        Self {
            tolerance_px,
            ..Default::default()
        }
    }

    pub fn zoomed(self, zoom: f64) -> Self {
        Self { zoom, ..self }
    }

    /// Tolerance in document units. Zoomed in, the same pixel distance covers less of the document.
    pub fn document_tolerance(&self) -> f64 {
        let zoom = if self.zoom.is_finite() && self.zoom > 0.0 {
            self.zoom
        } else {
            1.0
        };

        if self.tolerance_px.is_finite() && self.tolerance_px > 0.0 {
            self.tolerance_px / zoom
        } else {
            0.0
        }
    }
}
