//! Editor configuration.
//!
//! Every field has a default, so hosts only pass what they want to change.
//! Values arrive from JavaScript as plain objects, so the config is
//! normalized with [`EditorConfig::validated`] instead of trusting it.

use serde::{Deserialize, Serialize};

use crate::encode::OutputFormat;
use crate::render::InterpolationFilter;
use crate::transform::{InputSteps, ZoomRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Lower zoom bound (default 0.5)
    pub min_zoom: f64,
    /// Upper zoom bound (default 3.0)
    pub max_zoom: f64,
    /// Zoom change per wheel notch or +/- key press
    pub zoom_step: f64,
    /// Preview pixels per arrow-key press
    pub nudge_step: f64,
    pub preview_filter: InterpolationFilter,
    pub export_filter: InterpolationFilter,
    pub output: OutputFormat,
    /// RGB that replaces transparency when the output format has no alpha
    pub background: [u8; 3],
}

impl Default for EditorConfig {
    fn default() -> Self {
        let zoom = ZoomRange::default();
        let steps = InputSteps::default();
        Self {
            min_zoom: zoom.min(),
            max_zoom: zoom.max(),
            zoom_step: steps.zoom,
            nudge_step: steps.nudge,
            preview_filter: InterpolationFilter::Bilinear,
            export_filter: InterpolationFilter::Bilinear,
            output: OutputFormat::default(),
            background: [255, 255, 255],
        }
    }
}

impl EditorConfig {
    /// Replace unusable values with their defaults and clamp JPEG quality.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if ZoomRange::new(self.min_zoom, self.max_zoom).is_none() {
            log::warn!(
                "invalid zoom range {}..{}, using {}..{}",
                self.min_zoom,
                self.max_zoom,
                defaults.min_zoom,
                defaults.max_zoom
            );
            self.min_zoom = defaults.min_zoom;
            self.max_zoom = defaults.max_zoom;
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            log::warn!("invalid zoom step {}, using {}", self.zoom_step, defaults.zoom_step);
            self.zoom_step = defaults.zoom_step;
        }
        if !(self.nudge_step.is_finite() && self.nudge_step > 0.0) {
            log::warn!("invalid nudge step {}, using {}", self.nudge_step, defaults.nudge_step);
            self.nudge_step = defaults.nudge_step;
        }
        if let OutputFormat::Jpeg { quality } = &mut self.output {
            *quality = (*quality).clamp(1, 100);
        }
        self
    }

    pub fn zoom_range(&self) -> ZoomRange {
        ZoomRange::new(self.min_zoom, self.max_zoom).unwrap_or_default()
    }

    pub fn input_steps(&self) -> InputSteps {
        InputSteps {
            zoom: self.zoom_step,
            nudge: self.nudge_step,
        }
    }
}
