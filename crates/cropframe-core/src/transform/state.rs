//! Zoom / rotation / pan state of one editor session.

use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

/// Quarter-turn rotation. Only multiples of 90° are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// The next quarter turn clockwise.
    pub fn next(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Exact `(cos, sin)` of the angle, free of `to_radians` rounding.
    pub fn cos_sin(self) -> (f64, f64) {
        match self {
            Rotation::Deg0 => (1.0, 0.0),
            Rotation::Deg90 => (0.0, 1.0),
            Rotation::Deg180 => (-1.0, 0.0),
            Rotation::Deg270 => (0.0, -1.0),
        }
    }
}

/// Inclusive zoom bounds. Always `0 < min <= max`, both finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomRange {
    min: f64,
    max: f64,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self { min: 0.5, max: 3.0 }
    }
}

impl ZoomRange {
    /// Returns `None` unless `0 < min <= max` and both are finite.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        let valid = min.is_finite() && max.is_finite() && min > 0.0 && min <= max;
        valid.then_some(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Pan, zoom and rotation applied to the source image.
///
/// `pan` is recorded in preview-surface pixels. The zoom factor can never
/// leave `range`; non-finite requests are ignored. Only [`TransformState::new`]
/// builds one, so there is no `Deserialize`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformState {
    zoom: f64,
    rotation: Rotation,
    pan: Vec2,
    range: ZoomRange,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(ZoomRange::default())
    }
}

impl TransformState {
    /// Defaults: zoom 1 (clamped into `range`), no rotation, no pan.
    pub fn new(range: ZoomRange) -> Self {
        Self {
            zoom: range.clamp(1.0),
            rotation: Rotation::Deg0,
            pan: Vec2::ZERO,
            range,
        }
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn zoom_range(&self) -> ZoomRange {
        self.range
    }

    /// Set the zoom factor, clamped into the zoom range.
    ///
    /// Returns `false` (leaving the state untouched) for NaN or infinities.
    pub fn set_zoom(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            log::warn!("ignoring non-finite zoom request: {value}");
            return false;
        }
        self.zoom = self.range.clamp(value);
        true
    }

    /// Advance the rotation by +90° (mod 360).
    pub fn rotate90(&mut self) {
        self.rotation = self.rotation.next();
    }

    /// Non-finite components are rejected.
    pub fn set_pan(&mut self, pan: Vec2) -> bool {
        if !pan.is_finite() {
            log::warn!("ignoring non-finite pan offset: {pan:?}");
            return false;
        }
        self.pan = pan;
        true
    }

    /// Back to zoom 1, no rotation, no pan. The zoom range is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.range);
    }

    pub fn is_default(&self) -> bool {
        *self == Self::new(self.range)
    }

    /// Copy of this state with the pan rescaled from one viewport to another.
    ///
    /// Pan is stored in preview pixels; rendering at a different resolution
    /// has to move the image by the proportionally larger (or smaller)
    /// distance. Each axis scales independently.
    pub fn rescaled(&self, from: Size, to: Size) -> Self {
        let scale = Vec2::new(to.width / from.width, to.height / from.height);
        Self {
            pan: Vec2::new(self.pan.x * scale.x, self.pan.y * scale.y),
            ..*self
        }
    }
}
