//! Interactive transform: state, input handling and the shared matrix.
//!
//! # Coordinate System
//!
//! - Surface coordinates are pixels with the origin at the top-left, y down
//! - Rotation is clockwise in quarter turns
//! - Pan is recorded in preview-surface pixels

pub mod input;
pub mod matrix;
pub mod state;

pub use input::{
    InputController, InputEvent, InputSteps, KeyCommand, PointerCapture, PointerPhase,
    PointerSource,
};
pub use matrix::{compute_transform, image_point_at};
pub use state::{Rotation, TransformState, ZoomRange};
