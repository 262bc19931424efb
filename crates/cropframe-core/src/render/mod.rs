//! Rasterization: live preview and full-resolution export.
//!
//! Both paths go through [`raster::render`] with the transform from
//! [`crate::transform::compute_transform`], so they cannot disagree about
//! what is inside the crop.

pub mod export;
pub mod preview;
pub mod raster;
mod surface;

pub use export::{ExportCompletion, ExportJob, ExportRenderer};
pub use preview::{FrameScheduler, FrameTicket, PreviewRenderer};
pub use raster::{render, sample, InterpolationFilter};
pub use surface::{ContextError, Surface, MAX_SURFACE_EDGE};
