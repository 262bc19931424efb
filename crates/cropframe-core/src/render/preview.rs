//! Interactive preview with once-per-frame redraw coalescing.

use super::raster::{render, InterpolationFilter};
use super::Surface;
use crate::decode::ImageSource;
use crate::mask::{ClipMask, ClipShape};
use crate::transform::TransformState;

/// Identifies one scheduled redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket(u64);

/// Collapses redraw requests so at most one draw happens per animation frame.
///
/// Scheduling a new frame cancels the previously scheduled one if it has not
/// run yet.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<FrameTicket>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a redraw, replacing any pending one.
    pub fn schedule(&mut self) -> FrameTicket {
        if let Some(previous) = self.pending.take() {
            log::trace!("coalesced frame {:?}", previous);
        }
        self.next_id += 1;
        let ticket = FrameTicket(self.next_id);
        self.pending = Some(ticket);
        ticket
    }

    /// Drop the pending frame without running it.
    pub fn cancel(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }

    /// Called from the host's animation-frame callback; hands out the pending
    /// ticket, if any.
    pub fn take_due(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Draws the live preview into a caller-supplied surface.
#[derive(Debug)]
pub struct PreviewRenderer {
    surface: Surface,
    clip: ClipMask,
    filter: InterpolationFilter,
    scheduler: FrameScheduler,
}

impl PreviewRenderer {
    /// The surface's size is the preview viewport size.
    pub fn new(surface: Surface, shape: ClipShape, filter: InterpolationFilter) -> Self {
        let clip = ClipMask::resolve(shape, surface.size());
        Self {
            surface,
            clip,
            filter,
            scheduler: FrameScheduler::new(),
        }
    }

    /// Request a redraw on the next animation frame.
    pub fn invalidate(&mut self) -> FrameTicket {
        self.scheduler.schedule()
    }

    /// Run the pending redraw, if there is one. Returns true if it drew.
    pub fn on_animation_frame(&mut self, source: &ImageSource, state: &TransformState) -> bool {
        if self.scheduler.take_due().is_none() {
            return false;
        }
        self.draw(source, state);
        true
    }

    /// Draw immediately, bypassing the scheduler.
    pub fn draw(&mut self, source: &ImageSource, state: &TransformState) {
        render(&mut self.surface, source, state, &self.clip, self.filter);
    }

    /// Drop any pending redraw (used on teardown).
    pub fn cancel_pending(&mut self) {
        self.scheduler.cancel();
    }

    pub fn has_pending_frame(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}
