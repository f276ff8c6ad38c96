use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::interaction::PointerEvent;
use crate::render::{RenderFrame, Renderer};

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Identity of one chart instance created on a surface.
///
/// Handles are never reused on the same surface, so an event stamped with an
/// old handle can always be told apart from one aimed at the live chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartHandleId(u64);

impl ChartHandleId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChartHandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart#{}", self.0)
    }
}

/// One region a chart can be drawn on.
///
/// The surface admits at most one live chart handle. It also remembers which
/// handle its click handler is bound to and the frame it currently shows.
#[derive(Debug)]
pub struct DrawingSurface<R: Renderer> {
    id: SurfaceId,
    viewport: Viewport,
    renderer: R,
    next_handle: u64,
    live_handle: Option<ChartHandleId>,
    click_handler: Option<ChartHandleId>,
    presented: Option<RenderFrame>,
}

impl<R: Renderer> DrawingSurface<R> {
    pub fn new(renderer: R, viewport: Viewport) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        Ok(Self {
            id: SurfaceId(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed)),
            viewport,
            renderer,
            next_handle: 1,
            live_handle: None,
            click_handler: None,
            presented: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn live_handle(&self) -> Option<ChartHandleId> {
        self.live_handle
    }

    #[must_use]
    pub fn live_handle_count(&self) -> usize {
        usize::from(self.live_handle.is_some())
    }

    #[must_use]
    pub fn click_handler(&self) -> Option<ChartHandleId> {
        self.click_handler
    }

    /// Frame currently visible on the surface, if any.
    #[must_use]
    pub fn presented_frame(&self) -> Option<&RenderFrame> {
        self.presented.as_ref()
    }

    /// Delivers a pointer click through the bound click handler.
    ///
    /// Returns `None` when no handler is bound (no chart was ever rendered, or
    /// the last one was destroyed).
    #[must_use]
    pub fn click(&self, x: f64, y: f64) -> Option<PointerEvent> {
        let handle = self.click_handler?;
        Some(PointerEvent::new(x, y).for_handle(handle))
    }

    pub(crate) fn attach(&mut self) -> ChartResult<ChartHandleId> {
        if self.live_handle.is_some() {
            return Err(ChartError::SurfaceBusy { surface: self.id });
        }
        let handle = ChartHandleId(self.next_handle);
        self.next_handle += 1;
        self.live_handle = Some(handle);
        trace!(surface = %self.id, handle = %handle, "chart handle attached");
        Ok(handle)
    }

    pub(crate) fn present(&mut self, handle: ChartHandleId, frame: RenderFrame) -> ChartResult<()> {
        if self.live_handle != Some(handle) {
            return Err(ChartError::InvalidData(format!(
                "{handle} is not live on {}",
                self.id
            )));
        }
        self.renderer.render(&frame)?;
        self.presented = Some(frame);
        Ok(())
    }

    pub(crate) fn bind_click_handler(&mut self, handle: ChartHandleId) {
        self.click_handler = Some(handle);
    }

    /// Releases `handle` if it is the live one. Returns whether anything was released.
    pub(crate) fn release(&mut self, handle: ChartHandleId) -> bool {
        if self.live_handle != Some(handle) {
            return false;
        }
        self.live_handle = None;
        if self.click_handler == Some(handle) {
            self.click_handler = None;
        }
        self.presented = None;
        if let Err(err) = self.renderer.clear() {
            tracing::warn!(surface = %self.id, error = %err, "failed to clear surface");
        }
        trace!(surface = %self.id, handle = %handle, "chart handle released");
        true
    }
}
