use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{ChartSnapshot, Product, ProductId};
use crate::error::ChartResult;
use crate::interaction::{PointerEvent, SelectionChoice, SelectionEffect, SelectionState};
use crate::render::Renderer;

use super::{
    ChartHandleId, ChartLifecycleManager, DrawingSurface, HitTestResolver, ScatterChartConfig,
};

/// What happened to the chart after the collection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderOutcome {
    Rendered { handle: ChartHandleId, marks: usize },
    /// The collection was empty; the previous chart, if any, stays on screen.
    Skipped,
}

/// Result of a click on the chart surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// A mark was struck and the confirmation prompt opened for it.
    Selected(ProductId),
    /// No mark under the pointer, or no chart to click.
    Miss,
    /// The confirmation prompt is open and swallowed the click.
    PromptOpen,
}

/// The product scatter-plot component.
///
/// Holds the drawing surface, the chart lifecycle, the current product
/// collection with its snapshot, and the selection state machine.
#[derive(Debug)]
pub struct ScatterView<R: Renderer> {
    surface: DrawingSurface<R>,
    lifecycle: ChartLifecycleManager,
    resolver: HitTestResolver,
    selection: SelectionState,
    products: Vec<Product>,
    snapshot: ChartSnapshot,
}

impl<R: Renderer> ScatterView<R> {
    pub fn new(renderer: R, config: ScatterChartConfig) -> ChartResult<Self> {
        let surface = DrawingSurface::new(renderer, config.viewport)?;
        let lifecycle = ChartLifecycleManager::new(config)?;
        Ok(Self {
            surface,
            lifecycle,
            resolver: HitTestResolver::new(),
            selection: SelectionState::Idle,
            products: Vec::new(),
            snapshot: ChartSnapshot::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &DrawingSurface<R> {
        &self.surface
    }

    #[must_use]
    pub fn lifecycle(&self) -> &ChartLifecycleManager {
        &self.lifecycle
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn snapshot(&self) -> &ChartSnapshot {
        &self.snapshot
    }

    /// Pixel center of the mark currently drawn for `id`.
    #[must_use]
    pub fn mark_center(&self, id: &ProductId) -> Option<(f64, f64)> {
        let index = self.snapshot.position_of(id)?;
        let mark = self.lifecycle.resource()?.mark(index)?;
        Some((mark.cx, mark.cy))
    }

    /// Takes in a freshly fetched collection.
    ///
    /// The snapshot is rebuilt every time. A non-empty collection re-renders
    /// the chart; an empty one skips rendering and leaves the previous chart
    /// visible. If rendering fails the previous collection, snapshot and chart
    /// are kept.
    pub fn observe_collection(&mut self, products: Vec<Product>) -> ChartResult<RenderOutcome> {
        let snapshot = ChartSnapshot::from_products(&products);
        if snapshot.is_empty() {
            debug!(
                live = self.lifecycle.is_live(),
                "empty collection; chart render skipped"
            );
            self.products = products;
            self.snapshot = snapshot;
            return Ok(RenderOutcome::Skipped);
        }

        let outcome = match self.lifecycle.render(&mut self.surface, &snapshot) {
            Ok(resource) => RenderOutcome::Rendered {
                handle: resource.handle(),
                marks: resource.marks().len(),
            },
            Err(err) => {
                warn!(error = %err, products = products.len(), "chart render failed");
                return Err(err);
            }
        };
        self.products = products;
        self.snapshot = snapshot;
        Ok(outcome)
    }

    /// Handles a click delivered by the surface's click handler.
    pub fn click(&mut self, event: PointerEvent) -> ClickOutcome {
        if self.selection.confirmation_visible() {
            trace!("click ignored while confirmation prompt is open");
            return ClickOutcome::PromptOpen;
        }

        let resolved = self
            .resolver
            .resolve(self.lifecycle.resource(), &self.snapshot, event)
            .cloned();
        match resolved {
            Some(id) => {
                self.selection.on_resolved_click(Some(id.clone()));
                debug!(product = %id, "product selected");
                ClickOutcome::Selected(id)
            }
            None => {
                trace!(x = event.x, y = event.y, "click missed all marks");
                ClickOutcome::Miss
            }
        }
    }

    /// Clicks the surface at pixel `(x, y)`.
    pub fn click_at(&mut self, x: f64, y: f64) -> ClickOutcome {
        match self.surface.click(x, y) {
            Some(event) => self.click(event),
            None => {
                trace!(x, y, "click on a surface with no bound handler");
                if self.selection.confirmation_visible() {
                    ClickOutcome::PromptOpen
                } else {
                    ClickOutcome::Miss
                }
            }
        }
    }

    /// Applies a confirmation prompt choice.
    pub fn choose(&mut self, choice: SelectionChoice) -> Option<SelectionEffect> {
        let effect = self.selection.choose(choice);
        debug!(?choice, ?effect, "confirmation choice applied");
        effect
    }

    /// Removes the chart from the surface. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.lifecycle.destroy(&mut self.surface);
    }
}

impl<R: Renderer> Drop for ScatterView<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
