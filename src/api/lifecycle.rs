use tracing::{debug, trace, warn};

use crate::core::ChartSnapshot;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::chart_resource::ChartLayout;
use super::{ChartResource, DrawingSurface, ScatterChartConfig};

/// Owns the chart instance drawn on a surface.
///
/// Every `render` destroys the previous instance before creating the next one,
/// so the surface never holds two live charts. Re-rendering the same snapshot
/// rebuilds the chart from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLifecycleManager {
    config: ScatterChartConfig,
    resource: Option<ChartResource>,
}

impl ChartLifecycleManager {
    pub fn new(config: ScatterChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            resource: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ScatterChartConfig {
        &self.config
    }

    #[must_use]
    pub fn resource(&self) -> Option<&ChartResource> {
        self.resource.as_ref()
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.resource.is_some()
    }

    /// Replaces the chart on `surface` with one drawn from `snapshot`.
    ///
    /// Layout runs before the previous chart is destroyed: if the snapshot
    /// cannot be laid out, the surface keeps showing the old chart.
    pub fn render<R: Renderer>(
        &mut self,
        surface: &mut DrawingSurface<R>,
        snapshot: &ChartSnapshot,
    ) -> ChartResult<&ChartResource> {
        let mut config = self.config.clone();
        config.viewport = surface.viewport();
        let layout = ChartLayout::build(&config, snapshot)?;

        self.destroy(surface);
        if let Some(resource) = &self.resource {
            return Err(ChartError::InvalidData(format!(
                "chart manager is bound to {}, not {}",
                resource.surface(),
                surface.id()
            )));
        }

        let handle = surface.attach()?;
        if let Err(err) = surface.present(handle, layout.frame.clone()) {
            surface.release(handle);
            return Err(err);
        }
        surface.bind_click_handler(handle);

        debug!(
            surface = %surface.id(),
            handle = %handle,
            marks = layout.marks.len(),
            "chart rendered"
        );
        let resource =
            ChartResource::from_layout(handle, surface.id(), layout, config.hit_radius_px);
        Ok(self.resource.insert(resource))
    }

    /// Releases the live chart, if any. Calling it with nothing live is a no-op.
    ///
    /// A chart that lives on a different surface than `surface` is left alone.
    pub fn destroy<R: Renderer>(&mut self, surface: &mut DrawingSurface<R>) {
        let Some(resource) = self.resource.take() else {
            trace!(surface = %surface.id(), "destroy with no live chart");
            return;
        };
        if resource.surface() != surface.id() {
            warn!(
                surface = %surface.id(),
                owner = %resource.surface(),
                "destroy requested on a surface that does not own the chart"
            );
            self.resource = Some(resource);
            return;
        }
        if surface.release(resource.handle()) {
            debug!(surface = %surface.id(), handle = %resource.handle(), "chart destroyed");
        }
    }
}
