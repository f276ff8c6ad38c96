use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{ChartSnapshot, ProductId};
use crate::interaction::PointerEvent;

use super::ChartResource;

/// Resolves pointer clicks to the product whose mark was struck.
///
/// A mark is struck when the click lands within its drawn radius plus the
/// chart's hit radius. When marks overlap, the nearest one wins and equal
/// distances go to the lowest snapshot position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitTestResolver;

impl HitTestResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Positional index of the struck mark, or `None` for a miss.
    ///
    /// Events stamped with another chart's handle always miss.
    #[must_use]
    pub fn hit_index(&self, resource: &ChartResource, event: PointerEvent) -> Option<usize> {
        if let Some(handle) = event.handle {
            if handle != resource.handle() {
                trace!(
                    event_handle = %handle,
                    live_handle = %resource.handle(),
                    "click from a stale chart handler"
                );
                return None;
            }
        }
        if !event.x.is_finite() || !event.y.is_finite() {
            return None;
        }

        let mut hits: SmallVec<[(OrderedFloat<f64>, usize); 4]> = SmallVec::new();
        for mark in resource.marks() {
            let distance = mark.distance_to(event.x, event.y);
            if distance <= mark.radius + resource.hit_radius_px() {
                hits.push((OrderedFloat(distance), mark.index));
            }
        }

        hits.into_iter()
            .min_by_key(|&(distance, index)| (distance, index))
            .map(|(_, index)| index)
    }

    /// Resolves a click to a product identity through `snapshot`.
    ///
    /// `snapshot` must be the current one: a mark index that has no entry in it
    /// resolves to `None`.
    #[must_use]
    pub fn resolve<'a>(
        &self,
        resource: Option<&ChartResource>,
        snapshot: &'a ChartSnapshot,
        event: PointerEvent,
    ) -> Option<&'a ProductId> {
        let index = self.hit_index(resource?, event)?;
        let resolved = snapshot.entity_at(index);
        if resolved.is_none() {
            trace!(
                index,
                snapshot_len = snapshot.len(),
                "struck mark has no entry in the current snapshot"
            );
        }
        resolved
    }
}
