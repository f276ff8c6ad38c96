use serde::{Deserialize, Serialize};

use crate::api::ChartHandleId;
use crate::core::ProductId;

/// Pointer click on a drawing surface, in surface pixels.
///
/// Clicks delivered through a surface's click handler carry the handle of the
/// chart the handler was bound to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub handle: Option<ChartHandleId>,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, handle: None }
    }

    #[must_use]
    pub fn for_handle(mut self, handle: ChartHandleId) -> Self {
        self.handle = Some(handle);
        self
    }
}

/// Decision offered by the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionChoice {
    Update,
    Delete,
    Cancel,
}

/// Side effect requested by a confirmed choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionEffect {
    /// Hand the product to the external edit surface.
    OpenEditor(ProductId),
    /// Delete the product from the store and refresh the collection.
    Delete(ProductId),
}

/// Selection / confirmation state of the scatter view.
///
/// `Confirming` means a product was picked on the chart and the
/// update/delete/cancel prompt is visible. The selected id is not
/// re-validated when the collection changes underneath it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionState {
    #[default]
    Idle,
    Confirming(ProductId),
}

impl SelectionState {
    #[must_use]
    pub fn selected_id(&self) -> Option<&ProductId> {
        match self {
            Self::Idle => None,
            Self::Confirming(id) => Some(id),
        }
    }

    #[must_use]
    pub fn confirmation_visible(&self) -> bool {
        matches!(self, Self::Confirming(_))
    }

    /// Applies the outcome of a hit-test.
    ///
    /// Returns `true` when the state changed. The prompt is modal, so clicks
    /// that arrive while confirming are ignored.
    pub fn on_resolved_click(&mut self, resolved: Option<ProductId>) -> bool {
        if self.confirmation_visible() {
            return false;
        }
        match resolved {
            Some(id) => {
                *self = Self::Confirming(id);
                true
            }
            None => false,
        }
    }

    /// Applies a prompt choice and returns to `Idle`.
    ///
    /// Returns `None` for `Cancel` and whenever no prompt is open.
    pub fn choose(&mut self, choice: SelectionChoice) -> Option<SelectionEffect> {
        let Self::Confirming(id) = std::mem::take(self) else {
            return None;
        };
        match choice {
            SelectionChoice::Update => Some(SelectionEffect::OpenEditor(id)),
            SelectionChoice::Delete => Some(SelectionEffect::Delete(id)),
            SelectionChoice::Cancel => None,
        }
    }
}
