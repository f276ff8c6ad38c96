use std::cell::{Cell, Ref, RefCell};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::api::{ClickOutcome, RenderOutcome, ScatterView};
use crate::core::{Product, ProductDraft, ProductId};
use crate::error::ChartResult;
use crate::interaction::{PointerEvent, SelectionChoice, SelectionEffect, SelectionState};
use crate::render::Renderer;
use crate::store::{EntityStore, StoreError, StoreOperation};

use super::EditNavigator;

/// Result of a confirmation prompt choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmOutcome {
    /// Cancelled, or no prompt was open.
    Dismissed,
    EditorOpened(ProductId),
    Deleted(ProductId),
}

/// Result of submitting an edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    Created(Product),
    Updated(ProductId),
}

/// Keeps the scatter view in step with the product store.
///
/// Every operation takes `&self` so several can be in flight on one event
/// loop; the view is only borrowed between awaits. List responses are applied
/// in completion order, so the last one to arrive wins even if it was
/// requested first.
pub struct SyncCoordinator<S, R, N>
where
    S: EntityStore,
    R: Renderer,
    N: EditNavigator,
{
    store: S,
    view: RefCell<ScatterView<R>>,
    navigator: N,
    refresh_seq: Cell<u64>,
    newest_applied_seq: Cell<u64>,
}

impl<S, R, N> SyncCoordinator<S, R, N>
where
    S: EntityStore,
    R: Renderer,
    N: EditNavigator,
{
    #[must_use]
    pub fn new(store: S, view: ScatterView<R>, navigator: N) -> Self {
        Self {
            store,
            view: RefCell::new(view),
            navigator,
            refresh_seq: Cell::new(0),
            newest_applied_seq: Cell::new(0),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Borrows the view. Do not hold the guard across an `.await`.
    #[must_use]
    pub fn view(&self) -> Ref<'_, ScatterView<R>> {
        self.view.borrow()
    }

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.view.borrow().selection().clone()
    }

    /// Fetches the collection and re-renders the chart from it.
    ///
    /// On failure the last collection stays in place.
    pub async fn refresh(&self) -> ChartResult<RenderOutcome> {
        let seq = self.refresh_seq.get() + 1;
        self.refresh_seq.set(seq);

        let products = match self.store.list().await {
            Ok(products) => products,
            Err(err) => {
                report_store_failure(&err);
                return Err(err.into());
            }
        };

        let newest = self.newest_applied_seq.get();
        if seq < newest {
            debug!(seq, newest, "list response arrived out of order; applying it");
        }
        self.newest_applied_seq.set(newest.max(seq));
        debug!(seq, products = products.len(), "collection refreshed");
        self.view.borrow_mut().observe_collection(products)
    }

    pub fn handle_click(&self, event: PointerEvent) -> ClickOutcome {
        self.view.borrow_mut().click(event)
    }

    pub fn handle_click_at(&self, x: f64, y: f64) -> ClickOutcome {
        self.view.borrow_mut().click_at(x, y)
    }

    /// Applies a prompt choice and runs its side effect.
    ///
    /// The prompt closes before any store call starts and is not reopened if
    /// the call fails. A failed delete skips the refresh.
    pub async fn confirm(&self, choice: SelectionChoice) -> ChartResult<ConfirmOutcome> {
        let effect = self.view.borrow_mut().choose(choice);
        match effect {
            None => Ok(ConfirmOutcome::Dismissed),
            Some(SelectionEffect::OpenEditor(id)) => {
                self.navigator.open_editor(&id);
                Ok(ConfirmOutcome::EditorOpened(id))
            }
            Some(SelectionEffect::Delete(id)) => {
                if let Err(err) = self.store.delete(&id).await {
                    report_store_failure(&err);
                    return Err(err.into());
                }
                self.refresh_after_mutation(StoreOperation::Delete).await;
                Ok(ConfirmOutcome::Deleted(id))
            }
        }
    }

    /// Loads one product to prefill the edit surface.
    pub async fn load_for_edit(&self, id: &ProductId) -> ChartResult<Product> {
        self.store.get(id).await.map_err(|err| {
            report_store_failure(&err);
            err.into()
        })
    }

    /// Creates (`target == None`) or updates a product, then refreshes.
    pub async fn submit_draft(
        &self,
        target: Option<&ProductId>,
        draft: &ProductDraft,
    ) -> ChartResult<SubmitOutcome> {
        draft.validate()?;
        let outcome = match target {
            None => self.store.create(draft).await.map(SubmitOutcome::Created),
            Some(id) => self
                .store
                .update(id, draft)
                .await
                .map(|()| SubmitOutcome::Updated(id.clone())),
        };
        let outcome = outcome.map_err(|err| {
            report_store_failure(&err);
            err
        })?;
        let operation = match target {
            None => StoreOperation::Create,
            Some(_) => StoreOperation::Update,
        };
        self.refresh_after_mutation(operation).await;
        Ok(outcome)
    }

    /// Refreshes after a mutation that already succeeded. A failure here is
    /// logged by `refresh` and does not undo the mutation's result.
    async fn refresh_after_mutation(&self, operation: StoreOperation) {
        if let Err(err) = self.refresh().await {
            trace!(%operation, error = %err, "refresh after mutation failed");
        }
    }

    /// Removes the chart from the surface. Safe to call repeatedly.
    pub fn teardown(&self) {
        self.view.borrow_mut().teardown();
    }
}

fn report_store_failure(err: &StoreError) {
    match err.operation() {
        Some(operation) if operation.is_mutation() => {
            warn!(%operation, error = %err, "product mutation failed");
        }
        Some(operation) => {
            warn!(%operation, error = %err, "product fetch failed; keeping last collection");
        }
        None => warn!(error = %err, "product store call failed"),
    }
}
