mod coordinator;
mod navigator;

pub use coordinator::{ConfirmOutcome, SubmitOutcome, SyncCoordinator};
pub use navigator::{DetachedNavigator, EditNavigator};
