use crate::core::ProductId;

/// External edit surface that takes over when the user picks "update".
pub trait EditNavigator {
    fn open_editor(&self, id: &ProductId);
}

impl<F> EditNavigator for F
where
    F: Fn(&ProductId),
{
    fn open_editor(&self, id: &ProductId) {
        self(id);
    }
}

/// Navigator for hosts without an edit surface; update choices are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetachedNavigator;

impl EditNavigator for DetachedNavigator {
    fn open_editor(&self, id: &ProductId) {
        tracing::debug!(product = %id, "no edit surface attached; update dropped");
    }
}
