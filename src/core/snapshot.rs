use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, Product, ProductId};

/// Render-ready projection of a product collection.
///
/// Position `i` of `labels`, `xs`, `ys` and `ids` always describes the same
/// product. A snapshot is rebuilt whenever the collection changes and is never
/// patched in place, so mark indices are only meaningful against the snapshot
/// that produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    labels: Vec<String>,
    xs: Vec<f64>,
    ys: Vec<f64>,
    ids: Vec<ProductId>,
    #[serde(skip)]
    positions: IndexMap<ProductId, usize>,
}

impl ChartSnapshot {
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        let mut labels = Vec::with_capacity(products.len());
        let mut xs = Vec::with_capacity(products.len());
        let mut ys = Vec::with_capacity(products.len());
        let mut ids = Vec::with_capacity(products.len());
        for product in products {
            labels.push(product.label.clone());
            xs.push(product.x);
            ys.push(product.y);
            ids.push(product.id.clone());
        }
        let positions = index_positions(&ids);

        Self {
            labels,
            xs,
            ys,
            ids,
            positions,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Identity of the product drawn at mark position `index`.
    #[must_use]
    pub fn entity_at(&self, index: usize) -> Option<&ProductId> {
        self.ids.get(index)
    }

    #[must_use]
    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn point_at(&self, index: usize) -> Option<DataPoint> {
        Some(DataPoint::new(*self.xs.get(index)?, *self.ys.get(index)?))
    }

    /// First position holding `id`.
    #[must_use]
    pub fn position_of(&self, id: &ProductId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn points(&self) -> impl Iterator<Item = DataPoint> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| DataPoint::new(x, y))
    }

    /// Restores the id index after deserialization.
    pub(crate) fn reindex(mut self) -> Self {
        self.positions = index_positions(&self.ids);
        self
    }

    pub(crate) fn is_aligned(&self) -> bool {
        self.labels.len() == self.ids.len()
            && self.xs.len() == self.ids.len()
            && self.ys.len() == self.ids.len()
    }
}

fn index_positions(ids: &[ProductId]) -> IndexMap<ProductId, usize> {
    let mut positions = IndexMap::with_capacity(ids.len());
    for (index, id) in ids.iter().enumerate() {
        positions.entry(id.clone()).or_insert(index);
    }
    positions
}
