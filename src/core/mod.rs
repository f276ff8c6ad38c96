pub mod product;
pub mod scale;
pub mod snapshot;
pub mod types;

pub use product::{Product, ProductDraft, ProductId};
pub use scale::{LinearScale, PixelRange};
pub use snapshot::ChartSnapshot;
pub use types::{DataPoint, Viewport};
