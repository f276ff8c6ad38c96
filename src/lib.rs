//! scatter-rs: scatter-plot component for a remotely stored product set.
//!
//! The crate renders products (labeled 2-D points) as a scatter chart, maps
//! clicks on marks back to product identity, and drives the
//! update/delete/cancel confirmation flow against an asynchronous store.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod store;
pub mod sync;
pub mod telemetry;

pub use api::{ChartLifecycleManager, ScatterChartConfig, ScatterView};
pub use error::{ChartError, ChartResult};
pub use store::EntityStore;
pub use sync::SyncCoordinator;
