mod chart_config;
mod chart_resource;
mod hit_test;
mod json_contract;
mod lifecycle;
mod scatter_view;
mod surface;

pub use chart_config::{
    AxisTitle, DEFAULT_DATASET_LABEL, DEFAULT_X_AXIS_TITLE, DEFAULT_Y_AXIS_TITLE, PlotMargins,
    ScatterChartConfig,
};
pub use chart_resource::{ChartResource, MarkGeometry, PlotArea};
pub use hit_test::HitTestResolver;
pub use json_contract::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshotJsonContractV1, ScatterViewDiagnostics,
};
pub use lifecycle::ChartLifecycleManager;
pub use scatter_view::{ClickOutcome, RenderOutcome, ScatterView};
pub use surface::{ChartHandleId, DrawingSurface, SurfaceId};
