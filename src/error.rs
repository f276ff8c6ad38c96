use thiserror::Error;

use crate::api::SurfaceId;
use crate::store::StoreError;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("surface {surface} already has a live chart")]
    SurfaceBusy { surface: SurfaceId },

    #[error(transparent)]
    Store(#[from] StoreError),
}
