use serde::{Deserialize, Serialize};

use crate::core::ChartSnapshot;
use crate::error::{ChartError, ChartResult};
use crate::interaction::SelectionState;
use crate::render::Renderer;

use super::ScatterView;

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

/// Diagnostics dump of a scatter view: what is drawn and what is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterViewDiagnostics {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
    pub selection: SelectionState,
    pub chart_live: bool,
    pub presented_marks: usize,
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Parses either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let snapshot = match serde_json::from_str::<ChartSnapshot>(input) {
            Ok(snapshot) => snapshot,
            Err(_) => {
                let payload: ChartSnapshotJsonContractV1 =
                    serde_json::from_str(input).map_err(|e| {
                        ChartError::InvalidData(format!(
                            "failed to parse snapshot json payload: {e}"
                        ))
                    })?;
                if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
                    return Err(ChartError::InvalidData(format!(
                        "unsupported snapshot schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.snapshot
            }
        };
        let snapshot = snapshot.reindex();
        if !snapshot.is_aligned() {
            return Err(ChartError::InvalidData(
                "snapshot series lengths differ".to_owned(),
            ));
        }
        Ok(snapshot)
    }
}

impl<R: Renderer> ScatterView<R> {
    #[must_use]
    pub fn diagnostics(&self) -> ScatterViewDiagnostics {
        ScatterViewDiagnostics {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.snapshot().clone(),
            selection: self.selection().clone(),
            chart_live: self.lifecycle().is_live(),
            presented_marks: self
                .surface()
                .presented_frame()
                .map_or(0, |frame| frame.circles.len()),
        }
    }

    pub fn diagnostics_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.diagnostics()).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize view diagnostics: {e}"))
        })
    }
}
