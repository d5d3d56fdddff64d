use crate::shared::ids::ExecutionId;
use crate::trace::build::parse_instant;
use crate::trace::error::MalformedTraceError;
use crate::trace::model::ExecutionStatus;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRun {
    pub execution_id: ExecutionId,
    pub status: ExecutionStatus,
    pub stopped_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHistoricalRun {
    #[serde(default)]
    execution_id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    stopped_at: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExecutionHistory {
    runs: Vec<HistoricalRun>,
}

impl ExecutionHistory {
    pub fn new(runs: Vec<HistoricalRun>) -> Self {
        Self { runs }
    }

    pub fn from_value(raw: Value) -> Result<Self, MalformedTraceError> {
        let entries: Vec<RawHistoricalRun> = serde_json::from_value(raw)
            .map_err(|source| MalformedTraceError::Decode { source })?;
        let mut runs = Vec::with_capacity(entries.len());
        for entry in entries {
            let execution_id = entry.execution_id.ok_or(MalformedTraceError::History {
                reason: "run entry is missing executionId".to_string(),
            })?;
            let execution_id =
                ExecutionId::parse(&execution_id).map_err(|reason| MalformedTraceError::History {
                    reason: format!("run entry has invalid executionId: {reason}"),
                })?;
            let status = entry.status.ok_or(MalformedTraceError::History {
                reason: format!("run `{execution_id}` is missing status"),
            })?;
            let status =
                ExecutionStatus::parse(&status).map_err(|reason| MalformedTraceError::History {
                    reason: format!("run `{execution_id}` has invalid status: {reason}"),
                })?;
            runs.push(HistoricalRun {
                execution_id,
                status,
                stopped_at: entry.stopped_at.as_ref().and_then(parse_instant),
            });
        }
        Ok(Self::new(runs))
    }

    pub fn runs(&self) -> &[HistoricalRun] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn latest_prior_succeeded(&self) -> bool {
        self.runs
            .last()
            .is_some_and(|run| run.status == ExecutionStatus::Success)
    }
}
