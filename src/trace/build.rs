use crate::shared::ids::{ExecutionId, NodeName, WorkflowId};
use crate::trace::error::MalformedTraceError;
use crate::trace::model::{
    ExecutionStatus, ExecutionTrace, FailureEvent, NodeResultStatus, NodeRun, TraceIdentity,
    TraceTiming,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExecutionRecord {
    #[serde(default)]
    execution_id: Option<String>,
    #[serde(default)]
    workflow_id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    path: Vec<RawNodeRun>,
    #[serde(default)]
    failure: Option<RawFailureEvent>,
    #[serde(default)]
    started_at: Option<Value>,
    #[serde(default)]
    stopped_at: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNodeRun {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    type_tag: Option<String>,
    #[serde(default)]
    config: Map<String, Value>,
    #[serde(default)]
    output_sample: Vec<Value>,
    #[serde(default)]
    exec_time_ms: Option<u64>,
    #[serde(default)]
    result_status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFailureEvent {
    #[serde(default)]
    node_ref: Option<String>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    stack: Option<String>,
    #[serde(default)]
    failing_expression: Option<String>,
}

impl ExecutionTrace {
    pub fn from_value(raw: Value, sample_limit: usize) -> Result<Self, MalformedTraceError> {
        if !raw.is_object() {
            return Err(MalformedTraceError::NotAnObject);
        }
        let record: RawExecutionRecord = serde_json::from_value(raw)
            .map_err(|source| MalformedTraceError::Decode { source })?;

        let execution_id = required_id(record.execution_id, "executionId", ExecutionId::parse)?;
        let workflow_id = required_id(record.workflow_id, "workflowId", WorkflowId::parse)?;
        let status_raw = record
            .status
            .ok_or(MalformedTraceError::MissingField { field: "status" })?;
        let status = ExecutionStatus::parse(&status_raw)
            .map_err(|_| MalformedTraceError::Status { raw: status_raw })?;

        let mut path = Vec::with_capacity(record.path.len());
        for (index, raw_node) in record.path.into_iter().enumerate() {
            path.push(build_node(index, raw_node, sample_limit)?);
        }

        let failure = match record.failure {
            Some(raw_failure) => Some(build_failure(raw_failure)?),
            None => None,
        };

        match (&failure, status) {
            (None, ExecutionStatus::Error) => {
                return Err(MalformedTraceError::MissingFailure {
                    execution_id: execution_id.to_string(),
                });
            }
            (Some(_), ExecutionStatus::Success) | (Some(_), ExecutionStatus::Running) => {
                return Err(MalformedTraceError::UnexpectedFailure {
                    execution_id: execution_id.to_string(),
                    status,
                });
            }
            _ => {}
        }

        if let Some(failure) = &failure {
            let known = path
                .iter()
                .any(|node| node.name.as_str() == failure.node_ref.as_str());
            if !known {
                return Err(MalformedTraceError::FailureNodeOutsidePath {
                    node_ref: failure.node_ref.to_string(),
                });
            }
        }

        let timing = TraceTiming {
            started_at: record.started_at.as_ref().and_then(parse_instant),
            stopped_at: record.stopped_at.as_ref().and_then(parse_instant),
        };

        Ok(ExecutionTrace::assemble(
            TraceIdentity {
                execution_id,
                workflow_id,
            },
            status,
            path,
            failure,
            timing,
        ))
    }
}

fn required_id<T>(
    raw: Option<String>,
    field: &'static str,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, MalformedTraceError> {
    let raw = raw.ok_or(MalformedTraceError::MissingField { field })?;
    parse(&raw).map_err(|reason| MalformedTraceError::Identity { field, reason })
}

fn build_node(
    index: usize,
    raw: RawNodeRun,
    sample_limit: usize,
) -> Result<NodeRun, MalformedTraceError> {
    let name_raw = raw.name.ok_or(MalformedTraceError::Node {
        index,
        reason: "name is required".to_string(),
    })?;
    let name = NodeName::parse(&name_raw)
        .map_err(|reason| MalformedTraceError::Node { index, reason })?;
    let status_raw = raw.result_status.ok_or(MalformedTraceError::Node {
        index,
        reason: "resultStatus is required".to_string(),
    })?;
    let result_status = NodeResultStatus::parse(&status_raw)
        .map_err(|reason| MalformedTraceError::Node { index, reason })?;

    let mut output_sample = raw.output_sample;
    output_sample.truncate(sample_limit);

    Ok(NodeRun {
        name,
        type_tag: raw.type_tag.unwrap_or_default(),
        config: raw.config,
        output_sample,
        exec_time_ms: raw.exec_time_ms,
        result_status,
    })
}

fn build_failure(raw: RawFailureEvent) -> Result<FailureEvent, MalformedTraceError> {
    let node_ref_raw = raw.node_ref.ok_or(MalformedTraceError::Failure {
        reason: "nodeRef is required".to_string(),
    })?;
    let node_ref = NodeName::parse(&node_ref_raw)
        .map_err(|reason| MalformedTraceError::Failure { reason })?;
    Ok(FailureEvent {
        node_ref,
        message: raw.message,
        code: raw.code.as_ref().and_then(normalize_code),
        stack: raw.stack,
        failing_expression: raw.failing_expression,
    })
}

fn normalize_code(raw: &Value) -> Option<String> {
    match raw {
        Value::String(code) => {
            let trimmed = code.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(code) => Some(code.to_string()),
        _ => None,
    }
}

pub(crate) fn parse_instant(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::Number(number) => {
            let millis = number.as_i64()?;
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|instant| instant.with_timezone(&Utc)),
        _ => None,
    }
}
