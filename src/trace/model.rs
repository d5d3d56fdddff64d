use crate::shared::ids::{ExecutionId, NodeName, WorkflowId};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Success,
    Error,
    Running,
}

impl ExecutionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Running => "running",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "running" => Ok(Self::Running),
            _ => Err("execution status must be one of: success, error, running".to_string()),
        }
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeResultStatus {
    Success,
    Error,
    Skipped,
}

impl NodeResultStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Skipped => "skipped",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "skipped" => Ok(Self::Skipped),
            _ => Err("node result status must be one of: success, error, skipped".to_string()),
        }
    }
}

impl std::fmt::Display for NodeResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceIdentity {
    pub execution_id: ExecutionId,
    pub workflow_id: WorkflowId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRun {
    pub name: NodeName,
    pub type_tag: String,
    pub config: Map<String, Value>,
    pub output_sample: Vec<Value>,
    pub exec_time_ms: Option<u64>,
    pub result_status: NodeResultStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureEvent {
    pub node_ref: NodeName,
    pub message: String,
    pub code: Option<String>,
    pub stack: Option<String>,
    pub failing_expression: Option<String>,
}

impl FailureEvent {
    pub fn http_status(&self) -> Option<u16> {
        let code = self.code.as_deref()?.trim();
        let status = code.parse::<u16>().ok()?;
        (100..=599).contains(&status).then_some(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceTiming {
    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
}

impl TraceTiming {
    pub fn duration_ms(&self) -> Option<i64> {
        let started = self.started_at?;
        let stopped = self.stopped_at?;
        Some((stopped - started).num_milliseconds())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionTrace {
    pub identity: TraceIdentity,
    pub status: ExecutionStatus,
    pub path: Vec<NodeRun>,
    pub failure: Option<FailureEvent>,
    pub timing: TraceTiming,
    node_index: BTreeMap<String, usize>,
}

impl ExecutionTrace {
    pub(crate) fn assemble(
        identity: TraceIdentity,
        status: ExecutionStatus,
        path: Vec<NodeRun>,
        failure: Option<FailureEvent>,
        timing: TraceTiming,
    ) -> Self {
        let mut node_index = BTreeMap::new();
        for (index, node) in path.iter().enumerate() {
            node_index
                .entry(node.name.as_str().to_string())
                .or_insert(index);
        }
        Self {
            identity,
            status,
            path,
            failure,
            timing,
            node_index,
        }
    }

    pub fn node_at(&self, index: usize) -> Option<&NodeRun> {
        self.path.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.node_index.get(name).copied()
    }

    pub fn nodes_before(&self, name: &str) -> &[NodeRun] {
        match self.index_of(name) {
            Some(index) => &self.path[..index],
            None => &[],
        }
    }

    pub fn predecessor_of(&self, name: &str) -> Option<&NodeRun> {
        self.nodes_before(name).last()
    }

    pub fn sample(&self, name: &str, limit: usize) -> &[Value] {
        match self.index_of(name) {
            Some(index) => {
                let sample = &self.path[index].output_sample;
                &sample[..sample.len().min(limit)]
            }
            None => &[],
        }
    }

    pub fn failing_node(&self) -> Option<&NodeRun> {
        let failure = self.failure.as_ref()?;
        let index = self.index_of(failure.node_ref.as_str())?;
        self.path.get(index)
    }

    pub fn duration_ms(&self) -> Option<i64> {
        self.timing.duration_ms()
    }
}
