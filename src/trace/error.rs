use crate::trace::model::ExecutionStatus;

#[derive(Debug, thiserror::Error)]
pub enum MalformedTraceError {
    #[error("execution record must be a json object")]
    NotAnObject,
    #[error("execution record is missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("invalid {field}: {reason}")]
    Identity { field: &'static str, reason: String },
    #[error("unknown execution status `{raw}`")]
    Status { raw: String },
    #[error("node at path index {index} is invalid: {reason}")]
    Node { index: usize, reason: String },
    #[error("failure event is invalid: {reason}")]
    Failure { reason: String },
    #[error("execution `{execution_id}` has status `error` but no failure event")]
    MissingFailure { execution_id: String },
    #[error("execution `{execution_id}` has status `{status}` but carries a failure event")]
    UnexpectedFailure {
        execution_id: String,
        status: ExecutionStatus,
    },
    #[error("failure references node `{node_ref}` which is not in the execution path")]
    FailureNodeOutsidePath { node_ref: String },
    #[error("execution history is invalid: {reason}")]
    History { reason: String },
    #[error("failed to decode execution record: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}
