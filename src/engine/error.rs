use crate::trace::error::MalformedTraceError;
use crate::trace::model::ExecutionStatus;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("execution `{execution_id}` has status `{status}`; diagnosis requires a failed execution")]
    TraceNotFailed {
        execution_id: String,
        status: ExecutionStatus,
    },
    #[error(transparent)]
    Malformed(#[from] MalformedTraceError),
}
