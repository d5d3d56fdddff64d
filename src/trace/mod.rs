pub mod build;
pub mod error;
pub mod history;
pub mod model;

pub use error::MalformedTraceError;
pub use history::{ExecutionHistory, HistoricalRun};
pub use model::{
    ExecutionStatus, ExecutionTrace, FailureEvent, NodeResultStatus, NodeRun, TraceIdentity,
    TraceTiming,
};
