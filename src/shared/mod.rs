pub mod ids;
pub mod value_path;

pub use ids::{ExecutionId, NodeName, PatternId, WorkflowId};
pub use value_path::{json_type_name, lookup_path, referenced_field_paths};
