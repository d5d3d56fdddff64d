pub mod assemble;
pub mod error;
pub mod evaluate;
pub mod origin;
pub mod result;
pub mod score;

pub use assemble::assemble_diagnosis;
pub use error::EngineError;
pub use evaluate::{
    evaluate_library, evaluate_pattern, EvidenceHit, PatternEvaluation, MAX_CONFIDENCE,
};
pub use origin::{locate_origin, OriginBasis, OriginFinding};
pub use result::{DiagnosisResult, RankedPattern};
pub use score::{is_match, rank_matches};

use crate::config::settings::EngineSettings;
use crate::signatures::library::SignatureLibrary;
use crate::trace::error::MalformedTraceError;
use crate::trace::history::ExecutionHistory;
use crate::trace::model::{ExecutionStatus, ExecutionTrace};
use serde_json::Value;

pub fn diagnose(
    trace: &ExecutionTrace,
    history: Option<&ExecutionHistory>,
    library: &SignatureLibrary,
    settings: &EngineSettings,
) -> Result<DiagnosisResult, EngineError> {
    if trace.status != ExecutionStatus::Error {
        return Err(EngineError::TraceNotFailed {
            execution_id: trace.identity.execution_id.to_string(),
            status: trace.status,
        });
    }
    let Some(failure) = trace.failure.as_ref() else {
        return Err(EngineError::Malformed(MalformedTraceError::MissingFailure {
            execution_id: trace.identity.execution_id.to_string(),
        }));
    };
    let Some(symptom_index) = trace.index_of(failure.node_ref.as_str()) else {
        return Err(EngineError::Malformed(
            MalformedTraceError::FailureNodeOutsidePath {
                node_ref: failure.node_ref.to_string(),
            },
        ));
    };

    let evaluations = evaluate_library(trace, history, library, settings);
    let ranked = rank_matches(evaluations, library, settings);
    let winning = ranked
        .first()
        .and_then(|evaluation| library.get(evaluation.pattern_id.as_str()));
    let origin = locate_origin(trace, failure, symptom_index, winning, settings);
    Ok(assemble_diagnosis(
        trace, failure, ranked, origin, library, settings,
    ))
}

pub fn diagnose_record(
    raw: Value,
    history: Option<&ExecutionHistory>,
    library: &SignatureLibrary,
    settings: &EngineSettings,
) -> Result<DiagnosisResult, EngineError> {
    let trace = ExecutionTrace::from_value(raw, settings.sample_limit)?;
    diagnose(&trace, history, library, settings)
}
