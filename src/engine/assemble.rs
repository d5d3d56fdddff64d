use crate::config::settings::EngineSettings;
use crate::engine::evaluate::{EvidenceHit, PatternEvaluation};
use crate::engine::origin::OriginFinding;
use crate::engine::result::{DiagnosisResult, RankedPattern};
use crate::signatures::library::SignatureLibrary;
use crate::trace::model::{ExecutionTrace, FailureEvent};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub fn assemble_diagnosis(
    trace: &ExecutionTrace,
    failure: &FailureEvent,
    ranked: Vec<PatternEvaluation>,
    origin: OriginFinding,
    library: &SignatureLibrary,
    settings: &EngineSettings,
) -> DiagnosisResult {
    let mut hits_by_pattern: BTreeMap<String, Vec<EvidenceHit>> = BTreeMap::new();
    let mut ranked_patterns = Vec::with_capacity(ranked.len());
    for evaluation in ranked {
        let Some(pattern) = library.get(evaluation.pattern_id.as_str()) else {
            warn!(pattern = %evaluation.pattern_id, "ranked pattern is not registered; dropping");
            continue;
        };
        hits_by_pattern.insert(evaluation.pattern_id.as_str().to_string(), evaluation.hits);
        ranked_patterns.push(RankedPattern {
            pattern_id: evaluation.pattern_id,
            confidence: evaluation.confidence,
            remediation_class: pattern.remediation_class,
            consequence_of: None,
        });
    }

    apply_consequence_rules(&mut ranked_patterns, settings);

    let evidence = ranked_patterns
        .first()
        .and_then(|primary| hits_by_pattern.remove(primary.pattern_id.as_str()))
        .unwrap_or_default();

    DiagnosisResult {
        execution_id: trace.identity.execution_id.clone(),
        workflow_id: trace.identity.workflow_id.clone(),
        ranked_patterns,
        originating_node: origin.node,
        originating_index: origin.index,
        origin_basis: origin.basis,
        symptom_node: failure.node_ref.clone(),
        evidence,
        failure_message: failure.message.clone(),
        failure_code: failure.code.clone(),
    }
}

fn apply_consequence_rules(ranked: &mut Vec<RankedPattern>, settings: &EngineSettings) {
    for rule in &settings.consequence_adjacency {
        let upstream = ranked
            .iter()
            .position(|entry| entry.pattern_id.as_str() == rule.upstream);
        let downstream = ranked
            .iter()
            .position(|entry| entry.pattern_id.as_str() == rule.downstream);
        let (Some(upstream), Some(downstream)) = (upstream, downstream) else {
            continue;
        };
        ranked[downstream].consequence_of = Some(ranked[upstream].pattern_id.clone());
        if downstream < upstream {
            let promoted = ranked.remove(upstream);
            ranked.insert(downstream, promoted);
        }
        debug!(
            upstream = %rule.upstream,
            downstream = %rule.downstream,
            "applied consequence adjacency rule"
        );
    }
}
