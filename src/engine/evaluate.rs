use crate::config::settings::EngineSettings;
use crate::shared::ids::PatternId;
use crate::shared::value_path::{json_type_name, lookup_path, referenced_field_paths};
use crate::signatures::checks::{EvidenceCheck, MessageSignature};
use crate::signatures::library::SignatureLibrary;
use crate::signatures::pattern::SignaturePattern;
use crate::trace::history::ExecutionHistory;
use crate::trace::model::{ExecutionTrace, FailureEvent, NodeResultStatus, NodeRun};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

pub const MAX_CONFIDENCE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceHit {
    pub check: &'static str,
    pub weight: u8,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternEvaluation {
    pub pattern_id: PatternId,
    pub confidence: u8,
    pub hits: Vec<EvidenceHit>,
}

pub fn evaluate_library(
    trace: &ExecutionTrace,
    history: Option<&ExecutionHistory>,
    library: &SignatureLibrary,
    settings: &EngineSettings,
) -> Vec<PatternEvaluation> {
    library
        .patterns()
        .iter()
        .map(|pattern| evaluate_pattern(trace, history, pattern, settings))
        .collect()
}

pub fn evaluate_pattern(
    trace: &ExecutionTrace,
    history: Option<&ExecutionHistory>,
    pattern: &SignaturePattern,
    settings: &EngineSettings,
) -> PatternEvaluation {
    let mut hits = Vec::new();
    for entry in &pattern.checks {
        if let Some(hit) = check_hit(trace, history, &entry.check, entry.weight, settings) {
            hits.push(hit);
        }
    }
    let total: u32 = hits.iter().map(|hit| u32::from(hit.weight)).sum();
    let confidence = total.min(u32::from(MAX_CONFIDENCE)) as u8;
    debug!(
        pattern = %pattern.id,
        confidence,
        hits = hits.len(),
        "evaluated signature pattern"
    );
    PatternEvaluation {
        pattern_id: pattern.id.clone(),
        confidence,
        hits,
    }
}

fn check_hit(
    trace: &ExecutionTrace,
    history: Option<&ExecutionHistory>,
    check: &EvidenceCheck,
    weight: u8,
    settings: &EngineSettings,
) -> Option<EvidenceHit> {
    let failure = trace.failure.as_ref()?;
    let reason = match check {
        EvidenceCheck::MessageSignature(signature) => {
            message_signature_reason(failure, signature)?
        }
        EvidenceCheck::PredecessorRole {
            producer_tags,
            symptom_tags,
        } => predecessor_role_reason(trace, failure, producer_tags, symptom_tags)?,
        EvidenceCheck::SampleFieldInconsistency => {
            sample_inconsistency_reason(trace, failure, settings)?
        }
        EvidenceCheck::SampleTypeDivergence => {
            sample_type_divergence_reason(trace, failure, settings)?
        }
        EvidenceCheck::StatusCode { any_of } => status_code_reason(failure, any_of)?,
        EvidenceCheck::TimingProximity { ceiling_keys } => {
            timing_proximity_reason(trace, ceiling_keys, settings)?
        }
        EvidenceCheck::PriorRunRecency => prior_run_recency_reason(history)?,
    };
    Some(EvidenceHit {
        check: check.kind(),
        weight,
        reason,
    })
}

fn message_signature_reason(
    failure: &FailureEvent,
    signature: &MessageSignature,
) -> Option<String> {
    let matched = signature.first_match(&failure.message)?;
    Some(format!("failure message matches signature `{matched}`"))
}

fn predecessor_role_reason(
    trace: &ExecutionTrace,
    failure: &FailureEvent,
    producer_tags: &[String],
    symptom_tags: &[String],
) -> Option<String> {
    let symptom = trace.failing_node()?;
    if !symptom_tags.is_empty() && !symptom_tags.iter().any(|tag| tag == &symptom.type_tag) {
        return None;
    }
    let predecessor = trace.predecessor_of(failure.node_ref.as_str())?;
    if !matches_producer_role(predecessor, producer_tags) {
        return None;
    }
    Some(format!(
        "`{}` ({}) completed successfully immediately before `{}`",
        predecessor.name, predecessor.type_tag, symptom.name
    ))
}

fn sample_inconsistency_reason(
    trace: &ExecutionTrace,
    failure: &FailureEvent,
    settings: &EngineSettings,
) -> Option<String> {
    let paths = failure_expression_paths(failure);
    if paths.is_empty() {
        return None;
    }
    for node in trace.nodes_before(failure.node_ref.as_str()).iter().rev() {
        if let Some(observation) = find_inconsistent_field(
            &node.output_sample,
            &paths,
            settings.min_inconsistency_samples,
        ) {
            return Some(format!(
                "field `{}` is present in {} and absent in {} of the sampled outputs of `{}`",
                observation.path, observation.present, observation.absent, node.name
            ));
        }
    }
    None
}

fn sample_type_divergence_reason(
    trace: &ExecutionTrace,
    failure: &FailureEvent,
    settings: &EngineSettings,
) -> Option<String> {
    let paths = failure_expression_paths(failure);
    if paths.is_empty() {
        return None;
    }
    for node in trace.nodes_before(failure.node_ref.as_str()).iter().rev() {
        if let Some((path, types)) = find_divergent_field(
            &node.output_sample,
            &paths,
            settings.min_inconsistency_samples,
        ) {
            return Some(format!(
                "field `{}` carries mixed types ({}) across the sampled outputs of `{}`",
                path,
                types.join(", "),
                node.name
            ));
        }
    }
    None
}

fn status_code_reason(failure: &FailureEvent, any_of: &[String]) -> Option<String> {
    let code = failure.code.as_deref()?.trim();
    if !any_of.iter().any(|entry| entry.eq_ignore_ascii_case(code)) {
        return None;
    }
    Some(format!(
        "failure code `{code}` is in class [{}]",
        any_of.join(", ")
    ))
}

fn timing_proximity_reason(
    trace: &ExecutionTrace,
    ceiling_keys: &[String],
    settings: &EngineSettings,
) -> Option<String> {
    let node = trace.failing_node()?;
    let exec_time_ms = node.exec_time_ms?;
    let ceiling_ms = ceiling_keys
        .iter()
        .find_map(|key| node.config.get(key).and_then(config_millis))?;
    if ceiling_ms <= 0.0 {
        return None;
    }
    if (exec_time_ms as f64) < settings.timing_proximity_fraction * ceiling_ms {
        return None;
    }
    Some(format!(
        "`{}` ran for {exec_time_ms}ms against a configured {ceiling_ms}ms ceiling",
        node.name
    ))
}

fn prior_run_recency_reason(history: Option<&ExecutionHistory>) -> Option<String> {
    let history = history?;
    if !history.latest_prior_succeeded() {
        return None;
    }
    Some("the most recent prior execution of this workflow succeeded".to_string())
}

fn config_millis(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldObservation {
    pub path: String,
    pub present: usize,
    pub absent: usize,
}

pub(crate) fn find_inconsistent_field(
    samples: &[Value],
    paths: &[String],
    min_samples: usize,
) -> Option<FieldObservation> {
    if samples.len() < min_samples {
        return None;
    }
    for path in paths {
        let present = samples
            .iter()
            .filter(|record| field_present(record, path))
            .count();
        let absent = samples.len() - present;
        if present >= 1 && absent >= 1 {
            return Some(FieldObservation {
                path: path.clone(),
                present,
                absent,
            });
        }
    }
    None
}

pub(crate) fn find_divergent_field(
    samples: &[Value],
    paths: &[String],
    min_samples: usize,
) -> Option<(String, Vec<&'static str>)> {
    if samples.len() < min_samples {
        return None;
    }
    for path in paths {
        let mut types: Vec<&'static str> = Vec::new();
        for record in samples {
            let Some(value) = lookup_path(record, path) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            let type_name = json_type_name(value);
            if !types.contains(&type_name) {
                types.push(type_name);
            }
        }
        if types.len() >= 2 {
            return Some((path.clone(), types));
        }
    }
    None
}

pub(crate) fn matches_producer_role(node: &NodeRun, producer_tags: &[String]) -> bool {
    node.result_status == NodeResultStatus::Success
        && producer_tags.iter().any(|tag| tag == &node.type_tag)
}

pub(crate) fn failure_expression_paths(failure: &FailureEvent) -> Vec<String> {
    failure
        .failing_expression
        .as_deref()
        .map(referenced_field_paths)
        .unwrap_or_default()
}

fn field_present(record: &Value, path: &str) -> bool {
    matches!(lookup_path(record, path), Some(value) if !value.is_null())
}
