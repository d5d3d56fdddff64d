use crate::config::settings::EngineSettings;
use crate::engine::evaluate::{
    failure_expression_paths, find_divergent_field, find_inconsistent_field, matches_producer_role,
};
use crate::shared::ids::NodeName;
use crate::signatures::pattern::{CausalDirection, SignaturePattern};
use crate::trace::model::{ExecutionTrace, FailureEvent};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OriginBasis {
    #[serde(rename_all = "camelCase")]
    SampleInconsistency { field: String },
    #[serde(rename_all = "camelCase")]
    SampleTypeDivergence { field: String },
    #[serde(rename_all = "camelCase")]
    ProducerRole { type_tag: String },
    SymptomLocal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginFinding {
    pub node: NodeName,
    pub index: usize,
    pub basis: OriginBasis,
}

pub fn locate_origin(
    trace: &ExecutionTrace,
    failure: &FailureEvent,
    symptom_index: usize,
    winning: Option<&SignaturePattern>,
    settings: &EngineSettings,
) -> OriginFinding {
    if let Some(pattern) = winning {
        if pattern.causal_direction == CausalDirection::AtSymptom {
            return symptom_finding(failure, symptom_index);
        }
    }

    let paths = failure_expression_paths(failure);
    let (wants_inconsistency, wants_divergence, producer_tags) = match winning {
        Some(pattern) => (
            pattern.has_check("sample-field-inconsistency"),
            pattern.has_check("sample-type-divergence"),
            pattern.producer_tags(),
        ),
        None => (true, false, None),
    };

    for index in (0..symptom_index).rev() {
        let Some(node) = trace.node_at(index) else {
            break;
        };
        if wants_inconsistency && !paths.is_empty() {
            if let Some(observation) = find_inconsistent_field(
                &node.output_sample,
                &paths,
                settings.min_inconsistency_samples,
            ) {
                debug!(node = %node.name, field = %observation.path, "origin located via sample inconsistency");
                return OriginFinding {
                    node: node.name.clone(),
                    index,
                    basis: OriginBasis::SampleInconsistency {
                        field: observation.path,
                    },
                };
            }
        }
        if wants_divergence && !paths.is_empty() {
            if let Some((field, _)) = find_divergent_field(
                &node.output_sample,
                &paths,
                settings.min_inconsistency_samples,
            ) {
                debug!(node = %node.name, field = %field, "origin located via sample type divergence");
                return OriginFinding {
                    node: node.name.clone(),
                    index,
                    basis: OriginBasis::SampleTypeDivergence { field },
                };
            }
        }
        if let Some(tags) = producer_tags {
            if matches_producer_role(node, tags) {
                debug!(node = %node.name, type_tag = %node.type_tag, "origin located via producer role");
                return OriginFinding {
                    node: node.name.clone(),
                    index,
                    basis: OriginBasis::ProducerRole {
                        type_tag: node.type_tag.clone(),
                    },
                };
            }
        }
    }

    symptom_finding(failure, symptom_index)
}

fn symptom_finding(failure: &FailureEvent, symptom_index: usize) -> OriginFinding {
    OriginFinding {
        node: failure.node_ref.clone(),
        index: symptom_index,
        basis: OriginBasis::SymptomLocal,
    }
}
