use crate::engine::evaluate::EvidenceHit;
use crate::engine::origin::OriginBasis;
use crate::shared::ids::{ExecutionId, NodeName, PatternId, WorkflowId};
use crate::signatures::pattern::RemediationClass;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPattern {
    pub pattern_id: PatternId,
    pub confidence: u8,
    pub remediation_class: RemediationClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consequence_of: Option<PatternId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub execution_id: ExecutionId,
    pub workflow_id: WorkflowId,
    pub ranked_patterns: Vec<RankedPattern>,
    pub originating_node: NodeName,
    pub originating_index: usize,
    pub origin_basis: OriginBasis,
    pub symptom_node: NodeName,
    pub evidence: Vec<EvidenceHit>,
    pub failure_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_code: Option<String>,
}

impl DiagnosisResult {
    pub fn is_classified(&self) -> bool {
        !self.ranked_patterns.is_empty()
    }

    pub fn primary(&self) -> Option<&RankedPattern> {
        self.ranked_patterns.first()
    }
}
