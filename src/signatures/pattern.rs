use crate::shared::ids::PatternId;
use crate::signatures::checks::EvidenceCheck;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CausalDirection {
    Upstream,
    AtSymptom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemediationClass {
    SharedStateHandoff,
    ExpressionGuard,
    RetryBackoff,
    CredentialRefresh,
    TimeoutBudget,
    TypeCoercion,
}

impl RemediationClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SharedStateHandoff => "shared-state-handoff",
            Self::ExpressionGuard => "expression-guard",
            Self::RetryBackoff => "retry-backoff",
            Self::CredentialRefresh => "credential-refresh",
            Self::TimeoutBudget => "timeout-budget",
            Self::TypeCoercion => "type-coercion",
        }
    }
}

impl std::fmt::Display for RemediationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedCheck {
    pub weight: u8,
    pub check: EvidenceCheck,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignaturePattern {
    pub id: PatternId,
    pub display_name: String,
    pub checks: Vec<WeightedCheck>,
    pub match_threshold: Option<u8>,
    pub causal_direction: CausalDirection,
    pub remediation_class: RemediationClass,
}

impl SignaturePattern {
    pub fn has_check(&self, kind: &str) -> bool {
        self.checks.iter().any(|entry| entry.check.kind() == kind)
    }

    pub fn producer_tags(&self) -> Option<&[String]> {
        self.checks.iter().find_map(|entry| match &entry.check {
            EvidenceCheck::PredecessorRole { producer_tags, .. } => {
                Some(producer_tags.as_slice())
            }
            _ => None,
        })
    }
}
