use crate::shared::ids::PatternId;
use crate::signatures::checks::{EvidenceCheck, MessageSignature};
use crate::signatures::error::CatalogError;
use crate::signatures::pattern::{
    CausalDirection, RemediationClass, SignaturePattern, WeightedCheck,
};

pub const SESSION_VISIBILITY: &str = "session-visibility";
pub const EXPRESSION_REFERENCE: &str = "expression-reference";
pub const RATE_LIMITING: &str = "rate-limiting";
pub const AUTHORIZATION_EXPIRY: &str = "authorization-expiry";
pub const OPERATION_TIMEOUT: &str = "operation-timeout";
pub const TYPE_MISMATCH: &str = "type-mismatch";

pub(crate) fn builtin_patterns() -> Result<Vec<SignaturePattern>, CatalogError> {
    Ok(vec![
        session_visibility()?,
        expression_reference()?,
        rate_limiting()?,
        authorization_expiry()?,
        operation_timeout()?,
        type_mismatch()?,
    ])
}

fn pattern_id(raw: &str) -> Result<PatternId, CatalogError> {
    PatternId::parse(raw).map_err(|reason| CatalogError::Pattern { reason })
}

fn weighted(weight: u8, check: EvidenceCheck) -> WeightedCheck {
    WeightedCheck { weight, check }
}

fn session_visibility() -> Result<SignaturePattern, CatalogError> {
    Ok(SignaturePattern {
        id: pattern_id(SESSION_VISIBILITY)?,
        display_name: "Transient session file visibility".to_string(),
        checks: vec![
            weighted(
                40,
                EvidenceCheck::MessageSignature(MessageSignature::compile(&[
                    r"(?i)file (does not|doesn't) exist",
                    r"(?i)no such file or directory",
                    r"(?i)(command|path|file|directory).{0,40}not found",
                    r"(?i)cannot (open|stat|access)",
                ])?),
            ),
            weighted(
                35,
                EvidenceCheck::PredecessorRole {
                    producer_tags: vec!["remote-shell".to_string()],
                    symptom_tags: vec!["remote-shell".to_string()],
                },
            ),
        ],
        match_threshold: None,
        causal_direction: CausalDirection::Upstream,
        remediation_class: RemediationClass::SharedStateHandoff,
    })
}

fn expression_reference() -> Result<SignaturePattern, CatalogError> {
    Ok(SignaturePattern {
        id: pattern_id(EXPRESSION_REFERENCE)?,
        display_name: "Missing field referenced by expression".to_string(),
        checks: vec![
            weighted(
                40,
                EvidenceCheck::MessageSignature(MessageSignature::compile(&[
                    r"(?i)cannot read propert(y|ies)",
                    r"(?i)undefined is not an? (object|function)",
                    r"(?i)is not defined",
                    r"(?i)referenceerror",
                ])?),
            ),
            weighted(45, EvidenceCheck::SampleFieldInconsistency),
            weighted(
                15,
                EvidenceCheck::PredecessorRole {
                    producer_tags: vec![
                        "webhook-source".to_string(),
                        "http-call".to_string(),
                        "transform".to_string(),
                    ],
                    symptom_tags: Vec::new(),
                },
            ),
        ],
        match_threshold: None,
        causal_direction: CausalDirection::Upstream,
        remediation_class: RemediationClass::ExpressionGuard,
    })
}

fn rate_limiting() -> Result<SignaturePattern, CatalogError> {
    Ok(SignaturePattern {
        id: pattern_id(RATE_LIMITING)?,
        display_name: "Upstream rate-limit rejection".to_string(),
        checks: vec![
            weighted(
                50,
                EvidenceCheck::StatusCode {
                    any_of: vec!["429".to_string()],
                },
            ),
            weighted(
                50,
                EvidenceCheck::MessageSignature(MessageSignature::compile(&[
                    r"(?i)rate.?limit",
                    r"(?i)too many requests",
                    r"(?i)quota exceeded",
                    r"(?i)throttl",
                ])?),
            ),
        ],
        match_threshold: None,
        causal_direction: CausalDirection::Upstream,
        remediation_class: RemediationClass::RetryBackoff,
    })
}

fn authorization_expiry() -> Result<SignaturePattern, CatalogError> {
    Ok(SignaturePattern {
        id: pattern_id(AUTHORIZATION_EXPIRY)?,
        display_name: "Expired or invalid authorization".to_string(),
        checks: vec![
            weighted(
                45,
                EvidenceCheck::StatusCode {
                    any_of: vec!["401".to_string(), "403".to_string()],
                },
            ),
            weighted(
                35,
                EvidenceCheck::MessageSignature(MessageSignature::compile(&[
                    r"(?i)unauthorized",
                    r"(?i)forbidden",
                    r"(?i)(token|session|credential).{0,30}expired",
                    r"(?i)invalid (api.?key|token|credential)",
                    r"(?i)authentication (failed|required)",
                ])?),
            ),
            weighted(20, EvidenceCheck::PriorRunRecency),
        ],
        match_threshold: None,
        causal_direction: CausalDirection::Upstream,
        remediation_class: RemediationClass::CredentialRefresh,
    })
}

fn operation_timeout() -> Result<SignaturePattern, CatalogError> {
    Ok(SignaturePattern {
        id: pattern_id(OPERATION_TIMEOUT)?,
        display_name: "Operation timeout".to_string(),
        checks: vec![
            weighted(
                40,
                EvidenceCheck::StatusCode {
                    any_of: vec![
                        "ETIMEDOUT".to_string(),
                        "ESOCKETTIMEDOUT".to_string(),
                        "ECONNABORTED".to_string(),
                        "408".to_string(),
                        "504".to_string(),
                    ],
                },
            ),
            weighted(
                35,
                EvidenceCheck::MessageSignature(MessageSignature::compile(&[
                    r"(?i)timed?.?out",
                    r"(?i)deadline exceeded",
                    r"(?i)socket hang.?up",
                ])?),
            ),
            weighted(
                25,
                EvidenceCheck::TimingProximity {
                    ceiling_keys: vec![
                        "timeout".to_string(),
                        "timeoutMs".to_string(),
                        "requestTimeout".to_string(),
                    ],
                },
            ),
        ],
        match_threshold: None,
        causal_direction: CausalDirection::Upstream,
        remediation_class: RemediationClass::TimeoutBudget,
    })
}

fn type_mismatch() -> Result<SignaturePattern, CatalogError> {
    Ok(SignaturePattern {
        id: pattern_id(TYPE_MISMATCH)?,
        display_name: "Implicit type mismatch".to_string(),
        checks: vec![
            weighted(
                45,
                EvidenceCheck::MessageSignature(MessageSignature::compile(&[
                    r"(?i)expected (a |an )?(number|string|boolean|array|object|date).{0,40}(got|received|but was)",
                    r"(?i)cannot convert",
                    r"(?i)is not a (number|function|date)",
                    r"(?i)\bnan\b",
                    r"(?i)invalid (number|date|type)",
                ])?),
            ),
            weighted(40, EvidenceCheck::SampleTypeDivergence),
            weighted(
                15,
                EvidenceCheck::PredecessorRole {
                    producer_tags: vec![
                        "webhook-source".to_string(),
                        "http-call".to_string(),
                        "transform".to_string(),
                    ],
                    symptom_tags: Vec::new(),
                },
            ),
        ],
        match_threshold: None,
        causal_direction: CausalDirection::Upstream,
        remediation_class: RemediationClass::TypeCoercion,
    })
}
