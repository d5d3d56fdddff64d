use crate::signatures::error::CatalogError;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct MessageSignature {
    raw: Vec<String>,
    compiled: Vec<Regex>,
}

impl MessageSignature {
    pub fn compile(signatures: &[&str]) -> Result<Self, CatalogError> {
        let mut raw = Vec::with_capacity(signatures.len());
        let mut compiled = Vec::with_capacity(signatures.len());
        for signature in signatures {
            let regex = Regex::new(signature).map_err(|source| CatalogError::Signature {
                signature: signature.to_string(),
                source,
            })?;
            raw.push(signature.to_string());
            compiled.push(regex);
        }
        Ok(Self { raw, compiled })
    }

    pub fn signatures(&self) -> &[String] {
        &self.raw
    }

    pub fn first_match(&self, message: &str) -> Option<&str> {
        self.compiled
            .iter()
            .position(|regex| regex.is_match(message))
            .map(|index| self.raw[index].as_str())
    }
}

impl PartialEq for MessageSignature {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvidenceCheck {
    MessageSignature(MessageSignature),
    PredecessorRole {
        producer_tags: Vec<String>,
        symptom_tags: Vec<String>,
    },
    SampleFieldInconsistency,
    SampleTypeDivergence,
    StatusCode {
        any_of: Vec<String>,
    },
    TimingProximity {
        ceiling_keys: Vec<String>,
    },
    PriorRunRecency,
}

impl EvidenceCheck {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MessageSignature(_) => "message-signature",
            Self::PredecessorRole { .. } => "predecessor-role",
            Self::SampleFieldInconsistency => "sample-field-inconsistency",
            Self::SampleTypeDivergence => "sample-type-divergence",
            Self::StatusCode { .. } => "status-code",
            Self::TimingProximity { .. } => "timing-proximity",
            Self::PriorRunRecency => "prior-run-recency",
        }
    }
}
