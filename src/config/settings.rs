use crate::config::error::ConfigError;
use crate::signatures::builtin::{
    AUTHORIZATION_EXPIRY, EXPRESSION_REFERENCE, OPERATION_TIMEOUT, RATE_LIMITING,
    SESSION_VISIBILITY, TYPE_MISMATCH,
};
use crate::signatures::pattern::SignaturePattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsequenceRule {
    pub upstream: String,
    pub downstream: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    pub sample_limit: usize,
    pub default_match_threshold: u8,
    pub match_threshold_overrides: BTreeMap<String, u8>,
    pub timing_proximity_fraction: f64,
    pub min_inconsistency_samples: usize,
    pub pattern_priority: Vec<String>,
    pub consequence_adjacency: Vec<ConsequenceRule>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            sample_limit: 2,
            default_match_threshold: 70,
            match_threshold_overrides: BTreeMap::new(),
            timing_proximity_fraction: 0.95,
            min_inconsistency_samples: 2,
            pattern_priority: vec![
                SESSION_VISIBILITY.to_string(),
                AUTHORIZATION_EXPIRY.to_string(),
                RATE_LIMITING.to_string(),
                OPERATION_TIMEOUT.to_string(),
                EXPRESSION_REFERENCE.to_string(),
                TYPE_MISMATCH.to_string(),
            ],
            consequence_adjacency: vec![ConsequenceRule {
                upstream: RATE_LIMITING.to_string(),
                downstream: OPERATION_TIMEOUT.to_string(),
            }],
        }
    }
}

impl EngineSettings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let body = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&body).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn threshold_for(&self, pattern: &SignaturePattern) -> u8 {
        self.match_threshold_overrides
            .get(pattern.id.as_str())
            .copied()
            .or(pattern.match_threshold)
            .unwrap_or(self.default_match_threshold)
    }

    pub fn priority_rank(&self, pattern_id: &str) -> usize {
        self.pattern_priority
            .iter()
            .position(|entry| entry == pattern_id)
            .unwrap_or(self.pattern_priority.len())
    }
}
