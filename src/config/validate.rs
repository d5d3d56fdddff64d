use crate::config::error::ConfigError;
use crate::config::settings::EngineSettings;
use std::collections::HashSet;

pub fn validate_engine_settings(settings: &EngineSettings) -> Result<(), ConfigError> {
    if settings.sample_limit == 0 {
        return Err(ConfigError::Settings(
            "sampleLimit must be at least 1".to_string(),
        ));
    }
    if settings.min_inconsistency_samples == 0 {
        return Err(ConfigError::Settings(
            "minInconsistencySamples must be at least 1".to_string(),
        ));
    }
    if settings.default_match_threshold > 100 {
        return Err(ConfigError::Settings(
            "defaultMatchThreshold must be at most 100".to_string(),
        ));
    }
    for (pattern_id, threshold) in &settings.match_threshold_overrides {
        if *threshold > 100 {
            return Err(ConfigError::Settings(format!(
                "matchThresholdOverrides.{pattern_id} must be at most 100"
            )));
        }
    }
    if !(settings.timing_proximity_fraction > 0.0 && settings.timing_proximity_fraction <= 1.0) {
        return Err(ConfigError::Settings(
            "timingProximityFraction must be within (0, 1]".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for entry in &settings.pattern_priority {
        if !seen.insert(entry.as_str()) {
            return Err(ConfigError::Settings(format!(
                "patternPriority lists `{entry}` more than once"
            )));
        }
    }
    for rule in &settings.consequence_adjacency {
        if rule.upstream == rule.downstream {
            return Err(ConfigError::Settings(format!(
                "consequenceAdjacency rule for `{}` references itself",
                rule.upstream
            )));
        }
    }
    Ok(())
}
