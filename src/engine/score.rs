use crate::config::settings::EngineSettings;
use crate::engine::evaluate::PatternEvaluation;
use crate::signatures::library::SignatureLibrary;
use crate::signatures::pattern::SignaturePattern;
use tracing::debug;

pub fn is_match(
    evaluation: &PatternEvaluation,
    pattern: &SignaturePattern,
    settings: &EngineSettings,
) -> bool {
    evaluation.confidence >= settings.threshold_for(pattern)
}

pub fn rank_matches(
    evaluations: Vec<PatternEvaluation>,
    library: &SignatureLibrary,
    settings: &EngineSettings,
) -> Vec<PatternEvaluation> {
    let mut matched: Vec<PatternEvaluation> = evaluations
        .into_iter()
        .filter(|evaluation| {
            library
                .get(evaluation.pattern_id.as_str())
                .is_some_and(|pattern| is_match(evaluation, pattern, settings))
        })
        .collect();
    matched.sort_by(|a, b| {
        b.confidence
            .cmp(&a.confidence)
            .then_with(|| {
                settings
                    .priority_rank(a.pattern_id.as_str())
                    .cmp(&settings.priority_rank(b.pattern_id.as_str()))
            })
            .then_with(|| a.pattern_id.cmp(&b.pattern_id))
    });
    if let Some(top) = matched.first() {
        debug!(
            pattern = %top.pattern_id,
            confidence = top.confidence,
            matches = matched.len(),
            "ranked matched signature patterns"
        );
    }
    matched
}
