use traceclaw::config::EngineSettings;
use traceclaw::engine::{rank_matches, PatternEvaluation};
use traceclaw::shared::PatternId;
use traceclaw::signatures::{
    SignatureLibrary, OPERATION_TIMEOUT, RATE_LIMITING, SESSION_VISIBILITY, TYPE_MISMATCH,
};

fn evaluation(id: &str, confidence: u8) -> PatternEvaluation {
    PatternEvaluation {
        pattern_id: PatternId::parse(id).expect("valid pattern id"),
        confidence,
        hits: Vec::new(),
    }
}

#[test]
fn score_module_excludes_patterns_below_their_threshold() {
    let library = SignatureLibrary::builtin().expect("builtin catalog");
    let settings = EngineSettings::default();

    let ranked = rank_matches(
        vec![
            evaluation(RATE_LIMITING, 100),
            evaluation(OPERATION_TIMEOUT, 65),
        ],
        &library,
        &settings,
    );

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].pattern_id.as_str(), RATE_LIMITING);
}

#[test]
fn score_module_orders_matches_by_confidence_descending() {
    let library = SignatureLibrary::builtin().expect("builtin catalog");
    let settings = EngineSettings::default();

    let ranked = rank_matches(
        vec![
            evaluation(OPERATION_TIMEOUT, 75),
            evaluation(RATE_LIMITING, 100),
        ],
        &library,
        &settings,
    );

    assert_eq!(ranked[0].pattern_id.as_str(), RATE_LIMITING);
    assert_eq!(ranked[1].pattern_id.as_str(), OPERATION_TIMEOUT);
}

#[test]
fn score_module_breaks_exact_ties_with_the_priority_table() {
    let library = SignatureLibrary::builtin().expect("builtin catalog");
    let settings = EngineSettings::default();

    let ranked = rank_matches(
        vec![
            evaluation(TYPE_MISMATCH, 85),
            evaluation(SESSION_VISIBILITY, 85),
        ],
        &library,
        &settings,
    );

    assert_eq!(ranked[0].pattern_id.as_str(), SESSION_VISIBILITY);
    assert_eq!(ranked[1].pattern_id.as_str(), TYPE_MISMATCH);
}

#[test]
fn score_module_honors_a_reconfigured_priority_table() {
    let library = SignatureLibrary::builtin().expect("builtin catalog");
    let mut settings = EngineSettings::default();
    settings.pattern_priority = vec![
        TYPE_MISMATCH.to_string(),
        SESSION_VISIBILITY.to_string(),
    ];

    let ranked = rank_matches(
        vec![
            evaluation(SESSION_VISIBILITY, 85),
            evaluation(TYPE_MISMATCH, 85),
        ],
        &library,
        &settings,
    );

    assert_eq!(ranked[0].pattern_id.as_str(), TYPE_MISMATCH);
}

#[test]
fn score_module_ranks_unlisted_patterns_after_the_table_by_id() {
    let library = SignatureLibrary::builtin().expect("builtin catalog");
    let mut settings = EngineSettings::default();
    settings.pattern_priority = Vec::new();

    let ranked = rank_matches(
        vec![
            evaluation(TYPE_MISMATCH, 85),
            evaluation(RATE_LIMITING, 85),
        ],
        &library,
        &settings,
    );

    assert_eq!(ranked[0].pattern_id.as_str(), RATE_LIMITING);
    assert_eq!(ranked[1].pattern_id.as_str(), TYPE_MISMATCH);
}

#[test]
fn score_module_honors_threshold_overrides() {
    let library = SignatureLibrary::builtin().expect("builtin catalog");
    let mut settings = EngineSettings::default();
    settings
        .match_threshold_overrides
        .insert(OPERATION_TIMEOUT.to_string(), 60);

    let ranked = rank_matches(
        vec![evaluation(OPERATION_TIMEOUT, 65)],
        &library,
        &settings,
    );

    assert_eq!(ranked.len(), 1);
}

#[test]
fn score_module_drops_evaluations_for_unregistered_patterns() {
    let library = SignatureLibrary::builtin().expect("builtin catalog");
    let settings = EngineSettings::default();

    let ranked = rank_matches(
        vec![evaluation("unknown-family", 100)],
        &library,
        &settings,
    );

    assert!(ranked.is_empty());
}
