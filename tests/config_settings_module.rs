use std::fs;
use tempfile::tempdir;
use traceclaw::config::{
    load_engine_settings, validate_engine_settings, ConfigError, ConsequenceRule, EngineSettings,
};
use traceclaw::signatures::{
    SignatureLibrary, AUTHORIZATION_EXPIRY, EXPRESSION_REFERENCE, OPERATION_TIMEOUT,
    RATE_LIMITING, SESSION_VISIBILITY, TYPE_MISMATCH,
};

#[test]
fn settings_module_documents_the_default_policy() {
    let settings = EngineSettings::default();

    assert_eq!(settings.sample_limit, 2);
    assert_eq!(settings.default_match_threshold, 70);
    assert!(settings.match_threshold_overrides.is_empty());
    assert_eq!(settings.timing_proximity_fraction, 0.95);
    assert_eq!(settings.min_inconsistency_samples, 2);
    assert_eq!(
        settings.pattern_priority,
        vec![
            SESSION_VISIBILITY.to_string(),
            AUTHORIZATION_EXPIRY.to_string(),
            RATE_LIMITING.to_string(),
            OPERATION_TIMEOUT.to_string(),
            EXPRESSION_REFERENCE.to_string(),
            TYPE_MISMATCH.to_string(),
        ]
    );
    assert_eq!(
        settings.consequence_adjacency,
        vec![ConsequenceRule {
            upstream: RATE_LIMITING.to_string(),
            downstream: OPERATION_TIMEOUT.to_string(),
        }]
    );
    validate_engine_settings(&settings).expect("defaults validate");
}

#[test]
fn settings_module_ranks_patterns_by_the_priority_table() {
    let settings = EngineSettings::default();

    assert_eq!(settings.priority_rank(SESSION_VISIBILITY), 0);
    assert_eq!(settings.priority_rank(TYPE_MISMATCH), 5);
    assert_eq!(settings.priority_rank("unknown-family"), 6);
}

#[test]
fn settings_module_resolves_thresholds_with_override_precedence() {
    let library = SignatureLibrary::builtin().expect("builtin catalog");
    let mut settings = EngineSettings::default();
    let pattern = library.get(RATE_LIMITING).expect("pattern registered");

    assert_eq!(settings.threshold_for(pattern), 70);

    let mut declared = pattern.clone();
    declared.match_threshold = Some(60);
    assert_eq!(settings.threshold_for(&declared), 60);

    settings
        .match_threshold_overrides
        .insert(RATE_LIMITING.to_string(), 90);
    assert_eq!(settings.threshold_for(&declared), 90);
}

#[test]
fn settings_module_loads_and_validates_yaml_files() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("engine.yaml");
    fs::write(
        &path,
        concat!(
            "sampleLimit: 3\n",
            "defaultMatchThreshold: 80\n",
            "matchThresholdOverrides:\n",
            "  operation-timeout: 60\n",
            "timingProximityFraction: 0.9\n",
        ),
    )
    .expect("write settings file");

    let settings = load_engine_settings(&path).expect("load settings");
    assert_eq!(settings.sample_limit, 3);
    assert_eq!(settings.default_match_threshold, 80);
    assert_eq!(
        settings.match_threshold_overrides.get(OPERATION_TIMEOUT),
        Some(&60)
    );
    assert_eq!(settings.timing_proximity_fraction, 0.9);
    assert_eq!(settings.min_inconsistency_samples, 2);
}

#[test]
fn settings_module_reports_read_and_parse_failures() {
    let dir = tempdir().expect("tempdir");

    let missing = dir.path().join("absent.yaml");
    let err = load_engine_settings(&missing).expect_err("must fail on missing file");
    assert!(matches!(err, ConfigError::Read { .. }));

    let invalid = dir.path().join("broken.yaml");
    fs::write(&invalid, "sampleLimit: [not, a, number").expect("write settings file");
    let err = load_engine_settings(&invalid).expect_err("must fail on bad yaml");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn settings_module_rejects_out_of_range_policies() {
    let mut settings = EngineSettings::default();
    settings.default_match_threshold = 120;
    assert!(matches!(
        validate_engine_settings(&settings),
        Err(ConfigError::Settings(_))
    ));

    let mut settings = EngineSettings::default();
    settings.timing_proximity_fraction = 0.0;
    assert!(validate_engine_settings(&settings).is_err());

    let mut settings = EngineSettings::default();
    settings.sample_limit = 0;
    assert!(validate_engine_settings(&settings).is_err());

    let mut settings = EngineSettings::default();
    settings.min_inconsistency_samples = 0;
    assert!(validate_engine_settings(&settings).is_err());

    let mut settings = EngineSettings::default();
    settings
        .match_threshold_overrides
        .insert(RATE_LIMITING.to_string(), 101);
    assert!(validate_engine_settings(&settings).is_err());
}

#[test]
fn settings_module_rejects_duplicate_and_self_referential_policies() {
    let mut settings = EngineSettings::default();
    settings.pattern_priority.push(SESSION_VISIBILITY.to_string());
    assert!(validate_engine_settings(&settings).is_err());

    let mut settings = EngineSettings::default();
    settings.consequence_adjacency = vec![ConsequenceRule {
        upstream: RATE_LIMITING.to_string(),
        downstream: RATE_LIMITING.to_string(),
    }];
    assert!(validate_engine_settings(&settings).is_err());
}
