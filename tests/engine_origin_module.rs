use serde_json::json;
use traceclaw::config::EngineSettings;
use traceclaw::engine::{locate_origin, OriginBasis};
use traceclaw::shared::PatternId;
use traceclaw::signatures::{
    CausalDirection, EvidenceCheck, MessageSignature, RemediationClass, SignatureLibrary,
    SignaturePattern, WeightedCheck, EXPRESSION_REFERENCE, RATE_LIMITING, SESSION_VISIBILITY,
};
use traceclaw::trace::ExecutionTrace;

fn remote_shell_trace() -> ExecutionTrace {
    let record = json!({
        "executionId": "exec-1",
        "workflowId": "wf-1",
        "status": "error",
        "path": [
            {"name": "Webhook", "typeTag": "webhook-source", "resultStatus": "success"},
            {"name": "Clean Input", "typeTag": "transform", "resultStatus": "success"},
            {"name": "Write File", "typeTag": "remote-shell", "resultStatus": "success"},
            {"name": "Execute Command", "typeTag": "remote-shell", "resultStatus": "error"}
        ],
        "failure": {"nodeRef": "Execute Command", "message": "file does not exist"}
    });
    ExecutionTrace::from_value(record, 2).expect("build trace")
}

fn inconsistent_sample_trace() -> ExecutionTrace {
    let record = json!({
        "executionId": "exec-2",
        "workflowId": "wf-1",
        "status": "error",
        "path": [
            {
                "name": "Webhook",
                "typeTag": "webhook-source",
                "resultStatus": "success",
                "outputSample": [{"body": {"email": "a@x.com"}}, {"body": {}}]
            },
            {
                "name": "Enrich",
                "typeTag": "transform",
                "resultStatus": "success",
                "outputSample": [{"body": {"email": "a@x.com"}}, {"body": {}}]
            },
            {"name": "Set Email", "typeTag": "transform", "resultStatus": "error"}
        ],
        "failure": {
            "nodeRef": "Set Email",
            "message": "cannot read property email of undefined",
            "failingExpression": "body.email"
        }
    });
    ExecutionTrace::from_value(record, 2).expect("build trace")
}

fn symptom_index(trace: &ExecutionTrace) -> usize {
    let failure = trace.failure.as_ref().expect("failure event");
    trace
        .index_of(failure.node_ref.as_str())
        .expect("symptom node in path")
}

#[test]
fn origin_module_attributes_structural_failures_to_the_nearest_producer() {
    let library = SignatureLibrary::builtin().expect("builtin catalog");
    let settings = EngineSettings::default();
    let trace = remote_shell_trace();
    let failure = trace.failure.as_ref().expect("failure event");

    let finding = locate_origin(
        &trace,
        failure,
        symptom_index(&trace),
        library.get(SESSION_VISIBILITY),
        &settings,
    );

    assert_eq!(finding.node.as_str(), "Write File");
    assert_eq!(finding.index, 2);
    assert!(matches!(
        finding.basis,
        OriginBasis::ProducerRole { type_tag } if type_tag == "remote-shell"
    ));
}

#[test]
fn origin_module_prefers_the_nearest_inconsistent_upstream_node() {
    let library = SignatureLibrary::builtin().expect("builtin catalog");
    let settings = EngineSettings::default();
    let trace = inconsistent_sample_trace();
    let failure = trace.failure.as_ref().expect("failure event");

    let finding = locate_origin(
        &trace,
        failure,
        symptom_index(&trace),
        library.get(EXPRESSION_REFERENCE),
        &settings,
    );

    assert_eq!(finding.node.as_str(), "Enrich");
    assert_eq!(finding.index, 1);
    assert!(matches!(
        finding.basis,
        OriginBasis::SampleInconsistency { field } if field == "body.email"
    ));
}

#[test]
fn origin_module_falls_back_to_the_symptom_node_without_qualifying_candidates() {
    let library = SignatureLibrary::builtin().expect("builtin catalog");
    let settings = EngineSettings::default();
    let record = json!({
        "executionId": "exec-3",
        "workflowId": "wf-1",
        "status": "error",
        "path": [
            {"name": "Webhook", "typeTag": "webhook-source", "resultStatus": "success"},
            {"name": "Fetch", "typeTag": "http-call", "resultStatus": "error"}
        ],
        "failure": {"nodeRef": "Fetch", "message": "429 Too Many Requests", "code": "429"}
    });
    let trace = ExecutionTrace::from_value(record, 2).expect("build trace");
    let failure = trace.failure.as_ref().expect("failure event");

    let finding = locate_origin(
        &trace,
        failure,
        symptom_index(&trace),
        library.get(RATE_LIMITING),
        &settings,
    );

    assert_eq!(finding.node.as_str(), "Fetch");
    assert_eq!(finding.index, 1);
    assert_eq!(finding.basis, OriginBasis::SymptomLocal);
}

#[test]
fn origin_module_defaults_to_an_inconsistency_search_when_unclassified() {
    let settings = EngineSettings::default();
    let trace = inconsistent_sample_trace();
    let failure = trace.failure.as_ref().expect("failure event");

    let finding = locate_origin(&trace, failure, symptom_index(&trace), None, &settings);

    assert_eq!(finding.node.as_str(), "Enrich");
    assert!(matches!(finding.basis, OriginBasis::SampleInconsistency { .. }));
}

#[test]
fn origin_module_stays_local_for_at_symptom_patterns() {
    let settings = EngineSettings::default();
    let trace = inconsistent_sample_trace();
    let failure = trace.failure.as_ref().expect("failure event");
    let local_pattern = SignaturePattern {
        id: PatternId::parse("local-misconfiguration").expect("valid pattern id"),
        display_name: "Local misconfiguration".to_string(),
        checks: vec![WeightedCheck {
            weight: 80,
            check: EvidenceCheck::MessageSignature(
                MessageSignature::compile(&[r"(?i)cannot read"]).expect("compile"),
            ),
        }],
        match_threshold: None,
        causal_direction: CausalDirection::AtSymptom,
        remediation_class: RemediationClass::ExpressionGuard,
    };

    let finding = locate_origin(
        &trace,
        failure,
        symptom_index(&trace),
        Some(&local_pattern),
        &settings,
    );

    assert_eq!(finding.node.as_str(), "Set Email");
    assert_eq!(finding.basis, OriginBasis::SymptomLocal);
}

#[test]
fn origin_module_always_returns_a_node_inside_the_path() {
    let library = SignatureLibrary::builtin().expect("builtin catalog");
    let settings = EngineSettings::default();
    for trace in [remote_shell_trace(), inconsistent_sample_trace()] {
        let failure = trace.failure.as_ref().expect("failure event");
        for pattern in library.patterns() {
            let finding = locate_origin(
                &trace,
                failure,
                symptom_index(&trace),
                Some(pattern),
                &settings,
            );
            let node = trace.node_at(finding.index).expect("index within path");
            assert_eq!(node.name, finding.node);
        }
    }
}
