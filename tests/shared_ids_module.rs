use traceclaw::shared::{ExecutionId, NodeName, PatternId, WorkflowId};

#[test]
fn ids_module_accepts_identifier_charset() {
    let id = ExecutionId::parse("exec-10.42_a").expect("valid execution id");
    assert_eq!(id.as_str(), "exec-10.42_a");
    assert_eq!(id.to_string(), "exec-10.42_a");

    let id = WorkflowId::parse("wf-orders").expect("valid workflow id");
    assert_eq!(id.as_str(), "wf-orders");

    let id = PatternId::parse("session-visibility").expect("valid pattern id");
    assert_eq!(id.as_str(), "session-visibility");
}

#[test]
fn ids_module_rejects_empty_and_exotic_identifiers() {
    assert!(ExecutionId::parse("").is_err());
    assert!(WorkflowId::parse("wf orders").is_err());
    assert!(PatternId::parse("pattern!").is_err());
}

#[test]
fn ids_module_allows_spaces_in_node_names() {
    let name = NodeName::parse("Execute Command").expect("valid node name");
    assert_eq!(name.as_str(), "Execute Command");
    assert!(NodeName::parse("").is_err());
    assert!(NodeName::parse("   ").is_err());
}

#[test]
fn ids_module_round_trips_through_serde() {
    let id: PatternId = serde_json::from_str("\"rate-limiting\"").expect("deserialize id");
    assert_eq!(id.as_str(), "rate-limiting");
    assert_eq!(serde_json::to_string(&id).expect("serialize id"), "\"rate-limiting\"");

    let err = serde_json::from_str::<PatternId>("\"not valid!\"").expect_err("must reject");
    assert!(err.to_string().contains("pattern id"));
}
