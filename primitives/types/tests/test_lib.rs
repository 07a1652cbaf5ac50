use types::*;

#[test]
fn test_database_kind_names_and_ports() {
    assert_eq!(DatabaseKind::Postgres.to_string(), "pg");
    assert_eq!(DatabaseKind::Sqlite.to_string(), "sqlite3");
    assert_eq!(DatabaseKind::Postgres.default_port(), Some(5432));
    assert_eq!(DatabaseKind::Sqlite.default_port(), None);
}

#[test]
fn test_database_kind_serde_names() {
    let kind: DatabaseKind = serde_json::from_str("\"sqlite3\"").expect("sqlite3 should parse");
    assert_eq!(kind, DatabaseKind::Sqlite);
    assert_eq!(serde_json::to_string(&DatabaseKind::Postgres).expect("serialize"), "\"pg\"");
}

#[test]
fn test_artifact_format_extensions() {
    assert_eq!(ArtifactFormat::Ts.extension(), "ts");
    assert_eq!(ArtifactFormat::Js.extension(), "js");
    assert_eq!(ArtifactFormat::Graphql.extension(), "graphql");
    assert_eq!(ArtifactFormat::Graphql.to_string(), "graphql");
    assert_eq!(ArtifactFormat::default(), ArtifactFormat::Ts);
}

#[test]
fn test_backend_bundle_from_generator_json() {
    let json = r#"{
        "schema": "type Query { notes: [Note] }",
        "resolvers": {
            "custom": [{ "name": "foo", "output": "X" }],
            "index": "IDX"
        }
    }"#;

    let bundle: BackendBundle = serde_json::from_str(json).expect("bundle should parse");
    assert_eq!(bundle.schema, "type Query { notes: [Note] }");
    assert_eq!(bundle.resolvers.custom, vec![NamedArtifact::new("foo", "X")]);
    assert!(bundle.resolvers.types.is_empty());
    assert_eq!(bundle.resolvers.index, "IDX");
}

#[test]
fn test_client_bundle_counts() {
    let json = r#"{
        "fragments": [{ "name": "NoteFields", "implementation": "fragment NoteFields on Note { id }" }],
        "queries": [
            { "name": "findNotes", "implementation": "query findNotes { id }" },
            { "name": "getNote", "implementation": "query getNote { id }" }
        ]
    }"#;

    let bundle: ClientBundle = serde_json::from_str(json).expect("bundle should parse");
    assert_eq!(bundle.len(), 3);
    assert!(bundle.mutations.is_empty());
    assert!(bundle.subscriptions.is_empty());
    assert!(!bundle.is_empty());
    assert!(ClientBundle::default().is_empty());
}
