use serde_json::{json, Value};
use teambox::resolution::{materialize, Materialized};
use teambox::types::{Project, User};

/// An activity timeline as the server ships it: activities point at users,
/// projects and the commented target, all deduplicated into `references`.
fn activity_timeline() -> Value {
    json!({
        "objects": [
            {
                "id": 301, "type": "Activity", "action": "create",
                "user_id": 9, "project_id": 3, "target_id": 77,
                "target_type": "Comment", "created_at": "2011-05-02 10:00:00 +0000"
            },
            {
                "id": 302, "type": "Activity", "action": "create",
                "user_id": 10, "project_id": 3, "target_id": 78,
                "target_type": "Comment", "created_at": "2011-05-02 11:00:00 +0000"
            },
            {
                "id": 303, "type": "Activity", "action": "edit",
                "user_id": 9, "project_id": 3, "target_id": 5,
                "target_type": "Task", "created_at": "2011-05-02 12:00:00 +0000"
            }
        ],
        "references": [
            {"type": "User", "id": 9, "username": "alice", "first_name": "Alice", "locale": "en"},
            {"type": "User", "id": 10, "username": "bob", "first_name": "Bob", "locale": "es"},
            {"type": "Project", "id": 3, "name": "Apollo", "permalink": "apollo",
             "organization_id": 1, "archived": false},
            {"type": "Comment", "id": 77, "body": "first!", "user_id": 9}
        ]
    })
}

#[test]
fn test_activity_timeline_end_to_end() {
    let result = materialize(activity_timeline()).unwrap();
    let records = result.records().expect("timeline should materialize");
    assert_eq!(records.len(), 3);
    assert_eq!(records.index().len(), 4);

    let ids: Vec<_> = records.iter().map(|r| r.scalar("id").cloned()).collect();
    assert_eq!(ids, vec![Some(json!(301)), Some(json!(302)), Some(json!(303))]);

    let authors: Vec<String> = records
        .iter()
        .map(|r| {
            let user: User = r.reference("user_id").unwrap().project().unwrap();
            user.username.unwrap()
        })
        .collect();
    assert_eq!(authors, vec!["alice", "bob", "alice"]);

    let project: Project = records
        .get(2)
        .unwrap()
        .reference("project_id")
        .unwrap()
        .project()
        .unwrap();
    assert_eq!(project.name.as_deref(), Some("Apollo"));
    assert_eq!(project.organization_id, Some(1));
}

#[test]
fn test_target_id_resolves_only_where_a_target_reference_exists() {
    // `target_id` points at type "target", which the server never ships, so
    // it stays unresolved while the record remains usable.
    let result = materialize(activity_timeline()).unwrap();
    let records = result.records().unwrap();
    let first = records.get(0).unwrap();

    assert!(first.resolve("target_id").is_err());
    assert_eq!(first.scalar("target_type"), Some(&json!("Comment")));
    assert_eq!(first.reference("target_id").unwrap().to_string(), "<target obj (77)>");
    assert_eq!(first.resolve("project_id").unwrap()["permalink"], "apollo");
}

#[test]
fn test_referenced_entities_keep_their_own_foreign_keys_raw() {
    // Only primary objects are decorated; reference attributes come back as
    // shipped.
    let result = materialize(activity_timeline()).unwrap();
    let records = result.records().unwrap();
    let comments = records.index().get("comment", 77).unwrap();
    assert_eq!(comments["user_id"], 9);
}

#[test]
fn test_expanded_output_round_trips_through_json() {
    let result = materialize(activity_timeline()).unwrap();
    let records = result.records().unwrap();

    let expanded: Vec<Value> = records
        .iter()
        .map(|r| Value::Object(r.expand()))
        .collect();
    let text = serde_json::to_string(&expanded).unwrap();
    let parsed: Vec<Value> = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed[1]["user_id"]["username"], "bob");
    assert_eq!(parsed[1]["project_id"]["name"], "Apollo");
    assert_eq!(parsed[1]["target_id"], 78);
}

#[test]
fn test_single_object_response_passes_through() {
    let body = json!({"id": 3, "type": "Project", "name": "Apollo", "organization_id": 1});
    match materialize(body.clone()).unwrap() {
        Materialized::Raw(raw) => assert_eq!(raw, body),
        Materialized::Records(_) => panic!("single objects are not two-list responses"),
    }
}
