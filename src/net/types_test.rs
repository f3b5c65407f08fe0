use super::*;
use serde_json::json;

#[test]
fn user_record_is_transparent_json() {
    let record: UserRecord = serde_json::from_value(json!({"id": 1, "username": "ada"})).unwrap();
    assert_eq!(record.field("username"), Some(&json!("ada")));
    assert_eq!(serde_json::to_value(&record).unwrap(), json!({"id": 1, "username": "ada"}));
}

#[test]
fn user_record_accepts_non_object_values() {
    let record = UserRecord::from(json!("just-a-name"));
    assert!(record.field("id").is_none());
}

#[test]
fn verify_request_serializes_token_field() {
    let body = serde_json::to_value(VerifyTokenRequest { token: "abc" }).unwrap();
    assert_eq!(body, json!({"token": "abc"}));
}
