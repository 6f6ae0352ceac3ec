//! Unit tests for the output envelope writer

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use user_data_downloader::output::{self, UserDataEnvelope};
use user_data_downloader::UserRecord;

fn record(id: u64) -> UserRecord {
    let mut map = UserRecord::new();
    map.insert("id".to_string(), serde_json::json!(id));
    map.insert("name".to_string(), serde_json::json!(format!("user-{id}")));
    map
}

#[test]
fn test_envelope_counts_records() {
    let envelope = UserDataEnvelope::new(vec![record(1), record(2), record(3)]);
    assert_eq!(envelope.total_users, 3);
    assert_eq!(envelope.users.len(), 3);
}

#[test]
fn test_envelope_timestamp_is_rfc3339_utc() {
    let at = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap();
    let envelope = UserDataEnvelope::with_timestamp(Vec::new(), at);
    assert_eq!(envelope.timestamp, "2024-01-15T12:30:00.000Z");

    // A fresh envelope's timestamp must parse back as RFC 3339
    let envelope = UserDataEnvelope::new(Vec::new());
    assert!(DateTime::parse_from_rfc3339(&envelope.timestamp).is_ok());
}

#[test]
fn test_envelope_serializes_expected_fields() {
    let envelope = UserDataEnvelope::new(vec![record(1)]);
    let json: Value = serde_json::from_str(&serde_json::to_string(&envelope).unwrap()).unwrap();

    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(object["total_users"], 1);
    assert!(object["timestamp"].is_string());
    assert_eq!(object["users"][0]["name"], "user-1");
}

#[test]
fn test_save_writes_pretty_json() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("user_data.json");

    output::save(vec![record(1), record(2)], &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains('\n'), "output should be pretty-printed");

    let json: Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["total_users"], 2);
    assert_eq!(json["users"].as_array().unwrap().len(), 2);
}

#[test]
fn test_save_overwrites_prior_content() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("user_data.json");

    output::save(vec![record(1), record(2), record(3)], &path).unwrap();
    output::save(vec![record(9)], &path).unwrap();

    let json: Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["total_users"], 1);
    assert_eq!(json["users"][0]["id"], 9);
}

#[test]
fn test_save_empty_collection() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("user_data.json");

    output::save(Vec::new(), &path).unwrap();

    let json: Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["total_users"], 0);
    assert_eq!(json["users"].as_array().unwrap().len(), 0);
}

#[test]
fn test_save_to_missing_directory_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("no_such_dir").join("user_data.json");

    assert!(output::save(Vec::new(), &path).is_err());
}
