use enwrap::ExtraData;
use serde::Serialize;
use serde_json::{json, Map, Value};

#[test]
fn from_json_accepts_objects_as_they_are() {
    let data = ExtraData::from_json(json!({ "a": 1, "b": [2] }));

    assert_eq!(data.len(), 2);
    assert!(data.contains_key("b"));
    assert_eq!(data.to_json(), json!({ "a": 1, "b": [2] }));
}

#[test]
fn from_json_wraps_other_values() {
    assert_eq!(ExtraData::from_json(json!(5)).get("value"), Some(&json!(5)));
    assert!(ExtraData::from_json(Value::Null).is_empty());
    assert_eq!(ExtraData::from(json!([1])).to_json(), json!({ "value": [1] }));
}

#[test]
fn from_serialize_uses_struct_fields() {
    #[derive(Serialize)]
    struct Request<'a> {
        path: &'a str,
        retries: u8,
    }

    let data = ExtraData::from_serialize(&Request { path: "/users", retries: 2 }).unwrap();
    assert_eq!(data.get("path"), Some(&json!("/users")));
    assert_eq!(data.get("retries"), Some(&json!(2)));
}

#[test]
fn from_fields_is_none_when_empty() {
    assert!(ExtraData::from_fields([]).is_none());

    let data = ExtraData::from_fields([("id", json!(1))]).unwrap();
    assert_eq!(data.len(), 1);
}

#[test]
fn collects_from_pairs() {
    let data: ExtraData = [("b", 2), ("a", 1)].into_iter().collect();

    let keys: Vec<&String> = data.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(data.to_string(), r#"{"a":1,"b":2}"#);
}

#[test]
fn clones_share_the_same_content() {
    let mut map = Map::new();
    map.insert("k".to_owned(), json!("v"));
    let data = ExtraData::from(map);
    let copy = data.clone();

    assert_eq!(copy, data);
    assert_eq!(copy.as_map(), data.as_map());
    assert_eq!((&copy).into_iter().count(), 1);
}

#[test]
fn serializes_as_a_plain_object() {
    let data: ExtraData = [("field", "x")].into_iter().collect();

    assert_eq!(serde_json::to_value(&data).unwrap(), json!({ "field": "x" }));
}
