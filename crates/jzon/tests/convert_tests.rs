use jzon::{from_node, parse_str, to_node, Node};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Address {
    street: String,
    zip: u32,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Person {
    #[serde(rename = "full_name")]
    name: String,
    age: i64,
    height: f64,
    tags: Vec<String>,
    address: Option<Address>,
    #[serde(skip)]
    session: u64,
}

fn person() -> Person {
    Person {
        name: "Ada Lovelace".to_string(),
        age: 36,
        height: 1.65,
        tags: vec!["math".to_string(), "engines".to_string()],
        address: Some(Address {
            street: "St James's Square".to_string(),
            zip: 12345,
        }),
        session: 99,
    }
}

// ============================================================================
// Struct <-> Node
// ============================================================================

#[test]
fn struct_to_node_follows_serde_attributes() {
    let node = to_node(&person()).unwrap();
    assert_eq!(
        node.keys().unwrap(),
        ["full_name", "age", "height", "tags", "address"]
    );
    assert_eq!(node.query("$.full_name").unwrap(), &Node::from("Ada Lovelace"));
    assert_eq!(node.query("$.age").unwrap(), &Node::Integer(36));
    assert_eq!(node.query("$.height").unwrap(), &Node::Float(1.65));
    assert_eq!(node.query("$.address.zip").unwrap(), &Node::Integer(12345));
    assert!(!node.search("$.session"));
}

#[test]
fn node_to_struct_round_trip() {
    let original = person();
    let node = to_node(&original).unwrap();
    let back: Person = from_node(&node).unwrap();
    assert_eq!(back.name, original.name);
    assert_eq!(back.tags, original.tags);
    assert_eq!(back.address, original.address);
    assert_eq!(back.session, 0);
}

#[test]
fn parsed_text_deserializes_into_struct() {
    let node = parse_str(
        r#"{"full_name":"Grace","age":85,"height":1.6,"tags":[],"address":null}"#,
    )
    .unwrap();
    let p: Person = from_node(&node).unwrap();
    assert_eq!(p.name, "Grace");
    assert_eq!(p.address, None);
}

#[test]
fn type_mismatch_surfaces_as_json_error() {
    let node = parse_str(r#"{"street":"x","zip":"not a number"}"#).unwrap();
    let err = from_node::<Address>(&node).unwrap_err();
    assert!(matches!(err, jzon::JzonError::Json(_)), "{err}");
}

// ============================================================================
// serde_json::Value bridge
// ============================================================================

#[test]
fn value_conversions_preserve_order_and_kinds() {
    let value = json!({"z": 1, "a": [1.5, null, true, "s"], "m": {}});
    let node = Node::from(value.clone());
    assert_eq!(node.keys().unwrap(), ["z", "a", "m"]);
    assert_eq!(node.query("$.z").unwrap(), &Node::Integer(1));
    assert_eq!(node.query("$.a[0]").unwrap(), &Node::Float(1.5));
    assert_eq!(Value::from(&node), value);
}

#[test]
fn large_unsigned_becomes_float() {
    let node = Node::from(json!(u64::MAX));
    assert_eq!(node, Node::Float(u64::MAX as f64));
}

#[test]
fn non_finite_float_becomes_null_value() {
    assert_eq!(Value::from(Node::Float(f64::NAN)), Value::Null);
}

// ============================================================================
// Node as a serde type
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    kind: String,
    payload: Node,
}

#[test]
fn node_embeds_in_derived_structs() {
    let text = r#"{"kind":"event","payload":{"id":7,"ratio":0.5,"tags":["a"],"extra":null}}"#;
    let envelope: Envelope = serde_json::from_str(text).unwrap();
    assert_eq!(envelope.payload.query("$.id").unwrap(), &Node::Integer(7));
    assert_eq!(envelope.payload.query("$.ratio").unwrap(), &Node::Float(0.5));
    assert_eq!(serde_json::to_string(&envelope).unwrap(), text);
}

#[test]
fn node_serializes_like_its_compact_form() {
    let node = parse_str(r#"{"b":[1,2.5,"x",false,null],"a":{}}"#).unwrap();
    assert_eq!(serde_json::to_string(&node).unwrap(), node.to_compact_string());
}
