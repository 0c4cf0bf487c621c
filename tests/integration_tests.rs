use serde::{Deserialize, Serialize};
use serde_dcf::{
    from_section, from_str, parse, to_section, to_string, to_value, DcfOptions, Error, Section,
    Value,
};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Backend {
    Memory,
    Disk { path: String, sync: bool },
    Remote(String),
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Storage {
    primary: Backend,
    fallbacks: Vec<Backend>,
}

fn order() -> Order {
    Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.5,
                quantity: 1,
            },
        ],
        total: 109.48,
    }
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let text = to_string(&user).unwrap();
    let user_back: User = from_str(&text).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let text = to_string(&order()).unwrap();
    let order_back: Order = from_str(&text).unwrap();
    assert_eq!(order(), order_back);
}

#[test]
fn test_enums_round_trip() {
    let storage = Storage {
        primary: Backend::Disk {
            path: "/var/lib/app".to_string(),
            sync: true,
        },
        fallbacks: vec![Backend::Memory, Backend::Remote("10.0.0.2".to_string())],
    };

    let text = to_string(&storage).unwrap();
    assert!(text.contains("Memory"));
    let back: Storage = from_str(&text).unwrap();
    assert_eq!(storage, back);
}

#[test]
fn test_hand_written_document() {
    let text = r#"
        // Order exported by hand
        {
            order_id: 0x3039,
            /* the buyer */
            customer: {
                id: 0b1111011,
                name: "Alice",
                active: True,
                tags: [ "vip" ]
            },
            items: [
                { sku: "WIDGET-001", price: 29.99, quantity: 2 },
                { quantity: 1, price: 49.5, sku: "GADGET-002" }
            ],
            total: 109.48
        }
    "#;

    let parsed: Order = from_str(text).unwrap();
    assert_eq!(parsed, order());
}

#[test]
fn test_section_converts_to_struct() {
    let mut section = Section::new();
    section.set("sku", "X-1");
    section.set("price", 3);
    section.set("quantity", 7);

    let product: Product = from_section(section).unwrap();
    assert_eq!(product.price, 3.0);
    assert_eq!(product.quantity, 7);
}

#[test]
fn test_to_value_of_map() {
    let mut map = BTreeMap::new();
    map.insert("b".to_string(), vec![1, 2]);
    map.insert("a".to_string(), vec![]);

    let value = to_value(&map).unwrap();
    let section = value.as_section().unwrap();
    assert_eq!(section.keys(), vec!["a", "b"]);
    assert_eq!(section.get("a").unwrap(), &Value::Array(vec![]));
}

#[test]
fn test_missing_field_reports_error() {
    let err = from_str::<Product>("{ sku: \"X\", price: 1.0 }").unwrap_err();
    assert!(err.to_string().contains("quantity"));
}

#[test]
fn test_parse_error_propagates_through_from_str() {
    let err = from_str::<Product>("{ sku: \"X\",\n  price: }").unwrap_err();
    assert!(err.is_parse());
    assert_eq!((err.line(), err.column()), (Some(2), Some(10)));
}

#[test]
fn test_literal_and_layout_examples() {
    assert_eq!(parse("{ a: -0x1A }").unwrap().get("a").unwrap(), &Value::Integer(-26));
    assert_eq!(parse("{ a: 0b101 }").unwrap().get("a").unwrap(), &Value::Integer(5));
    assert_eq!(
        parse("{ a: -3.14e2 }").unwrap().get("a").unwrap(),
        &Value::Double(-314.0)
    );

    assert_eq!(
        parse("{ a: }").unwrap_err(),
        Error::parse("value", "'}'", 1, 6)
    );

    assert_eq!(parse("{}").unwrap().to_string(), "{}");
    assert_eq!(parse("{ a: [] }").unwrap().to_string(), "{\n    a: []\n}");
}

#[test]
fn test_truncated_document_reports_last_token_position() {
    let err = parse("{ a: 1\n\n\n").unwrap_err();
    assert!(err.is_parse());
    assert_eq!((err.line(), err.column()), (Some(1), Some(7)));

    let err = parse("{\n  a: [1, 2 // open\n\n").unwrap_err();
    assert_eq!((err.line(), err.column()), (Some(2), Some(19)));
}

#[test]
fn test_map_with_integer_keys_is_not_written() {
    #[derive(Serialize)]
    struct Ports {
        by_id: BTreeMap<u32, String>,
    }

    let mut by_id = BTreeMap::new();
    by_id.insert(1, "one".to_string());
    let ports = Ports { by_id };

    assert!(matches!(to_string(&ports), Err(Error::UnsupportedType(_))));
    assert!(to_value(&ports).is_ok());
}

#[test]
fn test_header_binds_only_to_next_key() {
    let section = parse("{ // note\n a: 1 }").unwrap();
    assert_eq!(section.header("a").unwrap(), "note");

    let section = parse("{ x: 0, // for a\n a: 1 }").unwrap();
    assert_eq!(section.header("x").unwrap(), "");
    assert_eq!(section.header("a").unwrap(), "for a");
}

#[test]
fn test_round_trip_keeps_headers_and_order() {
    let text = "{\n    // Listen address\n    host: \"0.0.0.0\",\n    port: 8080,\n\n    // Nested\n    // options\n    tls: {\n        enabled: false,\n        ciphers: []\n    }\n}";

    let section = parse(text).unwrap();
    assert_eq!(section.to_string(), text);
    assert_eq!(section.keys(), vec!["host", "port", "tls"]);
    assert_eq!(section.header("tls").unwrap(), "Nested\noptions");
}

#[test]
fn test_edits_after_parse() {
    let mut section = parse("{ a: 1, b: { c: [1, 2] } }").unwrap();

    section.set("a", "one");
    section
        .get_mut("b")
        .unwrap()
        .as_section_mut()
        .unwrap()
        .get_mut("c")
        .unwrap()
        .as_array_mut()
        .unwrap()
        .push(Value::from(3));
    assert!(section.remove("missing").is_none());
    section.set_header("b", "edited").unwrap();

    let back = parse(&section.to_string()).unwrap();
    assert_eq!(back, section);
    assert_eq!(
        back.get("b").unwrap().as_section().unwrap().get("c").unwrap(),
        &Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)])
    );
}

#[test]
fn test_json_bridge_keeps_order() {
    let section = parse(r#"{ zeta: 1, alpha: [true, 2.5], mid: { z: "x", a: "y" } }"#).unwrap();

    let json = serde_json::to_string(&section).unwrap();
    assert_eq!(
        json,
        r#"{"zeta":1,"alpha":[true,2.5],"mid":{"z":"x","a":"y"}}"#
    );

    let from_json: Section = serde_json::from_str(&json).unwrap();
    assert_eq!(from_json, section);
}

#[test]
fn test_json_null_is_rejected_for_value() {
    assert!(serde_json::from_str::<Value>("null").is_err());
    assert!(serde_json::from_str::<Section>("[1]").is_err());
}

#[test]
fn test_to_section_then_indent() {
    let section = to_section(&order()).unwrap();
    let narrow = section.to_string_with_options(&DcfOptions::new().with_indent(2));
    let wide = section.to_string_indented(8).unwrap();
    assert_eq!(parse(&narrow).unwrap(), parse(&wide).unwrap());
    assert!(matches!(
        section.to_string_indented(-2),
        Err(Error::InvalidConfiguration(_))
    ));
}
