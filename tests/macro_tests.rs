use objson::{to_string, value, Value};

#[test]
fn test_value_macro_null() {
    assert!(value!(null).is_none());
    assert_eq!(to_string(&value!(null)).unwrap(), "null");
}

#[test]
fn test_value_macro_booleans() {
    assert_eq!(value!(true).as_bool(), Some(true));
    assert_eq!(value!(false).as_bool(), Some(false));
}

#[test]
fn test_value_macro_numbers() {
    assert_eq!(value!(42).as_i64(), Some(42));
    assert_eq!(value!(-123).as_i64(), Some(-123));
    assert_eq!(value!(3.5).as_f64(), Some(3.5));
    assert!(matches!(value!(u64::MAX), Value::BigInt(_)));
}

#[test]
fn test_value_macro_strings() {
    assert_eq!(value!("hello world").as_str(), Some("hello world"));
    assert_eq!(value!("").as_str(), Some(""));
    assert_eq!(value!(String::from("owned")).as_str(), Some("owned"));
}

#[test]
fn test_value_macro_arrays() {
    assert!(matches!(value!([]), Value::List(ref items) if items.is_empty()));

    let mixed = value!([1, "hello", true, null]);
    assert_eq!(to_string(&mixed).unwrap(), r#"[1,"hello",true,null]"#);

    let negatives = value!([(-1), (-2.5)]);
    assert_eq!(to_string(&negatives).unwrap(), "[-1,-2.5]");
}

#[test]
fn test_value_macro_objects() {
    assert!(matches!(value!({}), Value::Dict(ref dict) if dict.is_empty()));

    let person = value!({"name": "Alice", "age": 30, "active": true});
    assert_eq!(
        to_string(&person).unwrap(),
        r#"{"name":"Alice","age":30,"active":true}"#
    );
}

#[test]
fn test_value_macro_nested() {
    let doc = value!({
        "users": [
            {"id": 1, "tags": ["admin"]},
            {"id": 2, "tags": []}
        ],
        "meta": {"total": 2, "next": null}
    });
    assert_eq!(
        to_string(&doc).unwrap(),
        r#"{"users":[{"id":1,"tags":["admin"]},{"id":2,"tags":[]}],"meta":{"total":2,"next":null}}"#
    );
}

#[test]
fn test_value_macro_trailing_commas() {
    let list = value!([1, 2,]);
    let dict = value!({"a": 1,});
    assert_eq!(to_string(&list).unwrap(), "[1,2]");
    assert_eq!(to_string(&dict).unwrap(), r#"{"a":1}"#);
}

#[test]
fn test_value_macro_expressions() {
    let n = 7i64;
    let name = "x";
    let inner = value!([1]);
    let doc = value!({"n": n, "name": name, "inner": inner});
    assert_eq!(to_string(&doc).unwrap(), r#"{"n":7,"name":"x","inner":[1]}"#);
}

#[test]
fn test_value_macro_preserves_key_order() {
    let doc = value!({"z": 1, "a": 2, "m": 3});
    let keys: Vec<String> = doc
        .as_dict()
        .unwrap()
        .keys()
        .map(|key| key.to_string())
        .collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}
