/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Arrays become [`Value::List`](crate::Value::List) and objects become
/// [`Value::Dict`](crate::Value::Dict) with string keys in source order.
/// Anything else is converted with `Value::from`.
///
/// # Examples
///
/// ```rust
/// use objson::{to_string, value};
///
/// let v = value!({"name": "Alice", "tags": ["a", "b"], "score": null});
/// assert_eq!(to_string(&v).unwrap(), r#"{"name":"Alice","tags":["a","b"],"score":null}"#);
/// ```
#[macro_export]
macro_rules! value {
    // Handle null
    (null) => {
        $crate::Value::None
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::List(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::value!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Dict($crate::Dict::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut dict = $crate::Dict::new();
        $(
            dict.insert($key, $crate::value!($value));
        )*
        $crate::Value::Dict(dict)
    }};

    // Any other expression
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::Value;

    #[test]
    fn test_value_macro_primitives() {
        assert!(value!(null).is_none());
        assert_eq!(value!(true).as_bool(), Some(true));
        assert_eq!(value!(false).as_bool(), Some(false));
        assert_eq!(value!(42).as_i64(), Some(42));
        assert_eq!(value!(3.5).as_f64(), Some(3.5));
        assert_eq!(value!("hello").as_str(), Some("hello"));
    }

    #[test]
    fn test_value_macro_arrays() {
        assert!(matches!(value!([]), Value::List(ref items) if items.is_empty()));

        match value!([1, 2, 3]) {
            Value::List(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[2].as_i64(), Some(3));
            }
            _ => panic!("Expected list"),
        }
    }

    #[test]
    fn test_value_macro_objects() {
        assert!(matches!(value!({}), Value::Dict(ref dict) if dict.is_empty()));

        let obj = value!({
            "name": "Alice",
            "age": 30
        });

        match obj {
            Value::Dict(dict) => {
                assert_eq!(dict.len(), 2);
                assert_eq!(dict.get("name").and_then(Value::as_str), Some("Alice"));
                assert_eq!(dict.get("age").and_then(Value::as_i64), Some(30));
            }
            _ => panic!("Expected dict"),
        }
    }
}
