/// Builds a [`Value`](crate::Value) from DCF-like syntax.
///
/// Sections use string-literal keys; anything that is not a nested array or section is
/// converted with `Value::from`. Negative numbers inside arrays and sections need
/// parentheses, e.g. `dcf!([1, (-2)])`.
///
/// ```rust
/// use serde_dcf::{dcf, Value};
///
/// let value = dcf!({
///     "name": "demo",
///     "ports": [80, 443],
///     "tls": { "enabled": true }
/// });
/// let section = value.as_section().unwrap();
/// assert_eq!(section.keys(), vec!["name", "ports", "tls"]);
/// assert_eq!(section.get("ports").unwrap(), &dcf!([80, 443]));
/// ```
#[macro_export]
macro_rules! dcf {
    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::dcf!($elem)),*])
    };

    ({}) => {
        $crate::Value::from($crate::Section::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut section = $crate::Section::new();
        $(
            section.set($key, $crate::dcf!($value));
        )*
        $crate::Value::from(section)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Section, Value};

    #[test]
    fn test_dcf_macro_scalars() {
        assert_eq!(dcf!(true), Value::Bool(true));
        assert_eq!(dcf!(42), Value::Integer(42));
        assert_eq!(dcf!(-7), Value::Integer(-7));
        assert_eq!(dcf!(3.5), Value::Double(3.5));
        assert_eq!(dcf!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_dcf_macro_containers() {
        assert_eq!(dcf!([]), Value::Array(vec![]));
        assert_eq!(dcf!({}), Value::from(Section::new()));

        let value = dcf!({ "b": [1, (-2)], "a": {} });
        let section = value.as_section().unwrap();
        assert_eq!(section.keys(), vec!["b", "a"]);
        assert_eq!(
            section.get("b").unwrap(),
            &Value::Array(vec![Value::Integer(1), Value::Integer(-2)])
        );
    }
}
