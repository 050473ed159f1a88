//! Scalar values and the ordered value map used by INSERT and UPDATE

/// A scalar value destined for an INSERT or UPDATE value map.
///
/// The variant decides how the literal is rendered: integers are always
/// emitted bare, text is always quoted and escaped, and floats follow the
/// builder's [`FloatPolicy`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit integer, rendered as a bare numeric literal
    Int(i64),
    /// 64-bit float, rendering controlled by [`FloatPolicy`]
    Float(f64),
    /// String, rendered as a quoted and escaped literal
    Text(String),
}

/// How floating-point values render as SQL literals.
///
/// The original implementation emitted floats bare in INSERT statements but
/// quoted them like strings in UPDATE statements. That asymmetry is kept as
/// a single explicit policy: INSERT uses `Bare`, UPDATE defaults to `Quoted`
/// and can opt into the corrected `Bare` behavior during migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatPolicy {
    /// Emit floats as bare numeric literals
    #[default]
    Bare,
    /// Emit floats as quoted, escaped string literals (legacy UPDATE behavior)
    Quoted,
}

impl Value {
    /// Render this value as a SQL literal token.
    pub(crate) fn literal<F>(&self, floats: FloatPolicy, escape: F) -> String
    where
        F: Fn(&str) -> String,
    {
        match self {
            Value::Int(i) => i.to_string(),
            Value::Float(f) => match floats {
                FloatPolicy::Bare => f.to_string(),
                FloatPolicy::Quoted => format!("'{}'", escape(&f.to_string())),
            },
            Value::Text(s) => format!("'{}'", escape(s)),
        }
    }
}

// Implement From for common scalar types
impl From<i32> for Value {
    fn from(val: i32) -> Self {
        Value::Int(val as i64)
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::Int(val)
    }
}

impl From<u32> for Value {
    fn from(val: u32) -> Self {
        Value::Int(val as i64)
    }
}

impl From<f32> for Value {
    fn from(val: f32) -> Self {
        Value::Float(val as f64)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Float(val)
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::Text(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::Text(val.to_string())
    }
}

/// An insertion-ordered column-to-value mapping.
///
/// Column order is preserved exactly as set, so the rendered column list and
/// value list of an INSERT stay aligned. Setting a column that is already
/// present replaces its value in place without moving it.
#[derive(Debug, Clone, Default)]
pub struct Values {
    entries: Vec<(String, Value)>,
}

impl Values {
    /// Create an empty value map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, returning the map for chaining.
    ///
    /// # Examples
    /// ```
    /// use sqlcraft_core::Values;
    ///
    /// let values = Values::new().set("name", "Jane").set("age", 25);
    /// assert_eq!(values.len(), 2);
    /// ```
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Values
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Values::new(), |values, (column, value)| {
                values.set(column, value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::escape;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert_eq!(Value::from(1.5f64), Value::Float(1.5));
        assert_eq!(Value::from("hello"), Value::Text("hello".to_string()));
        assert_eq!(Value::from("x".to_string()), Value::Text("x".to_string()));
    }

    #[test]
    fn test_int_literal_is_bare() {
        assert_eq!(Value::Int(30).literal(FloatPolicy::Bare, escape), "30");
        assert_eq!(Value::Int(-7).literal(FloatPolicy::Quoted, escape), "-7");
    }

    #[test]
    fn test_float_literal_follows_policy() {
        let v = Value::Float(1.5);
        assert_eq!(v.literal(FloatPolicy::Bare, escape), "1.5");
        assert_eq!(v.literal(FloatPolicy::Quoted, escape), "'1.5'");
    }

    #[test]
    fn test_text_literal_quoted_and_escaped() {
        let v = Value::from("O'Brien");
        assert_eq!(v.literal(FloatPolicy::Bare, escape), "'O\\'Brien'");
    }

    #[test]
    fn test_values_preserve_insertion_order() {
        let values = Values::new()
            .set("c", 1)
            .set("a", 2)
            .set("b", 3);
        let columns: Vec<&str> = values.iter().map(|(c, _)| c).collect();
        assert_eq!(columns, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_values_overwrite_keeps_position() {
        let values = Values::new()
            .set("name", "John")
            .set("age", 30)
            .set("name", "Jane");
        assert_eq!(values.len(), 2);
        let entries: Vec<(&str, &Value)> = values.iter().collect();
        assert_eq!(entries[0], ("name", &Value::Text("Jane".to_string())));
        assert_eq!(entries[1], ("age", &Value::Int(30)));
    }

    #[test]
    fn test_values_from_iterator() {
        let values: Values = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(values.len(), 2);
        assert!(!values.is_empty());
    }
}
