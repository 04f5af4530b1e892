use std::collections::BTreeMap;

use serde::Serialize;

/// A value held by the store or handed to the validator.
///
/// `Null` is the absence marker. The store never holds it at the top level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataType {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    List(Vec<DataType>),
    Map(BTreeMap<String, DataType>),
}

impl DataType {
    pub fn is_null(&self) -> bool {
        matches!(self, DataType::Null)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DataType::Null => "null",
            DataType::Boolean(_) => "boolean",
            DataType::Integer(_) => "integer",
            DataType::Double(_) => "double",
            DataType::String(_) => "string",
            DataType::List(_) => "list",
            DataType::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataType::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, DataType>> {
        match self {
            DataType::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Render a scalar as a trimmed string. `Null` becomes the empty
    /// string; lists and maps have no string form.
    pub fn coerce_to_string(&self) -> Option<String> {
        let raw = match self {
            DataType::Null => String::new(),
            DataType::Boolean(b) => b.to_string(),
            DataType::Integer(i) => i.to_string(),
            DataType::Double(d) => d.to_string(),
            DataType::String(s) => s.clone(),
            DataType::List(_) | DataType::Map(_) => return None,
        };
        Some(raw.trim().to_string())
    }
}

impl From<String> for DataType {
    fn from(s: String) -> Self {
        DataType::String(s)
    }
}

impl From<&str> for DataType {
    fn from(s: &str) -> Self {
        DataType::String(s.to_string())
    }
}

impl From<i64> for DataType {
    fn from(i: i64) -> Self {
        DataType::Integer(i)
    }
}

impl From<i32> for DataType {
    fn from(i: i32) -> Self {
        DataType::Integer(i64::from(i))
    }
}

impl From<f64> for DataType {
    fn from(f: f64) -> Self {
        DataType::Double(f)
    }
}

impl From<bool> for DataType {
    fn from(b: bool) -> Self {
        DataType::Boolean(b)
    }
}

impl<T: Into<DataType>> From<Option<T>> for DataType {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataType::Null, Into::into)
    }
}

impl<T: Into<DataType>> From<Vec<T>> for DataType {
    fn from(items: Vec<T>) -> Self {
        DataType::List(items.into_iter().map(Into::into).collect())
    }
}

impl<const N: usize> From<[&str; N]> for DataType {
    fn from(items: [&str; N]) -> Self {
        DataType::List(items.iter().map(|s| DataType::from(*s)).collect())
    }
}

impl From<&[&str]> for DataType {
    fn from(items: &[&str]) -> Self {
        DataType::List(items.iter().map(|s| DataType::from(*s)).collect())
    }
}

impl From<BTreeMap<String, DataType>> for DataType {
    fn from(map: BTreeMap<String, DataType>) -> Self {
        DataType::Map(map)
    }
}

impl From<serde_json::Value> for DataType {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => DataType::Null,
            Value::Bool(b) => DataType::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => DataType::Integer(i),
                // u64 beyond i64::MAX and floats
                None => DataType::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => DataType::String(s),
            Value::Array(items) => DataType::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                DataType::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
