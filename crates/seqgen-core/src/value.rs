//! Scratch values for stateful update rules
//!
//! Function rules get a `ValueMap` they can use to carry arbitrary state
//! between steps (history windows, counters, flags).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A dynamic value stored in a generator's auxiliary state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Ordered list of values, e.g. a sliding history window
    List(Vec<Value>),
    Map(ValueMap),
}

/// Insertion-ordered map of string keys to values
pub type ValueMap = IndexMap<String, Value>;

impl Value {
    /// Numeric view of this value; integers widen to `f64`
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Mutable access to a list, for updating history windows in place
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(vec: Vec<T>) -> Self {
        Value::List(vec.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_views() {
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::Bool(true).as_float(), None);
        assert_eq!(Value::default(), Value::Null);
    }

    #[test]
    fn test_window_shift_in_place() {
        let mut window: Value = vec![1.0f64, 2.0, 3.0].into();
        let list = window.as_list_mut().unwrap();
        list.remove(0);
        list.push(Value::Float(4.0));

        let floats: Vec<f64> = window
            .as_list()
            .unwrap()
            .iter()
            .filter_map(Value::as_float)
            .collect();
        assert_eq!(floats, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_aux_map_ron_round_trip() {
        let mut aux = ValueMap::new();
        aux.insert("calls".into(), 3i64.into());
        aux.insert("label".into(), "warmup".into());
        aux.insert("window".into(), vec![0.5f64, 1.5].into());
        aux.insert("seen".into(), true.into());

        let text = ron::to_string(&aux).unwrap();
        let back: ValueMap = ron::from_str(&text).unwrap();
        assert_eq!(back, aux);
        assert_eq!(
            back.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["calls", "label", "window", "seen"]
        );
    }
}
