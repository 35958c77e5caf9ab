//! Base implementation of records.
use crate::error::ReinforceError;
use std::collections::hash_map::{Iter, Keys};
use std::collections::HashMap;

/// Represents possible types of values in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, typically a metric like the episode return.
    Scalar(f32),

    /// A 1-dimensional array, for example an observation or the parameter vector.
    Array1(Vec<f32>),

    /// A text value.
    String(String),
}

/// A container of key-value pairs of [`RecordValue`]s.
///
/// ```rust
/// use reinforce_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("grad_norm", 0.5);
/// record.insert("params", RecordValue::Array1(vec![0.1, 0.2, 0.3, 0.4]));
///
/// assert_eq!(record.get_scalar("grad_norm").unwrap(), 0.5);
/// assert!(record.get_scalar("params").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        let mut record = Self::empty();
        record.insert(name, RecordValue::Scalar(value));
        record
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair, overwriting the previous value of the key.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value of the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records. Values of `record` win on duplicated keys.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges another record into this one. Values of `record` win on duplicated keys.
    pub fn merge_inplace(&mut self, record: Record) {
        self.0.extend(record.0);
    }

    fn lookup(&self, k: &str) -> Result<&RecordValue, ReinforceError> {
        self.0
            .get(k)
            .ok_or_else(|| ReinforceError::RecordKeyError(k.to_string()))
    }

    /// Gets a scalar value.
    pub fn get_scalar(&self, k: &str) -> Result<f32, ReinforceError> {
        match self.lookup(k)? {
            RecordValue::Scalar(v) => Ok(*v),
            _ => Err(ReinforceError::RecordValueTypeError("Scalar".to_string())),
        }
    }

    /// Gets a 1-dimensional array.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, ReinforceError> {
        match self.lookup(k)? {
            RecordValue::Array1(v) => Ok(v.clone()),
            _ => Err(ReinforceError::RecordValueTypeError("Array1".to_string())),
        }
    }

    /// Gets a string value.
    pub fn get_string(&self, k: &str) -> Result<String, ReinforceError> {
        match self.lookup(k)? {
            RecordValue::String(s) => Ok(s.clone()),
            _ => Err(ReinforceError::RecordValueTypeError("String".to_string())),
        }
    }

    /// Returns `true` if the record has no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the scalar value of a record holding exactly one value.
    pub fn get_scalar_without_key(&self) -> Option<f32> {
        if self.0.len() != 1 {
            return None;
        }
        match self.0.values().next() {
            Some(RecordValue::Scalar(value)) => Some(*value),
            _ => None,
        }
    }
}
