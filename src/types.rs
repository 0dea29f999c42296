//! Newtype wrappers for state keys and discrete feature values.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// A small discrete feature value produced by a state encoder.
///
/// Feature records only ever hold small integers (bucketed positions,
/// distances, counters) or flags, so two variants cover every encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeatureValue {
    Int(i64),
    Bool(bool),
}

impl FeatureValue {
    /// View the value as an integer (`false` → 0, `true` → 1).
    pub fn as_int(&self) -> i64 {
        match self {
            FeatureValue::Int(v) => *v,
            FeatureValue::Bool(b) => i64::from(*b),
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{v}"),
            FeatureValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Int(v)
    }
}

impl From<bool> for FeatureValue {
    fn from(b: bool) -> Self {
        FeatureValue::Bool(b)
    }
}

/// Deterministic, order-independent encoding of a feature record.
///
/// Backed by a [`BTreeMap`] so that two records with the same fields compare
/// equal (and hash equal) regardless of the order the fields were inserted.
/// The derived `Ord` gives every key a total order, which the approximator
/// uses as a deterministic tie-break.
///
/// # Examples
///
/// ```
/// use muncher::types::StateKey;
///
/// let mut a = StateKey::new();
/// a.set("px", 3);
/// a.set("py", 7);
///
/// let mut b = StateKey::new();
/// b.set("py", 7);
/// b.set("px", 3);
///
/// assert_eq!(a, b);
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct StateKey(BTreeMap<String, FeatureValue>);

impl StateKey {
    /// Create an empty key.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert or replace a feature field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FeatureValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`StateKey::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.0.get(name).copied()
    }

    /// Integer view of a field, defaulting to 0 when the field is absent.
    ///
    /// Distance functions use this so that keys produced by older encoder
    /// revisions still compare without panicking.
    pub fn int(&self, name: &str) -> i64 {
        self.get(name).map(|v| v.as_int()).unwrap_or(0)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.0 {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromIterator<(String, FeatureValue)> for StateKey {
    fn from_iter<I: IntoIterator<Item = (String, FeatureValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
