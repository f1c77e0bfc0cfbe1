//! Variable bindings supplied by the caller.

use hashbrown::HashMap;

use crate::values::Value;

/// Immutable-by-convention mapping from variable names to values.
///
/// Evaluation never writes to the environment; it works on a copy that also
/// binds the boolean literals `true` and `false`.
///
/// # Example
///
/// ```
/// use ceval_core::api::Environment;
/// use ceval_core::values::Value;
///
/// let env = Environment::new()
///     .with("x", 1)
///     .with("rate", 0.25)
///     .with("scores", vec![1i64, 2, 3]);
///
/// assert_eq!(env.get("x"), Some(&Value::Integer(1)));
/// assert_eq!(env.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind `name`, returning the value it was previously bound to.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.bindings.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Copy of this environment with `true` and `false` bound to their
    /// boolean values. The literals win over caller bindings of those names.
    pub(crate) fn with_literals(&self) -> Environment {
        let mut augmented = self.clone();
        augmented.insert("true", true);
        augmented.insert("false", false);
        augmented
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Environment::new();
        env.extend(iter);
        env
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Environment {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}
