use std::collections::BTreeMap;
use std::fmt;

use crate::error::RuleError;

/// Rule failures of one proof, keyed by field path
/// (e.g. `pub_signals/citizenship`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, RuleError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, error: RuleError) {
        self.errors.insert(field.into(), error);
    }

    /// Record the outcome of a rule: failures are kept, passes are dropped.
    pub fn check(&mut self, field: impl Into<String>, outcome: Result<(), RuleError>) {
        if let Err(e) = outcome {
            self.insert(field, e);
        }
    }

    /// Move all failures of `other` into this set.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Failure recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&RuleError> {
        self.errors.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing field paths in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleError)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `Ok(())` when nothing failed, otherwise the whole set.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl FromIterator<(String, RuleError)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (String, RuleError)>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}
