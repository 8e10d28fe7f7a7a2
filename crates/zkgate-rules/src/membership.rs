use crate::error::RuleError;

/// Accepts a value found in a fixed set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    allowed: Vec<String>,
}

impl Membership {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Accepted values.
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// An empty set accepts nothing; callers skip the rule instead.
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn validate(&self, value: &str) -> Result<(), RuleError> {
        if value.is_empty() {
            return Err(RuleError::Required);
        }
        if self.allowed.iter().any(|a| a == value) {
            Ok(())
        } else {
            Err(RuleError::NotAllowed)
        }
    }
}
