use crate::error::RuleError;
use crate::validation::ValidationErrors;

/// Outcome of one side of an [`either`] rule. A check whose option was not
/// configured carries no outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    field: String,
    outcome: Option<Result<(), RuleError>>,
}

impl Check {
    /// A configured check with its result.
    pub fn ran(field: impl Into<String>, outcome: Result<(), RuleError>) -> Self {
        Self {
            field: field.into(),
            outcome: Some(outcome),
        }
    }

    /// A check whose option is unset.
    pub fn skipped(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            outcome: None,
        }
    }

    /// Run `rule` only when `option` is set.
    pub fn when<T>(
        field: impl Into<String>,
        option: Option<T>,
        rule: impl FnOnce(T) -> Result<(), RuleError>,
    ) -> Self {
        Self {
            field: field.into(),
            outcome: option.map(rule),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

/// At least one of two alternative checks must pass.
///
/// If only one side is configured its result decides alone; if neither is,
/// nothing fails. When both are configured and both fail, both failures are
/// reported under their own fields.
pub fn either(first: Check, second: Check) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match (first.outcome, second.outcome) {
        (None, None) => {}
        (Some(outcome), None) => errors.check(first.field, outcome),
        (None, Some(outcome)) => errors.check(second.field, outcome),
        (Some(Err(a)), Some(Err(b))) => {
            tracing::debug!(
                first = %first.field,
                second = %second.field,
                "both alternatives failed"
            );
            errors.insert(first.field, a);
            errors.insert(second.field, b);
        }
        (Some(_), Some(_)) => {}
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "pub_signals/identity_counter_upper_bound";
    const B: &str = "pub_signals/timestamp_upper_bound";

    fn pass(field: &str) -> Check {
        Check::ran(field, Ok(()))
    }

    fn fail(field: &str) -> Check {
        Check::ran(field, Err(RuleError::AboveMax("10".into())))
    }

    #[test]
    fn test_truth_table() {
        assert!(either(pass(A), pass(B)).is_empty());
        assert!(either(pass(A), fail(B)).is_empty());
        assert!(either(fail(A), pass(B)).is_empty());

        let both = either(fail(A), fail(B));
        assert_eq!(both.len(), 2);
        assert!(both.contains(A));
        assert!(both.contains(B));
    }

    #[test]
    fn test_single_side_is_authoritative() {
        let errs = either(fail(A), Check::skipped(B));
        assert_eq!(errs.fields().collect::<Vec<_>>(), vec![A]);

        let errs = either(Check::skipped(A), fail(B));
        assert_eq!(errs.fields().collect::<Vec<_>>(), vec![B]);

        assert!(either(pass(A), Check::skipped(B)).is_empty());
    }

    #[test]
    fn test_nothing_configured() {
        assert!(either(Check::skipped(A), Check::skipped(B)).is_empty());
    }

    #[test]
    fn test_when() {
        let unset: Option<i64> = None;
        let check = Check::when(A, unset, |_| Err(RuleError::Required));
        assert_eq!(check, Check::skipped(A));

        let check = Check::when(A, Some(3i64), |v| {
            if v > 2 {
                Err(RuleError::AboveMax("2".into()))
            } else {
                Ok(())
            }
        });
        assert_eq!(check.field(), A);
        assert!(!either(check, Check::skipped(B)).is_empty());
    }
}
