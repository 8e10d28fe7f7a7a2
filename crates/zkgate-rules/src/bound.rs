use std::fmt::Display;

use crate::error::RuleError;

/// Parse an integer signal (counters and unix timestamps).
pub fn parse_integer(value: &str) -> Result<i64, RuleError> {
    value
        .parse::<i64>()
        .map_err(|e| RuleError::InvalidInteger(format!("{:?}: {}", value, e)))
}

/// Inclusive upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxBound<T> {
    max: T,
}

impl<T: PartialOrd + Display> MaxBound<T> {
    pub fn new(max: T) -> Self {
        Self { max }
    }

    pub fn validate(&self, value: &T) -> Result<(), RuleError> {
        if *value > self.max {
            Err(RuleError::AboveMax(self.max.to_string()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("1713436478").unwrap(), 1713436478);
        assert!(matches!(parse_integer(""), Err(RuleError::InvalidInteger(_))));
        assert!(matches!(
            parse_integer("99999999999999999999"),
            Err(RuleError::InvalidInteger(_))
        ));
    }

    #[test]
    fn test_bound_inclusive() {
        let rule = MaxBound::new(10i64);
        assert!(rule.validate(&10).is_ok());
        assert!(rule.validate(&0).is_ok());
        assert_eq!(rule.validate(&11), Err(RuleError::AboveMax("10".into())));
    }

    #[test]
    fn test_bound_on_time() {
        let max = Utc.timestamp_opt(1684839455, 0).unwrap();
        let rule = MaxBound::new(max);
        assert!(rule.validate(&Utc.timestamp_opt(1684839455, 0).unwrap()).is_ok());
        let err = rule
            .validate(&Utc.timestamp_opt(1713436478, 0).unwrap())
            .unwrap_err();
        assert_eq!(err.to_string(), "must be no greater than 2023-05-23 10:57:35 UTC");
    }
}
