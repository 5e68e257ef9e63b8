//! Order resolution policy configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Order resolution configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OrderConfig {
    /// What to do when the customer reference cannot be resolved
    #[serde(default)]
    pub on_unresolved_customer: UnresolvedCustomerAction,

    /// Card code substituted when the action is `use_default`
    pub default_card_code: Option<String>,
}

/// Named policy for unresolved customers.
///
/// Substituting a fallback customer is an explicit configuration choice,
/// never an implicit behavior. `fail` is the default.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedCustomerAction {
    /// Fail the whole request with a customer-not-found reply
    #[default]
    Fail,
    /// Substitute the configured default card code
    UseDefault,
}

impl OrderConfig {
    /// Validate order configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.on_unresolved_customer == UnresolvedCustomerAction::UseDefault
            && self.default_card_code.as_ref().map_or(true, |c| c.is_empty())
        {
            return Err(ValidationError::MissingDefaultCardCode);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_fail() {
        let config = OrderConfig::default();
        assert_eq!(config.on_unresolved_customer, UnresolvedCustomerAction::Fail);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_use_default_requires_card_code() {
        let config = OrderConfig {
            on_unresolved_customer: UnresolvedCustomerAction::UseDefault,
            default_card_code: None,
        };
        assert_eq!(config.validate(), Err(ValidationError::MissingDefaultCardCode));

        let config = OrderConfig {
            on_unresolved_customer: UnresolvedCustomerAction::UseDefault,
            default_card_code: Some("C0001".to_string()),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_card_code_rejected() {
        let config = OrderConfig {
            on_unresolved_customer: UnresolvedCustomerAction::UseDefault,
            default_card_code: Some(String::new()),
        };
        assert!(config.validate().is_err());
    }
}
