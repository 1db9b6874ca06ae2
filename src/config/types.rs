//! Configuration types for the estate payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_CHANGE_PRECISION;

/// Metadata about the estate.
#[derive(Debug, Clone, Deserialize)]
pub struct EstateMetadata {
    /// Short code identifying the estate (e.g., "GLENMORE").
    pub code: String,
    /// The human-readable name of the estate.
    pub name: String,
    /// ISO currency code all amounts are expressed in.
    pub currency: String,
}

/// Which components make up a period's expenses.
///
/// Expenses are `total_earned`, plus bonuses when `include_bonuses` is set,
/// minus advances when `deduct_advances` is set.
///
/// # Example
///
/// ```
/// use tea_payroll_engine::config::RollupPolicy;
///
/// let policy = RollupPolicy::default();
/// assert!(policy.include_bonuses);
/// assert!(policy.deduct_advances);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupPolicy {
    /// Add bonuses paid for the period to expenses.
    #[serde(default = "enabled")]
    pub include_bonuses: bool,
    /// Subtract advances paid in the period from expenses.
    #[serde(default = "enabled")]
    pub deduct_advances: bool,
}

impl Default for RollupPolicy {
    fn default() -> Self {
        Self {
            include_bonuses: true,
            deduct_advances: true,
        }
    }
}

fn enabled() -> bool {
    true
}

fn default_change_precision() -> u32 {
    DEFAULT_CHANGE_PRECISION
}

/// Policy configuration from policy.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Expense rule for financial rollups.
    #[serde(default)]
    pub rollup: RollupPolicy,
    /// Warn about entries that carry no explicit advance flag.
    #[serde(default)]
    pub strict_classification: bool,
    /// Decimal places kept on percentage changes.
    #[serde(default = "default_change_precision")]
    pub change_precision: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            rollup: RollupPolicy::default(),
            strict_classification: false,
            change_precision: default_change_precision(),
        }
    }
}

/// Standard plucking rate effective from a given date.
#[derive(Debug, Clone, Deserialize)]
pub struct RateConfig {
    /// The effective date for this rate.
    pub effective_date: NaiveDate,
    /// Price paid per kilogram of green leaf.
    pub plucking_rate_per_kg: Decimal,
}

/// The complete estate configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EstateConfig {
    metadata: EstateMetadata,
    policy: PolicyConfig,
    /// Rate configurations by effective date (sorted oldest first).
    rates: Vec<RateConfig>,
}

impl EstateConfig {
    /// Creates a new EstateConfig from its component parts.
    pub fn new(metadata: EstateMetadata, policy: PolicyConfig, rates: Vec<RateConfig>) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            policy,
            rates: sorted_rates,
        }
    }

    /// Returns the estate metadata.
    pub fn estate(&self) -> &EstateMetadata {
        &self.metadata
    }

    /// Returns the policy configuration.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Returns all rate configurations.
    pub fn rates(&self) -> &[RateConfig] {
        &self.rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_fields_default_when_omitted() {
        let policy: PolicyConfig = serde_yaml::from_str("rollup: {}").unwrap();
        assert_eq!(policy.rollup, RollupPolicy::default());
        assert!(!policy.strict_classification);
        assert_eq!(policy.change_precision, 2);
    }

    #[test]
    fn test_rollup_policy_partial_override() {
        let policy: RollupPolicy = serde_yaml::from_str("deduct_advances: false").unwrap();
        assert!(policy.include_bonuses);
        assert!(!policy.deduct_advances);
    }

    #[test]
    fn test_rates_sorted_oldest_first() {
        let metadata = EstateMetadata {
            code: "TEST".to_string(),
            name: "Test Estate".to_string(),
            currency: "LKR".to_string(),
        };
        let rates = vec![
            RateConfig {
                effective_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                plucking_rate_per_kg: Decimal::from(160),
            },
            RateConfig {
                effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                plucking_rate_per_kg: Decimal::from(150),
            },
        ];

        let config = EstateConfig::new(metadata, PolicyConfig::default(), rates);
        assert_eq!(
            config.rates()[0].effective_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
    }
}
