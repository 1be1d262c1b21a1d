//! Daily hydration requirement
//!
//! `liters = ml_per_kg * weight / 1000 * activity_factor`, rounded to two
//! decimals. Fever and climate are not accounted for.

use crate::config::{ClassifierConfig, HydrationFactors};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Physical activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    #[default]
    Mid,
    High,
}

impl ActivityLevel {
    pub fn factor(&self, factors: &HydrationFactors) -> f64 {
        match self {
            ActivityLevel::Low => factors.low,
            ActivityLevel::Mid => factors.mid,
            ActivityLevel::High => factors.high,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(ActivityLevel::Low),
            "mid" => Ok(ActivityLevel::Mid),
            "high" => Ok(ActivityLevel::High),
            _ => Err(Error::invalid(
                "Activity level must be 'low', 'mid', or 'high'",
            )),
        }
    }
}

/// Daily requirement in liters with the default factors
pub fn daily_hydration_liters(weight_kg: f64, height_m: f64, activity: ActivityLevel) -> Result<f64> {
    HydrationCalculator::default().daily_liters(weight_kg, height_m, activity)
}

/// Hydration calculator
#[derive(Debug, Clone, Default)]
pub struct HydrationCalculator {
    factors: HydrationFactors,
}

impl HydrationCalculator {
    /// Build with custom factors, rejecting non-positive ones
    pub fn new(factors: HydrationFactors) -> Result<Self> {
        factors.validate()?;
        Ok(Self { factors })
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        Self::new(config.hydration.clone())
    }

    /// Height is validated but does not enter the formula.
    pub fn daily_liters(&self, weight_kg: f64, height_m: f64, activity: ActivityLevel) -> Result<f64> {
        if !(weight_kg.is_finite() && weight_kg > 0.0) {
            return Err(Error::invalid("Weight must be a positive number"));
        }
        if !(height_m.is_finite() && height_m > 0.0) {
            return Err(Error::invalid("Height must be a positive number"));
        }

        let base_liters = self.factors.ml_per_kg * weight_kg / 1000.0;
        let liters = round2(base_liters * activity.factor(&self.factors));
        tracing::debug!(weight_kg, activity = ?activity, liters, "hydration computed");
        Ok(liters)
    }
}

/// Two decimals, ties to even
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_parsing_is_case_insensitive() {
        assert_eq!("HIGH".parse::<ActivityLevel>().unwrap(), ActivityLevel::High);
        assert_eq!("Low".parse::<ActivityLevel>().unwrap(), ActivityLevel::Low);
        assert!("extreme".parse::<ActivityLevel>().is_err());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.1), 2.1);
        assert_eq!(round2(1.8899999), 1.89);
        assert_eq!(round2(1.125), 1.12);
        assert_eq!(round2(1.375), 1.38);
    }

    #[test]
    fn test_zero_factor_rejected() {
        let factors = HydrationFactors {
            high: 0.0,
            ..HydrationFactors::default()
        };
        assert!(matches!(
            HydrationCalculator::new(factors),
            Err(Error::Config(_))
        ));
    }
}
