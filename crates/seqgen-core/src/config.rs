//! Generator configuration
//!
//! All fields are optional in spirit: `GeneratorConfig::default()` gives a
//! generator that yields `0.0` forever, and the `with_*` builders override
//! one field at a time.

use crate::error::{Error, Result};
use crate::rule::ValueChange;
use crate::time::Millis;

/// Configuration for a `SequenceGenerator`
///
/// # Example
///
/// ```
/// use seqgen_core::{GeneratorConfig, SequenceGenerator};
///
/// let config = GeneratorConfig::new()
///     .with_start_value(0.0)
///     .with_value_change(2.0);
/// let mut evens = SequenceGenerator::new(config);
/// assert_eq!(evens.step_many(5), vec![2.0, 4.0, 6.0, 8.0, 10.0]);
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Multiplier applied to the value to produce each item
    pub factor: f64,
    /// Initial value, and the value restored by resets
    pub start_value: f64,
    /// Upper bound for the value
    pub max_value: f64,
    /// Snap back to `start_value` instead of clamping at `max_value`
    pub reset_value_on_max: bool,
    /// How the value evolves each step
    pub value_change: ValueChange,
    /// Hand the generator itself to function rules
    pub pass_self_to_changer: bool,
    /// Longest gap between steps for which the rule is still applied
    ///
    /// `None` means no limit.
    pub value_change_period: Option<Millis>,
    /// Longest gap between steps for which the value is kept at all
    ///
    /// `None` means no limit.
    pub value_save_period: Option<Millis>,
}

impl GeneratorConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    pub fn with_start_value(mut self, start_value: f64) -> Self {
        self.start_value = start_value;
        self
    }

    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = max_value;
        self
    }

    pub fn with_reset_value_on_max(mut self, reset: bool) -> Self {
        self.reset_value_on_max = reset;
        self
    }

    /// Set the update rule; a plain `f64` becomes a constant increment
    pub fn with_value_change(mut self, rule: impl Into<ValueChange>) -> Self {
        self.value_change = rule.into();
        self
    }

    pub fn with_pass_self_to_changer(mut self, pass: bool) -> Self {
        self.pass_self_to_changer = pass;
        self
    }

    pub fn with_value_change_period(mut self, period: Option<Millis>) -> Self {
        self.value_change_period = period;
        self
    }

    pub fn with_value_save_period(mut self, period: Option<Millis>) -> Self {
        self.value_save_period = period;
        self
    }

    /// Set the change period from signed milliseconds; negative disables it
    pub fn with_value_change_period_ms(self, ms: i64) -> Self {
        self.with_value_change_period(period_from_signed(ms))
    }

    /// Set the save period from signed milliseconds; negative disables it
    pub fn with_value_save_period_ms(self, ms: i64) -> Self {
        self.with_value_save_period(period_from_signed(ms))
    }

    /// Check the numeric fields
    ///
    /// Generators accept any configuration and simply produce NaN or
    /// infinities from bad input. Call this when that is not acceptable.
    pub fn validate(&self) -> Result<()> {
        if !self.factor.is_finite() {
            return Err(Error::invalid_configuration(
                "factor",
                format!("must be finite, got {}", self.factor),
            ));
        }
        if !self.start_value.is_finite() {
            return Err(Error::invalid_configuration(
                "start_value",
                format!("must be finite, got {}", self.start_value),
            ));
        }
        if self.max_value.is_nan() {
            return Err(Error::invalid_configuration("max_value", "must not be NaN"));
        }
        if self.start_value > self.max_value {
            return Err(Error::invalid_configuration(
                "start_value",
                format!(
                    "{} exceeds max_value {}",
                    self.start_value, self.max_value
                ),
            ));
        }
        if let ValueChange::Constant(delta) = self.value_change {
            if !delta.is_finite() {
                return Err(Error::invalid_configuration(
                    "value_change",
                    format!("constant increment must be finite, got {}", delta),
                ));
            }
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            factor: 1.0,
            start_value: 0.0,
            max_value: f64::MAX,
            reset_value_on_max: false,
            value_change: ValueChange::None,
            pass_self_to_changer: false,
            value_change_period: None,
            value_save_period: None,
        }
    }
}

/// Map a signed millisecond count to a period, negative meaning "no limit"
pub fn period_from_signed(ms: i64) -> Option<Millis> {
    u64::try_from(ms).ok()
}
