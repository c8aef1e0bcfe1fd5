//! Generator definition schema

use seqgen_core::{period_from_signed, Expr, GeneratorConfig, ValueChange};
use serde::{Deserialize, Serialize};

/// Serializable form of an update rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum RuleDef {
    /// Value stays constant
    #[default]
    None,
    /// Value is incremented by this amount each step
    Constant(f64),
    /// Value is computed by an expression
    Expr(Expr),
}

impl RuleDef {
    /// Build the runtime rule
    pub fn to_value_change(&self) -> ValueChange {
        match self {
            RuleDef::None => ValueChange::None,
            RuleDef::Constant(delta) => ValueChange::Constant(*delta),
            RuleDef::Expr(expr) => ValueChange::from_expr(expr.clone()),
        }
    }
}

/// Definition of a named generator
///
/// Periods are signed milliseconds; any negative value means no limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorDef {
    /// Unique identifier for this generator
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_factor")]
    pub factor: f64,
    #[serde(default)]
    pub start_value: f64,
    #[serde(default = "default_max_value")]
    pub max_value: f64,
    #[serde(default)]
    pub reset_value_on_max: bool,
    #[serde(default)]
    pub rule: RuleDef,
    #[serde(default)]
    pub pass_self_to_changer: bool,
    #[serde(default = "no_period")]
    pub value_change_period: i64,
    #[serde(default = "no_period")]
    pub value_save_period: i64,
}

fn default_factor() -> f64 {
    1.0
}

fn default_max_value() -> f64 {
    f64::MAX
}

fn no_period() -> i64 {
    -1
}

impl GeneratorDef {
    /// Create a definition with default settings
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            factor: default_factor(),
            start_value: 0.0,
            max_value: default_max_value(),
            reset_value_on_max: false,
            rule: RuleDef::None,
            pass_self_to_changer: false,
            value_change_period: no_period(),
            value_save_period: no_period(),
        }
    }

    /// Translate into a runtime configuration
    pub fn to_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            factor: self.factor,
            start_value: self.start_value,
            max_value: self.max_value,
            reset_value_on_max: self.reset_value_on_max,
            value_change: self.rule.to_value_change(),
            pass_self_to_changer: self.pass_self_to_changer,
            value_change_period: period_from_signed(self.value_change_period),
            value_save_period: period_from_signed(self.value_save_period),
        }
    }
}

/// A collection of generator definitions
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneratorDefList {
    pub generators: Vec<GeneratorDef>,
}
