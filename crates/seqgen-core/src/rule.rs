//! Update rules
//!
//! A rule decides how the generator's internal value evolves on each step.

use crate::expr::Expr;
use crate::generator::SequenceGenerator;
use crate::value::{Value, ValueMap};
use std::fmt;
use std::sync::Arc;

/// A function rule: receives the step context, returns the new value
pub type RuleFn = Arc<dyn Fn(&mut UpdateContext<'_>) -> f64 + Send + Sync>;

/// How the internal value changes on each step
#[derive(Clone, Default)]
pub enum ValueChange {
    /// Value stays constant
    #[default]
    None,
    /// Value is incremented by this amount
    Constant(f64),
    /// Value is computed by a function of the step context
    Function(RuleFn),
}

impl ValueChange {
    /// Wrap a closure as a function rule
    ///
    /// ```
    /// use seqgen_core::{GeneratorConfig, SequenceGenerator, ValueChange};
    ///
    /// let config = GeneratorConfig::new()
    ///     .with_value_change(ValueChange::function(|ctx| (ctx.index * ctx.index) as f64));
    /// let mut squares = SequenceGenerator::new(config);
    /// assert_eq!(squares.step_many(4), vec![1.0, 4.0, 9.0, 16.0]);
    /// ```
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&mut UpdateContext<'_>) -> f64 + Send + Sync + 'static,
    {
        ValueChange::Function(Arc::new(f))
    }

    /// Use an expression tree as a function rule
    pub fn from_expr(expr: Expr) -> Self {
        ValueChange::function(move |ctx| expr.eval(ctx))
    }

    /// Check if this rule never changes the value
    pub fn is_none(&self) -> bool {
        matches!(self, ValueChange::None)
    }
}

impl fmt::Debug for ValueChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueChange::None => write!(f, "None"),
            ValueChange::Constant(delta) => f.debug_tuple("Constant").field(delta).finish(),
            ValueChange::Function(_) => write!(f, "Function(..)"),
        }
    }
}

impl From<f64> for ValueChange {
    fn from(delta: f64) -> Self {
        ValueChange::Constant(delta)
    }
}

impl From<Expr> for ValueChange {
    fn from(expr: Expr) -> Self {
        ValueChange::from_expr(expr)
    }
}

/// Everything a function rule can see while computing the next value
///
/// `index` is already incremented for the step being computed; `prev`
/// and `current` are the items produced before this step.
pub struct UpdateContext<'a> {
    pub index: u64,
    pub value: f64,
    pub start_value: f64,
    pub max_value: f64,
    pub factor: f64,
    pub prev: Option<f64>,
    pub current: f64,
    /// Scratch storage that persists across steps until reset
    pub aux: &'a mut ValueMap,
    /// The generator itself, only when `pass_self_to_changer` is set
    ///
    /// Its aux slot is lent out as `aux` for the duration of the call.
    pub generator: Option<&'a SequenceGenerator>,
}

impl UpdateContext<'_> {
    /// Read a numeric aux entry
    pub fn aux_f64(&self, key: &str) -> Option<f64> {
        self.aux.get(key).and_then(Value::as_float)
    }

    /// Store an aux entry, returning the previous one
    pub fn set_aux(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.aux.insert(key.into(), value.into())
    }
}

impl fmt::Debug for UpdateContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateContext")
            .field("index", &self.index)
            .field("value", &self.value)
            .field("start_value", &self.start_value)
            .field("max_value", &self.max_value)
            .field("factor", &self.factor)
            .field("prev", &self.prev)
            .field("current", &self.current)
            .field("aux", &self.aux)
            .field("has_generator", &self.generator.is_some())
            .finish()
    }
}
