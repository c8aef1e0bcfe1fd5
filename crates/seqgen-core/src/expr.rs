//! Expression rules
//!
//! A small numeric expression tree that can be written in RON and
//! evaluated against an `UpdateContext`. It lets declarative definitions
//! express the same rules a closure would (squares, alternating signs,
//! recurrences).
//!
//! Everything evaluates to `f64`. Booleans are `1.0`/`0.0`, and a value
//! is truthy when it is non-zero and not NaN. Missing inputs (no `prev`
//! yet, unknown aux key) read as NaN unless a default is supplied.

use crate::rule::UpdateContext;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A context variable readable from an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Var {
    Index,
    Value,
    StartValue,
    MaxValue,
    Factor,
    Prev,
    Current,
}

/// A numeric expression over the step context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    // === Operands ===
    /// A literal number
    Lit(f64),
    /// A context variable
    Var(Var),
    /// `prev`, or the given default before a second item exists
    PrevOr(Box<Expr>),
    /// A numeric aux entry
    Aux(String),
    /// A numeric aux entry with a default when missing
    AuxOr(String, Box<Expr>),
    /// Store the result in aux under the key, and yield it
    SetAux(String, Box<Expr>),

    // === Arithmetic ===
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Mod(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Abs(Box<Expr>),
    Min(Box<Expr>, Box<Expr>),
    Max(Box<Expr>, Box<Expr>),
    /// Clamp value between min and max
    Clamp(Box<Expr>, Box<Expr>, Box<Expr>),
    Floor(Box<Expr>),
    Ceil(Box<Expr>),
    Round(Box<Expr>),

    // === Comparison ===
    Eq(Box<Expr>, Box<Expr>),
    Ne(Box<Expr>, Box<Expr>),
    Lt(Box<Expr>, Box<Expr>),
    Le(Box<Expr>, Box<Expr>),
    Gt(Box<Expr>, Box<Expr>),
    Ge(Box<Expr>, Box<Expr>),

    // === Logical ===
    /// All must be truthy (short-circuits)
    And(Vec<Expr>),
    /// At least one must be truthy (short-circuits)
    Or(Vec<Expr>),
    Not(Box<Expr>),

    /// If-then-else; only the taken branch is evaluated
    If(Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn lit(value: f64) -> Self {
        Expr::Lit(value)
    }

    pub fn var(var: Var) -> Self {
        Expr::Var(var)
    }

    pub fn add(a: Expr, b: Expr) -> Self {
        Expr::Add(Box::new(a), Box::new(b))
    }

    pub fn mul(a: Expr, b: Expr) -> Self {
        Expr::Mul(Box::new(a), Box::new(b))
    }

    pub fn gt(a: Expr, b: Expr) -> Self {
        Expr::Gt(Box::new(a), Box::new(b))
    }

    pub fn if_else(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::If(Box::new(cond), Box::new(then), Box::new(otherwise))
    }

    /// Evaluate this expression against a step context
    pub fn eval(&self, ctx: &mut UpdateContext<'_>) -> f64 {
        match self {
            Expr::Lit(v) => *v,
            Expr::Var(var) => read_var(ctx, *var),
            Expr::PrevOr(default) => match ctx.prev {
                Some(prev) => prev,
                None => default.eval(ctx),
            },
            Expr::Aux(key) => ctx.aux_f64(key).unwrap_or(f64::NAN),
            Expr::AuxOr(key, default) => match ctx.aux_f64(key) {
                Some(v) => v,
                None => default.eval(ctx),
            },
            Expr::SetAux(key, expr) => {
                let v = expr.eval(ctx);
                ctx.aux.insert(key.clone(), Value::Float(v));
                v
            }

            Expr::Add(a, b) => binary(ctx, a, b, |x, y| x + y),
            Expr::Sub(a, b) => binary(ctx, a, b, |x, y| x - y),
            Expr::Mul(a, b) => binary(ctx, a, b, |x, y| x * y),
            Expr::Div(a, b) => binary(ctx, a, b, |x, y| x / y),
            Expr::Mod(a, b) => binary(ctx, a, b, |x, y| x % y),
            Expr::Pow(a, b) => binary(ctx, a, b, f64::powf),
            Expr::Neg(a) => -a.eval(ctx),
            Expr::Abs(a) => a.eval(ctx).abs(),
            Expr::Min(a, b) => binary(ctx, a, b, f64::min),
            Expr::Max(a, b) => binary(ctx, a, b, f64::max),
            Expr::Clamp(val, min, max) => {
                let v = val.eval(ctx);
                let lo = min.eval(ctx);
                let hi = max.eval(ctx);
                // f64::clamp panics on lo > hi or NaN bounds
                if lo <= hi {
                    v.max(lo).min(hi)
                } else {
                    f64::NAN
                }
            }
            Expr::Floor(a) => a.eval(ctx).floor(),
            Expr::Ceil(a) => a.eval(ctx).ceil(),
            Expr::Round(a) => a.eval(ctx).round(),

            Expr::Eq(a, b) => binary(ctx, a, b, |x, y| flag(x == y)),
            Expr::Ne(a, b) => binary(ctx, a, b, |x, y| flag(x != y)),
            Expr::Lt(a, b) => binary(ctx, a, b, |x, y| flag(x < y)),
            Expr::Le(a, b) => binary(ctx, a, b, |x, y| flag(x <= y)),
            Expr::Gt(a, b) => binary(ctx, a, b, |x, y| flag(x > y)),
            Expr::Ge(a, b) => binary(ctx, a, b, |x, y| flag(x >= y)),

            Expr::And(exprs) => {
                for expr in exprs {
                    if !truthy(expr.eval(ctx)) {
                        return 0.0;
                    }
                }
                1.0
            }
            Expr::Or(exprs) => {
                for expr in exprs {
                    if truthy(expr.eval(ctx)) {
                        return 1.0;
                    }
                }
                0.0
            }
            Expr::Not(a) => flag(!truthy(a.eval(ctx))),

            Expr::If(cond, then, otherwise) => {
                if truthy(cond.eval(ctx)) {
                    then.eval(ctx)
                } else {
                    otherwise.eval(ctx)
                }
            }
        }
    }
}

fn read_var(ctx: &UpdateContext<'_>, var: Var) -> f64 {
    match var {
        Var::Index => ctx.index as f64,
        Var::Value => ctx.value,
        Var::StartValue => ctx.start_value,
        Var::MaxValue => ctx.max_value,
        Var::Factor => ctx.factor,
        Var::Prev => ctx.prev.unwrap_or(f64::NAN),
        Var::Current => ctx.current,
    }
}

fn binary(
    ctx: &mut UpdateContext<'_>,
    a: &Expr,
    b: &Expr,
    op: impl FnOnce(f64, f64) -> f64,
) -> f64 {
    let x = a.eval(ctx);
    let y = b.eval(ctx);
    op(x, y)
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn truthy(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}
