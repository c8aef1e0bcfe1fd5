//! Seqgen Core - Stateful numeric sequence generator
//!
//! This crate provides a single generator type and the pieces it is
//! configured with:
//! - `SequenceGenerator` - Yields `factor * value` on each step
//! - `GeneratorConfig` - Multiplier, start and max values, periods
//! - `ValueChange` - Update rule: none, constant increment, or function
//! - `Expr` - Serializable expression rules for declarative definitions
//! - `TimeSource` - Clock abstraction behind the period gating
//!
//! ## Example
//!
//! ```
//! use seqgen_core::{GeneratorConfig, SequenceGenerator};
//!
//! let config = GeneratorConfig::new()
//!     .with_start_value(0.0)
//!     .with_max_value(3.0)
//!     .with_reset_value_on_max(true)
//!     .with_value_change(1.0);
//! let mut counter = SequenceGenerator::new(config);
//!
//! assert_eq!(counter.step_many(6), vec![1.0, 2.0, 0.0, 1.0, 2.0, 0.0]);
//! ```

mod config;
mod error;
pub mod expr;
mod generator;
mod rule;
pub mod time;
mod value;

pub use config::{period_from_signed, GeneratorConfig};
pub use error::{Error, Result};
pub use expr::{Expr, Var};
pub use generator::SequenceGenerator;
pub use rule::{RuleFn, UpdateContext, ValueChange};
pub use time::{ManualClock, Millis, SystemClock, TimeSource};
pub use value::{Value, ValueMap};
