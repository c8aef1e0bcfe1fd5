//! Seqgen Script - RON definitions for sequence generators
//!
//! Describes generators declaratively and builds them on demand:
//! - `GeneratorDef` - Configuration fields plus a serializable rule
//! - `RuleDef` - None, constant increment, or expression rule
//! - `Loader` - Parses RON documents holding one or many definitions
//!
//! ```
//! use seqgen_script::Loader;
//!
//! let mut loader = Loader::new();
//! loader
//!     .load_str(r#"(id: "squares", rule: Expr(Mul(Var(Index), Var(Index))))"#)
//!     .unwrap();
//!
//! let defs = loader.finish();
//! let squares = defs.build("squares").unwrap();
//! assert_eq!(squares.to_sequence(5), vec![1.0, 4.0, 9.0, 16.0, 25.0]);
//! ```

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use loader::{GeneratorDefs, Loader};
pub use schema::{GeneratorDef, GeneratorDefList, RuleDef};
