//! Expected-value spec parsing.
//!
//! A spec is the text a test author writes in an expected-value cell. It is
//! classified into one comparison form before anything is evaluated.

mod operator;
mod parser;

pub use operator::{BoundOp, RelationalOp};
pub use parser::{ExpectedSpec, NumericLiteral};
