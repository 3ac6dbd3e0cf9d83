//! Scalar value types

mod number;
mod text;

pub use number::Number;
pub use text::Text;
