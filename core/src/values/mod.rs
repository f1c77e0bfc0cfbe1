mod literal;
mod value;

pub use literal::LiteralError;
pub use value::{Array, ElementType, Value, ValueType};
