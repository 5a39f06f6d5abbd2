//! Shared building blocks: the value model, ordering helpers and the serialization contract.

mod comparison;
mod serializable;
mod sort_flag;
mod sort_order;
mod util;
mod value;

pub use comparison::*;
pub use serializable::*;
pub use sort_flag::*;
pub use sort_order::*;
pub use util::*;
pub use value::*;
