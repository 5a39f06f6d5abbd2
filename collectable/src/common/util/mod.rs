mod natural;
mod shared;

pub use natural::*;
pub use shared::*;
